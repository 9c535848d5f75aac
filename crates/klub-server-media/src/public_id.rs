// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Public ID extraction from media host delivery URLs.
//!
//! Delivery URLs look like
//! `https://media.example.com/klub/image/upload/v1712345678/cars/golf-gti.jpg`.
//! The public ID is everything after the `upload` segment and the optional
//! `v<digits>` version segment, with the file extension stripped:
//! `cars/golf-gti`.

/// Extracts the media host public ID from a delivery URL.
///
/// Returns `None` for URLs without an `upload` segment, such as images
/// hosted elsewhere. Those are left alone during cleanup.
pub fn extract_public_id(url: &str) -> Option<String> {
	let segments: Vec<&str> = url.split('/').collect();
	let upload_index = segments.iter().position(|segment| *segment == "upload")?;

	let mut start = upload_index + 1;
	if segments.get(start).is_some_and(|segment| is_version_segment(segment)) {
		start += 1;
	}

	if start >= segments.len() {
		return None;
	}

	let joined = segments[start..].join("/");
	if joined.is_empty() {
		return None;
	}

	Some(strip_extension(&joined))
}

/// Version segments are `v` followed by digits only, e.g. `v1712345678`.
fn is_version_segment(segment: &str) -> bool {
	segment.len() > 1
		&& segment.starts_with('v')
		&& segment[1..].bytes().all(|byte| byte.is_ascii_digit())
}

/// Strips the file extension from the last path segment, leaving folder
/// names with dots intact.
fn strip_extension(public_id: &str) -> String {
	let last_slash = public_id.rfind('/').map(|index| index + 1).unwrap_or(0);
	match public_id[last_slash..].rfind('.') {
		Some(dot) if dot > 0 => public_id[..last_slash + dot].to_string(),
		_ => public_id.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extracts_id_with_version_segment() {
		let url = "https://media.example.com/klub/image/upload/v1712345678/cars/golf-gti.jpg";
		assert_eq!(extract_public_id(url).as_deref(), Some("cars/golf-gti"));
	}

	#[test]
	fn extracts_id_without_version_segment() {
		let url = "https://media.example.com/klub/image/upload/cars/golf-gti.png";
		assert_eq!(extract_public_id(url).as_deref(), Some("cars/golf-gti"));
	}

	#[test]
	fn keeps_nested_folders_in_the_id() {
		let url = "https://media.example.com/upload/v1/users/42/cars/bmw-e30.webp";
		assert_eq!(extract_public_id(url).as_deref(), Some("users/42/cars/bmw-e30"));
	}

	#[test]
	fn version_check_requires_digits_only() {
		// "vintage" is a folder, not a version marker.
		let url = "https://media.example.com/upload/vintage/car.jpg";
		assert_eq!(extract_public_id(url).as_deref(), Some("vintage/car"));
	}

	#[test]
	fn foreign_urls_yield_none() {
		assert_eq!(extract_public_id("https://example.com/images/car.jpg"), None);
		assert_eq!(extract_public_id("not a url"), None);
		assert_eq!(extract_public_id(""), None);
	}

	#[test]
	fn url_ending_at_upload_yields_none() {
		assert_eq!(extract_public_id("https://media.example.com/upload"), None);
		assert_eq!(extract_public_id("https://media.example.com/upload/v123"), None);
	}

	#[test]
	fn dots_in_folder_names_survive() {
		let url = "https://media.example.com/upload/klub.archive/car.jpg";
		assert_eq!(extract_public_id(url).as_deref(), Some("klub.archive/car"));
	}

	#[test]
	fn id_without_extension_passes_through() {
		let url = "https://media.example.com/upload/v9/cars/no-extension";
		assert_eq!(extract_public_id(url).as_deref(), Some("cars/no-extension"));
	}
}
