// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Best-effort image cleanup.
//!
//! When a car is deleted its images are removed from the media host. The
//! listing is already gone at that point, so cleanup never fails the caller;
//! failures are logged and counted instead.

use tracing::{debug, warn};

use crate::host::MediaHost;
use crate::public_id::extract_public_id;

/// Outcome of a cleanup pass over a set of image URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
	/// Images successfully deleted from the media host.
	pub deleted: usize,
	/// Deletions the media host rejected or that failed in transit.
	pub failed: usize,
	/// URLs without a recognizable public ID, left untouched.
	pub skipped: usize,
}

/// Deletes every image in `urls` from the media host.
///
/// URLs that do not carry a media host public ID are skipped. Failures are
/// logged per image; the report carries the counts.
pub async fn delete_images(host: &dyn MediaHost, urls: &[String]) -> CleanupReport {
	let mut report = CleanupReport::default();

	if !host.is_enabled() {
		report.skipped = urls.len();
		if !urls.is_empty() {
			debug!(count = urls.len(), "media host disabled, skipping image cleanup");
		}
		return report;
	}

	let mut public_ids = Vec::new();
	for url in urls {
		match extract_public_id(url) {
			Some(public_id) => public_ids.push(public_id),
			None => {
				debug!(url = %url, "no media host public id in url, skipping");
				report.skipped += 1;
			}
		}
	}

	let results = futures::future::join_all(
		public_ids.iter().map(|public_id| host.delete_image(public_id)),
	)
	.await;

	for (public_id, result) in public_ids.iter().zip(results) {
		match result {
			Ok(()) => report.deleted += 1,
			Err(err) => {
				warn!(public_id = %public_id, error = %err, "failed to delete image from media host");
				report.failed += 1;
			}
		}
	}

	report
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::host::DisabledMediaHost;
	use crate::testing::RecordingMediaHost;

	fn urls(list: &[&str]) -> Vec<String> {
		list.iter().map(|url| url.to_string()).collect()
	}

	#[tokio::test]
	async fn deletes_every_recognized_image() {
		let host = RecordingMediaHost::new();
		let report = delete_images(
			&host,
			&urls(&[
				"https://media.example.com/upload/v1/cars/a.jpg",
				"https://media.example.com/upload/v1/cars/b.jpg",
			]),
		)
		.await;

		assert_eq!(
			report,
			CleanupReport {
				deleted: 2,
				failed: 0,
				skipped: 0
			}
		);
		assert_eq!(host.deleted(), vec!["cars/a", "cars/b"]);
	}

	#[tokio::test]
	async fn skips_foreign_urls() {
		let host = RecordingMediaHost::new();
		let report = delete_images(
			&host,
			&urls(&[
				"https://elsewhere.example.com/car.jpg",
				"https://media.example.com/upload/v1/cars/kept.jpg",
			]),
		)
		.await;

		assert_eq!(report.deleted, 1);
		assert_eq!(report.skipped, 1);
		assert_eq!(host.deleted(), vec!["cars/kept"]);
	}

	#[tokio::test]
	async fn counts_failures_without_aborting() {
		let host = RecordingMediaHost::new().failing_on("cars/bad");
		let report = delete_images(
			&host,
			&urls(&[
				"https://media.example.com/upload/cars/bad.jpg",
				"https://media.example.com/upload/cars/good.jpg",
			]),
		)
		.await;

		assert_eq!(report.deleted, 1);
		assert_eq!(report.failed, 1);
		assert_eq!(host.deleted(), vec!["cars/good"]);
	}

	#[tokio::test]
	async fn disabled_host_skips_everything() {
		let report = delete_images(
			&DisabledMediaHost,
			&urls(&["https://media.example.com/upload/cars/a.jpg"]),
		)
		.await;

		assert_eq!(
			report,
			CleanupReport {
				deleted: 0,
				failed: 0,
				skipped: 1
			}
		);
	}

	#[tokio::test]
	async fn empty_url_list_yields_empty_report() {
		let host = RecordingMediaHost::new();
		let report = delete_images(&host, &[]).await;
		assert_eq!(report, CleanupReport::default());
	}
}
