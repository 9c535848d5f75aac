// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request-side authentication helpers.
//!
//! This module provides:
//! - [`CurrentUser`] - authenticated user context extracted from requests
//! - [`extract_bearer_token`] - pulls the JWT out of the Authorization header
//!
//! # Authentication Flow
//!
//! ```text
//! Request → Authorization: Bearer <jwt> → verify signature → load user → CurrentUser
//! ```
//!
//! The extractors that drive this flow live in the server crate, next to the
//! router. This crate only holds the pieces with no axum dependency.

use http::header::AUTHORIZATION;
use http::HeaderMap;

use crate::User;

/// The currently authenticated user, extracted from request context.
#[derive(Debug, Clone)]
pub struct CurrentUser {
	/// The authenticated user, loaded fresh from storage for this request.
	pub user: User,
}

impl CurrentUser {
	/// Wraps a freshly loaded user.
	pub fn new(user: User) -> Self {
		Self { user }
	}
}

/// Extract a bearer token from the Authorization header.
///
/// Returns `None` when the header is absent, not valid UTF-8, or does not use
/// the `Bearer` scheme.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
	let auth_header = headers.get(AUTHORIZATION)?;
	let auth_str = auth_header.to_str().ok()?;
	auth_str
		.strip_prefix("Bearer ")
		.map(|token| token.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use http::HeaderValue;

	#[test]
	fn extracts_bearer_token() {
		let mut headers = HeaderMap::new();
		headers.insert(
			AUTHORIZATION,
			HeaderValue::from_static("Bearer eyJhbGciOiJIUzI1NiJ9.x.y"),
		);

		assert_eq!(
			extract_bearer_token(&headers),
			Some("eyJhbGciOiJIUzI1NiJ9.x.y".to_string())
		);
	}

	#[test]
	fn returns_none_when_header_is_missing() {
		let headers = HeaderMap::new();
		assert_eq!(extract_bearer_token(&headers), None);
	}

	#[test]
	fn returns_none_for_non_bearer_schemes() {
		let mut headers = HeaderMap::new();
		headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
		assert_eq!(extract_bearer_token(&headers), None);
	}

	#[test]
	fn bearer_scheme_is_case_sensitive() {
		let mut headers = HeaderMap::new();
		headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer token"));
		assert_eq!(extract_bearer_token(&headers), None);
	}
}
