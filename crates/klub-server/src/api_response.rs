// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Success response helpers.
//!
//! Handlers build every success body through these so the `{success,
//! message, data, pagination}` envelope stays uniform across routes.
//! Error bodies come from [`crate::error::ServerError`] instead.

use axum::{http::StatusCode, Json};
use klub_server_api::{ApiEnvelope, Pagination};
use serde::Serialize;

/// Create a 200 OK response carrying `data`.
pub fn success_with<T: Serialize>(data: T) -> (StatusCode, Json<ApiEnvelope<T>>) {
	(StatusCode::OK, Json(ApiEnvelope::data(data)))
}

/// Create a 200 OK response carrying `data` and a human-readable message.
pub fn success_with_message<T: Serialize>(
	data: T,
	message: impl Into<String>,
) -> (StatusCode, Json<ApiEnvelope<T>>) {
	(StatusCode::OK, Json(ApiEnvelope::data_with_message(data, message)))
}

/// Create a 201 Created response carrying `data` and a message.
pub fn created_with<T: Serialize>(
	data: T,
	message: impl Into<String>,
) -> (StatusCode, Json<ApiEnvelope<T>>) {
	(StatusCode::CREATED, Json(ApiEnvelope::data_with_message(data, message)))
}

/// Create a 200 OK response with a message and no data.
pub fn message_only(message: impl Into<String>) -> (StatusCode, Json<ApiEnvelope<()>>) {
	(StatusCode::OK, Json(ApiEnvelope::message(message)))
}

/// Create a 200 OK response carrying a page of `data` plus pagination metadata.
pub fn paginated<T: Serialize>(
	data: T,
	pagination: Pagination,
) -> (StatusCode, Json<ApiEnvelope<T>>) {
	(StatusCode::OK, Json(ApiEnvelope::paginated(data, pagination)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_success_with_omits_message_and_pagination() {
		let (status, Json(envelope)) = success_with(vec![1, 2, 3]);
		assert_eq!(status, StatusCode::OK);
		let body = serde_json::to_value(&envelope).unwrap();
		assert_eq!(body["success"], true);
		assert_eq!(body["data"], serde_json::json!([1, 2, 3]));
		assert!(body.get("message").is_none());
		assert!(body.get("pagination").is_none());
	}

	#[test]
	fn test_created_with_carries_message() {
		let (status, Json(envelope)) = created_with("x", "Automobil je uspešno dodat");
		assert_eq!(status, StatusCode::CREATED);
		let body = serde_json::to_value(&envelope).unwrap();
		assert_eq!(body["message"], "Automobil je uspešno dodat");
	}

	#[test]
	fn test_message_only_has_no_data_key() {
		let (status, Json(envelope)) = message_only("Uspešna odjava");
		assert_eq!(status, StatusCode::OK);
		let body = serde_json::to_value(&envelope).unwrap();
		assert_eq!(body["success"], true);
		assert!(body.get("data").is_none());
	}

	#[test]
	fn test_paginated_reports_page_arithmetic() {
		let (_, Json(envelope)) = paginated(vec!["a"; 10], Pagination::new(2, 10, 25));
		let body = serde_json::to_value(&envelope).unwrap();
		assert_eq!(body["pagination"]["currentPage"], 2);
		assert_eq!(body["pagination"]["totalPages"], 3);
		assert_eq!(body["pagination"]["totalItems"], 25);
	}
}
