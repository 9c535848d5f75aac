// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The response envelope every endpoint wraps its payload in.
//!
//! Success and error responses share one shape:
//!
//! ```json
//! { "success": true, "message": "...", "data": ..., "pagination": ... }
//! ```
//!
//! `message`, `data` and `pagination` are omitted when unused, never null.

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Standard response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
	pub success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pagination: Option<Pagination>,
}

impl<T> ApiEnvelope<T> {
	/// A successful response carrying a payload.
	pub fn data(data: T) -> Self {
		Self {
			success: true,
			message: None,
			data: Some(data),
			pagination: None,
		}
	}

	/// A successful response carrying a payload and a human-readable message.
	pub fn data_with_message(data: T, message: impl Into<String>) -> Self {
		Self {
			success: true,
			message: Some(message.into()),
			data: Some(data),
			pagination: None,
		}
	}

	/// A successful response carrying a page of a larger collection.
	pub fn paginated(data: T, pagination: Pagination) -> Self {
		Self {
			success: true,
			message: None,
			data: Some(data),
			pagination: Some(pagination),
		}
	}
}

impl ApiEnvelope<()> {
	/// A successful response with a message and no payload.
	pub fn message(message: impl Into<String>) -> Self {
		Self {
			success: true,
			message: Some(message.into()),
			data: None,
			pagination: None,
		}
	}

	/// A failure response with a message and no payload.
	pub fn error(message: impl Into<String>) -> Self {
		Self {
			success: false,
			message: Some(message.into()),
			data: None,
			pagination: None,
		}
	}
}

/// Paging block attached to collection responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
	pub current_page: u32,
	pub total_pages: u32,
	pub total_items: i64,
	pub items_per_page: u32,
}

impl Pagination {
	/// Builds the paging block for one page of `total_items` results.
	pub fn new(current_page: u32, items_per_page: u32, total_items: i64) -> Self {
		let per_page = i64::from(items_per_page.max(1));
		let total_pages = ((total_items + per_page - 1) / per_page) as u32;
		Self {
			current_page,
			total_pages,
			total_items,
			items_per_page,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn data_envelope_omits_unused_fields() {
		let envelope = ApiEnvelope::data(vec![1, 2, 3]);
		let json = serde_json::to_value(&envelope).unwrap();

		assert_eq!(json["success"], serde_json::json!(true));
		assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
		assert!(json.get("message").is_none());
		assert!(json.get("pagination").is_none());
	}

	#[test]
	fn error_envelope_carries_only_the_message() {
		let envelope = ApiEnvelope::error("Car not found");
		let json = serde_json::to_value(&envelope).unwrap();

		assert_eq!(json["success"], serde_json::json!(false));
		assert_eq!(json["message"], serde_json::json!("Car not found"));
		assert!(json.get("data").is_none());
	}

	#[test]
	fn paginated_envelope_uses_camel_case_keys() {
		let envelope = ApiEnvelope::paginated(vec!["a"], Pagination::new(2, 10, 35));
		let json = serde_json::to_value(&envelope).unwrap();

		assert_eq!(json["pagination"]["currentPage"], serde_json::json!(2));
		assert_eq!(json["pagination"]["totalPages"], serde_json::json!(4));
		assert_eq!(json["pagination"]["totalItems"], serde_json::json!(35));
		assert_eq!(json["pagination"]["itemsPerPage"], serde_json::json!(10));
	}

	#[test]
	fn pagination_rounds_total_pages_up() {
		assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
		assert_eq!(Pagination::new(1, 10, 1).total_pages, 1);
		assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
		assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
		assert_eq!(Pagination::new(1, 10, 101).total_pages, 11);
	}
}
