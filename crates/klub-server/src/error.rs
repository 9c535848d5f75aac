// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use klub_server_auth::TokenError;
use klub_server_db::DbError;
use serde::Serialize;
use utoipa::ToSchema;

/// Server error types for klub operations.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Request payload failed validation.
	#[error("Validation error: {0}")]
	Validation(String),

	/// Authentication missing or failed.
	#[error("Unauthenticated: {0}")]
	Unauthenticated(String),

	/// Authenticated but not allowed to touch this resource.
	#[error("Forbidden: {0}")]
	Forbidden(String),

	/// Resource not found.
	#[error("Not found: {0}")]
	NotFound(String),

	/// Unique field collision below the handler's own pre-check.
	#[error("Conflict: {0}")]
	Conflict(String),

	/// Internal server error.
	#[error("Internal error: {0}")]
	Internal(String),
}

impl From<DbError> for ServerError {
	fn from(e: DbError) -> Self {
		match e {
			DbError::Conflict(msg) => ServerError::Conflict(msg),
			other => ServerError::Internal(other.to_string()),
		}
	}
}

impl From<TokenError> for ServerError {
	fn from(e: TokenError) -> Self {
		match e {
			TokenError::Expired | TokenError::InvalidSignature => {
				ServerError::Unauthenticated("Not authorized, token failed".to_string())
			}
			TokenError::Signing(msg) => ServerError::Internal(msg),
		}
	}
}

/// Error response body.
///
/// Same wire shape as the success envelope with `success: false`, so
/// clients can branch on the flag alone.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
	pub success: bool,
	pub message: String,
}

impl ErrorResponse {
	fn new(message: impl Into<String>) -> Self {
		Self {
			success: false,
			message: message.into(),
		}
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, body) = match &self {
			ServerError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg.clone())),
			ServerError::Unauthenticated(msg) => {
				tracing::warn!(error = %msg, "unauthenticated");
				(StatusCode::UNAUTHORIZED, ErrorResponse::new(msg.clone()))
			}
			ServerError::Forbidden(msg) => {
				tracing::warn!(error = %msg, "forbidden");
				(StatusCode::FORBIDDEN, ErrorResponse::new(msg.clone()))
			}
			ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg.clone())),
			ServerError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::new(msg.clone())),
			ServerError::Internal(msg) => {
				tracing::error!(error = %msg, "internal error");
				(StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new("Server Error"))
			}
		};

		(status, Json(body)).into_response()
	}
}
