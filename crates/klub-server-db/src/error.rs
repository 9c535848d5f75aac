// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Errors surfaced by the user and car stores.
///
/// Absent rows are `None` at the repository API, not an error; the HTTP
/// layer decides what absence means per route.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	/// A unique constraint was violated, in practice the users table's
	/// email or username.
	#[error("Conflict: {0}")]
	Conflict(String),

	/// A stored value failed to decode, e.g. a malformed id column or an
	/// unknown fuel label.
	#[error("Internal: {0}")]
	Internal(String),

	/// The embedded comments JSON column failed to encode or decode.
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;
