// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for media host operations.

use thiserror::Error;

/// Errors that can occur while talking to the media host.
#[derive(Debug, Error)]
pub enum MediaError {
	/// The request never completed (connection, timeout, TLS).
	#[error("media host request failed: {0}")]
	Request(#[from] reqwest::Error),

	/// The media host answered with a non-success status.
	#[error("media host returned status {status}: {message}")]
	Server { status: u16, message: String },
}

/// Convenience alias for media operations.
pub type Result<T> = std::result::Result<T, MediaError>;
