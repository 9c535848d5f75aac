// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Test double for the media host.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{MediaError, Result};
use crate::host::MediaHost;

/// In-memory media host that records deletions instead of performing them.
///
/// Specific public IDs can be configured to fail, for exercising the
/// best-effort cleanup paths.
#[derive(Default)]
pub struct RecordingMediaHost {
	deleted: Mutex<Vec<String>>,
	fail_on: Vec<String>,
}

impl RecordingMediaHost {
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes deletes of `public_id` fail with a server error.
	pub fn failing_on(mut self, public_id: impl Into<String>) -> Self {
		self.fail_on.push(public_id.into());
		self
	}

	/// Public IDs deleted so far, in call order.
	pub fn deleted(&self) -> Vec<String> {
		self.deleted.lock().unwrap().clone()
	}
}

#[async_trait]
impl MediaHost for RecordingMediaHost {
	async fn delete_image(&self, public_id: &str) -> Result<()> {
		if self.fail_on.iter().any(|id| id == public_id) {
			return Err(MediaError::Server {
				status: 500,
				message: "injected failure".to_string(),
			});
		}
		self.deleted.lock().unwrap().push(public_id.to_string());
		Ok(())
	}

	fn is_enabled(&self) -> bool {
		true
	}
}
