// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Media host client.
//!
//! Car images live on an external media host. The server only ever deletes
//! them, when a car is removed, so the client surface is a single operation
//! behind the [`MediaHost`] trait. Deployments without media credentials use
//! [`DisabledMediaHost`], which turns every delete into a no-op.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error};

use crate::error::{MediaError, Result};

const USER_AGENT: &str = concat!("klub-server/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote image storage operations.
#[async_trait]
pub trait MediaHost: Send + Sync {
	/// Deletes a single image by its public ID.
	async fn delete_image(&self, public_id: &str) -> Result<()>;

	/// Whether this host performs real deletions.
	fn is_enabled(&self) -> bool;
}

/// Media host client backed by the HTTP API.
pub struct HttpMediaHost {
	client: Client,
	base_url: String,
	api_key: String,
}

impl HttpMediaHost {
	/// Creates a client for the given media host.
	///
	/// The base URL may carry a trailing slash; it is normalized away.
	pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
		let base_url = base_url.into().trim_end_matches('/').to_string();
		let client = Client::builder()
			.user_agent(USER_AGENT)
			.timeout(REQUEST_TIMEOUT)
			.build()?;

		Ok(Self {
			client,
			base_url,
			api_key: api_key.into(),
		})
	}
}

#[async_trait]
impl MediaHost for HttpMediaHost {
	async fn delete_image(&self, public_id: &str) -> Result<()> {
		let url = format!("{}/images/{}", self.base_url, public_id);
		debug!(public_id = %public_id, "deleting image from media host");

		let response = self
			.client
			.delete(&url)
			.header("X-Api-Key", &self.api_key)
			.send()
			.await?;

		// A delete for an image that is already gone has done its job.
		if response.status() == StatusCode::NOT_FOUND {
			debug!(public_id = %public_id, "image already absent from media host");
			return Ok(());
		}

		if !response.status().is_success() {
			let status = response.status().as_u16();
			let message = response.text().await.unwrap_or_default();
			error!(public_id = %public_id, status, message = %message, "media host delete failed");
			return Err(MediaError::Server { status, message });
		}

		debug!(public_id = %public_id, "deleted image from media host");
		Ok(())
	}

	fn is_enabled(&self) -> bool {
		true
	}
}

/// No-op media host used when the integration is not configured.
pub struct DisabledMediaHost;

#[async_trait]
impl MediaHost for DisabledMediaHost {
	async fn delete_image(&self, public_id: &str) -> Result<()> {
		debug!(public_id = %public_id, "media host disabled, skipping delete");
		Ok(())
	}

	fn is_enabled(&self) -> bool {
		false
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn http_host_normalizes_trailing_slash() {
		let host = HttpMediaHost::new("https://media.example.com/api/", "key").unwrap();
		assert_eq!(host.base_url, "https://media.example.com/api");
		assert!(host.is_enabled());
	}

	#[tokio::test]
	async fn disabled_host_accepts_every_delete() {
		let host = DisabledMediaHost;
		assert!(!host.is_enabled());
		host.delete_image("cars/anything").await.unwrap();
	}
}
