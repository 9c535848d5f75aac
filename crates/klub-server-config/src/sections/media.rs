// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Media host configuration.
//!
//! The media host is the external service that stores car images. It is
//! optional: when no base URL and API key are configured, image cleanup is
//! disabled and deletions are logged instead of sent.

use std::fmt;

use serde::Deserialize;

/// Resolved media host configuration. Present only when the integration is
/// enabled and fully configured.
#[derive(Clone)]
pub struct MediaConfig {
	/// Base URL of the media host API.
	pub base_url: String,
	/// API key sent with every delete request.
	pub api_key: String,
}

// The API key must never appear in logs.
impl fmt::Debug for MediaConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MediaConfig")
			.field("base_url", &self.base_url)
			.field("api_key", &"[REDACTED]")
			.finish()
	}
}

/// Partial media host configuration from a single source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaConfigLayer {
	#[serde(default)]
	pub enabled: Option<bool>,
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub api_key: Option<String>,
}

impl MediaConfigLayer {
	/// Merges `other` into `self`, with `other` taking precedence.
	pub fn merge(&mut self, other: MediaConfigLayer) {
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.api_key.is_some() {
			self.api_key = other.api_key;
		}
	}

	/// Resolves the layer into an optional config.
	///
	/// Returns `None` when explicitly disabled or when either the base URL
	/// or the API key is missing.
	pub fn finalize(self) -> Option<MediaConfig> {
		if !self.enabled.unwrap_or(true) {
			return None;
		}
		match (self.base_url, self.api_key) {
			(Some(base_url), Some(api_key)) => Some(MediaConfig { base_url, api_key }),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_layer_finalizes_to_none() {
		assert!(MediaConfigLayer::default().finalize().is_none());
	}

	#[test]
	fn complete_layer_finalizes_to_some() {
		let layer = MediaConfigLayer {
			enabled: None,
			base_url: Some("https://media.example.com/api".to_string()),
			api_key: Some("key-123".to_string()),
		};
		let config = layer.finalize().unwrap();
		assert_eq!(config.base_url, "https://media.example.com/api");
		assert_eq!(config.api_key, "key-123");
	}

	#[test]
	fn explicit_disable_wins_over_complete_credentials() {
		let layer = MediaConfigLayer {
			enabled: Some(false),
			base_url: Some("https://media.example.com/api".to_string()),
			api_key: Some("key-123".to_string()),
		};
		assert!(layer.finalize().is_none());
	}

	#[test]
	fn missing_api_key_finalizes_to_none() {
		let layer = MediaConfigLayer {
			enabled: Some(true),
			base_url: Some("https://media.example.com/api".to_string()),
			api_key: None,
		};
		assert!(layer.finalize().is_none());
	}

	#[test]
	fn debug_output_redacts_the_api_key() {
		let config = MediaConfig {
			base_url: "https://media.example.com/api".to_string(),
			api_key: "key-123".to_string(),
		};
		let rendered = format!("{config:?}");
		assert!(!rendered.contains("key-123"));
		assert!(rendered.contains("[REDACTED]"));
	}

	#[test]
	fn merge_prefers_other_when_set() {
		let mut base = MediaConfigLayer {
			enabled: None,
			base_url: Some("https://a.example.com".to_string()),
			api_key: None,
		};
		base.merge(MediaConfigLayer {
			enabled: Some(true),
			base_url: None,
			api_key: Some("key".to_string()),
		});
		assert_eq!(base.enabled, Some(true));
		assert_eq!(base.base_url.as_deref(), Some("https://a.example.com"));
		assert_eq!(base.api_key.as_deref(), Some("key"));
	}
}
