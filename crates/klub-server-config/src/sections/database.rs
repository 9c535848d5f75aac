// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database configuration.

use serde::Deserialize;

/// Resolved database configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
	/// SQLite connection URL, e.g. `sqlite:./klub.db` or `sqlite::memory:`.
	pub url: String,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self { url: default_url() }
	}
}

/// Partial database configuration from a single source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfigLayer {
	#[serde(default)]
	pub url: Option<String>,
}

impl DatabaseConfigLayer {
	/// Merges `other` into `self`, with `other` taking precedence.
	pub fn merge(&mut self, other: DatabaseConfigLayer) {
		if other.url.is_some() {
			self.url = other.url;
		}
	}

	/// Resolves the layer into a complete config, applying defaults.
	pub fn finalize(self) -> DatabaseConfig {
		DatabaseConfig {
			url: self.url.unwrap_or_else(default_url),
		}
	}
}

fn default_url() -> String {
	"sqlite:./klub.db".to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_config_points_at_local_file() {
		let config = DatabaseConfig::default();
		assert_eq!(config.url, "sqlite:./klub.db");
	}

	#[test]
	fn finalize_applies_default_url() {
		let config = DatabaseConfigLayer::default().finalize();
		assert_eq!(config.url, "sqlite:./klub.db");
	}

	#[test]
	fn finalize_keeps_explicit_url() {
		let layer = DatabaseConfigLayer {
			url: Some("sqlite::memory:".to_string()),
		};
		assert_eq!(layer.finalize().url, "sqlite::memory:");
	}

	#[test]
	fn merge_prefers_other_when_set() {
		let mut base = DatabaseConfigLayer {
			url: Some("sqlite:./a.db".to_string()),
		};
		base.merge(DatabaseConfigLayer {
			url: Some("sqlite:./b.db".to_string()),
		});
		assert_eq!(base.url.as_deref(), Some("sqlite:./b.db"));

		base.merge(DatabaseConfigLayer { url: None });
		assert_eq!(base.url.as_deref(), Some("sqlite:./b.db"));
	}
}
