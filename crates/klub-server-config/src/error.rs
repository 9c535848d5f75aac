// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// A config file existed but could not be read.
	#[error("failed to read config file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A config file was read but is not valid TOML.
	#[error("failed to parse config file {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// An environment variable carried a value that could not be parsed.
	#[error("invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },

	/// The merged configuration failed a semantic validation check.
	#[error("invalid configuration: {0}")]
	Validation(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invalid_value_formats_key_and_message() {
		let err = ConfigError::InvalidValue {
			key: "KLUB_SERVER_PORT".to_string(),
			message: "invalid u16 value 'banana'".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"invalid value for KLUB_SERVER_PORT: invalid u16 value 'banana'"
		);
	}

	#[test]
	fn validation_formats_message() {
		let err = ConfigError::Validation("jwt secret must be set".to_string());
		assert_eq!(err.to_string(), "invalid configuration: jwt secret must be set");
	}
}
