// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources.
//!
//! A source produces a [`ServerConfigLayer`] and carries a precedence.
//! Sources are sorted by precedence and merged in order, so later (higher
//! precedence) sources override earlier ones:
//!
//! 1. Built-in defaults
//! 2. TOML config file
//! 3. Environment variables

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::auth::AuthConfigLayer;
use crate::sections::database::DatabaseConfigLayer;
use crate::sections::http::HttpConfigLayer;
use crate::sections::logging::LoggingConfigLayer;
use crate::sections::media::MediaConfigLayer;

/// Merge order for configuration sources. Higher values override lower ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// A single origin of configuration data.
pub trait ConfigSource {
	/// Human-readable name used in logs.
	fn name(&self) -> &'static str;

	/// Where this source sits in the merge order.
	fn precedence(&self) -> Precedence;

	/// Loads this source's partial configuration.
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

// ============================================================================
// Defaults
// ============================================================================

/// Built-in defaults. Produces an empty layer; defaults are applied by each
/// section's `finalize()`, this source only anchors the bottom of the merge
/// order.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		Ok(ServerConfigLayer::default())
	}
}

// ============================================================================
// TOML config file
// ============================================================================

/// A TOML config file. A missing file yields an empty layer; an unreadable
/// or malformed file is an error.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// The conventional system-wide config location.
	pub fn system() -> Self {
		Self::new("/etc/klub/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"config file"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			tracing::debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		let contents = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::FileRead {
			path: self.path.clone(),
			source,
		})?;

		toml::from_str(&contents).map_err(|source| ConfigError::TomlParse {
			path: self.path.clone(),
			source,
		})
	}
}

// ============================================================================
// Environment variables
// ============================================================================

/// Environment variables. `KLUB_SERVER_*` names are canonical; `PORT`,
/// `DATABASE_URL`, and `JWT_SECRET` are accepted as plain aliases for
/// compatibility with common deployment platforms.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		Ok(ServerConfigLayer {
			http: load_http_layer()?,
			database: load_database_layer(),
			auth: load_auth_layer()?,
			media: load_media_layer(),
			logging: load_logging_layer(),
		})
	}
}

fn load_http_layer() -> Result<Option<HttpConfigLayer>, ConfigError> {
	let host = env_var("KLUB_SERVER_HOST");
	let port = match env_u16("KLUB_SERVER_PORT")? {
		Some(port) => Some(port),
		None => env_u16("PORT")?,
	};

	if host.is_none() && port.is_none() {
		return Ok(None);
	}
	Ok(Some(HttpConfigLayer { host, port }))
}

fn load_database_layer() -> Option<DatabaseConfigLayer> {
	let url = env_var("KLUB_SERVER_DATABASE_URL").or_else(|| env_var("DATABASE_URL"));
	url.map(|url| DatabaseConfigLayer { url: Some(url) })
}

fn load_auth_layer() -> Result<Option<AuthConfigLayer>, ConfigError> {
	let jwt_secret = env_var("KLUB_SERVER_JWT_SECRET").or_else(|| env_var("JWT_SECRET"));
	let token_ttl_days = env_i64("KLUB_SERVER_TOKEN_TTL_DAYS")?;
	let environment = env_var("KLUB_SERVER_ENV");

	if jwt_secret.is_none() && token_ttl_days.is_none() && environment.is_none() {
		return Ok(None);
	}
	Ok(Some(AuthConfigLayer {
		jwt_secret,
		token_ttl_days,
		environment,
	}))
}

fn load_media_layer() -> Option<MediaConfigLayer> {
	let enabled = env_bool("KLUB_SERVER_MEDIA_ENABLED");
	let base_url = env_var("KLUB_SERVER_MEDIA_BASE_URL");
	let api_key = env_var("KLUB_SERVER_MEDIA_API_KEY");

	if enabled.is_none() && base_url.is_none() && api_key.is_none() {
		return None;
	}
	Some(MediaConfigLayer {
		enabled,
		base_url,
		api_key,
	})
}

fn load_logging_layer() -> Option<LoggingConfigLayer> {
	env_var("KLUB_SERVER_LOG_LEVEL").map(|level| LoggingConfigLayer { level: Some(level) })
}

// ============================================================================
// Environment helpers
// ============================================================================

/// Reads an environment variable, treating empty strings as unset.
fn env_var(key: &str) -> Option<String> {
	std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Reads a boolean environment variable. `1` and `true` (any case) are true;
/// everything else is false.
fn env_bool(key: &str) -> Option<bool> {
	env_var(key).map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
}

fn env_u16(key: &str) -> Result<Option<u16>, ConfigError> {
	match env_var(key) {
		Some(value) => value
			.parse::<u16>()
			.map(Some)
			.map_err(|_| ConfigError::InvalidValue {
				key: key.to_string(),
				message: format!("invalid u16 value '{value}'"),
			}),
		None => Ok(None),
	}
}

fn env_i64(key: &str) -> Result<Option<i64>, ConfigError> {
	match env_var(key) {
		Some(value) => value
			.parse::<i64>()
			.map(Some)
			.map_err(|_| ConfigError::InvalidValue {
				key: key.to_string(),
				message: format!("invalid i64 value '{value}'"),
			}),
		None => Ok(None),
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn precedence_orders_defaults_below_file_below_env() {
		let mut sources: Vec<Box<dyn ConfigSource>> = vec![
			Box::new(EnvSource),
			Box::new(DefaultsSource),
			Box::new(TomlSource::system()),
		];
		sources.sort_by_key(|source| source.precedence());

		let names: Vec<&str> = sources.iter().map(|source| source.name()).collect();
		assert_eq!(names, vec!["defaults", "config file", "environment"]);
	}

	#[test]
	fn defaults_source_yields_empty_layer() {
		let layer = DefaultsSource.load().unwrap();
		assert!(layer.http.is_none());
		assert!(layer.database.is_none());
		assert!(layer.auth.is_none());
		assert!(layer.media.is_none());
		assert!(layer.logging.is_none());
	}

	#[test]
	fn toml_source_skips_missing_file() {
		let source = TomlSource::new("/nonexistent/klub/server.toml");
		let layer = source.load().unwrap();
		assert!(layer.http.is_none());
	}

	#[test]
	fn toml_source_reads_sections() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(
			file,
			r#"
			[http]
			port = 9000

			[auth]
			jwt_secret = "from-file"
			"#
		)
		.unwrap();

		let layer = TomlSource::new(file.path()).load().unwrap();
		assert_eq!(layer.http.unwrap().port, Some(9000));
		assert_eq!(layer.auth.unwrap().jwt_secret.as_deref(), Some("from-file"));
	}

	#[test]
	fn toml_source_rejects_malformed_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "this is not toml [[[").unwrap();

		let err = TomlSource::new(file.path()).load().unwrap_err();
		assert!(matches!(err, ConfigError::TomlParse { .. }));
	}

	#[test]
	fn env_var_filters_empty_values() {
		std::env::set_var("KLUB_TEST_EMPTY_VAR", "");
		assert_eq!(env_var("KLUB_TEST_EMPTY_VAR"), None);
		std::env::remove_var("KLUB_TEST_EMPTY_VAR");

		assert_eq!(env_var("KLUB_TEST_UNSET_VAR"), None);
	}

	#[test]
	fn env_bool_accepts_one_and_true() {
		std::env::set_var("KLUB_TEST_BOOL_ONE", "1");
		std::env::set_var("KLUB_TEST_BOOL_TRUE", "TRUE");
		std::env::set_var("KLUB_TEST_BOOL_OTHER", "yes");

		assert_eq!(env_bool("KLUB_TEST_BOOL_ONE"), Some(true));
		assert_eq!(env_bool("KLUB_TEST_BOOL_TRUE"), Some(true));
		assert_eq!(env_bool("KLUB_TEST_BOOL_OTHER"), Some(false));

		std::env::remove_var("KLUB_TEST_BOOL_ONE");
		std::env::remove_var("KLUB_TEST_BOOL_TRUE");
		std::env::remove_var("KLUB_TEST_BOOL_OTHER");
	}

	#[test]
	fn env_u16_rejects_garbage() {
		std::env::set_var("KLUB_TEST_U16_BAD", "banana");
		let err = env_u16("KLUB_TEST_U16_BAD").unwrap_err();
		std::env::remove_var("KLUB_TEST_U16_BAD");

		match err {
			ConfigError::InvalidValue { key, message } => {
				assert_eq!(key, "KLUB_TEST_U16_BAD");
				assert!(message.contains("banana"));
			}
			other => panic!("expected InvalidValue, got {other:?}"),
		}
	}

	#[test]
	fn env_i64_parses_negative_values() {
		std::env::set_var("KLUB_TEST_I64_NEG", "-1");
		assert_eq!(env_i64("KLUB_TEST_I64_NEG").unwrap(), Some(-1));
		std::env::remove_var("KLUB_TEST_I64_NEG");
	}
}
