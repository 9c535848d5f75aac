// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration for the Auto Klub server.
//!
//! Configuration is assembled from layered sources, sorted by precedence and
//! merged field by field:
//!
//! 1. Built-in defaults (lowest)
//! 2. TOML config file
//! 3. Environment variables (highest)
//!
//! Every value has a working development default, so `load_config()` succeeds
//! on a fresh checkout with no file and no environment. Validation rejects
//! configurations that are unsafe to deploy, such as the placeholder JWT
//! secret in production.

use std::net::SocketAddr;
use std::path::PathBuf;

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::auth::{AuthConfig, DEV_JWT_SECRET};
pub use sections::database::DatabaseConfig;
pub use sections::http::HttpConfig;
pub use sections::logging::LoggingConfig;
pub use sections::media::MediaConfig;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub auth: AuthConfig,
	/// Media host integration; `None` disables image cleanup.
	pub media: Option<MediaConfig>,
	pub logging: LoggingConfig,
}

impl ServerConfig {
	/// The address the HTTP listener should bind to.
	pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
		format!("{}:{}", self.http.host, self.http.port)
			.parse()
			.map_err(|err| {
				ConfigError::Validation(format!(
					"invalid listen address {}:{}: {err}",
					self.http.host, self.http.port
				))
			})
	}
}

/// Loads configuration from the default sources: built-in defaults, the
/// system config file, and environment variables.
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Loads configuration from defaults and environment variables only. Used in
/// deployments where no config file is mounted.
pub fn load_config_from_env() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![Box::new(DefaultsSource), Box::new(EnvSource)])
}

/// Loads configuration with an explicit config file path instead of the
/// system location.
pub fn load_config_with_file(path: impl Into<PathBuf>) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|source| source.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in &sources {
		tracing::debug!(source = source.name(), "loading configuration layer");
		let layer = source.load()?;
		merged.merge(layer);
	}

	let config = finalize(merged);
	validate_config(&config)?;
	Ok(config)
}

/// Resolves a merged layer into a complete configuration, applying section
/// defaults for anything still unset.
fn finalize(layer: ServerConfigLayer) -> ServerConfig {
	ServerConfig {
		http: layer.http.unwrap_or_default().finalize(),
		database: layer.database.unwrap_or_default().finalize(),
		auth: layer.auth.unwrap_or_default().finalize(),
		media: layer.media.and_then(|media| media.finalize()),
		logging: layer.logging.unwrap_or_default().finalize(),
	}
}

/// Rejects configurations that must not reach a running server.
fn validate_config(config: &ServerConfig) -> Result<(), ConfigError> {
	if config.http.port == 0 {
		return Err(ConfigError::Validation("listen port must be nonzero".to_string()));
	}

	if config.database.url.is_empty() {
		return Err(ConfigError::Validation("database url must not be empty".to_string()));
	}

	if config.auth.jwt_secret.is_empty() {
		return Err(ConfigError::Validation("jwt secret must not be empty".to_string()));
	}

	if config.auth.token_ttl_days < 1 {
		return Err(ConfigError::Validation(format!(
			"token ttl must be at least 1 day, got {}",
			config.auth.token_ttl_days
		)));
	}

	if config.auth.is_production() && config.auth.uses_dev_secret() {
		return Err(ConfigError::Validation(
			"the development jwt secret must not be used in production; set KLUB_SERVER_JWT_SECRET".to_string(),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sections::auth::AuthConfigLayer;
	use crate::sections::http::HttpConfigLayer;

	/// In-memory source for exercising the merge pipeline.
	struct TestSource {
		precedence: Precedence,
		layer: ServerConfigLayer,
	}

	impl ConfigSource for TestSource {
		fn name(&self) -> &'static str {
			"test"
		}

		fn precedence(&self) -> Precedence {
			self.precedence
		}

		fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
			Ok(self.layer.clone())
		}
	}

	#[test]
	fn empty_layer_finalizes_to_working_defaults() {
		let config = finalize(ServerConfigLayer::default());
		assert_eq!(config.http.host, "0.0.0.0");
		assert_eq!(config.http.port, 5000);
		assert_eq!(config.database.url, "sqlite:./klub.db");
		assert_eq!(config.auth.jwt_secret, DEV_JWT_SECRET);
		assert_eq!(config.auth.token_ttl_days, 30);
		assert!(config.media.is_none());
		assert_eq!(config.logging.level, "info");
	}

	#[test]
	fn higher_precedence_source_wins_regardless_of_order() {
		let file = TestSource {
			precedence: Precedence::ConfigFile,
			layer: ServerConfigLayer {
				http: Some(HttpConfigLayer {
					host: Some("127.0.0.1".to_string()),
					port: Some(5000),
				}),
				..Default::default()
			},
		};
		let env = TestSource {
			precedence: Precedence::Environment,
			layer: ServerConfigLayer {
				http: Some(HttpConfigLayer {
					host: None,
					port: Some(9999),
				}),
				..Default::default()
			},
		};

		// Deliberately supply the higher-precedence source first.
		let config = load_from_sources(vec![Box::new(env), Box::new(file)]).unwrap();
		assert_eq!(config.http.host, "127.0.0.1");
		assert_eq!(config.http.port, 9999);
	}

	#[test]
	fn validation_rejects_dev_secret_in_production() {
		let source = TestSource {
			precedence: Precedence::Environment,
			layer: ServerConfigLayer {
				auth: Some(AuthConfigLayer {
					jwt_secret: None,
					token_ttl_days: None,
					environment: Some("production".to_string()),
				}),
				..Default::default()
			},
		};

		let err = load_from_sources(vec![Box::new(DefaultsSource), Box::new(source)]).unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[test]
	fn validation_accepts_real_secret_in_production() {
		let source = TestSource {
			precedence: Precedence::Environment,
			layer: ServerConfigLayer {
				auth: Some(AuthConfigLayer {
					jwt_secret: Some("a-real-secret".to_string()),
					token_ttl_days: None,
					environment: Some("production".to_string()),
				}),
				..Default::default()
			},
		};

		let config = load_from_sources(vec![Box::new(DefaultsSource), Box::new(source)]).unwrap();
		assert_eq!(config.auth.jwt_secret, "a-real-secret");
	}

	#[test]
	fn validation_rejects_non_positive_ttl() {
		let source = TestSource {
			precedence: Precedence::Environment,
			layer: ServerConfigLayer {
				auth: Some(AuthConfigLayer {
					jwt_secret: None,
					token_ttl_days: Some(0),
					environment: None,
				}),
				..Default::default()
			},
		};

		let err = load_from_sources(vec![Box::new(DefaultsSource), Box::new(source)]).unwrap_err();
		assert!(matches!(err, ConfigError::Validation(_)));
	}

	#[test]
	fn socket_addr_combines_host_and_port() {
		let config = ServerConfig::default();
		let addr = config.socket_addr().unwrap();
		assert_eq!(addr.to_string(), "0.0.0.0:5000");
	}

	#[test]
	fn socket_addr_rejects_unparseable_host() {
		let mut config = ServerConfig::default();
		config.http.host = "not a host".to_string();
		assert!(config.socket_addr().is_err());
	}
}
