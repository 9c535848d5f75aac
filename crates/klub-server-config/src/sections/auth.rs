// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication configuration.
//!
//! Holds the JWT signing secret and token lifetime. The secret ships with a
//! development default so the server starts out of the box; validation
//! refuses that default when `environment` is set to `production`.

use std::fmt;

use serde::Deserialize;

/// Placeholder secret used when none is configured. Only acceptable in
/// development.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

/// Resolved authentication configuration.
#[derive(Clone)]
pub struct AuthConfig {
	/// Secret used to sign and verify JWTs.
	pub jwt_secret: String,
	/// Token lifetime in days.
	pub token_ttl_days: i64,
	/// Deployment environment, `development` or `production`.
	pub environment: String,
}

impl AuthConfig {
	/// Returns true when running with the placeholder development secret.
	pub fn uses_dev_secret(&self) -> bool {
		self.jwt_secret == DEV_JWT_SECRET
	}

	/// Returns true when the deployment environment is production.
	pub fn is_production(&self) -> bool {
		self.environment == "production"
	}
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			jwt_secret: DEV_JWT_SECRET.to_string(),
			token_ttl_days: default_token_ttl_days(),
			environment: default_environment(),
		}
	}
}

// The signing secret must never appear in logs.
impl fmt::Debug for AuthConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AuthConfig")
			.field("jwt_secret", &"[REDACTED]")
			.field("token_ttl_days", &self.token_ttl_days)
			.field("environment", &self.environment)
			.finish()
	}
}

/// Partial authentication configuration from a single source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub jwt_secret: Option<String>,
	#[serde(default)]
	pub token_ttl_days: Option<i64>,
	#[serde(default)]
	pub environment: Option<String>,
}

impl AuthConfigLayer {
	/// Merges `other` into `self`, with `other` taking precedence.
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.jwt_secret.is_some() {
			self.jwt_secret = other.jwt_secret;
		}
		if other.token_ttl_days.is_some() {
			self.token_ttl_days = other.token_ttl_days;
		}
		if other.environment.is_some() {
			self.environment = other.environment;
		}
	}

	/// Resolves the layer into a complete config, applying defaults.
	pub fn finalize(self) -> AuthConfig {
		AuthConfig {
			jwt_secret: self.jwt_secret.unwrap_or_else(|| DEV_JWT_SECRET.to_string()),
			token_ttl_days: self.token_ttl_days.unwrap_or_else(default_token_ttl_days),
			environment: self.environment.unwrap_or_else(default_environment),
		}
	}
}

fn default_token_ttl_days() -> i64 {
	30
}

fn default_environment() -> String {
	"development".to_string()
}
