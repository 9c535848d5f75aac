// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layers.
//!
//! Each configuration source produces a [`ServerConfigLayer`] in which every
//! section is optional. Layers from lower-precedence sources are merged into
//! layers from higher-precedence sources field by field, so an environment
//! variable can override a single value from a config file without clobbering
//! the rest of the section.

use serde::Deserialize;

use crate::sections::auth::AuthConfigLayer;
use crate::sections::database::DatabaseConfigLayer;
use crate::sections::http::HttpConfigLayer;
use crate::sections::logging::LoggingConfigLayer;
use crate::sections::media::MediaConfigLayer;

/// A partial server configuration produced by a single source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfigLayer {
	#[serde(default)]
	pub http: Option<HttpConfigLayer>,
	#[serde(default)]
	pub database: Option<DatabaseConfigLayer>,
	#[serde(default)]
	pub auth: Option<AuthConfigLayer>,
	#[serde(default)]
	pub media: Option<MediaConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl ServerConfigLayer {
	/// Merges `other` into `self`, with `other` taking precedence.
	///
	/// Sections present in only one layer are carried over whole; sections
	/// present in both are merged field by field.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		match (self.http.as_mut(), other.http) {
			(Some(existing), Some(incoming)) => existing.merge(incoming),
			(None, Some(incoming)) => self.http = Some(incoming),
			_ => {}
		}
		match (self.database.as_mut(), other.database) {
			(Some(existing), Some(incoming)) => existing.merge(incoming),
			(None, Some(incoming)) => self.database = Some(incoming),
			_ => {}
		}
		match (self.auth.as_mut(), other.auth) {
			(Some(existing), Some(incoming)) => existing.merge(incoming),
			(None, Some(incoming)) => self.auth = Some(incoming),
			_ => {}
		}
		match (self.media.as_mut(), other.media) {
			(Some(existing), Some(incoming)) => existing.merge(incoming),
			(None, Some(incoming)) => self.media = Some(incoming),
			_ => {}
		}
		match (self.logging.as_mut(), other.logging) {
			(Some(existing), Some(incoming)) => existing.merge(incoming),
			(None, Some(incoming)) => self.logging = Some(incoming),
			_ => {}
		}
	}
}
