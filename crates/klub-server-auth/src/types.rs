// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for authentication and resource ownership.
//!
//! This module defines the foundational types used throughout the server:
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs for different entity
//!   types ([`UserId`], [`CarId`], [`CommentId`]) preventing accidental mixing
//! - **Role enum**: Account roles ([`UserRole`]) carried on every user record
//!
//! All ID types implement transparent serde serialization (as UUID strings) and
//! provide conversion to/from [`uuid::Uuid`].

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user account.");
define_id_type!(CarId, "Unique identifier for a car listing.");
define_id_type!(CommentId, "Unique identifier for a comment on a listing.");

// =============================================================================
// Account Roles
// =============================================================================

/// Account role carried on every user record.
///
/// Regular members can manage only their own listings. Admins exist for
/// moderation tooling and are not granted extra routes by the core API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
	/// Standard member account.
	User,
	/// Moderation account.
	Admin,
}

impl UserRole {
	/// Returns all available roles.
	pub fn all() -> &'static [UserRole] {
		&[UserRole::User, UserRole::Admin]
	}
}

impl Default for UserRole {
	fn default() -> Self {
		UserRole::User
	}
}

impl fmt::Display for UserRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			UserRole::User => write!(f, "user"),
			UserRole::Admin => write!(f, "admin"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn id_types_serialize_as_plain_uuid_strings() {
		let id = UserId::generate();
		let json = serde_json::to_string(&id).unwrap();
		assert_eq!(json, format!("\"{}\"", id.into_inner()));
	}

	#[test]
	fn id_types_roundtrip_through_serde() {
		let id = CarId::generate();
		let json = serde_json::to_string(&id).unwrap();
		let back: CarId = serde_json::from_str(&json).unwrap();
		assert_eq!(id, back);
	}

	#[test]
	fn id_types_convert_to_and_from_uuid() {
		let raw = Uuid::new_v4();
		let id = CommentId::from(raw);
		assert_eq!(*id.as_uuid(), raw);
		assert_eq!(Uuid::from(id), raw);
	}

	#[test]
	fn display_matches_inner_uuid() {
		let id = UserId::generate();
		assert_eq!(id.to_string(), id.into_inner().to_string());
	}

	#[test]
	fn different_id_types_are_distinct() {
		// UserId and CarId must not be interchangeable even with equal UUIDs.
		let raw = Uuid::new_v4();
		let user = UserId::new(raw);
		let car = CarId::new(raw);
		assert_eq!(user.into_inner(), car.into_inner());
	}

	#[test]
	fn role_serializes_as_snake_case() {
		assert_eq!(serde_json::to_string(&UserRole::User).unwrap(), "\"user\"");
		assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
	}

	#[test]
	fn role_default_is_user() {
		assert_eq!(UserRole::default(), UserRole::User);
	}

	#[test]
	fn role_all_lists_every_variant() {
		assert_eq!(UserRole::all().len(), 2);
	}

	proptest! {
		#[test]
		fn user_id_roundtrips_any_uuid(a: u128) {
			let uuid = Uuid::from_u128(a);
			let id = UserId::new(uuid);
			prop_assert_eq!(id.into_inner(), uuid);
			prop_assert_eq!(Uuid::from(id), uuid);
		}

		#[test]
		fn car_id_roundtrips_through_serde(a: u128) {
			let id = CarId::new(Uuid::from_u128(a));
			let json = serde_json::to_string(&id).unwrap();
			let back: CarId = serde_json::from_str(&json).unwrap();
			prop_assert_eq!(id, back);
		}
	}
}
