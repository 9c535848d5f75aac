// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User account types.
//!
//! This module provides:
//! - [`User`] - core user entity with credentials and profile fields
//! - [`UserProfile`] - wire-safe view of a user (never carries the password hash)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{UserId, UserRole};

/// A registered member of the klub.
///
/// # PII Handling
///
/// This struct contains personally identifiable information (PII) that
/// requires careful handling:
/// - `email`, `first_name`, `last_name`, `location` and `phone` are
///   user-provided PII and should be redacted in logs
/// - `password_hash` is an Argon2 hash, never the plaintext password
///
/// `User` deliberately does not implement `Serialize`. Anything that leaves
/// the process goes through [`User::to_profile`], which has no hash field at
/// all.
#[derive(Debug, Clone)]
pub struct User {
	/// Unique identifier for this user.
	pub id: UserId,

	/// Unique login and display handle.
	pub username: String,

	/// Unique email address, stored lowercased.
	pub email: String,

	/// Argon2 hash of the password.
	pub password_hash: String,

	/// Optional given name.
	pub first_name: Option<String>,

	/// Optional family name.
	pub last_name: Option<String>,

	/// URL of the avatar image, if one was set.
	pub avatar: Option<String>,

	/// Free-form profile text.
	pub bio: Option<String>,

	/// Free-form location string.
	pub location: Option<String>,

	/// Contact phone number.
	pub phone: Option<String>,

	/// Account role.
	pub role: UserRole,

	/// Disabled accounts keep their data but can no longer authenticate.
	pub is_active: bool,

	/// When the account was created.
	pub created_at: DateTime<Utc>,

	/// When the account was last updated.
	pub updated_at: DateTime<Utc>,
}

impl User {
	/// Creates the wire view of this user.
	///
	/// The profile carries everything a client may see. The password hash is
	/// not part of the type, so it cannot leak through serialization.
	pub fn to_profile(&self) -> UserProfile {
		UserProfile {
			id: self.id,
			username: self.username.clone(),
			email: self.email.clone(),
			first_name: self.first_name.clone(),
			last_name: self.last_name.clone(),
			avatar: self.avatar.clone(),
			bio: self.bio.clone(),
			location: self.location.clone(),
			phone: self.phone.clone(),
			role: self.role,
			is_active: self.is_active,
			created_at: self.created_at,
		}
	}
}

/// Wire view of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
	/// Unique identifier for this user.
	#[schema(value_type = String)]
	pub id: UserId,

	/// Unique login and display handle.
	pub username: String,

	/// Email address of the account.
	pub email: String,

	/// Optional given name.
	pub first_name: Option<String>,

	/// Optional family name.
	pub last_name: Option<String>,

	/// URL of the avatar image, if one was set.
	pub avatar: Option<String>,

	/// Free-form profile text.
	pub bio: Option<String>,

	/// Free-form location string.
	pub location: Option<String>,

	/// Contact phone number.
	pub phone: Option<String>,

	/// Account role.
	pub role: UserRole,

	/// Whether the account may authenticate.
	pub is_active: bool,

	/// When the account was created.
	pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_user() -> User {
		User {
			id: UserId::generate(),
			username: "petar".to_string(),
			email: "petar@example.com".to_string(),
			password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".to_string(),
			first_name: Some("Petar".to_string()),
			last_name: None,
			avatar: None,
			bio: Some("Volim stare automobile".to_string()),
			location: Some("Beograd".to_string()),
			phone: None,
			role: UserRole::User,
			is_active: true,
			created_at: Utc::now(),
			updated_at: Utc::now(),
		}
	}

	#[test]
	fn profile_never_contains_the_password_hash() {
		let user = sample_user();
		let json = serde_json::to_string(&user.to_profile()).unwrap();
		assert!(!json.contains("password"));
		assert!(!json.contains("argon2id"));
	}

	#[test]
	fn profile_uses_camel_case_field_names() {
		let user = sample_user();
		let json = serde_json::to_value(user.to_profile()).unwrap();
		assert!(json.get("firstName").is_some());
		assert!(json.get("isActive").is_some());
		assert!(json.get("createdAt").is_some());
		assert!(json.get("first_name").is_none());
	}

	#[test]
	fn profile_carries_identity_fields() {
		let user = sample_user();
		let profile = user.to_profile();
		assert_eq!(profile.id, user.id);
		assert_eq!(profile.username, "petar");
		assert_eq!(profile.email, "petar@example.com");
		assert_eq!(profile.role, UserRole::User);
	}
}
