// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use klub_server_auth::UserProfile;
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
	pub username: String,
	pub email: String,
	pub password: String,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
}

/// Request to log in with email and password.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LoginRequest {
	pub email: String,
	pub password: String,
}

/// Request to update the current user's profile.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub avatar: Option<String>,
	pub bio: Option<String>,
	pub location: Option<String>,
	pub phone: Option<String>,
}

/// Request to change the current user's password.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
	pub current_password: String,
	pub new_password: String,
}

/// Payload returned by register and login: the profile plus a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AuthData {
	pub user: UserProfile,
	pub token: String,
}

/// Payload returned by endpoints that answer with a profile alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserData {
	pub user: UserProfile,
}
