// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication extractors for Axum.
//!
//! Requests authenticate with a stateless bearer JWT. The extractors resolve
//! the token to a [`CurrentUser`] on every request:
//!
//! ```text
//! Authorization: Bearer <jwt> → verify signature + expiry → load user → CurrentUser
//! ```
//!
//! # Security Properties
//!
//! - **Fresh user state**: the user row is loaded per request, so disabling
//!   an account takes effect immediately even for tokens already issued.
//! - **No token logging**: failures log the rejection reason, never the token.
//!
//! # Usage
//!
//! ```ignore
//! async fn protected_handler(RequireAuth(current_user): RequireAuth) -> impl IntoResponse {
//!     format!("Hello, {}!", current_user.user.username)
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};
use klub_server_auth::{extract_bearer_token, CurrentUser};
use tracing::instrument;

use crate::{api::AppState, error::ServerError};

/// Resolve the request's bearer token to an active user.
///
/// Distinct failures answer distinct messages so clients can tell a missing
/// header from a stale token from a deactivated account.
async fn resolve_identity(parts: &Parts, state: &AppState) -> Result<CurrentUser, ServerError> {
	let token = extract_bearer_token(&parts.headers).ok_or_else(|| {
		ServerError::Unauthenticated("Not authorized, no token".to_string())
	})?;

	// Signature or expiry failures map to "Not authorized, token failed".
	let user_id = state.token_service.verify(&token)?;

	let user = state
		.user_repo
		.get(&user_id)
		.await?
		.ok_or_else(|| ServerError::Unauthenticated("User not found".to_string()))?;

	if !user.is_active {
		return Err(ServerError::Unauthenticated("Account is disabled".to_string()));
	}

	Ok(CurrentUser::new(user))
}

/// Extractor that requires authentication.
///
/// Use this in handlers that require an authenticated user.
/// Returns 401 Unauthorized if the request is not authenticated.
///
/// # Example
///
/// ```ignore
/// async fn protected_handler(
///     RequireAuth(current_user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", current_user.user.username)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAuth {
	type Rejection = ServerError;

	#[instrument(name = "RequireAuth::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
		match resolve_identity(parts, state).await {
			Ok(current_user) => {
				tracing::debug!(user_id = %current_user.user.id, "Authentication required: success");
				Ok(RequireAuth(current_user))
			}
			Err(e) => Err(e),
		}
	}
}

/// Extractor that makes authentication optional.
///
/// Use this in public handlers that personalize behavior when a valid token
/// happens to be present. Invalid or missing credentials yield `None` and
/// never reject the request.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for OptionalAuth {
	type Rejection = std::convert::Infallible;

	#[instrument(name = "OptionalAuth::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
		Ok(OptionalAuth(resolve_identity(parts, state).await.ok()))
	}
}
