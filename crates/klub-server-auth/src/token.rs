// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Stateless bearer tokens.
//!
//! Login mints an HS256-signed JWT whose `sub` claim carries the user id.
//! Verification needs only the shared secret, so there is no server-side
//! session table and logout is purely a client-side discard.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::types::UserId;

/// Default token lifetime when configuration does not override it.
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;

/// Errors from token issuing and verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
	/// The token is malformed, was signed with a different secret, or does
	/// not carry a user id we minted.
	#[error("token signature is invalid")]
	InvalidSignature,
	/// The token was valid once but its `exp` claim is in the past.
	#[error("token has expired")]
	Expired,
	/// Signing failed. Only reachable through clock or key problems.
	#[error("token signing failed: {0}")]
	Signing(String),
}

/// JWT claims carried by every issued token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
	/// Subject: the user id as a UUID string.
	sub: String,
	/// Issued at timestamp (seconds since epoch).
	iat: u64,
	/// Expiration timestamp (seconds since epoch).
	exp: u64,
}

/// Issues and verifies bearer tokens with a single shared secret.
#[derive(Clone)]
pub struct TokenService {
	encoding: EncodingKey,
	decoding: DecodingKey,
	ttl_secs: i64,
}

impl TokenService {
	/// Creates a service from the shared secret and a lifetime in days.
	///
	/// A negative lifetime mints already-expired tokens. Tests use that to
	/// exercise the expiry path without sleeping.
	pub fn new(secret: &str, ttl_days: i64) -> Self {
		Self {
			encoding: EncodingKey::from_secret(secret.as_bytes()),
			decoding: DecodingKey::from_secret(secret.as_bytes()),
			ttl_secs: ttl_days.saturating_mul(24 * 60 * 60),
		}
	}

	/// Signs a token for the given user.
	pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
		let now = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map_err(|e| TokenError::Signing(format!("system time error: {e}")))?
			.as_secs();

		let claims = Claims {
			sub: user_id.to_string(),
			iat: now,
			exp: now.saturating_add_signed(self.ttl_secs),
		};

		let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
			.map_err(|e| TokenError::Signing(format!("failed to encode JWT: {e}")))?;

		debug!(user_id = %user_id, exp = claims.exp, "issued bearer token");

		Ok(token)
	}

	/// Verifies a token and returns the user id it was minted for.
	pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
		let validation = Validation::new(Algorithm::HS256);

		let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
			match e.kind() {
				ErrorKind::ExpiredSignature => TokenError::Expired,
				_ => TokenError::InvalidSignature,
			}
		})?;

		Uuid::parse_str(&data.claims.sub)
			.map(UserId::new)
			.map_err(|_| TokenError::InvalidSignature)
	}
}

impl std::fmt::Debug for TokenService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		// Key material stays out of debug output.
		f.debug_struct("TokenService")
			.field("ttl_secs", &self.ttl_secs)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SECRET: &str = "test-secret-not-for-production";

	#[test]
	fn issued_token_verifies_to_the_same_user() {
		let service = TokenService::new(SECRET, 30);
		let user_id = UserId::generate();

		let token = service.issue(user_id).unwrap();
		assert_eq!(service.verify(&token).unwrap(), user_id);
	}

	#[test]
	fn token_signed_with_a_different_secret_is_rejected() {
		let service = TokenService::new(SECRET, 30);
		let other = TokenService::new("some-other-secret", 30);

		let token = other.issue(UserId::generate()).unwrap();
		assert_eq!(service.verify(&token), Err(TokenError::InvalidSignature));
	}

	#[test]
	fn tampered_token_is_rejected() {
		let service = TokenService::new(SECRET, 30);
		let token = service.issue(UserId::generate()).unwrap();

		let mut tampered = token.clone();
		tampered.pop();
		tampered.push(if token.ends_with('x') { 'y' } else { 'x' });

		assert_eq!(service.verify(&tampered), Err(TokenError::InvalidSignature));
	}

	#[test]
	fn garbage_is_rejected() {
		let service = TokenService::new(SECRET, 30);
		assert_eq!(
			service.verify("definitely-not-a-jwt"),
			Err(TokenError::InvalidSignature)
		);
		assert_eq!(service.verify(""), Err(TokenError::InvalidSignature));
	}

	#[test]
	fn expired_token_is_rejected_as_expired() {
		// A negative ttl puts exp a full day in the past, well beyond the
		// default validation leeway.
		let expired = TokenService::new(SECRET, -1);
		let verifier = TokenService::new(SECRET, 30);

		let token = expired.issue(UserId::generate()).unwrap();
		assert_eq!(verifier.verify(&token), Err(TokenError::Expired));
	}

	#[test]
	fn sub_claim_carries_the_user_uuid() {
		let service = TokenService::new(SECRET, 30);
		let user_id = UserId::generate();
		let token = service.issue(user_id).unwrap();

		let decoded = decode::<Claims>(
			&token,
			&DecodingKey::from_secret(SECRET.as_bytes()),
			&Validation::new(Algorithm::HS256),
		)
		.unwrap();

		assert_eq!(decoded.claims.sub, user_id.to_string());
		assert!(decoded.claims.exp > decoded.claims.iat);
		let lifetime = decoded.claims.exp - decoded.claims.iat;
		assert_eq!(lifetime, 30 * 24 * 60 * 60);
	}

	#[test]
	fn token_minted_for_a_non_uuid_subject_is_rejected() {
		let claims = Claims {
			sub: "not-a-uuid".to_string(),
			iat: 0,
			exp: u64::MAX,
		};
		let token = encode(
			&Header::new(Algorithm::HS256),
			&claims,
			&EncodingKey::from_secret(SECRET.as_bytes()),
		)
		.unwrap();

		let service = TokenService::new(SECRET, 30);
		assert_eq!(service.verify(&token), Err(TokenError::InvalidSignature));
	}

	#[test]
	fn debug_output_omits_key_material() {
		let service = TokenService::new(SECRET, 30);
		let debug = format!("{service:?}");
		assert!(!debug.contains(SECRET));
	}
}
