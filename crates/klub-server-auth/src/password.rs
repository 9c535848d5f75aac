// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Password hashing and verification.
//!
//! Passwords are hashed with Argon2id and a per-password random salt. The
//! stored string is the PHC format produced by [`argon2`], so parameters and
//! salt travel with the hash and verification needs no extra state.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use thiserror::Error;

#[cfg(test)]
use argon2::{Algorithm, Params, Version};

/// Errors from password hashing.
#[derive(Debug, Error)]
pub enum PasswordError {
	/// The underlying hasher rejected the input.
	#[error("password hashing failed: {0}")]
	Hash(String),
}

/// Returns an Argon2 instance configured appropriately for the build context.
///
/// In production (`#[cfg(not(test))]`), returns `Argon2::default()` with
/// strong security parameters.
///
/// In tests (`#[cfg(test)]`), returns an Argon2 instance with minimal
/// parameters for fast test execution.
#[inline]
fn argon2_instance() -> Argon2<'static> {
	#[cfg(test)]
	{
		// Fast, insecure parameters for tests ONLY.
		// Memory: 1024 KiB (1 MiB) vs ~19 MiB in production
		// Iterations: 1 vs 2 in production
		// Parallelism: 1
		let params = Params::new(
			1024, // memory_kib: 1 MiB
			1,    // iterations
			1,    // parallelism
			None, // output length = default
		)
		.expect("valid Argon2 params for tests");
		Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
	}

	#[cfg(not(test))]
	{
		// Production: Argon2id with memory=19456 KiB, iterations=2, parallelism=1
		Argon2::default()
	}
}

/// Hashes a plaintext password with a freshly generated salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
	let salt = SaltString::generate(&mut OsRng);
	argon2_instance()
		.hash_password(password.as_bytes(), &salt)
		.map(|hash| hash.to_string())
		.map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Verifies a plaintext password against a stored PHC hash string.
///
/// Any failure (malformed hash, wrong password) reads as a mismatch. Callers
/// answer "Invalid credentials" either way, so the distinction never reaches
/// the wire.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
	let Ok(parsed) = PasswordHash::new(stored_hash) else {
		return false;
	};
	argon2_instance()
		.verify_password(password.as_bytes(), &parsed)
		.is_ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hash_then_verify_succeeds() {
		let hash = hash_password("lozinka123").unwrap();
		assert!(verify_password("lozinka123", &hash));
	}

	#[test]
	fn wrong_password_fails_verification() {
		let hash = hash_password("lozinka123").unwrap();
		assert!(!verify_password("pogresna", &hash));
	}

	#[test]
	fn hash_never_contains_the_plaintext() {
		let hash = hash_password("lozinka123").unwrap();
		assert!(!hash.contains("lozinka123"));
		assert!(hash.starts_with("$argon2id$"));
	}

	#[test]
	fn same_password_hashes_differently_each_time() {
		let a = hash_password("lozinka123").unwrap();
		let b = hash_password("lozinka123").unwrap();
		assert_ne!(a, b, "salts must differ");
	}

	#[test]
	fn malformed_stored_hash_reads_as_mismatch() {
		assert!(!verify_password("lozinka123", "not-a-phc-string"));
		assert!(!verify_password("lozinka123", ""));
	}
}
