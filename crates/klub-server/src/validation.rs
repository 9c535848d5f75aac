// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request field validation.
//!
//! Each check answers with a [`ServerError::Validation`] carrying the exact
//! message the frontend matches on, so handlers can `?` straight through.

use chrono::{Datelike, Utc};

use crate::error::ServerError;

/// Validate a username: 3 to 30 chars, alphanumeric plus `_` and `-`.
pub fn validate_username(username: &str) -> Result<(), ServerError> {
	let len = username.chars().count();
	if len < 3 {
		return Err(ServerError::Validation(
			"Korisničko ime mora imati najmanje 3 karaktera".to_string(),
		));
	}
	if len > 30 {
		return Err(ServerError::Validation(
			"Korisničko ime ne može biti duže od 30 karaktera".to_string(),
		));
	}
	if !username
		.chars()
		.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
	{
		return Err(ServerError::Validation(
			"Korisničko ime može sadržati samo slova, brojeve, _ i -".to_string(),
		));
	}
	Ok(())
}

/// Validate an email address shape: `local@domain` with a dotted domain.
pub fn validate_email(email: &str) -> Result<(), ServerError> {
	let invalid = || ServerError::Validation("Molimo unesite validan email".to_string());
	let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
	if local.is_empty() || domain.is_empty() || domain.contains('@') {
		return Err(invalid());
	}
	if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
		return Err(invalid());
	}
	Ok(())
}

/// Validate a password: at least 6 chars.
pub fn validate_password(password: &str) -> Result<(), ServerError> {
	if password.chars().count() < 6 {
		return Err(ServerError::Validation(
			"Lozinka mora imati najmanje 6 karaktera".to_string(),
		));
	}
	Ok(())
}

/// Validate a model year: 1900 up to next calendar year.
pub fn validate_year(year: i32) -> Result<(), ServerError> {
	if year < 1900 {
		return Err(ServerError::Validation("Godina mora biti nakon 1900".to_string()));
	}
	if year > Utc::now().year() + 1 {
		return Err(ServerError::Validation("Godina ne može biti u budućnosti".to_string()));
	}
	Ok(())
}

/// Validate that `value` stays within `max` chars, answering `message` otherwise.
pub fn validate_max_chars(value: &str, max: usize, message: &str) -> Result<(), ServerError> {
	if value.chars().count() > max {
		return Err(ServerError::Validation(message.to_string()));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn message(result: Result<(), ServerError>) -> String {
		match result {
			Err(ServerError::Validation(msg)) => msg,
			other => panic!("expected validation error, got {other:?}"),
		}
	}

	#[test]
	fn test_username_length_bounds() {
		assert!(validate_username("ana").is_ok());
		assert!(validate_username(&"a".repeat(30)).is_ok());
		assert_eq!(
			message(validate_username("ab")),
			"Korisničko ime mora imati najmanje 3 karaktera"
		);
		assert_eq!(
			message(validate_username(&"a".repeat(31))),
			"Korisničko ime ne može biti duže od 30 karaktera"
		);
	}

	#[test]
	fn test_username_character_set() {
		assert!(validate_username("pera_82").is_ok());
		assert!(validate_username("auto-klub").is_ok());
		assert!(validate_username("pera zdera").is_err());
		assert!(validate_username("péra").is_err());
	}

	#[test]
	fn test_email_shapes() {
		assert!(validate_email("marko@example.com").is_ok());
		assert!(validate_email("m.arko@klub.example.rs").is_ok());
		for bad in ["", "marko", "marko@", "@example.com", "marko@example", "a@b@c.com", "marko@.com"] {
			assert_eq!(message(validate_email(bad)), "Molimo unesite validan email");
		}
	}

	#[test]
	fn test_password_minimum() {
		assert!(validate_password("šifra1").is_ok());
		assert_eq!(
			message(validate_password("kratk")),
			"Lozinka mora imati najmanje 6 karaktera"
		);
	}

	#[test]
	fn test_year_window() {
		assert!(validate_year(1900).is_ok());
		let next_year = Utc::now().year() + 1;
		assert!(validate_year(next_year).is_ok());
		assert_eq!(message(validate_year(1899)), "Godina mora biti nakon 1900");
		assert_eq!(
			message(validate_year(next_year + 1)),
			"Godina ne može biti u budućnosti"
		);
	}

	#[test]
	fn test_max_chars_counts_chars_not_bytes() {
		// "š" is two bytes but one char.
		let value = "š".repeat(10);
		assert!(validate_max_chars(&value, 10, "predugačko").is_ok());
		assert_eq!(message(validate_max_chars(&value, 9, "predugačko")), "predugačko");
	}
}
