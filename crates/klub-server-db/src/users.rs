// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! User repository for database operations.

use async_trait::async_trait;
use klub_server_auth::{User, UserId, UserRole};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;

/// Trait for user database operations.
#[async_trait]
pub trait UserStore: Send + Sync {
	async fn create(&self, user: &User) -> Result<(), DbError>;

	async fn get(&self, id: &UserId) -> Result<Option<User>, DbError>;

	async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError>;

	async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbError>;

	async fn update_profile(&self, user: &User) -> Result<bool, DbError>;

	async fn update_password_hash(
		&self,
		id: &UserId,
		password_hash: &str,
	) -> Result<bool, DbError>;
}

/// Repository for user database operations.
#[derive(Clone)]
pub struct UserRepository {
	pool: SqlitePool,
}

impl UserRepository {
	/// Create a new repository from an existing pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Get the underlying database pool.
	pub fn pool(&self) -> &SqlitePool {
		&self.pool
	}

	/// Insert a new user.
	///
	/// Returns `DbError::Conflict` when the username or email is already
	/// taken. Handlers pre-check both for friendlier messages; this is the
	/// backstop for concurrent registrations.
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
	pub async fn create(&self, user: &User) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO users (
				id, username, email, password_hash,
				first_name, last_name, avatar, bio, location, phone,
				role, is_active, created_at, updated_at
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(user.id.to_string())
		.bind(&user.username)
		.bind(&user.email)
		.bind(&user.password_hash)
		.bind(&user.first_name)
		.bind(&user.last_name)
		.bind(&user.avatar)
		.bind(&user.bio)
		.bind(&user.location)
		.bind(&user.phone)
		.bind(user.role.to_string())
		.bind(user.is_active as i32)
		.bind(user.created_at.to_rfc3339())
		.bind(user.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await
		.map_err(|e| match e {
			sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
				DbError::Conflict("username or email already taken".to_string())
			}
			_ => DbError::Sqlx(e),
		})?;

		tracing::debug!(user_id = %user.id, "user created");
		Ok(())
	}

	/// Fetch a user by id.
	pub async fn get(&self, id: &UserId) -> Result<Option<User>, DbError> {
		let row = sqlx::query("SELECT * FROM users WHERE id = ?")
			.bind(id.to_string())
			.fetch_optional(&self.pool)
			.await?;

		row.map(|r| row_to_user(&r)).transpose()
	}

	/// Fetch a user by email. Callers lowercase the email first.
	pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
		let row = sqlx::query("SELECT * FROM users WHERE email = ?")
			.bind(email)
			.fetch_optional(&self.pool)
			.await?;

		row.map(|r| row_to_user(&r)).transpose()
	}

	/// Fetch a user by username.
	pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		let row = sqlx::query("SELECT * FROM users WHERE username = ?")
			.bind(username)
			.fetch_optional(&self.pool)
			.await?;

		row.map(|r| row_to_user(&r)).transpose()
	}

	/// Write the mutable profile fields of an existing user.
	#[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
	pub async fn update_profile(&self, user: &User) -> Result<bool, DbError> {
		let result = sqlx::query(
			r#"
			UPDATE users SET
				first_name = ?,
				last_name = ?,
				avatar = ?,
				bio = ?,
				location = ?,
				phone = ?,
				updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&user.first_name)
		.bind(&user.last_name)
		.bind(&user.avatar)
		.bind(&user.bio)
		.bind(&user.location)
		.bind(&user.phone)
		.bind(user.updated_at.to_rfc3339())
		.bind(user.id.to_string())
		.execute(&self.pool)
		.await?;

		Ok(result.rows_affected() > 0)
	}

	/// Replace the stored password hash.
	#[tracing::instrument(skip(self, password_hash), fields(user_id = %id))]
	pub async fn update_password_hash(
		&self,
		id: &UserId,
		password_hash: &str,
	) -> Result<bool, DbError> {
		let result = sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
			.bind(password_hash)
			.bind(chrono::Utc::now().to_rfc3339())
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}
}

#[async_trait]
impl UserStore for UserRepository {
	async fn create(&self, user: &User) -> Result<(), DbError> {
		UserRepository::create(self, user).await
	}

	async fn get(&self, id: &UserId) -> Result<Option<User>, DbError> {
		UserRepository::get(self, id).await
	}

	async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
		UserRepository::find_by_email(self, email).await
	}

	async fn find_by_username(&self, username: &str) -> Result<Option<User>, DbError> {
		UserRepository::find_by_username(self, username).await
	}

	async fn update_profile(&self, user: &User) -> Result<bool, DbError> {
		UserRepository::update_profile(self, user).await
	}

	async fn update_password_hash(
		&self,
		id: &UserId,
		password_hash: &str,
	) -> Result<bool, DbError> {
		UserRepository::update_password_hash(self, id, password_hash).await
	}
}

// =============================================================================
// Helpers
// =============================================================================

pub(crate) fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User, DbError> {
	let id_str: String = row.get("id");
	let role_str: String = row.get("role");
	let is_active: i32 = row.get("is_active");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	let id =
		Uuid::parse_str(&id_str).map_err(|e| DbError::Internal(format!("Invalid user ID: {e}")))?;
	let role = match role_str.as_str() {
		"admin" => UserRole::Admin,
		_ => UserRole::User,
	};

	Ok(User {
		id: UserId::new(id),
		username: row.get("username"),
		email: row.get("email"),
		password_hash: row.get("password_hash"),
		first_name: row.get("first_name"),
		last_name: row.get("last_name"),
		avatar: row.get("avatar"),
		bio: row.get("bio"),
		location: row.get("location"),
		phone: row.get("phone"),
		role,
		is_active: is_active != 0,
		created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
			.map_err(|e| DbError::Internal(format!("Invalid created_at: {e}")))?
			.with_timezone(&chrono::Utc),
		updated_at: chrono::DateTime::parse_from_rfc3339(&updated_at)
			.map_err(|e| DbError::Internal(format!("Invalid updated_at: {e}")))?
			.with_timezone(&chrono::Utc),
	})
}
