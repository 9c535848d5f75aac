// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqliteSynchronous};
use std::str::FromStr;

use crate::error::DbError;

/// Create a SqlitePool with WAL mode and common settings.
///
/// The cars table references users by id, so foreign key enforcement is
/// switched on for every connection.
///
/// # Arguments
/// * `database_url` - SQLite connection string (e.g., "sqlite:./klub.db")
///
/// # Errors
/// Returns `DbError::Internal` if the URL is invalid or connection fails.
#[tracing::instrument(skip(database_url))]
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, DbError> {
	let options = SqliteConnectOptions::from_str(database_url)
		.map_err(|e| DbError::Internal(format!("Invalid database URL: {e}")))?
		.journal_mode(SqliteJournalMode::Wal)
		.synchronous(SqliteSynchronous::Normal)
		.foreign_keys(true)
		.create_if_missing(true);

	let pool = SqlitePool::connect_with(options).await?;

	tracing::debug!("database pool created");
	Ok(pool)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::migrations::run_migrations;

	#[tokio::test]
	async fn test_create_pool_creates_the_database_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("klub.db");

		let pool = create_pool(&format!("sqlite:{}", path.display())).await.unwrap();
		run_migrations(&pool).await.unwrap();

		let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
			.fetch_one(&pool)
			.await
			.unwrap();
		assert_eq!(count, 0);
		assert!(path.exists(), "create_if_missing should have created the file");
	}

	#[tokio::test]
	async fn test_create_pool_rejects_non_sqlite_urls() {
		let err = create_pool("mysql://nope").await.unwrap_err();
		assert!(matches!(err, DbError::Internal(_)));
	}
}
