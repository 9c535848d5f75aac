// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Schema setup.
//!
//! Every statement is idempotent (`IF NOT EXISTS`), so the runner executes the
//! full list on every boot. Timestamps are stored as RFC 3339 TEXT and the
//! `images` / `comments` columns of `cars` hold JSON arrays, mirroring the
//! document shape the API serves.

use sqlx::sqlite::SqlitePool;

use crate::error::DbError;

/// Run all schema migrations against the given pool.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS users (
			id TEXT PRIMARY KEY,
			username TEXT NOT NULL UNIQUE,
			email TEXT NOT NULL UNIQUE,
			password_hash TEXT NOT NULL,
			first_name TEXT,
			last_name TEXT,
			avatar TEXT,
			bio TEXT,
			location TEXT,
			phone TEXT,
			role TEXT NOT NULL DEFAULT 'user',
			is_active INTEGER NOT NULL DEFAULT 1,
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS cars (
			id TEXT PRIMARY KEY,
			owner_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
			owner TEXT NOT NULL,
			model TEXT NOT NULL,
			brand TEXT NOT NULL,
			year INTEGER NOT NULL,
			fuel TEXT NOT NULL,
			mileage TEXT NOT NULL,
			color TEXT NOT NULL,
			condition TEXT NOT NULL,
			description TEXT NOT NULL,
			images TEXT NOT NULL DEFAULT '[]',
			main_image TEXT,
			likes INTEGER NOT NULL DEFAULT 0,
			views INTEGER NOT NULL DEFAULT 0,
			comments TEXT NOT NULL DEFAULT '[]',
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await?;

	sqlx::query("CREATE INDEX IF NOT EXISTS idx_cars_owner_id ON cars(owner_id)")
		.execute(pool)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_cars_brand ON cars(brand)")
		.execute(pool)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_cars_created_at ON cars(created_at)")
		.execute(pool)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
		.execute(pool)
		.await?;

	tracing::debug!("database migrations applied");
	Ok(())
}
