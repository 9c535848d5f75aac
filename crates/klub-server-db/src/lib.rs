// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database layer for the Auto Klub server.
//!
//! SQLite via sqlx, one repository per aggregate:
//!
//! - [`users::UserRepository`] - accounts and credentials
//! - [`cars::CarRepository`] - listings with embedded comments and counters
//!
//! [`pool::create_pool`] opens the database in WAL mode and
//! [`migrations::run_migrations`] brings the schema up on every boot.

pub mod cars;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod testing;
pub mod types;
pub mod users;

pub use cars::{CarRepository, CarStore};
pub use error::{DbError, Result};
pub use migrations::run_migrations;
pub use pool::create_pool;
pub use types::{Car, CarCondition, CarQuery, CarSort, Comment, FuelType};
pub use users::{UserRepository, UserStore};

pub use sqlx::SqlitePool;
