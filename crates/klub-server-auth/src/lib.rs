// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication primitives for the Auto Klub server.
//!
//! This crate holds everything identity-related that does not touch the
//! database or the router:
//!
//! - ID newtypes and roles ([`types`])
//! - The user entity and its wire profile ([`user`])
//! - Argon2 password hashing ([`password`])
//! - Stateless HS256 bearer tokens ([`token`])
//! - Header parsing helpers ([`middleware`])

pub mod middleware;
pub mod password;
pub mod token;
pub mod types;
pub mod user;

pub use middleware::{extract_bearer_token, CurrentUser};
pub use password::{hash_password, verify_password, PasswordError};
pub use token::{TokenError, TokenService, DEFAULT_TOKEN_TTL_DAYS};
pub use types::{CarId, CommentId, UserId, UserRole};
pub use user::{User, UserProfile};
