// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Auto Klub community car registry server.
//!
//! This crate provides the HTTP API for the klub: accounts with bearer-token
//! authentication, car listings with likes, views and embedded comments, and
//! best-effort media cleanup when listings are deleted.

pub mod api;
pub mod api_docs;
pub mod api_response;
pub mod auth_middleware;
pub mod error;
pub mod routes;
pub mod validation;

pub use api::{create_app_state, create_router, AppState};
pub use api_docs::ApiDoc;
pub use error::ServerError;
pub use klub_server_config::ServerConfig;
