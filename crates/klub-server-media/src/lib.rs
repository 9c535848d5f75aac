// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Media host integration for the Auto Klub server.
//!
//! Provides:
//! - [`MediaHost`]: the trait the server talks to for image deletion
//! - [`HttpMediaHost`] / [`DisabledMediaHost`]: real and no-op implementations
//! - [`extract_public_id`]: maps delivery URLs back to media host public IDs
//! - [`delete_images`]: best-effort cleanup used when cars are deleted

pub mod cleanup;
pub mod error;
pub mod host;
pub mod public_id;
pub mod testing;

pub use cleanup::{delete_images, CleanupReport};
pub use error::{MediaError, Result};
pub use host::{DisabledMediaHost, HttpMediaHost, MediaHost};
pub use public_id::extract_public_id;
