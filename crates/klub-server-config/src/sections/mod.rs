// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Individual configuration sections.
//!
//! Each section owns a resolved config struct plus a layer type used during
//! merging. Layers hold `Option` fields; `finalize()` fills in defaults.

pub mod auth;
pub mod database;
pub mod http;
pub mod logging;
pub mod media;
