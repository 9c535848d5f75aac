// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod auth;
pub mod cars;
pub mod envelope;

pub use auth::{
	AuthData, ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest, UserData,
};
pub use cars::{
	AddCommentRequest, AddImagesRequest, CreateCarRequest, LikesData, ListCarsParams,
	UpdateCarRequest,
};
pub use envelope::{ApiEnvelope, Pagination};
