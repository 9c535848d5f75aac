// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use klub_server_db::{CarCondition, CarSort, FuelType};
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Request to create a car listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
	/// Display label for the owner; defaults to the creator's username.
	pub owner: Option<String>,
	pub model: String,
	pub brand: String,
	pub year: i32,
	pub fuel: FuelType,
	pub mileage: String,
	pub color: String,
	pub condition: CarCondition,
	pub description: String,
	#[serde(default)]
	pub images: Vec<String>,
	pub main_image: Option<String>,
}

/// Request to update a car listing.
///
/// Absent fields are left unchanged. Counters and comments cannot be set
/// here; they move only through their own endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarRequest {
	pub owner: Option<String>,
	pub model: Option<String>,
	pub brand: Option<String>,
	pub year: Option<i32>,
	pub fuel: Option<FuelType>,
	pub mileage: Option<String>,
	pub color: Option<String>,
	pub condition: Option<CarCondition>,
	pub description: Option<String>,
	pub images: Option<Vec<String>>,
	pub main_image: Option<String>,
}

/// Query parameters for the car collection endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct ListCarsParams {
	pub page: Option<u32>,
	pub limit: Option<u32>,
	pub brand: Option<String>,
	pub owner: Option<String>,
	pub year: Option<i32>,
	pub sort: Option<CarSort>,
}

/// Request to post a comment on a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AddCommentRequest {
	/// Display name for the comment; defaults to the commenter's username.
	pub author: Option<String>,
	pub text: String,
	#[serde(default)]
	pub images: Vec<String>,
}

/// Request to attach images to a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AddImagesRequest {
	pub images: Vec<String>,
}

/// Payload returned by the like and unlike endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LikesData {
	pub likes: i64,
}
