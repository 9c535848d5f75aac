// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Car listing types.
//!
//! The wire format is camelCase and the enum labels are the Serbian strings
//! the klub has always used, so existing clients keep working unchanged.
//! Comments are embedded in their listing and stored as a JSON array column,
//! which keeps "one listing with its discussion" a single row.

use chrono::{DateTime, Utc};
use klub_server_auth::{CarId, CommentId, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Enums
// =============================================================================

/// Fuel types accepted on a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum FuelType {
	#[serde(rename = "Benzin")]
	Petrol,
	#[serde(rename = "Dizel")]
	Diesel,
	#[serde(rename = "Hibrid")]
	Hybrid,
	#[serde(rename = "Električni")]
	Electric,
	#[serde(rename = "Gas")]
	Lpg,
}

impl FuelType {
	/// The wire and storage label for this fuel type.
	pub fn as_str(&self) -> &'static str {
		match self {
			FuelType::Petrol => "Benzin",
			FuelType::Diesel => "Dizel",
			FuelType::Hybrid => "Hibrid",
			FuelType::Electric => "Električni",
			FuelType::Lpg => "Gas",
		}
	}

	/// Parse a storage label back into the enum.
	pub fn parse(label: &str) -> Option<Self> {
		match label {
			"Benzin" => Some(FuelType::Petrol),
			"Dizel" => Some(FuelType::Diesel),
			"Hibrid" => Some(FuelType::Hybrid),
			"Električni" => Some(FuelType::Electric),
			"Gas" => Some(FuelType::Lpg),
			_ => None,
		}
	}

	/// Returns all accepted labels, for validation error messages.
	pub fn labels() -> &'static [&'static str] {
		&["Benzin", "Dizel", "Hibrid", "Električni", "Gas"]
	}
}

/// Condition grades accepted on a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum CarCondition {
	#[serde(rename = "Kao nov")]
	LikeNew,
	#[serde(rename = "Odlično")]
	Excellent,
	#[serde(rename = "Dobro")]
	Good,
	#[serde(rename = "Zadovoljavajuće")]
	Fair,
	#[serde(rename = "Potrebno popravke")]
	NeedsRepairs,
}

impl CarCondition {
	/// The wire and storage label for this condition grade.
	pub fn as_str(&self) -> &'static str {
		match self {
			CarCondition::LikeNew => "Kao nov",
			CarCondition::Excellent => "Odlično",
			CarCondition::Good => "Dobro",
			CarCondition::Fair => "Zadovoljavajuće",
			CarCondition::NeedsRepairs => "Potrebno popravke",
		}
	}

	/// Parse a storage label back into the enum.
	pub fn parse(label: &str) -> Option<Self> {
		match label {
			"Kao nov" => Some(CarCondition::LikeNew),
			"Odlično" => Some(CarCondition::Excellent),
			"Dobro" => Some(CarCondition::Good),
			"Zadovoljavajuće" => Some(CarCondition::Fair),
			"Potrebno popravke" => Some(CarCondition::NeedsRepairs),
			_ => None,
		}
	}

	/// Returns all accepted labels, for validation error messages.
	pub fn labels() -> &'static [&'static str] {
		&[
			"Kao nov",
			"Odlično",
			"Dobro",
			"Zadovoljavajuće",
			"Potrebno popravke",
		]
	}
}

// =============================================================================
// Entities
// =============================================================================

/// A comment embedded in a car listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
	/// Unique identifier of the comment.
	#[schema(value_type = String)]
	pub id: CommentId,
	/// Display name supplied by the commenter.
	pub author: String,
	/// Comment body.
	pub text: String,
	/// Optional image URLs attached to the comment.
	#[serde(default)]
	pub images: Vec<String>,
	/// When the comment was posted.
	pub created_at: DateTime<Utc>,
}

impl Comment {
	/// Build a fresh comment with a generated id and the current time.
	pub fn new(author: impl Into<String>, text: impl Into<String>, images: Vec<String>) -> Self {
		Self {
			id: CommentId::generate(),
			author: author.into(),
			text: text.into(),
			images,
			created_at: Utc::now(),
		}
	}
}

/// A car listing.
///
/// `owner_id` is the account that created the listing and is the only input
/// to mutation permission checks. `owner` is just a display label and has no
/// bearing on permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Car {
	/// Unique identifier of the listing.
	#[schema(value_type = String)]
	pub id: CarId,
	/// Account that owns the listing.
	#[schema(value_type = String)]
	pub owner_id: UserId,
	/// Display label for the owner (defaults to the creator's username).
	pub owner: String,
	/// Model name.
	pub model: String,
	/// Brand name.
	pub brand: String,
	/// Production year.
	pub year: i32,
	/// Fuel type.
	pub fuel: FuelType,
	/// Odometer reading, free-form (e.g. "185000 km").
	pub mileage: String,
	/// Body color.
	pub color: String,
	/// Condition grade.
	pub condition: CarCondition,
	/// Free-form description.
	pub description: String,
	/// Image URLs attached to the listing.
	pub images: Vec<String>,
	/// Cover image, defaults to the first attached image.
	pub main_image: Option<String>,
	/// Like counter, never negative.
	pub likes: i64,
	/// View counter.
	pub views: i64,
	/// Embedded discussion, oldest first.
	pub comments: Vec<Comment>,
	/// When the listing was created.
	pub created_at: DateTime<Utc>,
	/// When the listing was last changed.
	pub updated_at: DateTime<Utc>,
}

impl Car {
	/// Default the cover image to the first attached image.
	///
	/// Applied before every write that can change `images`, so a listing with
	/// pictures always has a cover.
	pub fn apply_main_image_default(&mut self) {
		if self.main_image.is_none() {
			self.main_image = self.images.first().cloned();
		}
	}
}

// =============================================================================
// Queries
// =============================================================================

/// Sort orders for listing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CarSort {
	/// Most recently created first.
	Newest,
	/// Oldest first.
	Oldest,
	/// Highest view counter first.
	MostViewed,
	/// Highest like counter first.
	MostLiked,
}

impl Default for CarSort {
	fn default() -> Self {
		CarSort::Newest
	}
}

impl CarSort {
	/// The ORDER BY clause for this sort.
	///
	/// Always one of four fixed strings, so interpolating it into SQL is safe.
	pub fn order_clause(&self) -> &'static str {
		match self {
			CarSort::Newest => "created_at DESC",
			CarSort::Oldest => "created_at ASC",
			CarSort::MostViewed => "views DESC",
			CarSort::MostLiked => "likes DESC",
		}
	}
}

/// Filter, sort and paging parameters for listing queries.
#[derive(Debug, Clone, Default)]
pub struct CarQuery {
	/// Case-insensitive substring match on `brand`.
	pub brand: Option<String>,
	/// Case-insensitive substring match on the `owner` display label.
	pub owner: Option<String>,
	/// Exact match on `year`.
	pub year: Option<i32>,
	/// Sort order.
	pub sort: CarSort,
	/// Maximum number of rows to return. `None` returns everything.
	pub limit: Option<u32>,
	/// Number of rows to skip.
	pub offset: u32,
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn fuel_labels_roundtrip() {
		for label in FuelType::labels() {
			let fuel = FuelType::parse(label).unwrap();
			assert_eq!(fuel.as_str(), *label);
		}
	}

	#[test]
	fn condition_labels_roundtrip() {
		for label in CarCondition::labels() {
			let condition = CarCondition::parse(label).unwrap();
			assert_eq!(condition.as_str(), *label);
		}
	}

	#[test]
	fn unknown_labels_are_rejected() {
		assert_eq!(FuelType::parse("Nuclear"), None);
		assert_eq!(CarCondition::parse("Mint"), None);
		assert_eq!(FuelType::parse("benzin"), None, "labels are case-sensitive");
	}

	#[test]
	fn fuel_serializes_to_serbian_labels() {
		let json = serde_json::to_string(&FuelType::Electric).unwrap();
		assert_eq!(json, "\"Električni\"");
		let back: FuelType = serde_json::from_str(&json).unwrap();
		assert_eq!(back, FuelType::Electric);
	}

	#[test]
	fn condition_serializes_to_serbian_labels() {
		let json = serde_json::to_string(&CarCondition::NeedsRepairs).unwrap();
		assert_eq!(json, "\"Potrebno popravke\"");
	}

	#[test]
	fn sort_parses_kebab_case_keys() {
		let sort: CarSort = serde_json::from_str("\"most-viewed\"").unwrap();
		assert_eq!(sort, CarSort::MostViewed);
		assert_eq!(CarSort::default(), CarSort::Newest);
	}

	#[test]
	fn sort_order_clauses_are_fixed_strings() {
		assert_eq!(CarSort::Newest.order_clause(), "created_at DESC");
		assert_eq!(CarSort::Oldest.order_clause(), "created_at ASC");
		assert_eq!(CarSort::MostViewed.order_clause(), "views DESC");
		assert_eq!(CarSort::MostLiked.order_clause(), "likes DESC");
	}

	#[test]
	fn car_serializes_with_camel_case_and_embedded_comments() {
		use serde_json::json;

		let car = Car {
			id: CarId::generate(),
			owner_id: UserId::generate(),
			owner: "petar".to_string(),
			model: "Golf 7".to_string(),
			brand: "Volkswagen".to_string(),
			year: 2017,
			fuel: FuelType::Diesel,
			mileage: "185000 km".to_string(),
			color: "siva".to_string(),
			condition: CarCondition::Good,
			description: "Redovno servisiran".to_string(),
			images: vec!["https://img.example/1.jpg".to_string()],
			main_image: Some("https://img.example/1.jpg".to_string()),
			likes: 0,
			views: 0,
			comments: vec![Comment::new("mika", "Lep auto", Vec::new())],
			created_at: Utc::now(),
			updated_at: Utc::now(),
		};

		let json = serde_json::to_value(&car).unwrap();
		assert_eq!(json["ownerId"], json!(car.owner_id.to_string()));
		assert_eq!(json["mainImage"], json!("https://img.example/1.jpg"));
		assert_eq!(json["fuel"], json!("Dizel"));
		assert_eq!(json["condition"], json!("Dobro"));
		assert_eq!(json["comments"][0]["author"], json!("mika"));
		assert!(json.get("main_image").is_none());
	}

	#[test]
	fn comment_new_generates_distinct_ids() {
		let a = Comment::new("mika", "prvi", Vec::new());
		let b = Comment::new("mika", "drugi", Vec::new());
		assert_ne!(a.id, b.id);
	}

	#[test]
	fn main_image_defaults_to_first_image() {
		let mut car = Car {
			id: CarId::generate(),
			owner_id: UserId::generate(),
			owner: "petar".to_string(),
			model: "128".to_string(),
			brand: "Zastava".to_string(),
			year: 1985,
			fuel: FuelType::Petrol,
			mileage: "98000 km".to_string(),
			color: "crvena".to_string(),
			condition: CarCondition::Fair,
			description: "Garazirana".to_string(),
			images: Vec::new(),
			main_image: None,
			likes: 0,
			views: 0,
			comments: Vec::new(),
			created_at: Utc::now(),
			updated_at: Utc::now(),
		};

		// No images: nothing to default to.
		car.apply_main_image_default();
		assert_eq!(car.main_image, None);

		car.images = vec!["a.jpg".to_string(), "b.jpg".to_string()];
		car.apply_main_image_default();
		assert_eq!(car.main_image.as_deref(), Some("a.jpg"));

		// An existing cover is never overwritten.
		car.images = vec!["c.jpg".to_string()];
		car.apply_main_image_default();
		assert_eq!(car.main_image.as_deref(), Some("a.jpg"));
	}

	proptest! {
		// Comments live in a JSON text column, so arbitrary author and
		// text content must survive the serde round-trip untouched.
		#[test]
		fn comments_roundtrip_any_content(author in ".{1,40}", text in ".{1,200}") {
			let comment = Comment::new(author.clone(), text.clone(), Vec::new());
			let json = serde_json::to_string(&comment).unwrap();
			let back: Comment = serde_json::from_str(&json).unwrap();
			prop_assert_eq!(back.id, comment.id);
			prop_assert_eq!(back.author, author);
			prop_assert_eq!(back.text, text);
		}
	}
}
