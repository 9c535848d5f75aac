// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Car repository for database operations.
//!
//! Counters are bumped with single UPDATE statements (`likes = likes + 1`,
//! `views = views + 1`) so concurrent requests never lose increments.
//! Comment and image mutations rewrite their JSON column inside a
//! transaction, keeping each listing update all-or-nothing.

use async_trait::async_trait;
use klub_server_auth::{CarId, CommentId};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;
use crate::types::{Car, CarCondition, CarQuery, Comment, FuelType};

/// Trait for car database operations.
#[async_trait]
pub trait CarStore: Send + Sync {
	async fn create(&self, car: &Car) -> Result<(), DbError>;

	async fn get(&self, id: &CarId) -> Result<Option<Car>, DbError>;

	async fn get_and_increment_views(&self, id: &CarId) -> Result<Option<Car>, DbError>;

	async fn list(&self, query: &CarQuery) -> Result<Vec<Car>, DbError>;

	async fn count(&self, query: &CarQuery) -> Result<u64, DbError>;

	async fn update(&self, car: &Car) -> Result<bool, DbError>;

	async fn delete(&self, id: &CarId) -> Result<bool, DbError>;

	async fn like(&self, id: &CarId) -> Result<Option<i64>, DbError>;

	async fn unlike(&self, id: &CarId) -> Result<Option<i64>, DbError>;

	async fn add_comment(&self, car_id: &CarId, comment: &Comment) -> Result<Option<Car>, DbError>;

	async fn remove_comment(
		&self,
		car_id: &CarId,
		comment_id: &CommentId,
	) -> Result<Option<Car>, DbError>;

	async fn add_images(&self, car_id: &CarId, images: &[String]) -> Result<Option<Car>, DbError>;

	async fn health_check(&self) -> Result<(), DbError>;
}

/// Repository for car database operations.
#[derive(Clone)]
pub struct CarRepository {
	pool: SqlitePool,
}

impl CarRepository {
	/// Create a new repository from an existing pool.
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Get the underlying database pool.
	pub fn pool(&self) -> &SqlitePool {
		&self.pool
	}

	/// Insert a new listing.
	#[tracing::instrument(skip(self, car), fields(car_id = %car.id, owner_id = %car.owner_id))]
	pub async fn create(&self, car: &Car) -> Result<(), DbError> {
		let images_json = serde_json::to_string(&car.images)?;
		let comments_json = serde_json::to_string(&car.comments)?;

		sqlx::query(
			r#"
			INSERT INTO cars (
				id, owner_id, owner, model, brand, year, fuel, mileage, color,
				condition, description, images, main_image, likes, views,
				comments, created_at, updated_at
			) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(car.id.to_string())
		.bind(car.owner_id.to_string())
		.bind(&car.owner)
		.bind(&car.model)
		.bind(&car.brand)
		.bind(car.year)
		.bind(car.fuel.as_str())
		.bind(&car.mileage)
		.bind(&car.color)
		.bind(car.condition.as_str())
		.bind(&car.description)
		.bind(&images_json)
		.bind(&car.main_image)
		.bind(car.likes)
		.bind(car.views)
		.bind(&comments_json)
		.bind(car.created_at.to_rfc3339())
		.bind(car.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await?;

		tracing::debug!(car_id = %car.id, "car inserted");
		Ok(())
	}

	/// Fetch a listing by id without touching counters.
	pub async fn get(&self, id: &CarId) -> Result<Option<Car>, DbError> {
		let row = sqlx::query("SELECT * FROM cars WHERE id = ?")
			.bind(id.to_string())
			.fetch_optional(&self.pool)
			.await?;

		row.map(|r| row_to_car(&r)).transpose()
	}

	/// Fetch a listing and bump its view counter in one statement.
	///
	/// The increment and the read are a single UPDATE .. RETURNING, so two
	/// concurrent fetches both count.
	#[tracing::instrument(skip(self), fields(car_id = %id))]
	pub async fn get_and_increment_views(&self, id: &CarId) -> Result<Option<Car>, DbError> {
		let row = sqlx::query(
			"UPDATE cars SET views = views + 1, updated_at = ? WHERE id = ? RETURNING *",
		)
		.bind(chrono::Utc::now().to_rfc3339())
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_car(&r)).transpose()
	}

	/// List listings matching the query, sorted and paged.
	pub async fn list(&self, query: &CarQuery) -> Result<Vec<Car>, DbError> {
		let sql = format!(
			r#"
			SELECT * FROM cars
			WHERE (? IS NULL OR brand LIKE '%' || ? || '%')
			  AND (? IS NULL OR owner LIKE '%' || ? || '%')
			  AND (? IS NULL OR year = ?)
			ORDER BY {}
			LIMIT ? OFFSET ?
			"#,
			query.sort.order_clause()
		);

		let rows = sqlx::query(&sql)
			.bind(&query.brand)
			.bind(&query.brand)
			.bind(&query.owner)
			.bind(&query.owner)
			.bind(query.year)
			.bind(query.year)
			.bind(query.limit.map(|l| l as i64).unwrap_or(-1))
			.bind(query.offset as i64)
			.fetch_all(&self.pool)
			.await?;

		rows.iter().map(row_to_car).collect()
	}

	/// Count listings matching the query, ignoring paging.
	pub async fn count(&self, query: &CarQuery) -> Result<u64, DbError> {
		let row = sqlx::query(
			r#"
			SELECT COUNT(*) AS total FROM cars
			WHERE (? IS NULL OR brand LIKE '%' || ? || '%')
			  AND (? IS NULL OR owner LIKE '%' || ? || '%')
			  AND (? IS NULL OR year = ?)
			"#,
		)
		.bind(&query.brand)
		.bind(&query.brand)
		.bind(&query.owner)
		.bind(&query.owner)
		.bind(query.year)
		.bind(query.year)
		.fetch_one(&self.pool)
		.await?;

		let total: i64 = row.get("total");
		Ok(total as u64)
	}

	/// Write the mutable listing fields of an existing row.
	///
	/// Counters and comments are deliberately not part of this statement;
	/// they move only through their dedicated operations.
	#[tracing::instrument(skip(self, car), fields(car_id = %car.id))]
	pub async fn update(&self, car: &Car) -> Result<bool, DbError> {
		let images_json = serde_json::to_string(&car.images)?;

		let result = sqlx::query(
			r#"
			UPDATE cars SET
				owner = ?,
				model = ?,
				brand = ?,
				year = ?,
				fuel = ?,
				mileage = ?,
				color = ?,
				condition = ?,
				description = ?,
				images = ?,
				main_image = ?,
				updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&car.owner)
		.bind(&car.model)
		.bind(&car.brand)
		.bind(car.year)
		.bind(car.fuel.as_str())
		.bind(&car.mileage)
		.bind(&car.color)
		.bind(car.condition.as_str())
		.bind(&car.description)
		.bind(&images_json)
		.bind(&car.main_image)
		.bind(car.updated_at.to_rfc3339())
		.bind(car.id.to_string())
		.execute(&self.pool)
		.await?;

		Ok(result.rows_affected() > 0)
	}

	/// Delete a listing. Returns false when no row matched.
	#[tracing::instrument(skip(self), fields(car_id = %id))]
	pub async fn delete(&self, id: &CarId) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM cars WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		Ok(result.rows_affected() > 0)
	}

	/// Increment the like counter, returning the new count.
	#[tracing::instrument(skip(self), fields(car_id = %id))]
	pub async fn like(&self, id: &CarId) -> Result<Option<i64>, DbError> {
		let row = sqlx::query(
			"UPDATE cars SET likes = likes + 1, updated_at = ? WHERE id = ? RETURNING likes",
		)
		.bind(chrono::Utc::now().to_rfc3339())
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.map(|r| r.get("likes")))
	}

	/// Decrement the like counter, flooring at zero. Returns the new count.
	#[tracing::instrument(skip(self), fields(car_id = %id))]
	pub async fn unlike(&self, id: &CarId) -> Result<Option<i64>, DbError> {
		let row = sqlx::query(
			"UPDATE cars SET likes = MAX(likes - 1, 0), updated_at = ? WHERE id = ? RETURNING likes",
		)
		.bind(chrono::Utc::now().to_rfc3339())
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		Ok(row.map(|r| r.get("likes")))
	}

	/// Append a comment to a listing, returning the updated listing.
	#[tracing::instrument(skip(self, comment), fields(car_id = %car_id, comment_id = %comment.id))]
	pub async fn add_comment(
		&self,
		car_id: &CarId,
		comment: &Comment,
	) -> Result<Option<Car>, DbError> {
		let mut tx = self.pool.begin().await?;

		let row = sqlx::query("SELECT comments FROM cars WHERE id = ?")
			.bind(car_id.to_string())
			.fetch_optional(&mut *tx)
			.await?;

		let Some(row) = row else {
			return Ok(None);
		};

		let comments_json: String = row.get("comments");
		let mut comments: Vec<Comment> = serde_json::from_str(&comments_json)?;
		comments.push(comment.clone());

		sqlx::query("UPDATE cars SET comments = ?, updated_at = ? WHERE id = ?")
			.bind(serde_json::to_string(&comments)?)
			.bind(chrono::Utc::now().to_rfc3339())
			.bind(car_id.to_string())
			.execute(&mut *tx)
			.await?;

		tx.commit().await?;

		tracing::debug!(car_id = %car_id, "comment added");
		self.get(car_id).await
	}

	/// Remove a comment from a listing.
	///
	/// Returns the updated listing, or `None` when the listing or the
	/// comment does not exist.
	#[tracing::instrument(skip(self), fields(car_id = %car_id, comment_id = %comment_id))]
	pub async fn remove_comment(
		&self,
		car_id: &CarId,
		comment_id: &CommentId,
	) -> Result<Option<Car>, DbError> {
		let mut tx = self.pool.begin().await?;

		let row = sqlx::query("SELECT comments FROM cars WHERE id = ?")
			.bind(car_id.to_string())
			.fetch_optional(&mut *tx)
			.await?;

		let Some(row) = row else {
			return Ok(None);
		};

		let comments_json: String = row.get("comments");
		let mut comments: Vec<Comment> = serde_json::from_str(&comments_json)?;
		let before = comments.len();
		comments.retain(|c| c.id != *comment_id);

		if comments.len() == before {
			return Ok(None);
		}

		sqlx::query("UPDATE cars SET comments = ?, updated_at = ? WHERE id = ?")
			.bind(serde_json::to_string(&comments)?)
			.bind(chrono::Utc::now().to_rfc3339())
			.bind(car_id.to_string())
			.execute(&mut *tx)
			.await?;

		tx.commit().await?;

		tracing::debug!(car_id = %car_id, "comment removed");
		self.get(car_id).await
	}

	/// Append image URLs to a listing, returning the updated listing.
	///
	/// When the listing has no cover image yet, the first image becomes it.
	#[tracing::instrument(skip(self, images), fields(car_id = %car_id, count = images.len()))]
	pub async fn add_images(
		&self,
		car_id: &CarId,
		images: &[String],
	) -> Result<Option<Car>, DbError> {
		let mut tx = self.pool.begin().await?;

		let row = sqlx::query("SELECT images, main_image FROM cars WHERE id = ?")
			.bind(car_id.to_string())
			.fetch_optional(&mut *tx)
			.await?;

		let Some(row) = row else {
			return Ok(None);
		};

		let images_json: String = row.get("images");
		let main_image: Option<String> = row.get("main_image");

		let mut all: Vec<String> = serde_json::from_str(&images_json)?;
		all.extend(images.iter().cloned());
		let main_image = main_image.or_else(|| all.first().cloned());

		sqlx::query("UPDATE cars SET images = ?, main_image = ?, updated_at = ? WHERE id = ?")
			.bind(serde_json::to_string(&all)?)
			.bind(&main_image)
			.bind(chrono::Utc::now().to_rfc3339())
			.bind(car_id.to_string())
			.execute(&mut *tx)
			.await?;

		tx.commit().await?;

		tracing::debug!(car_id = %car_id, "images added");
		self.get(car_id).await
	}

	/// Verify the database answers queries.
	pub async fn health_check(&self) -> Result<(), DbError> {
		sqlx::query("SELECT 1").execute(&self.pool).await?;
		Ok(())
	}
}

#[async_trait]
impl CarStore for CarRepository {
	async fn create(&self, car: &Car) -> Result<(), DbError> {
		CarRepository::create(self, car).await
	}

	async fn get(&self, id: &CarId) -> Result<Option<Car>, DbError> {
		CarRepository::get(self, id).await
	}

	async fn get_and_increment_views(&self, id: &CarId) -> Result<Option<Car>, DbError> {
		CarRepository::get_and_increment_views(self, id).await
	}

	async fn list(&self, query: &CarQuery) -> Result<Vec<Car>, DbError> {
		CarRepository::list(self, query).await
	}

	async fn count(&self, query: &CarQuery) -> Result<u64, DbError> {
		CarRepository::count(self, query).await
	}

	async fn update(&self, car: &Car) -> Result<bool, DbError> {
		CarRepository::update(self, car).await
	}

	async fn delete(&self, id: &CarId) -> Result<bool, DbError> {
		CarRepository::delete(self, id).await
	}

	async fn like(&self, id: &CarId) -> Result<Option<i64>, DbError> {
		CarRepository::like(self, id).await
	}

	async fn unlike(&self, id: &CarId) -> Result<Option<i64>, DbError> {
		CarRepository::unlike(self, id).await
	}

	async fn add_comment(&self, car_id: &CarId, comment: &Comment) -> Result<Option<Car>, DbError> {
		CarRepository::add_comment(self, car_id, comment).await
	}

	async fn remove_comment(
		&self,
		car_id: &CarId,
		comment_id: &CommentId,
	) -> Result<Option<Car>, DbError> {
		CarRepository::remove_comment(self, car_id, comment_id).await
	}

	async fn add_images(&self, car_id: &CarId, images: &[String]) -> Result<Option<Car>, DbError> {
		CarRepository::add_images(self, car_id, images).await
	}

	async fn health_check(&self) -> Result<(), DbError> {
		CarRepository::health_check(self).await
	}
}

// =============================================================================
// Helpers
// =============================================================================

fn row_to_car(row: &sqlx::sqlite::SqliteRow) -> Result<Car, DbError> {
	let id_str: String = row.get("id");
	let owner_id_str: String = row.get("owner_id");
	let fuel_str: String = row.get("fuel");
	let condition_str: String = row.get("condition");
	let images_json: String = row.get("images");
	let comments_json: String = row.get("comments");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	let id =
		Uuid::parse_str(&id_str).map_err(|e| DbError::Internal(format!("Invalid car ID: {e}")))?;
	let owner_id = Uuid::parse_str(&owner_id_str)
		.map_err(|e| DbError::Internal(format!("Invalid owner_id: {e}")))?;
	let fuel = FuelType::parse(&fuel_str)
		.ok_or_else(|| DbError::Internal(format!("Invalid fuel label: {fuel_str}")))?;
	let condition = CarCondition::parse(&condition_str)
		.ok_or_else(|| DbError::Internal(format!("Invalid condition label: {condition_str}")))?;

	Ok(Car {
		id: CarId::new(id),
		owner_id: klub_server_auth::UserId::new(owner_id),
		owner: row.get("owner"),
		model: row.get("model"),
		brand: row.get("brand"),
		year: row.get("year"),
		fuel,
		mileage: row.get("mileage"),
		color: row.get("color"),
		condition,
		description: row.get("description"),
		images: serde_json::from_str(&images_json)?,
		main_image: row.get("main_image"),
		likes: row.get("likes"),
		views: row.get("views"),
		comments: serde_json::from_str(&comments_json)?,
		created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
			.map_err(|e| DbError::Internal(format!("Invalid created_at: {e}")))?
			.with_timezone(&chrono::Utc),
		updated_at: chrono::DateTime::parse_from_rfc3339(&updated_at)
			.map_err(|e| DbError::Internal(format!("Invalid updated_at: {e}")))?
			.with_timezone(&chrono::Utc),
	})
}
