// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Car listing HTTP handlers.
//!
//! Reads, likes and comments are open to everyone; create, update, delete
//! and gallery changes require the authenticated account behind `owner_id`.
//! The `owner` field on the wire is only a display label and never enters
//! the permission check.

use axum::{
	extract::{Path, Query, State},
	response::IntoResponse,
	Json,
};
use chrono::Utc;
use klub_server_api::{
	AddCommentRequest, AddImagesRequest, CreateCarRequest, LikesData, ListCarsParams,
	Pagination, UpdateCarRequest,
};
use klub_server_auth::{CarId, CommentId, CurrentUser};
use klub_server_db::{Car, CarQuery, Comment};
use klub_server_media::delete_images;
use uuid::Uuid;

use crate::{
	api::AppState,
	api_response::{created_with, message_only, paginated, success_with, success_with_message},
	auth_middleware::{OptionalAuth, RequireAuth},
	error::ServerError,
	validation::{validate_max_chars, validate_year},
};

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 50;

fn car_not_found() -> ServerError {
	ServerError::NotFound("Automobil nije pronađen".to_string())
}

fn comment_not_found() -> ServerError {
	ServerError::NotFound("Komentar nije pronađen".to_string())
}

/// Parse a path segment as a car id.
///
/// A malformed id names no car, so it answers the same 404 as an unknown one.
fn parse_car_id(id: &str) -> Result<CarId, ServerError> {
	Uuid::parse_str(id).map(CarId::from).map_err(|_| car_not_found())
}

fn parse_comment_id(id: &str) -> Result<CommentId, ServerError> {
	Uuid::parse_str(id)
		.map(CommentId::from)
		.map_err(|_| comment_not_found())
}

/// Reject mutations by anyone but the listing's owning account.
fn ensure_owner(current_user: &CurrentUser, car: &Car) -> Result<(), ServerError> {
	if car.owner_id != current_user.user.id {
		tracing::info!(
			car_id = %car.id,
			user_id = %current_user.user.id,
			owner_id = %car.owner_id,
			"rejected mutation of another member's listing"
		);
		return Err(ServerError::Forbidden("Forbidden - not your resource".to_string()));
	}
	Ok(())
}

/// Every image URL the listing references: gallery, cover, comment images.
///
/// Deduplicated so the media host sees each reference once.
fn collect_image_refs(car: &Car) -> Vec<String> {
	let mut refs: Vec<String> = Vec::new();
	let mut push = |url: &String| {
		if !url.is_empty() && !refs.contains(url) {
			refs.push(url.clone());
		}
	};
	for url in &car.images {
		push(url);
	}
	if let Some(main) = &car.main_image {
		push(main);
	}
	for comment in &car.comments {
		for url in &comment.images {
			push(url);
		}
	}
	refs
}

/// GET /api/cars - List car listings with filters and paging.
#[utoipa::path(
    get,
    path = "/api/cars",
    params(ListCarsParams),
    responses(
        (status = 200, description = "One page of listings", body = Vec<Car>),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "cars"
)]
#[axum::debug_handler]
pub async fn list_cars(
	State(state): State<AppState>,
	Query(params): Query<ListCarsParams>,
) -> Result<impl IntoResponse, ServerError> {
	let page = params.page.unwrap_or(1).max(1);
	let limit = params
		.limit
		.unwrap_or(DEFAULT_PAGE_SIZE)
		.clamp(1, MAX_PAGE_SIZE);

	let query = CarQuery {
		brand: params.brand.filter(|s| !s.is_empty()),
		owner: params.owner.filter(|s| !s.is_empty()),
		year: params.year,
		sort: params.sort.unwrap_or_default(),
		limit: Some(limit),
		offset: (page - 1) * limit,
	};

	let cars = state.car_repo.list(&query).await?;
	let total = state.car_repo.count(&query).await?;

	Ok(paginated(cars, Pagination::new(page, limit, total as i64)))
}

/// GET /api/cars/{id} - One listing; counts the view.
///
/// Public, but resolves the caller's identity when a token is present so
/// views stay countable per member later without an API change.
#[utoipa::path(
    get,
    path = "/api/cars/{id}",
    params(
        ("id" = String, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "The listing", body = Car),
        (status = 404, description = "Unknown car", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "cars"
)]
#[axum::debug_handler]
pub async fn get_car(
	OptionalAuth(_current_user): OptionalAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let car_id = parse_car_id(&id)?;

	let car = state
		.car_repo
		.get_and_increment_views(&car_id)
		.await?
		.ok_or_else(car_not_found)?;

	Ok(success_with(car))
}

/// POST /api/cars - Create a listing owned by the caller.
#[utoipa::path(
    post,
    path = "/api/cars",
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Listing created", body = Car),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "cars"
)]
#[axum::debug_handler]
pub async fn create_car(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Json(request): Json<CreateCarRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let required = [
		&request.model,
		&request.brand,
		&request.mileage,
		&request.color,
		&request.description,
	];
	if required.iter().any(|field| field.trim().is_empty()) {
		return Err(ServerError::Validation(
			"Sva obavezna polja moraju biti popunjena".to_string(),
		));
	}
	validate_year(request.year)?;
	validate_max_chars(
		&request.description,
		1000,
		"Opis ne može biti duži od 1000 karaktera",
	)?;

	let owner = request
		.owner
		.filter(|v| !v.trim().is_empty())
		.unwrap_or_else(|| current_user.user.username.clone());

	let now = Utc::now();
	let mut car = Car {
		id: CarId::generate(),
		owner_id: current_user.user.id,
		owner,
		model: request.model,
		brand: request.brand,
		year: request.year,
		fuel: request.fuel,
		mileage: request.mileage,
		color: request.color,
		condition: request.condition,
		description: request.description,
		images: request.images,
		main_image: request.main_image.filter(|v| !v.is_empty()),
		likes: 0,
		views: 0,
		comments: Vec::new(),
		created_at: now,
		updated_at: now,
	};
	car.apply_main_image_default();

	state.car_repo.create(&car).await?;

	tracing::info!(car_id = %car.id, user_id = %car.owner_id, "car created");

	Ok(created_with(car, "Automobil je uspešno dodat"))
}

/// PUT /api/cars/{id} - Update a listing; owner only.
///
/// Counters and comments never move through this endpoint.
#[utoipa::path(
    put,
    path = "/api/cars/{id}",
    params(
        ("id" = String, Path, description = "Car ID")
    ),
    request_body = UpdateCarRequest,
    responses(
        (status = 200, description = "Listing updated", body = Car),
        (status = 400, description = "Invalid fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 403, description = "Forbidden - not your resource", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown car", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "cars"
)]
#[axum::debug_handler]
pub async fn update_car(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(request): Json<UpdateCarRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let car_id = parse_car_id(&id)?;

	let mut car = state.car_repo.get(&car_id).await?.ok_or_else(car_not_found)?;
	ensure_owner(&current_user, &car)?;

	if let Some(owner) = request.owner.filter(|v| !v.trim().is_empty()) {
		car.owner = owner;
	}
	if let Some(model) = request.model.filter(|v| !v.trim().is_empty()) {
		car.model = model;
	}
	if let Some(brand) = request.brand.filter(|v| !v.trim().is_empty()) {
		car.brand = brand;
	}
	if let Some(year) = request.year {
		validate_year(year)?;
		car.year = year;
	}
	if let Some(fuel) = request.fuel {
		car.fuel = fuel;
	}
	if let Some(mileage) = request.mileage.filter(|v| !v.trim().is_empty()) {
		car.mileage = mileage;
	}
	if let Some(color) = request.color.filter(|v| !v.trim().is_empty()) {
		car.color = color;
	}
	if let Some(condition) = request.condition {
		car.condition = condition;
	}
	if let Some(description) = request.description.filter(|v| !v.trim().is_empty()) {
		validate_max_chars(&description, 1000, "Opis ne može biti duži od 1000 karaktera")?;
		car.description = description;
	}
	if let Some(images) = request.images {
		car.images = images;
	}
	if let Some(main_image) = request.main_image.filter(|v| !v.is_empty()) {
		car.main_image = Some(main_image);
	}
	car.apply_main_image_default();
	car.updated_at = Utc::now();

	if !state.car_repo.update(&car).await? {
		return Err(car_not_found());
	}

	tracing::info!(car_id = %car.id, user_id = %current_user.user.id, "car updated");

	Ok(success_with_message(car, "Automobil je uspešno ažuriran"))
}

/// DELETE /api/cars/{id} - Remove a listing; owner only.
///
/// The record is removed first; media cleanup afterwards is best effort
/// and can never fail the request or bring the record back.
#[utoipa::path(
    delete,
    path = "/api/cars/{id}",
    params(
        ("id" = String, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Listing deleted"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 403, description = "Forbidden - not your resource", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown car", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "cars"
)]
#[axum::debug_handler]
pub async fn delete_car(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let car_id = parse_car_id(&id)?;

	let car = state.car_repo.get(&car_id).await?.ok_or_else(car_not_found)?;
	ensure_owner(&current_user, &car)?;

	if !state.car_repo.delete(&car_id).await? {
		return Err(car_not_found());
	}

	let image_refs = collect_image_refs(&car);
	let report = delete_images(state.media_host.as_ref(), &image_refs).await;
	if report.failed > 0 {
		tracing::warn!(
			car_id = %car_id,
			failed = report.failed,
			"some images could not be removed from the media host"
		);
	}

	tracing::info!(
		car_id = %car_id,
		user_id = %current_user.user.id,
		images_deleted = report.deleted,
		images_skipped = report.skipped,
		"car deleted"
	);

	Ok(message_only("Automobil je uspešno obrisan"))
}

/// POST /api/cars/{id}/like - Add one like; public.
#[utoipa::path(
    post,
    path = "/api/cars/{id}/like",
    params(
        ("id" = String, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Like counted", body = LikesData),
        (status = 404, description = "Unknown car", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "cars"
)]
#[axum::debug_handler]
pub async fn like_car(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let car_id = parse_car_id(&id)?;

	let likes = state.car_repo.like(&car_id).await?.ok_or_else(car_not_found)?;

	Ok(success_with_message(LikesData { likes }, "Automobil je lajkovan"))
}

/// POST /api/cars/{id}/unlike - Remove one like; floors at zero.
#[utoipa::path(
    post,
    path = "/api/cars/{id}/unlike",
    params(
        ("id" = String, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Like removed", body = LikesData),
        (status = 404, description = "Unknown car", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "cars"
)]
#[axum::debug_handler]
pub async fn unlike_car(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let car_id = parse_car_id(&id)?;

	let likes = state.car_repo.unlike(&car_id).await?.ok_or_else(car_not_found)?;

	Ok(success_with_message(LikesData { likes }, "Lajk je uklonjen"))
}

/// GET /api/cars/search/brand/{brand} - Brand substring search; public.
#[utoipa::path(
    get,
    path = "/api/cars/search/brand/{brand}",
    params(
        ("brand" = String, Path, description = "Brand substring, case-insensitive")
    ),
    responses(
        (status = 200, description = "Matching listings", body = Vec<Car>),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "cars"
)]
#[axum::debug_handler]
pub async fn search_by_brand(
	State(state): State<AppState>,
	Path(brand): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let query = CarQuery {
		brand: Some(brand),
		..CarQuery::default()
	};
	let cars = state.car_repo.list(&query).await?;

	Ok(success_with(cars))
}

/// GET /api/cars/owner/{owner} - Owner label substring search; public.
#[utoipa::path(
    get,
    path = "/api/cars/owner/{owner}",
    params(
        ("owner" = String, Path, description = "Owner label substring, case-insensitive")
    ),
    responses(
        (status = 200, description = "Matching listings", body = Vec<Car>),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "cars"
)]
#[axum::debug_handler]
pub async fn cars_by_owner(
	State(state): State<AppState>,
	Path(owner): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let query = CarQuery {
		owner: Some(owner),
		..CarQuery::default()
	};
	let cars = state.car_repo.list(&query).await?;

	Ok(success_with(cars))
}

/// POST /api/cars/{id}/comments - Post a comment; public.
///
/// The author label defaults to the caller's username when a valid token
/// rides along; otherwise it is required in the body.
#[utoipa::path(
    post,
    path = "/api/cars/{id}/comments",
    params(
        ("id" = String, Path, description = "Car ID")
    ),
    request_body = AddCommentRequest,
    responses(
        (status = 201, description = "Comment added; answers the updated comment list", body = Vec<Comment>),
        (status = 400, description = "Missing author or text", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown car", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "cars"
)]
#[axum::debug_handler]
pub async fn add_comment(
	OptionalAuth(current_user): OptionalAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(request): Json<AddCommentRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let author = request
		.author
		.filter(|v| !v.trim().is_empty())
		.or_else(|| current_user.map(|c| c.user.username.clone()));

	let Some(author) = author else {
		return Err(ServerError::Validation(
			"Autor i tekst komentara su obavezni".to_string(),
		));
	};
	if request.text.trim().is_empty() {
		return Err(ServerError::Validation(
			"Autor i tekst komentara su obavezni".to_string(),
		));
	}
	validate_max_chars(
		&request.text,
		500,
		"Komentar ne može biti duži od 500 karaktera",
	)?;

	let car_id = parse_car_id(&id)?;
	let comment = Comment::new(author, request.text, request.images);

	let car = state
		.car_repo
		.add_comment(&car_id, &comment)
		.await?
		.ok_or_else(car_not_found)?;

	tracing::info!(car_id = %car_id, comment_id = %comment.id, "comment added");

	Ok(created_with(car.comments, "Komentar je uspešno dodat"))
}

/// DELETE /api/cars/{id}/comments/{commentId} - Remove a comment; car owner only.
#[utoipa::path(
    delete,
    path = "/api/cars/{id}/comments/{comment_id}",
    params(
        ("id" = String, Path, description = "Car ID"),
        ("comment_id" = String, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 403, description = "Forbidden - not your resource", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown car or comment", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "cars"
)]
#[axum::debug_handler]
pub async fn delete_comment(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path((id, comment_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, ServerError> {
	let car_id = parse_car_id(&id)?;
	let comment_id = parse_comment_id(&comment_id)?;

	let car = state.car_repo.get(&car_id).await?.ok_or_else(car_not_found)?;
	ensure_owner(&current_user, &car)?;

	if state
		.car_repo
		.remove_comment(&car_id, &comment_id)
		.await?
		.is_none()
	{
		return Err(comment_not_found());
	}

	tracing::info!(car_id = %car_id, comment_id = %comment_id, "comment deleted");

	Ok(message_only("Komentar je uspešno obrisan"))
}

/// POST /api/cars/{id}/images - Append gallery images; owner only.
#[utoipa::path(
    post,
    path = "/api/cars/{id}/images",
    params(
        ("id" = String, Path, description = "Car ID")
    ),
    request_body = AddImagesRequest,
    responses(
        (status = 200, description = "Images added; answers the updated listing", body = Car),
        (status = 400, description = "No images in request", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 403, description = "Forbidden - not your resource", body = crate::error::ErrorResponse),
        (status = 404, description = "Unknown car", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "cars"
)]
#[axum::debug_handler]
pub async fn add_images(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(request): Json<AddImagesRequest>,
) -> Result<impl IntoResponse, ServerError> {
	if request.images.is_empty() {
		return Err(ServerError::Validation("Slike su obavezne".to_string()));
	}

	let car_id = parse_car_id(&id)?;

	let car = state.car_repo.get(&car_id).await?.ok_or_else(car_not_found)?;
	ensure_owner(&current_user, &car)?;

	let car = state
		.car_repo
		.add_images(&car_id, &request.images)
		.await?
		.ok_or_else(car_not_found)?;

	tracing::info!(car_id = %car_id, added = request.images.len(), "images added");

	Ok(success_with_message(car, "Slike su uspešno dodate"))
}
