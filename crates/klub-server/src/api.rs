// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application state and router assembly.

use std::sync::Arc;

use axum::{
	routing::{delete, get, post, put},
	Router,
};
use klub_server_auth::TokenService;
use klub_server_config::ServerConfig;
use klub_server_db::{CarRepository, SqlitePool, UserRepository};
use klub_server_media::{DisabledMediaHost, HttpMediaHost, MediaHost};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::routes;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
	pub user_repo: Arc<UserRepository>,
	pub car_repo: Arc<CarRepository>,
	pub token_service: TokenService,
	pub media_host: Arc<dyn MediaHost>,
}

/// Creates the application state from a connected pool and the resolved
/// configuration.
///
/// A media-host client that cannot be built falls back to the disabled
/// host: listings must stay deletable even when image cleanup is not.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let user_repo = Arc::new(UserRepository::new(pool.clone()));
	let car_repo = Arc::new(CarRepository::new(pool));

	let token_service = TokenService::new(&config.auth.jwt_secret, config.auth.token_ttl_days);

	let media_host: Arc<dyn MediaHost> = match &config.media {
		Some(media) => match HttpMediaHost::new(media.base_url.clone(), media.api_key.clone()) {
			Ok(host) => Arc::new(host),
			Err(e) => {
				tracing::error!(error = %e, "failed to build the media host client, image cleanup disabled");
				Arc::new(DisabledMediaHost)
			}
		},
		None => {
			tracing::info!("no media credentials configured, image cleanup disabled");
			Arc::new(DisabledMediaHost)
		}
	};

	AppState {
		user_repo,
		car_repo,
		token_service,
		media_host,
	}
}

/// Create the API router with all routes.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		// Health
		.route("/health", get(routes::health::health_check))
		// Accounts
		.route("/api/auth/register", post(routes::auth::register))
		.route("/api/auth/login", post(routes::auth::login))
		.route("/api/auth/me", get(routes::auth::me))
		.route("/api/auth/profile", put(routes::auth::update_profile))
		.route(
			"/api/auth/change-password",
			put(routes::auth::change_password),
		)
		.route("/api/auth/logout", post(routes::auth::logout))
		// Car listings
		.route(
			"/api/cars",
			get(routes::cars::list_cars).post(routes::cars::create_car),
		)
		.route(
			"/api/cars/{id}",
			get(routes::cars::get_car)
				.put(routes::cars::update_car)
				.delete(routes::cars::delete_car),
		)
		.route("/api/cars/{id}/like", post(routes::cars::like_car))
		.route("/api/cars/{id}/unlike", post(routes::cars::unlike_car))
		.route(
			"/api/cars/search/brand/{brand}",
			get(routes::cars::search_by_brand),
		)
		.route("/api/cars/owner/{owner}", get(routes::cars::cars_by_owner))
		// Comments and images
		.route("/api/cars/{id}/comments", post(routes::cars::add_comment))
		.route(
			"/api/cars/{id}/comments/{comment_id}",
			delete(routes::cars::delete_comment),
		)
		.route("/api/cars/{id}/images", post(routes::cars::add_images))
		.with_state(state)
		// OpenAPI documentation
		.merge(
			SwaggerUi::new("/swagger-ui")
				.url("/api-docs/openapi.json", crate::api_docs::ApiDoc::openapi()),
		)
}


#[cfg(test)]
mod tests {
	use axum::{
		body::Body,
		http::{Request, StatusCode},
	};
	use tower::ServiceExt;

	use super::testing::create_test_state;
	use super::*;

	async fn create_test_app() -> Router {
		create_router(create_test_state().await)
	}

	#[tokio::test]
	async fn test_health_endpoint_is_public() {
		let app = create_test_app().await;

		let response = app
			.oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
		assert_eq!(json["success"], true);
		assert_eq!(json["data"]["status"], "ok");
		assert_eq!(json["data"]["name"], env!("CARGO_PKG_NAME"));
		assert_eq!(json["data"]["version"], env!("CARGO_PKG_VERSION"));
	}

	#[tokio::test]
	async fn test_openapi_spec_is_served() {
		let app = create_test_app().await;

		let response = app
			.oneshot(
				Request::builder()
					.uri("/api-docs/openapi.json")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
		assert!(json["paths"].is_object());
	}

	#[tokio::test]
	async fn test_unknown_route_is_404() {
		let app = create_test_app().await;

		let response = app
			.oneshot(
				Request::builder()
					.uri("/api/motorcycles")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn test_static_search_routes_beat_the_id_routes() {
		// /api/cars/search/... and /api/cars/owner/... must not be swallowed
		// by /api/cars/{id}.
		let app = create_test_app().await;

		let response = app
			.oneshot(
				Request::builder()
					.uri("/api/cars/search/brand/bmw")
					.body(Body::empty())
					.unwrap(),
			)
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
		let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
		assert_eq!(json["data"], serde_json::json!([]));
	}
}
