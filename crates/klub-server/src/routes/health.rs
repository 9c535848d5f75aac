// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Health check HTTP handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{api::AppState, api_response::success_with};
use klub_server_api::ApiEnvelope;

/// Health check payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthData {
	/// `"ok"` when the server and its database answer.
	pub status: String,
	/// Server package name.
	pub name: String,
	/// Server package version.
	pub version: String,
	/// Time the check ran.
	pub timestamp: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server and database are healthy", body = HealthData),
        (status = 503, description = "Database is unreachable", body = crate::error::ErrorResponse)
    ),
    tag = "health"
)]
/// GET /health - Liveness check, public.
#[axum::debug_handler]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	if let Err(e) = state.car_repo.health_check().await {
		tracing::error!(error = %e, "health check failed");
		return (
			StatusCode::SERVICE_UNAVAILABLE,
			Json(ApiEnvelope::error("Database is unreachable")),
		)
			.into_response();
	}

	success_with(HealthData {
		status: "ok".to_string(),
		name: env!("CARGO_PKG_NAME").to_string(),
		version: env!("CARGO_PKG_VERSION").to_string(),
		timestamp: Utc::now(),
	})
	.into_response()
}
