// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAPI documentation for klub-server.
//!
//! This module provides the OpenAPI specification for the Auto Klub Server
//! API, generated from Rust types using utoipa.

use utoipa::OpenApi;

/// Main OpenAPI documentation struct.
///
/// This generates the complete OpenAPI specification for the Auto Klub
/// Server API. Access the interactive documentation at `/swagger-ui` and
/// the raw JSON spec at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Auto Klub Server API",
        version = "1.0.0",
        description = "Community car registry API. Members register accounts, publish their cars with photo galleries, and the community browses, likes and comments on the listings.",
        license(name = "Proprietary"),
        contact(
            name = "Geoffrey Huntley",
            email = "ghuntley@ghuntley.com",
            url = "https://ghuntley.com"
        )
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "auth", description = "Account registration, login and profile management"),
        (name = "cars", description = "Car listings: browse, publish, like, comment"),
        (name = "health", description = "Health checks and system status")
    ),
    paths(
        // Auth endpoints
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
        crate::routes::auth::update_profile,
        crate::routes::auth::change_password,
        crate::routes::auth::logout,
        // Car endpoints
        crate::routes::cars::list_cars,
        crate::routes::cars::get_car,
        crate::routes::cars::create_car,
        crate::routes::cars::update_car,
        crate::routes::cars::delete_car,
        crate::routes::cars::like_car,
        crate::routes::cars::unlike_car,
        crate::routes::cars::search_by_brand,
        crate::routes::cars::cars_by_owner,
        crate::routes::cars::add_comment,
        crate::routes::cars::delete_comment,
        crate::routes::cars::add_images,
        // Health endpoints
        crate::routes::health::health_check
    ),
    components(
        schemas(
            // Account types
            klub_server_auth::UserProfile,
            klub_server_auth::UserRole,
            klub_server_api::RegisterRequest,
            klub_server_api::LoginRequest,
            klub_server_api::UpdateProfileRequest,
            klub_server_api::ChangePasswordRequest,
            klub_server_api::AuthData,
            klub_server_api::UserData,
            // Car types
            klub_server_db::Car,
            klub_server_db::Comment,
            klub_server_db::FuelType,
            klub_server_db::CarCondition,
            klub_server_db::CarSort,
            klub_server_api::CreateCarRequest,
            klub_server_api::UpdateCarRequest,
            klub_server_api::AddCommentRequest,
            klub_server_api::AddImagesRequest,
            klub_server_api::LikesData,
            klub_server_api::Pagination,
            // Envelope and errors
            crate::error::ErrorResponse,
            crate::routes::health::HealthData
        )
    )
)]
pub struct ApiDoc;
