// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Account HTTP handlers: registration, login, profile, password.
//!
//! Login failures answer the same "Invalid credentials" for an unknown email
//! and a wrong password, so the endpoint cannot be used to probe which
//! emails have accounts.

use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use klub_server_api::{
	AuthData, ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest, UserData,
};
use klub_server_auth::{hash_password, verify_password, User, UserId, UserRole};

use crate::{
	api::AppState,
	api_response::{created_with, message_only, success_with, success_with_message},
	auth_middleware::RequireAuth,
	error::ServerError,
	validation::{validate_email, validate_max_chars, validate_password, validate_username},
};

/// POST /api/auth/register - Create an account and issue a token.
///
/// Duplicate email and username each get their own pre-check message; a
/// concurrent register that slips past both still hits the unique
/// constraints and answers 409.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthData),
        (status = 400, description = "Invalid or duplicate fields", body = crate::error::ErrorResponse),
        (status = 409, description = "Lost a registration race", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
#[axum::debug_handler]
pub async fn register(
	State(state): State<AppState>,
	Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let username = request.username.trim().to_lowercase();
	let email = request.email.trim().to_lowercase();

	if username.is_empty() || email.is_empty() || request.password.is_empty() {
		return Err(ServerError::Validation(
			"Sva obavezna polja moraju biti popunjena".to_string(),
		));
	}
	validate_username(&username)?;
	validate_email(&email)?;
	validate_password(&request.password)?;

	let first_name = request.first_name.filter(|v| !v.trim().is_empty());
	let last_name = request.last_name.filter(|v| !v.trim().is_empty());
	if let Some(name) = &first_name {
		validate_max_chars(name, 50, "Ime ne može biti duže od 50 karaktera")?;
	}
	if let Some(name) = &last_name {
		validate_max_chars(name, 50, "Prezime ne može biti duže od 50 karaktera")?;
	}

	if state.user_repo.find_by_email(&email).await?.is_some() {
		return Err(ServerError::Validation(
			"User with this email already exists".to_string(),
		));
	}
	if state.user_repo.find_by_username(&username).await?.is_some() {
		return Err(ServerError::Validation(
			"User with this username already exists".to_string(),
		));
	}

	let password_hash =
		hash_password(&request.password).map_err(|e| ServerError::Internal(e.to_string()))?;

	let now = Utc::now();
	let user = User {
		id: UserId::generate(),
		username,
		email,
		password_hash,
		first_name,
		last_name,
		avatar: None,
		bio: None,
		location: None,
		phone: None,
		role: UserRole::User,
		is_active: true,
		created_at: now,
		updated_at: now,
	};
	state.user_repo.create(&user).await?;

	let token = state.token_service.issue(user.id)?;

	tracing::info!(user_id = %user.id, "user registered");

	Ok(created_with(
		AuthData {
			user: user.to_profile(),
			token,
		},
		"Korisnik je uspešno registrovan",
	))
}

/// POST /api/auth/login - Exchange email and password for a token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthData),
        (status = 400, description = "Missing email or password", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials or disabled account", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
#[axum::debug_handler]
pub async fn login(
	State(state): State<AppState>,
	Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let email = request.email.trim().to_lowercase();

	if email.is_empty() || request.password.is_empty() {
		return Err(ServerError::Validation("Email i lozinka su obavezni".to_string()));
	}

	let user = state
		.user_repo
		.find_by_email(&email)
		.await?
		.ok_or_else(|| ServerError::Unauthenticated("Invalid credentials".to_string()))?;

	if !user.is_active {
		return Err(ServerError::Unauthenticated("Account is disabled".to_string()));
	}

	if !verify_password(&request.password, &user.password_hash) {
		return Err(ServerError::Unauthenticated("Invalid credentials".to_string()));
	}

	let token = state.token_service.issue(user.id)?;

	tracing::info!(user_id = %user.id, "user logged in");

	Ok(success_with_message(
		AuthData {
			user: user.to_profile(),
			token,
		},
		"Uspešna prijava",
	))
}

/// GET /api/auth/me - The authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current profile", body = UserData),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
#[axum::debug_handler(state = AppState)]
pub async fn me(RequireAuth(current_user): RequireAuth) -> Result<impl IntoResponse, ServerError> {
	Ok(success_with(UserData {
		user: current_user.user.to_profile(),
	}))
}

/// PUT /api/auth/profile - Partial profile update.
///
/// Names are only overwritten by non-empty values; bio, location, phone and
/// avatar are overwritten whenever the field is present, so clients can
/// clear them with an empty string.
#[utoipa::path(
    put,
    path = "/api/auth/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserData),
        (status = 400, description = "Field too long", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
#[axum::debug_handler]
pub async fn update_profile(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let mut user = current_user.user;

	if let Some(name) = request.first_name.filter(|v| !v.trim().is_empty()) {
		validate_max_chars(&name, 50, "Ime ne može biti duže od 50 karaktera")?;
		user.first_name = Some(name);
	}
	if let Some(name) = request.last_name.filter(|v| !v.trim().is_empty()) {
		validate_max_chars(&name, 50, "Prezime ne može biti duže od 50 karaktera")?;
		user.last_name = Some(name);
	}
	if let Some(avatar) = request.avatar {
		user.avatar = Some(avatar);
	}
	if let Some(bio) = request.bio {
		validate_max_chars(&bio, 500, "Bio ne može biti duži od 500 karaktera")?;
		user.bio = Some(bio);
	}
	if let Some(location) = request.location {
		validate_max_chars(&location, 100, "Lokacija ne može biti duža od 100 karaktera")?;
		user.location = Some(location);
	}
	if let Some(phone) = request.phone {
		validate_max_chars(&phone, 20, "Telefon ne može biti duži od 20 karaktera")?;
		user.phone = Some(phone);
	}
	user.updated_at = Utc::now();

	if !state.user_repo.update_profile(&user).await? {
		return Err(ServerError::NotFound("User not found".to_string()));
	}

	tracing::info!(user_id = %user.id, "profile updated");

	Ok(success_with_message(
		UserData {
			user: user.to_profile(),
		},
		"Profil je uspešno ažuriran",
	))
}

/// PUT /api/auth/change-password - Rotate the account password.
#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Wrong current password or weak new one", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
#[axum::debug_handler]
pub async fn change_password(
	RequireAuth(current_user): RequireAuth,
	State(state): State<AppState>,
	Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ServerError> {
	if request.current_password.is_empty() || request.new_password.is_empty() {
		return Err(ServerError::Validation(
			"Trenutna i nova lozinka su obavezni".to_string(),
		));
	}

	let user = current_user.user;
	if !verify_password(&request.current_password, &user.password_hash) {
		return Err(ServerError::Validation("Current password is incorrect".to_string()));
	}
	validate_password(&request.new_password)?;

	let password_hash =
		hash_password(&request.new_password).map_err(|e| ServerError::Internal(e.to_string()))?;

	if !state.user_repo.update_password_hash(&user.id, &password_hash).await? {
		return Err(ServerError::NotFound("User not found".to_string()));
	}

	tracing::info!(user_id = %user.id, "password changed");

	Ok(message_only("Lozinka je uspešno promenjena"))
}

/// POST /api/auth/logout - Acknowledge logout.
///
/// Tokens are stateless, so there is nothing to revoke server-side. The
/// client drops its copy; this endpoint exists so that drop has a clear
/// protocol step.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    ),
    tag = "auth"
)]
#[axum::debug_handler(state = AppState)]
pub async fn logout(RequireAuth(current_user): RequireAuth) -> Result<impl IntoResponse, ServerError> {
	tracing::info!(user_id = %current_user.user.id, "user logged out");
	Ok(message_only("Uspešna odjava"))
}
