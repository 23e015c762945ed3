//! Handlers for the `/auth` resource (register, login, profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use reelrate_core::error::CoreError;
use reelrate_db::models::user::{CreateUser, UserResponse};
use reelrate_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Fixed registration outcome message.
///
/// Returned whether or not the email was already registered, so the
/// endpoint never reveals which addresses have accounts.
const REGISTRATION_MESSAGE: &str =
    "Registration successful. Please check your email for verification.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response body for `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/register
///
/// Create an account. Always answers 201 with the same message, including
/// when the email is already taken: registration must not be usable as an
/// account-enumeration oracle.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    // 1. Validate input before any write.
    validate_email(&input.email)?;
    validate_password_strength(&input.password).map_err(CoreError::Validation)?;

    // 2. Existing account: report success without writing.
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        tracing::debug!(email = %input.email, "Registration for existing email");
        return Ok(registration_success());
    }

    // 3. Hash on the blocking pool; Argon2 costs tens of milliseconds.
    let password = input.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // 4. Persist. A concurrent register for the same email loses the race
    //    on uq_users_email; fold that into the same success response.
    let create = CreateUser {
        username: input.username,
        email: input.email,
        password_hash,
    };
    match UserRepo::create(&state.pool, &create).await {
        Ok(user) => {
            tracing::debug!(user_id = user.id, email = %user.email, "User registered");
            Ok(registration_success())
        }
        Err(e) if reelrate_db::is_unique_violation(&e) => Ok(registration_success()),
        Err(e) => Err(e.into()),
    }
}

/// POST /auth/login
///
/// Authenticate with email + password. Returns a bearer access token.
/// Failure is a uniform 401 whether the email is unknown or the password
/// is wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password = input.password;
    let stored_hash = user.password_hash.clone();
    let password_valid =
        tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AppError::InternalError(format!("Verification task failed: {e}")))?
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(invalid_credentials());
    }

    let access_token = generate_access_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::debug!(user_id = user.id, "Issued access token");
    Ok(Json(LoginResponse { access_token }))
}

/// GET /auth/profile
///
/// Return the authenticated user's identity view (password hash stripped).
pub async fn profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;

    Ok(Json(user.into()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn registration_success() -> (StatusCode, Json<RegisterResponse>) {
    (
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: REGISTRATION_MESSAGE,
        }),
    )
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

/// Minimal structural email check: one `@` with a space-free local part and
/// a dotted domain.
fn validate_email(email: &str) -> Result<(), CoreError> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    let local_ok = !local.is_empty() && !local.contains(' ');

    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains(' ');

    if !local_ok || !domain_ok {
        return Err(CoreError::Validation(format!(
            "Invalid email address: {email}"
        )));
    }
    Ok(())
}
