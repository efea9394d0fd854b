//! User API endpoints
//!
//! - POST /api/users/register - registration (public)
//! - POST /api/users/login - login (public)
//! - GET /api/users/search?query= - name search (requires auth)

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::common::require_field;
use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::models::User;
use crate::services::user::RegisterInput;
use crate::services::UserServiceError;

/// Request body for registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response for successful authentication
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Query parameters for user search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// Response for user search
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub data: Vec<User>,
}

/// Build public user routes (no auth required)
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Build protected user routes
pub fn protected_router() -> Router<AppState> {
    Router::new().route("/search", get(search))
}

/// POST /api/users/register - register a new user
///
/// Returns 201 with a signed bearer token embedding the new user's id.
async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = RegisterInput {
        name: require_field(body.name, "Name is required")?,
        email: require_field(body.email, "Email is required")?,
        password: body
            .password
            .ok_or_else(|| ApiError::bad_request("Password is required"))?,
    };

    let user = state.user_service.register(input).await.map_err(|e| match e {
        UserServiceError::UserExists => ApiError::bad_request("User already exists"),
        UserServiceError::Validation(msg) => ApiError::bad_request(msg),
        UserServiceError::Internal(err) => ApiError::internal_error(err),
        other => ApiError::bad_request(other.to_string()),
    })?;

    let token = state
        .tokens
        .issue(user.id)
        .map_err(ApiError::internal_error)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            token,
        }),
    ))
}

/// POST /api/users/login - authenticate and get a token
///
/// Unknown email and wrong password both answer 401 with the same message.
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = require_field(body.email, "Email is required")?;
    let password = body
        .password
        .ok_or_else(|| ApiError::bad_request("Password is required"))?;

    let user = state
        .user_service
        .login(&email, &password)
        .await
        .map_err(|e| match e {
            UserServiceError::InvalidCredentials => {
                ApiError::unauthorized("Invalid email or password")
            }
            UserServiceError::Internal(err) => ApiError::internal_error(err),
            other => ApiError::bad_request(other.to_string()),
        })?;

    let token = state
        .tokens
        .issue(user.id)
        .map_err(ApiError::internal_error)?;

    Ok(Json(AuthResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        token,
    }))
}

/// GET /api/users/search?query= - find users by name substring
async fn search(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Query(params): Query<SearchParams>,
) -> Result<Json<UserListResponse>, ApiError> {
    let query = params
        .query
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::bad_request("Please provide Query."))?;

    let users = state
        .user_service
        .search(&query)
        .await
        .map_err(ApiError::internal_error)?;

    Ok(Json(UserListResponse { data: users }))
}
