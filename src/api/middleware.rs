//! API middleware
//!
//! Authentication guard, shared application state, and the uniform JSON
//! error type all handlers funnel through.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::db::repositories::{
    SqlxBoardListRepository, SqlxBoardRepository, SqlxListCardRepository, SqlxUserRepository,
};
use crate::db::DynDatabasePool;
use crate::models::User;
use crate::services::{
    BoardListService, BoardService, BoardServiceError, BoardListServiceError, ListCardService,
    ListCardServiceError, TokenService, UserService,
};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub board_service: Arc<BoardService>,
    pub list_service: Arc<BoardListService>,
    pub card_service: Arc<ListCardService>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Wire repositories and services over a database pool
    pub fn new(pool: DynDatabasePool, auth: &AuthConfig) -> Self {
        let user_repo = SqlxUserRepository::boxed(pool.clone());
        let board_repo = SqlxBoardRepository::boxed(pool.clone());
        let list_repo = SqlxBoardListRepository::boxed(pool.clone());
        let card_repo = SqlxListCardRepository::boxed(pool);

        Self {
            user_service: Arc::new(UserService::new(user_repo)),
            board_service: Arc::new(BoardService::new(board_repo.clone())),
            list_service: Arc::new(BoardListService::new(board_repo.clone(), list_repo.clone())),
            card_service: Arc::new(ListCardService::new(board_repo, list_repo, card_repo)),
            tokens: Arc::new(TokenService::new(&auth.token_secret, auth.token_ttl_days)),
        }
    }
}

/// Authenticated user resolved by the auth guard
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

// Whether error responses include the underlying error chain.
// Set once at startup from the configured environment; defaults to true
// (development behavior) when never set, which also covers tests.
static EXPOSE_ERROR_STACK: OnceCell<bool> = OnceCell::new();

/// Configure error chain exposure. Call once at startup.
pub fn set_expose_error_stack(expose: bool) {
    let _ = EXPOSE_ERROR_STACK.set(expose);
}

fn stack_enabled() -> bool {
    EXPOSE_ERROR_STACK.get().copied().unwrap_or(true)
}

/// Uniform API error: an HTTP status plus a JSON `{message, stack?}` body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub stack: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            stack: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
            stack: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            stack: None,
        }
    }

    /// Wrap an unexpected failure. The error chain is captured into the
    /// response body only when stack exposure is enabled.
    pub fn internal_error(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
            stack: stack_enabled().then(|| format!("{:?}", err)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {}", self.message);
        }
        let body = ErrorBody {
            message: self.message,
            stack: self.stack,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<BoardServiceError> for ApiError {
    fn from(err: BoardServiceError) -> Self {
        match err {
            BoardServiceError::Validation(msg) | BoardServiceError::NotOwned(msg) => {
                ApiError::bad_request(msg)
            }
            BoardServiceError::Internal(e) => ApiError::internal_error(e),
        }
    }
}

impl From<BoardListServiceError> for ApiError {
    fn from(err: BoardListServiceError) -> Self {
        match err {
            BoardListServiceError::Validation(msg) | BoardListServiceError::NotOwned(msg) => {
                ApiError::bad_request(msg)
            }
            BoardListServiceError::Internal(e) => ApiError::internal_error(e),
        }
    }
}

impl From<ListCardServiceError> for ApiError {
    fn from(err: ListCardServiceError) -> Self {
        match err {
            ListCardServiceError::Validation(msg) | ListCardServiceError::NotOwned(msg) => {
                ApiError::bad_request(msg)
            }
            ListCardServiceError::Internal(e) => ApiError::internal_error(e),
        }
    }
}

/// Extract a bearer token from the authorization header
fn extract_bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(String::from)
}

/// Authentication middleware.
///
/// Verifies the bearer token's signature and expiry, resolves the embedded
/// user id against the store, and attaches the user to the request. Every
/// failure mode maps to 401 without detail about which check failed.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&request)
        .ok_or_else(|| ApiError::unauthorized("Not authorized, no token"))?;

    let user_id = state
        .tokens
        .verify(&token)
        .map_err(|_| ApiError::unauthorized("Not authorized, token failed"))?;

    let user = state
        .user_service
        .find_by_id(user_id)
        .await
        .map_err(ApiError::internal_error)?
        .ok_or_else(|| ApiError::unauthorized("Not authorized, token failed"))?;

    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}

// Extractor so handlers receive the identity as an explicit parameter
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Not authorized, no token"))
    }
}

/// Fallback handler for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
