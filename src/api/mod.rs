//! API layer - HTTP handlers and routing
//!
//! One handler module per resource:
//! - User registration/login/search
//! - Board CRUD
//! - Board list CRUD
//! - Card CRUD
//!
//! Register and login are public; everything else sits behind the
//! authentication guard.

pub mod board_lists;
pub mod boards;
pub mod cards;
pub mod common;
pub mod middleware;
pub mod users;

#[cfg(test)]
mod tests;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{set_expose_error_stack, ApiError, AppState};

/// Build the API router mounted under /api
pub fn build_api_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .nest("/users", users::protected_router())
        .nest("/board", boards::router())
        .nest("/boardList", board_lists::router())
        .nest("/cards", cards::router())
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_auth,
        ));

    Router::new()
        .nest("/users", users::public_router())
        .merge(protected)
}

/// Build the complete router with CORS, tracing and the JSON 404 fallback
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .nest("/api", build_api_router(state.clone()))
        .fallback(middleware::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
