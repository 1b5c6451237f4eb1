// src/api/mod.rs
// HTTP layer: router, handlers, validation and error envelope

pub mod error;
pub mod handlers;
pub mod state;
pub mod validation;

use axum::{
    Router,
    error_handling::HandleErrorLayer,
    http::StatusCode,
    routing::{get, post},
};
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower::{BoxError, ServiceBuilder};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Create the web server router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let timeout = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .layer(TimeoutLayer::new(state.config.request_timeout()));

    let api_router = Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/analyze/heuristic", post(handlers::analyze_heuristic));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api_router)
        .layer(timeout)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Turn middleware failures into the JSON error envelope
async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::custom(StatusCode::REQUEST_TIMEOUT, "Request timed out")
    } else {
        ApiError::internal("Internal server error").with_details(err.to_string())
    }
}
