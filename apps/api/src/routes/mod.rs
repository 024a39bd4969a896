pub mod error;
pub mod health;

use std::any::Any;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/health", get(health::health_handler))
        .route(error::ERROR_PATH, any(error::handle_error));

    // Directory requests (including `/`) dispatch to the loaded index document.
    let router = match &state.config.static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).append_index_html_on_directories(false),
        ),
        None => router.fallback(error::not_found),
    };

    with_error_boundary(router, state)
}

/// Panics become a bare 500 so the boundary can dispatch them like any other error.
fn with_error_boundary(router: Router<AppState>, state: AppState) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error::error_boundary,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
