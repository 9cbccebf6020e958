pub mod health;

use std::path::Path;

use axum::{
    routing::{any, get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::advisory::handlers as advisory;
use crate::errors::AppError;
use crate::products::handlers as products;
use crate::state::AppState;

async fn api_not_found() -> Result<(), AppError> {
    Err(AppError::NotFound)
}

/// API routes, plus the built frontend from `static_dir` (SPA fallback to `index.html`) when given.
/// Unknown `/api/*` paths never fall through to the frontend.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/__probe", get(health::probe_handler))
        .route("/api/suggestions", get(products::handle_suggestions))
        .route("/api/add-product", post(products::handle_add_product))
        .route("/api/scan", post(advisory::handle_scan))
        .route("/api/*rest", any(api_not_found));

    if let Some(dir) = static_dir {
        let index = dir.join("index.html");
        router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    router.with_state(state)
}
