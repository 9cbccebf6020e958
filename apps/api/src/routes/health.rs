use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

pub const HEALTH_MESSAGE: &str = "🌱 Gardening Product Scanner API is running!";

/// GET /api/health
pub async fn health_handler() -> &'static str {
    HEALTH_MESSAGE
}

/// GET /api/__probe
/// Reachability probe with the server's current time.
pub async fn probe_handler() -> Json<Value> {
    Json(json!({
        "ok": true,
        "when": Utc::now().to_rfc3339(),
    }))
}
