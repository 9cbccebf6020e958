use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{HeaderMap, HeaderValue},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

/// Response header echoing the caller's `seq`, so clients can drop stale suggestions.
pub const REQUEST_SEQ_HEADER: &str = "x-request-seq";

#[derive(Debug, Deserialize)]
pub struct SuggestionsQuery {
    #[serde(default)]
    pub q: Option<String>,
    /// Kept as text so a malformed token never fails the lookup itself.
    #[serde(default)]
    pub seq: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddProductRequest {
    #[serde(default)]
    pub product: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddProductResponse {
    pub success: bool,
    pub message: String,
    pub product: String,
}

/// GET /api/suggestions?q=<query>[&seq=<n>]
///
/// A `seq` that is not an unsigned integer is ignored and no header is echoed.
pub async fn handle_suggestions(
    State(state): State<AppState>,
    params: Result<Query<SuggestionsQuery>, QueryRejection>,
) -> Result<(HeaderMap, Json<Vec<String>>), AppError> {
    let Query(params) = params
        .map_err(|e| AppError::Validation(format!("Invalid suggestions query: {}", e.body_text())))?;

    let matches = match params.q.as_deref() {
        Some(q) => state.products.search(q).await,
        None => Vec::new(),
    };

    let mut headers = HeaderMap::new();
    if let Some(seq) = params.seq.as_deref().and_then(|s| s.trim().parse::<u64>().ok()) {
        headers.insert(REQUEST_SEQ_HEADER, HeaderValue::from(seq));
    }
    Ok((headers, Json(matches)))
}

/// POST /api/add-product
pub async fn handle_add_product(
    State(state): State<AppState>,
    payload: Result<Json<AddProductRequest>, JsonRejection>,
) -> Result<Json<AddProductResponse>, AppError> {
    let name = payload
        .ok()
        .and_then(|Json(req)| req.product)
        .ok_or_else(|| AppError::Validation("Invalid product name.".to_string()))?;

    let product = state.products.add(&name).await?;

    Ok(Json(AddProductResponse {
        success: true,
        message: "Product added.".to_string(),
        product,
    }))
}
