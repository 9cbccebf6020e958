use std::sync::Arc;

use crate::advisory::affiliate::AffiliateLinker;
use crate::llm_client::CompletionModel;
use crate::products::ProductStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Upstream completion model. `OpenAiClient` in production, a stub in tests.
    pub model: Arc<dyn CompletionModel>,
    /// Autocomplete list. `FileProductStore` in production.
    pub products: Arc<dyn ProductStore>,
    pub linker: AffiliateLinker,
}
