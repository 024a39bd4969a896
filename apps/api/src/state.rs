use crate::assets::IndexDocument;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub index: IndexDocument,
}
