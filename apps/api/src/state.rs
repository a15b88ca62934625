use std::sync::Arc;

use crate::config::Config;
use crate::store::RecruitStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no per-request data: identity, pipeline positions and dashboard
/// statistics are recomputed on every request.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable store. Default: `PgStore`.
    pub store: Arc<dyn RecruitStore>,
    pub config: Config,
}
