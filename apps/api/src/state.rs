use std::sync::Arc;

use crate::dialogue::DialogueClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable dialogue backend. Production: GeminiClient. Tests swap in a
    /// scripted double.
    pub dialogue: Arc<dyn DialogueClient>,
}
