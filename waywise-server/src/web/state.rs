//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::intent::IntentExtractor;
use crate::resolve::LocationResolver;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Travel options, loaded once at startup
    pub catalog: Arc<Catalog>,

    /// Fuzzy location matcher
    pub resolver: Arc<LocationResolver>,

    /// Chat message reader
    pub intent: Arc<IntentExtractor>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: Catalog, resolver: LocationResolver, intent: IntentExtractor) -> Self {
        Self {
            catalog: Arc::new(catalog),
            resolver: Arc::new(resolver),
            intent: Arc::new(intent),
        }
    }
}
