//! Application state for the web layer.

use std::sync::Arc;

use crate::optimizer::RouteOptimizer;

/// Shared application state.
pub struct AppState<G> {
    /// Route optimizer (holds the catalog and geocoder)
    pub optimizer: Arc<RouteOptimizer<G>>,
}

impl<G> AppState<G> {
    /// Create a new app state.
    pub fn new(optimizer: RouteOptimizer<G>) -> Self {
        Self {
            optimizer: Arc::new(optimizer),
        }
    }
}

// Manual impl: cloning only bumps the Arc, so `G` need not be `Clone`.
impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            optimizer: Arc::clone(&self.optimizer),
        }
    }
}
