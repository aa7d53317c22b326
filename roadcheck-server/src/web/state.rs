//! Application state for the web layer.

use std::sync::Arc;

use crate::facts::RoadFacts;

/// Shared application state.
///
/// The datasets are immutable after startup, so handlers share them
/// without locking.
pub struct AppState<G> {
    /// Loaded datasets and weather source
    pub facts: Arc<RoadFacts<G>>,
}

impl<G> AppState<G> {
    /// Create a new app state.
    pub fn new(facts: RoadFacts<G>) -> Self {
        Self {
            facts: Arc::new(facts),
        }
    }
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            facts: Arc::clone(&self.facts),
        }
    }
}
