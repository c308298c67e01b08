use std::sync::Arc;

use shujii_audit::events::EventLog;

use crate::pipeline::DiagnosisPipeline;

/// Shared application state, injected into all route handlers via Axum state.
pub struct AppState<G> {
    pub pipeline: Arc<DiagnosisPipeline<G>>,
    pub events: EventLog,
}

impl<G> AppState<G> {
    pub fn new(pipeline: DiagnosisPipeline<G>, events: EventLog) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            events,
        }
    }
}

// Derived Clone would require `G: Clone`.
impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            events: self.events.clone(),
        }
    }
}
