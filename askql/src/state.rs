use std::sync::Arc;

use crate::pipeline::QueryPipeline;

/// Shared handler state.
pub struct AppState<M, E> {
    pub pipeline: Arc<QueryPipeline<M, E>>,
}

impl<M, E> AppState<M, E> {
    pub fn new(pipeline: QueryPipeline<M, E>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

// Manual impl: a derive would require `M: Clone, E: Clone`.
impl<M, E> Clone for AppState<M, E> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}
