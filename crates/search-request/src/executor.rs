//! The injected search-backend capability and the service wrapper that
//! compiles, executes and denormalizes in one call.

use crate::{
    documents::RunRecord,
    errors::{ExecutorError, SearchError},
    request::{SearchRequest, compile_search},
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Executes a compiled request against the search backend. Connection
/// management, retries and timeouts live behind this trait; the compiler
/// side never performs I/O itself.
#[async_trait]
pub trait SearchExecutor: Send + Sync {
    async fn execute(&self, request: &SearchRequest) -> Result<Vec<Value>, ExecutorError>;
}

/// Run search service: owns a shared handle to the backend executor.
#[derive(Clone)]
pub struct RunSearcher {
    executor: Arc<dyn SearchExecutor>,
}

impl RunSearcher {
    pub fn new(executor: Arc<dyn SearchExecutor>) -> Self {
        RunSearcher { executor }
    }

    pub async fn search<S: AsRef<str>>(
        &self,
        scope_id: &str,
        filter: Option<&str>,
        sort: &[S],
        limit: u64,
    ) -> Result<Vec<RunRecord>, SearchError> {
        let request = compile_search(scope_id, filter, sort, limit)?;

        let hits = self.executor.execute(&request).await?;
        info!(scope = %scope_id, hits = hits.len(), "search executed");

        hits.into_iter()
            .map(|doc| RunRecord::from_document(doc).map_err(SearchError::from))
            .collect()
    }
}
