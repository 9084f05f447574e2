use crate::error::ExecutorError;
use async_trait::async_trait;
use model::core::value::Value;
use planner::compile::CompiledQuery;
use std::collections::BTreeMap;

/// Runs compiled query text against a persistence layer.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    type Row: Send;

    async fn fetch_page(
        &self,
        query: &str,
        params: &BTreeMap<String, Value>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Self::Row>, ExecutorError>;

    async fn fetch_count(
        &self,
        query: &str,
        params: &BTreeMap<String, Value>,
    ) -> Result<i64, ExecutorError>;

    /// Runs a page query. Missing bounds mean "from the start" and "no limit".
    async fn page(&self, query: &CompiledQuery) -> Result<Vec<Self::Row>, ExecutorError> {
        self.fetch_page(
            &query.text,
            &query.params,
            query.offset.unwrap_or(0),
            query.limit.unwrap_or(u64::MAX),
        )
        .await
    }

    /// Runs a count query, rejecting negative results.
    async fn count(&self, query: &CompiledQuery) -> Result<u64, ExecutorError> {
        let count = self.fetch_count(&query.text, &query.params).await?;
        u64::try_from(count).map_err(|_| ExecutorError::InvalidCount(count))
    }
}
