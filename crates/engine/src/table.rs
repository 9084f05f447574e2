use crate::executor::QueryExecutor;
use model::{request::table::TableRequest, response::TableResponse};
use planner::{
    compile::{QueryCompiler, QueryParams},
    entity::EntityMetadata,
    error::CompileError,
    settings::CompilerSettings,
};
use tracing::{info, warn};

/// Serves table requests for one entity.
#[derive(Debug, Clone)]
pub struct DataTable<M> {
    entity: M,
    settings: CompilerSettings,
    params: QueryParams,
}

impl<M: EntityMetadata> DataTable<M> {
    pub fn new(entity: M) -> Self {
        Self {
            entity,
            settings: CompilerSettings::default(),
            params: QueryParams::default(),
        }
    }

    pub fn with_settings(mut self, settings: CompilerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Extra fragments and parameters applied to every request.
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    pub fn entity(&self) -> &M {
        &self.entity
    }

    /// Compiles the request and runs the page and both counts concurrently.
    ///
    /// Configuration errors are returned as `Err`. Executor failures produce
    /// a response carrying the error message and zeroed counts.
    pub async fn respond<E: QueryExecutor>(
        &self,
        request: &TableRequest,
        executor: &E,
    ) -> Result<TableResponse<E::Row>, CompileError> {
        let compiler = QueryCompiler::new(
            &self.entity,
            request,
            self.params.clone(),
            self.settings.clone(),
        )?;
        let queries = compiler.compile_all()?;

        let result = futures::try_join!(
            executor.page(&queries.page),
            executor.count(&queries.total_count),
            executor.count(&queries.filtered_count),
        );

        match result {
            Ok((data, records_total, records_filtered)) => {
                info!(
                    "Table {} draw {}: {} rows, {} filtered of {} total",
                    self.entity.simple_name(),
                    request.draw,
                    data.len(),
                    records_filtered,
                    records_total
                );
                Ok(TableResponse::new(
                    request.draw,
                    records_total,
                    records_filtered,
                    data,
                ))
            }
            Err(err) => {
                warn!(
                    "Table {} draw {} failed: {}",
                    self.entity.simple_name(),
                    request.draw,
                    err
                );
                Ok(TableResponse::failed(request.draw, err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecutorError;
    use async_trait::async_trait;
    use model::{core::value::Value, request::column::Column};
    use planner::entity::EntitySchema;
    use std::collections::BTreeMap;
    use tracing_test::traced_test;

    struct Unreachable;

    #[async_trait]
    impl QueryExecutor for Unreachable {
        type Row = String;

        async fn fetch_page(
            &self,
            _query: &str,
            _params: &BTreeMap<String, Value>,
            _offset: u64,
            _limit: u64,
        ) -> Result<Vec<String>, ExecutorError> {
            Err(ExecutorError::Connection("refused".to_string()))
        }

        async fn fetch_count(
            &self,
            _query: &str,
            _params: &BTreeMap<String, Value>,
        ) -> Result<i64, ExecutorError> {
            Ok(3)
        }
    }

    struct NegativeCount;

    #[async_trait]
    impl QueryExecutor for NegativeCount {
        type Row = String;

        async fn fetch_page(
            &self,
            _query: &str,
            _params: &BTreeMap<String, Value>,
            _offset: u64,
            _limit: u64,
        ) -> Result<Vec<String>, ExecutorError> {
            Ok(vec!["row".to_string()])
        }

        async fn fetch_count(
            &self,
            _query: &str,
            _params: &BTreeMap<String, Value>,
        ) -> Result<i64, ExecutorError> {
            Ok(-1)
        }
    }

    fn request() -> TableRequest {
        let mut request = TableRequest::new(vec![Column::new("data").unwrap()]);
        request.draw = 4;
        request
    }

    #[traced_test]
    #[tokio::test]
    async fn test_executor_failure_is_captured() {
        let table = DataTable::new(EntitySchema::new("Parent"));
        let response = table.respond(&request(), &Unreachable).await.unwrap();

        assert_eq!(response.draw, 4);
        assert_eq!(response.error.as_deref(), Some("Connection error: refused"));
        assert_eq!(response.records_total, 0);
        assert!(response.data.is_empty());
        assert!(logs_contain("failed"));
    }

    #[traced_test]
    #[tokio::test]
    async fn test_negative_count_is_an_error() {
        let table = DataTable::new(EntitySchema::new("Parent"));
        let response = table.respond(&request(), &NegativeCount).await.unwrap();

        assert_eq!(response.error.as_deref(), Some("Invalid row count: -1"));
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn test_compile_error_is_returned() {
        let table = DataTable::new(EntitySchema::new("Parent").not_entity());
        let err = table.respond(&request(), &NegativeCount).await.unwrap_err();
        assert!(matches!(err, CompileError::InvalidEntity(_)));
    }
}
