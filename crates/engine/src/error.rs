use thiserror::Error;

/// Errors surfaced by a query executor.
///
/// These never escape [`crate::table::DataTable::respond`]; they are captured
/// into the response's `error` field instead.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The backing store could not be reached.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store rejected or failed to run the query.
    #[error("Query error: {0}")]
    Query(String),

    /// A count query returned a negative number.
    #[error("Invalid row count: {0}")]
    InvalidCount(i64),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
