use thiserror::Error;

/// Errors raised when a column is queried in a way its shape does not allow.
///
/// These are programmer/configuration errors: a caller asked a multi-field
/// column for relationship details, or a single-field column for its
/// sub-columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    #[error("Column '{descriptor}' is a multi-field column.")]
    MultiField { descriptor: String },

    #[error("Column '{descriptor}' is not a multi-field column.")]
    NotMultiField { descriptor: String },

    #[error("Column '{descriptor}' has no relationship.")]
    NoRelationship { descriptor: String },

    #[error("Column '{descriptor}' could not be parsed: {message}")]
    Parse { descriptor: String, message: String },

    #[error("Column '{descriptor}' has {len} sub-columns, index {index} is out of range.")]
    SubColumnOutOfRange {
        descriptor: String,
        index: usize,
        len: usize,
    },
}

/// Errors raised while building or validating a table request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("'{0}' not a valid direction.")]
    InvalidDirection(String),

    #[error("Column index {index} is out of range for {len} columns")]
    ColumnIndexOutOfRange { index: usize, len: usize },

    /// Paging "all rows" (`-1`) is not supported; the page size must be positive.
    #[error("Page length must be positive, got {0}")]
    InvalidLength(i64),

    #[error(transparent)]
    Column(#[from] ColumnError),
}
