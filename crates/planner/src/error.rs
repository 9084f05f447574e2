use crate::settings::error::SettingsError;
use model::error::{ColumnError, RequestError};
use thiserror::Error;

/// Configuration errors raised while compiling a table request.
///
/// These are fatal to the request and are never defaulted away.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The metadata provider does not recognise the type as an entity.
    #[error("{0} is not a valid entity.")]
    InvalidEntity(String),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Column(#[from] ColumnError),

    #[error("Invalid compiler settings: {0}")]
    Settings(#[from] SettingsError),
}
