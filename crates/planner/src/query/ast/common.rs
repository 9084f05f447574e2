//! Defines common, reusable AST nodes for building queries.

use serde::{Deserialize, Serialize};

pub use model::request::order::OrderDir;

/// The entity a query selects from, e.g. `Parent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    pub name: String,
}

impl EntityRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinKind {
    Inner,
    #[default]
    Left,
}
