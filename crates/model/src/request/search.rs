use serde::{Deserialize, Serialize};

/// Search parameters sent by the client, either globally or per column.
///
/// `regex` is carried for wire compatibility only; search is always a
/// case-insensitive "contains" match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Search {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub regex: bool,
}

impl Search {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            regex: false,
        }
    }

    pub fn with_regex(value: impl Into<String>, regex: bool) -> Self {
        Self {
            value: value.into(),
            regex,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
