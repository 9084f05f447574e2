use async_trait::async_trait;
use engine::{error::ExecutorError, executor::QueryExecutor};
use futures::lock::Mutex;
use model::{
    core::value::Value,
    request::{column::Column, table::TableRequest},
};
use planner::entity::EntitySchema;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentRow {
    pub id: i64,
    pub data: String,
    pub child_first_data: Option<String>,
}

/// `Parent { id, data, child: Child { firstData } }`
pub fn parent_schema() -> EntitySchema {
    EntitySchema::new("Parent").with_relationship("child")
}

/// 40 rows; the first 25 have `data` containing "match".
pub fn parent_rows() -> Vec<ParentRow> {
    (0..40)
        .map(|id| ParentRow {
            id,
            data: if id < 25 {
                format!("match {id}")
            } else {
                format!("row {id}")
            },
            child_first_data: (id % 3 == 0).then(|| format!("child of {id}")),
        })
        .collect()
}

pub fn table_request(descriptors: &[&str]) -> TableRequest {
    TableRequest::new(
        descriptors
            .iter()
            .map(|d| Column::new(*d).expect("valid descriptor"))
            .collect(),
    )
}

/// Reverses the LIKE escaping applied to bound search values.
pub fn unescape(value: &str, escape: char) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == escape {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Executor over a fixed row set.
///
/// A query is "filtered" when it binds any `value_<n>` search parameter;
/// a row passes when one of its text fields contains the unescaped value,
/// ignoring case. Every query received is recorded.
pub struct MemoryExecutor {
    rows: Vec<ParentRow>,
    pub queries: Mutex<Vec<String>>,
    fail_with: Option<String>,
}

impl MemoryExecutor {
    pub fn new(rows: Vec<ParentRow>) -> Self {
        Self {
            rows,
            queries: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            rows: Vec::new(),
            queries: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    fn matching(&self, params: &BTreeMap<String, Value>) -> Vec<ParentRow> {
        let needles: Vec<String> = params
            .iter()
            .filter(|(name, _)| name.starts_with("value_"))
            .filter_map(|(_, value)| value.as_str())
            .map(|value| unescape(value, '#').to_uppercase())
            .collect();

        if needles.is_empty() {
            return self.rows.clone();
        }

        self.rows
            .iter()
            .filter(|row| {
                let fields = [
                    Some(row.id.to_string()),
                    Some(row.data.clone()),
                    row.child_first_data.clone(),
                ];
                needles.iter().any(|needle| {
                    fields
                        .iter()
                        .flatten()
                        .any(|f| f.to_uppercase().contains(needle.as_str()))
                })
            })
            .cloned()
            .collect()
    }

    async fn record(&self, query: &str) -> Result<(), ExecutorError> {
        self.queries.lock().await.push(query.to_string());
        match &self.fail_with {
            Some(message) => Err(ExecutorError::Query(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl QueryExecutor for MemoryExecutor {
    type Row = ParentRow;

    async fn fetch_page(
        &self,
        query: &str,
        params: &BTreeMap<String, Value>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<ParentRow>, ExecutorError> {
        self.record(query).await?;
        let rows = self.matching(params);
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn fetch_count(
        &self,
        query: &str,
        params: &BTreeMap<String, Value>,
    ) -> Result<i64, ExecutorError> {
        self.record(query).await?;
        Ok(self.matching(params).len() as i64)
    }
}
