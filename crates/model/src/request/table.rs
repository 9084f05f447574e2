use crate::{
    error::RequestError,
    request::{column::Column, order::Order, search::Search},
};
use serde::{Deserialize, Serialize};

/// A paging/search/sort request for one table, as sent by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRequest {
    /// Echoed back in the response so the client can discard stale replies.
    pub draw: u64,
    /// Offset of the first row of the page.
    pub start: u64,
    /// Page size. Must be positive; "all rows" (`-1`) is rejected.
    pub length: i64,
    pub search: Search,
    pub order: Vec<Order>,
    pub columns: Vec<Column>,
}

impl Default for TableRequest {
    fn default() -> Self {
        Self {
            draw: 1,
            start: 0,
            length: 10,
            search: Search::default(),
            order: Vec::new(),
            columns: Vec::new(),
        }
    }
}

impl TableRequest {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }

    pub fn search_value(&self) -> &str {
        &self.search.value
    }

    pub fn set_search_value(&mut self, value: impl Into<String>) {
        self.search.value = value.into();
    }

    pub fn column(&self, index: usize) -> Result<&Column, RequestError> {
        self.columns
            .get(index)
            .ok_or(RequestError::ColumnIndexOutOfRange {
                index,
                len: self.columns.len(),
            })
    }

    /// The text a column is searched with: its own override when set,
    /// otherwise the global search text.
    pub fn search_text<'a>(&'a self, column: &'a Column) -> &'a str {
        if column.search_value().is_empty() {
            self.search_value()
        } else {
            column.search_value()
        }
    }

    /// Page size as an unsigned limit.
    pub fn limit(&self) -> Result<u64, RequestError> {
        u64::try_from(self.length)
            .ok()
            .filter(|&len| len > 0)
            .ok_or(RequestError::InvalidLength(self.length))
    }

    /// Checks the page size and that every order refers to an existing column.
    pub fn validate(&self) -> Result<(), RequestError> {
        self.limit()?;
        for order in &self.order {
            self.column(order.column())?;
        }
        Ok(())
    }

    /// Sets a date format on the given columns so formatted dates can be
    /// matched by free-text search. Multi-field columns get the format on
    /// every sub-column instead.
    pub fn set_date_column_format(
        &mut self,
        format: &str,
        column_indexes: &[usize],
    ) -> Result<(), RequestError> {
        let len = self.columns.len();
        for &index in column_indexes {
            let column = self
                .columns
                .get_mut(index)
                .ok_or(RequestError::ColumnIndexOutOfRange { index, len })?;

            if column.is_multi_field() {
                let count = column.field_list().len();
                for sub in 0..count {
                    column.set_sub_column_format(sub, Some(format.to_string()))?;
                }
            } else {
                column.set_format(Some(format.to_string()));
            }
        }
        Ok(())
    }
}
