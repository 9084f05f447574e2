use serde::{Deserialize, Serialize};

/// The envelope returned to the client for one table request.
///
/// On an execution failure `error` is set and the counts and data stay at
/// their zero values; no partial page is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse<T> {
    pub draw: u64,
    pub records_total: u64,
    pub records_filtered: u64,
    pub data: Vec<T>,
    pub error: Option<String>,
}

impl<T> TableResponse<T> {
    pub fn new(draw: u64, records_total: u64, records_filtered: u64, data: Vec<T>) -> Self {
        Self {
            draw,
            records_total,
            records_filtered,
            data,
            error: None,
        }
    }

    pub fn failed(draw: u64, error: impl Into<String>) -> Self {
        Self {
            draw,
            records_total: 0,
            records_filtered: 0,
            data: Vec::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_wire_shape() {
        let response = TableResponse::new(2, 500, 42, vec![json!({"id": 1})]);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            json!({
                "draw": 2,
                "recordsTotal": 500,
                "recordsFiltered": 42,
                "data": [{"id": 1}],
                "error": null
            })
        );
    }

    #[test]
    fn test_failed_response_has_zero_values() {
        let response: TableResponse<u32> = TableResponse::failed(7, "connection refused");
        assert!(response.is_error());
        assert_eq!(response.draw, 7);
        assert_eq!(response.records_total, 0);
        assert_eq!(response.records_filtered, 0);
        assert!(response.data.is_empty());
    }
}
