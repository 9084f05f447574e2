#[cfg(test)]
mod tests {
    use crate::utils::{MemoryExecutor, parent_rows, parent_schema, table_request};
    use engine::table::DataTable;
    use model::request::{order::Order, table::TableRequest};
    use planner::{
        compile::QueryParams,
        settings::{CompilerSettings, DialectKind},
    };
    use serde_json::json;
    use tracing_test::traced_test;

    // Scenario: 25 of 40 rows match the search text, second page of 10.
    // Expected Outcome: rows 10..19 of the filtered set, recordsFiltered = 25.
    #[traced_test]
    #[tokio::test]
    async fn test_second_page_of_filtered_rows() {
        let mut request = table_request(&["id", "data", "child?.firstData"]);
        request.start = 10;
        request.length = 10;
        request.set_search_value("match");

        let executor = MemoryExecutor::new(parent_rows());
        let table = DataTable::new(parent_schema());
        let response = table.respond(&request, &executor).await.unwrap();

        assert!(!response.is_error());
        assert_eq!(response.records_total, 40);
        assert_eq!(response.records_filtered, 25);
        let ids: Vec<i64> = response.data.iter().map(|r| r.id).collect();
        assert_eq!(ids, (10..20).collect::<Vec<_>>());

        assert_eq!(executor.queries.lock().await.len(), 3);
        assert!(logs_contain("Compiled page query"));
        assert!(logs_contain("10 rows, 25 filtered of 40 total"));
    }

    // Scenario: the executor cannot run any query.
    // Expected Outcome: error is set, counts and data stay at zero values.
    #[traced_test]
    #[tokio::test]
    async fn test_executor_failure_yields_error_response() {
        let mut request = table_request(&["data"]);
        request.draw = 9;

        let executor = MemoryExecutor::failing("syntax error near LIKE");
        let table = DataTable::new(parent_schema());
        let response = table.respond(&request, &executor).await.unwrap();

        assert_eq!(response.draw, 9);
        assert_eq!(
            response.error.as_deref(),
            Some("Query error: syntax error near LIKE")
        );
        assert_eq!(response.records_total, 0);
        assert_eq!(response.records_filtered, 0);
        assert!(response.data.is_empty());
        assert!(logs_contain("failed"));
    }

    // Scenario: wire request with ordering and a wildcard in the search text.
    // Expected Outcome: the page query orders by the joined field and the
    // wildcard is matched literally.
    #[traced_test]
    #[tokio::test]
    async fn test_wire_request_round_trip() {
        let request: TableRequest = serde_json::from_value(json!({
            "draw": 2,
            "start": 0,
            "length": 5,
            "search": {"value": "", "regex": false},
            "order": [{"column": 2, "dir": "DESC"}],
            "columns": [
                {"data": "id", "searchable": false, "orderable": true, "search": {"value": "", "regex": false}},
                {"data": "data", "searchable": true, "orderable": true, "search": {"value": "50%", "regex": false}},
                {"data": "child?.firstData", "searchable": true, "orderable": true, "search": {"value": "", "regex": false}}
            ]
        }))
        .unwrap();
        assert_eq!(request.order, vec![Order::desc(2)]);

        let executor = MemoryExecutor::new(parent_rows());
        let table = DataTable::new(parent_schema());
        let response = table.respond(&request, &executor).await.unwrap();

        assert_eq!(response.records_filtered, 0);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "draw": 2,
                "recordsTotal": 40,
                "recordsFiltered": 0,
                "data": [],
                "error": null
            })
        );

        let queries = executor.queries.lock().await;
        let page = queries
            .iter()
            .find(|q| q.starts_with("SELECT parent "))
            .unwrap();
        assert!(page.ends_with("ORDER BY child_1.firstData DESC"));
    }

    // Scenario: HQL dialect with a caller condition that navigates a relationship.
    // Expected Outcome: the condition is rewritten to the join alias in every
    // filtered query and the total count ignores it.
    #[traced_test]
    #[tokio::test]
    async fn test_caller_conditions_with_hql() {
        let mut request = table_request(&["data"]);
        request.set_search_value("match 1");

        let mut params = QueryParams::new();
        params
            .add_where_condition("parent.child.firstData IS NOT NULL")
            .add_order_condition("parent.id DESC");
        let settings = CompilerSettings {
            dialect: DialectKind::Hql,
            ..Default::default()
        };

        let executor = MemoryExecutor::new(parent_rows());
        let table = DataTable::new(parent_schema())
            .with_settings(settings)
            .with_params(params);
        let response = table.respond(&request, &executor).await.unwrap();

        // "match 1", "match 10".."match 19"
        assert_eq!(response.records_filtered, 11);
        assert_eq!(response.data.len(), 10);

        let queries = executor.queries.lock().await;
        let page = queries
            .iter()
            .find(|q| q.starts_with("SELECT parent "))
            .unwrap();
        assert_eq!(
            page,
            "SELECT parent FROM Parent AS parent LEFT JOIN parent.child AS child_1 \
             WHERE (child_1.firstData IS NOT NULL) \
             AND (UPPER(parent.data) LIKE UPPER(('%' || :value_0 || '%')) ESCAPE '#') \
             ORDER BY parent.id DESC"
        );
        assert!(queries.contains(
            &"SELECT COUNT(parent) FROM Parent AS parent LEFT JOIN parent.child AS child_1"
                .to_string()
        ));
    }
}
