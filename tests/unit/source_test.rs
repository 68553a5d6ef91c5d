use chrono::NaiveDate;

use rowset::{
    ColumnMeta, Cursor, Decimal, FileResult, QueryResult, RowIterator, RowsetError, Value, record,
};

fn make_column(name: &str, type_name: &str) -> ColumnMeta {
    ColumnMeta::new(name, type_name)
}

// --- Cursor ---

#[test]
fn cursor_rows_become_keyed_records() {
    let cursor = Cursor {
        columns: vec![make_column("id", "INT"), make_column("name", "VARCHAR")],
        rows: vec![
            vec![Value::Int(1), Value::Text("Alice".into())],
            vec![Value::Int(2), Value::Null],
        ],
    };
    let result = QueryResult::from_source(cursor).unwrap();
    assert_eq!(result.columns(), ["id", "name"]);
    assert_eq!(result.len(), 2);
    assert_eq!(result.row(1).unwrap().value("name").unwrap(), &Value::Null);
}

#[test]
fn cursor_row_with_wrong_arity_is_shape_mismatch() {
    let cursor = Cursor {
        columns: vec![make_column("id", "INT"), make_column("name", "VARCHAR")],
        rows: vec![vec![Value::Int(1)]],
    };
    assert!(matches!(
        QueryResult::from_source(cursor),
        Err(RowsetError::ShapeMismatch { .. })
    ));
}

#[test]
fn empty_cursor_keeps_its_columns() {
    let cursor = Cursor {
        columns: vec![make_column("id", "INT")],
        rows: vec![],
    };
    let result = QueryResult::from_source(cursor).unwrap();
    assert!(!result.is_empty());
    assert!(!result.has_rows());
}

// --- Row iterator ---

#[test]
fn row_iterator_records_follow_schema_order() {
    let iter = RowIterator {
        schema: vec![make_column("a", "INT"), make_column("b", "INT")],
        rows: vec![record! { "b" => 2, "a" => 1 }],
    };
    let result = QueryResult::from_source(iter).unwrap();
    assert_eq!(result.row(0).unwrap().values(), vec![Value::Int(1), Value::Int(2)]);
    assert_eq!(result.as_json_string().unwrap(), r#"[{"a":1,"b":2}]"#);
}

#[test]
fn row_iterator_with_differing_key_sets_is_shape_mismatch() {
    let iter = RowIterator {
        schema: vec![make_column("a", "INT"), make_column("b", "INT")],
        rows: vec![record! { "a" => 1, "b" => 2 }, record! { "a" => 1, "c" => 2 }],
    };
    assert!(matches!(
        QueryResult::from_source(iter),
        Err(RowsetError::ShapeMismatch { .. })
    ));
}

#[test]
fn row_iterator_disagreeing_with_schema_is_shape_mismatch() {
    let iter = RowIterator {
        schema: vec![make_column("a", "INT")],
        rows: vec![record! { "a" => 1, "extra" => 2 }],
    };
    assert!(matches!(
        QueryResult::from_source(iter),
        Err(RowsetError::ShapeMismatch { .. })
    ));
}

#[test]
fn row_iterator_without_schema_uses_first_record() {
    let iter = RowIterator {
        schema: vec![],
        rows: vec![record! { "x" => 1, "y" => 2 }, record! { "y" => 4, "x" => 3 }],
    };
    let result = QueryResult::from_source(iter).unwrap();
    assert_eq!(result.columns(), ["x", "y"]);
    assert_eq!(result.column("x").unwrap().values(), &[Value::Int(1), Value::Int(3)]);
}

#[test]
fn query_result_supports_base_mutation() {
    let cursor = Cursor {
        columns: vec![make_column("id", "INT")],
        rows: vec![vec![Value::Int(1)], vec![Value::Int(2)]],
    };
    let mut result = QueryResult::from_source(cursor).unwrap();
    result.pop().unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.into_inner().len(), 1);
}

// --- Statement payload ---

#[test]
fn statement_payload_decodes_typed_cells() {
    let payload = r#"{
        "statement_id": "01ef",
        "status": {"state": "SUCCEEDED"},
        "manifest": {"schema": {"columns": [
            {"name": "id", "type_name": "INT"},
            {"name": "price", "type_name": "DECIMAL(10,2)"},
            {"name": "day", "type_name": "DATE"},
            {"name": "active", "type_name": "BOOLEAN"},
            {"name": "note", "type_name": "STRING"}
        ]}},
        "result": {"data_array": [
            ["1", "19.99", "2024-05-01", "true", null],
            ["two", "3.10", "not a date", "false", "ok"]
        ]}
    }"#;
    let iter = RowIterator::from_statement_json(payload).unwrap();
    let result = QueryResult::from_source(iter).unwrap();

    let first = result.row(0).unwrap();
    assert_eq!(first.value("id").unwrap(), &Value::Int(1));
    assert_eq!(
        first.value("price").unwrap(),
        &Value::Decimal("19.99".parse::<Decimal>().unwrap())
    );
    assert_eq!(
        first.value("day").unwrap(),
        &Value::Date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
    );
    assert_eq!(first.value("active").unwrap(), &Value::Bool(true));
    assert_eq!(first.value("note").unwrap(), &Value::Null);

    // Cells that do not parse as their declared type stay text.
    let second = result.row(1).unwrap();
    assert_eq!(second.value("id").unwrap(), &Value::Text("two".into()));
    assert_eq!(second.value("day").unwrap(), &Value::Text("not a date".into()));
}

#[test]
fn failed_statement_is_a_source_error() {
    let payload = r#"{
        "status": {"state": "FAILED", "error": {"error_code": "BAD_REQUEST", "message": "syntax error"}}
    }"#;
    match RowIterator::from_statement_json(payload) {
        Err(RowsetError::Source { message }) => assert!(message.contains("syntax error")),
        other => panic!("expected source error, got {other:?}"),
    }
}

#[test]
fn pending_statement_is_a_source_error() {
    let payload = r#"{"statement_id": "abc", "status": {"state": "PENDING"}}"#;
    assert!(matches!(
        RowIterator::from_statement_json(payload),
        Err(RowsetError::Source { .. })
    ));
}

#[test]
fn malformed_payload_is_a_source_error() {
    assert!(matches!(
        RowIterator::from_statement_json("not json"),
        Err(RowsetError::Source { .. })
    ));
}

// --- File records ---

#[test]
fn file_result_from_records_takes_keys_from_first_record() {
    let result = FileResult::from_records(vec![
        record! { "k" => 1, "v" => "a" },
        record! { "v" => "b", "k" => 2 },
    ])
    .unwrap();
    assert_eq!(result.columns(), ["k", "v"]);
    assert_eq!(result.row(1).unwrap().to_string(), "(2, 'b')");
}

#[test]
fn file_result_from_records_rejects_mismatched_records() {
    let err =
        FileResult::from_records(vec![record! { "k" => 1 }, record! { "j" => 1 }]).unwrap_err();
    assert!(matches!(err, RowsetError::ShapeMismatch { .. }));
}

#[test]
fn file_result_from_no_records_is_empty() {
    let result = FileResult::from_records(vec![]).unwrap();
    assert!(result.is_empty());
}

#[test]
fn file_result_from_rows_checks_arity() {
    let keys = vec!["a".to_string(), "b".to_string()];
    let err = FileResult::from_rows(keys, vec![vec![Value::Int(1)]]).unwrap_err();
    assert!(matches!(err, RowsetError::ShapeMismatch { .. }));
}
