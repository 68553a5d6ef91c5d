use rowset::{Record, ResultRow, RowsetError, Slice, Value, record};

fn make_row() -> ResultRow {
    let keys: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
    ResultRow::new(keys, record! { "a" => 1, "b" => 2, "c" => "x" })
}

// --- Lookup ---

#[test]
fn lookup_by_name_and_index() {
    let row = make_row();
    assert_eq!(row.get("a").unwrap(), &Value::Int(1));
    assert_eq!(row.get(2).unwrap(), &Value::Text("x".into()));
    assert_eq!(row.get(-1).unwrap(), &Value::Text("x".into()));
    assert_eq!(row.value("b").unwrap(), &Value::Int(2));
}

#[test]
fn unknown_name_is_key_not_found() {
    let row = make_row();
    let err = row.get("missing").unwrap_err();
    assert!(matches!(err, RowsetError::KeyNotFound { key } if key == "missing"));
}

#[test]
fn out_of_range_index() {
    let row = make_row();
    let err = row.get(3).unwrap_err();
    assert!(matches!(err, RowsetError::IndexOutOfRange { index: 3, len: 3 }));
    assert!(row.get(-4).is_err());
}

#[test]
fn slice_key_is_invalid_for_rows() {
    let row = make_row();
    let err = row.get(Slice::full()).unwrap_err();
    assert!(matches!(err, RowsetError::InvalidKeyType { .. }));
}

#[test]
fn get_or_default_swallows_missing_names() {
    let row = make_row();
    assert_eq!(row.get_or_default("a", Value::Null), Value::Int(1));
    assert_eq!(row.get_or_default("zzz", Value::Int(0)), Value::Int(0));
}

// --- Shape ---

#[test]
fn values_keys_and_items() {
    let row = make_row();
    assert_eq!(
        row.values(),
        vec![Value::Int(1), Value::Int(2), Value::Text("x".into())]
    );
    assert_eq!(row.keys(), ["a", "b", "c"]);
    assert_eq!(row.columns(), row.keys());
    assert_eq!(row.len(), 3);
    assert!(!row.is_empty());

    let names: Vec<&str> = row.items().map(|(k, _)| k).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn iterating_a_row_yields_pairs() {
    let row = make_row();
    let iter = (&row).into_iter();
    assert_eq!(iter.len(), 3);
    let pairs: Vec<(&str, &Value)> = (&row).into_iter().collect();
    assert_eq!(pairs[1], ("b", &Value::Int(2)));
}

#[test]
fn display_renders_a_tuple() {
    assert_eq!(make_row().to_string(), "(1, 2, 'x')");
}

#[test]
fn values_and_display_follow_the_key_list() {
    let keys: Vec<String> = vec!["c".into(), "a".into()];
    let row = ResultRow::new(keys, record! { "a" => 1, "c" => "x" });
    assert_eq!(row.values(), vec![Value::Text("x".into()), Value::Int(1)]);
    assert_eq!(row.at(0).unwrap(), &Value::Text("x".into()));
    assert_eq!(row.to_string(), "('x', 1)");
}

#[test]
fn from_values_pairs_keys_positionally() {
    let keys: Vec<String> = vec!["id".into(), "name".into()];
    let row = ResultRow::from_values(keys, [Value::Int(7), Value::Text("q".into())]);
    assert_eq!(row.value("name").unwrap(), &Value::Text("q".into()));
}

// --- Equality ---

#[test]
fn rows_compare_by_record() {
    let a = make_row();
    let b = make_row();
    assert_eq!(a, b);

    let keys: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
    let c = ResultRow::new(keys, record! { "a" => 1, "b" => 2, "c" => "y" });
    assert_ne!(a, c);
}

#[test]
fn record_equality_is_order_sensitive() {
    let ab: Record = record! { "a" => 1, "b" => 2 };
    let ba: Record = record! { "b" => 2, "a" => 1 };
    assert_ne!(ab, ba);
    assert!(ab.same_keys(&ba));
}
