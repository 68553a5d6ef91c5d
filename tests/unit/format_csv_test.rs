use std::fs;

use chrono::NaiveDate;

use rowset::format_csv::{write_csv, write_csv_to_writer};
use rowset::{BaseResult, Record, Value};

fn make_result(keys: &[&str], rows: Vec<Vec<Value>>) -> BaseResult {
    let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
    let records: Vec<Record> = rows
        .into_iter()
        .map(|values| Record::from_values(&keys, values))
        .collect();
    BaseResult::new(keys, records).unwrap()
}

fn render(result: &BaseResult) -> String {
    let mut buf = Vec::new();
    write_csv_to_writer(result, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

#[test]
fn basic_output_header_and_data_rows() {
    let result = make_result(
        &["id", "name", "city"],
        vec![
            vec![Value::Int(1), text("Alice"), text("Portland")],
            vec![Value::Int(2), text("Bob"), text("Seattle")],
        ],
    );

    assert_eq!(
        render(&result),
        "id,name,city\r\n1,Alice,Portland\r\n2,Bob,Seattle\r\n"
    );
}

#[test]
fn null_values_produce_empty_fields() {
    let result = make_result(
        &["a", "b", "c"],
        vec![
            vec![text("x"), Value::Null, text("z")],
            vec![Value::Null, Value::Null, Value::Null],
        ],
    );

    assert_eq!(render(&result), "a,b,c\r\nx,,z\r\n,,\r\n");
}

#[test]
fn typed_values_use_their_text_form() {
    let day = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let result = make_result(
        &["f", "b", "d", "dec"],
        vec![vec![
            Value::Float(1.0),
            Value::Bool(true),
            Value::Date(day),
            Value::Decimal("0.50".parse().unwrap()),
        ]],
    );

    assert_eq!(render(&result), "f,b,d,dec\r\n1.0,true,2024-01-31,0.50\r\n");
}

#[test]
fn rfc4180_escaping_commas_quotes_newlines() {
    let result = make_result(
        &["val"],
        vec![
            vec![text("hello, world")],
            vec![text("say \"hi\"")],
            vec![text("line1\nline2")],
            vec![text("a,b\"c\nd")],
        ],
    );

    // Fields with commas/quotes/newlines are enclosed in double quotes,
    // and embedded double quotes are escaped by doubling them.
    let expected = "val\r\n\
                    \"hello, world\"\r\n\
                    \"say \"\"hi\"\"\"\r\n\
                    \"line1\nline2\"\r\n\
                    \"a,b\"\"c\nd\"\r\n";
    assert_eq!(render(&result), expected);
}

#[test]
fn crlf_line_terminators() {
    let result = make_result(&["x"], vec![vec![Value::Int(1)]]);
    let output = render(&result);

    let lines: Vec<&str> = output.split("\r\n").collect();
    assert_eq!(lines, vec!["x", "1", ""]);
    let without_crlf = output.replace("\r\n", "");
    assert!(!without_crlf.contains('\n'), "found bare LF outside CRLF");
}

#[test]
fn empty_result_set_produces_header_only() {
    let result = make_result(&["col1", "col2"], vec![]);
    assert_eq!(render(&result), "col1,col2\r\n");
}

#[test]
fn column_names_with_special_characters_are_escaped() {
    let result = make_result(
        &["normal", "has, comma", "has \"quote\""],
        vec![vec![text("a"), text("b"), text("c")]],
    );

    let output = render(&result);
    let first_line = output.split("\r\n").next().unwrap();
    assert_eq!(first_line, "normal,\"has, comma\",\"has \"\"quote\"\"\"");
}

#[test]
fn write_csv_creates_file() {
    let dir = std::env::temp_dir().join("rowset_test_csv");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("write_csv_creates_file.csv");

    let result = make_result(&["a", "b"], vec![vec![Value::Int(1), Value::Int(2)]]);
    write_csv(&result, &path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\r\n1,2\r\n");

    let _ = fs::remove_file(&path);
}
