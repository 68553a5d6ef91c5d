use std::fs;

use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::ipc::reader::FileReader;

use rowset::format_arrow::write_arrow;
use rowset::{BaseResult, Record, Value};

fn make_result(keys: &[&str], rows: Vec<Vec<Value>>) -> BaseResult {
    let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
    let records: Vec<Record> = rows
        .into_iter()
        .map(|values| Record::from_values(&keys, values))
        .collect();
    BaseResult::new(keys, records).unwrap()
}

fn temp_arrow_path(test_name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("rowset_test_arrow");
    fs::create_dir_all(&dir).unwrap();
    dir.join(format!("{test_name}.arrow"))
}

#[test]
fn write_and_read_back_arrow_ipc_with_typed_columns() {
    let result = make_result(
        &["id", "name", "salary"],
        vec![
            vec![Value::Int(1), Value::Text("Alice".into()), Value::Float(50000.5)],
            vec![Value::Int(2), Value::Text("Bob".into()), Value::Float(60000.75)],
        ],
    );

    let path = temp_arrow_path("typed_columns");
    write_arrow(&result, &path).unwrap();

    let file = fs::File::open(&path).unwrap();
    let reader = FileReader::try_new(file, None).unwrap();
    let schema = reader.schema();

    assert_eq!(schema.field(0).name(), "id");
    assert_eq!(schema.field(0).data_type(), &DataType::Int64);
    assert_eq!(schema.field(1).data_type(), &DataType::Utf8);
    assert_eq!(schema.field(2).data_type(), &DataType::Float64);

    let batches: Vec<_> = reader.into_iter().collect::<Result<_, _>>().unwrap();
    let total_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(total_rows, 2);

    let batch = &batches[0];
    let ids = batch.column(0).as_any().downcast_ref::<Int64Array>().unwrap();
    assert_eq!(ids.value(0), 1);
    let names = batch.column(1).as_any().downcast_ref::<StringArray>().unwrap();
    assert_eq!(names.value(1), "Bob");
    let salaries = batch.column(2).as_any().downcast_ref::<Float64Array>().unwrap();
    assert_eq!(salaries.value(1), 60000.75);

    let _ = fs::remove_file(&path);
}

#[test]
fn null_values_are_native_arrow_nulls() {
    let result = make_result(
        &["id", "name"],
        vec![
            vec![Value::Int(1), Value::Null],
            vec![Value::Null, Value::Text("Bob".into())],
        ],
    );

    let path = temp_arrow_path("null_values");
    write_arrow(&result, &path).unwrap();

    let file = fs::File::open(&path).unwrap();
    let reader = FileReader::try_new(file, None).unwrap();
    let batches: Vec<_> = reader.into_iter().collect::<Result<_, _>>().unwrap();
    let batch = &batches[0];

    assert!(!batch.column(0).is_null(0));
    assert!(batch.column(0).is_null(1));
    assert!(batch.column(1).is_null(0));
    assert!(!batch.column(1).is_null(1));

    let _ = fs::remove_file(&path);
}

#[test]
fn empty_result_produces_valid_arrow_ipc_with_schema() {
    let result = make_result(&["id", "name"], vec![]);

    let path = temp_arrow_path("empty_result");
    write_arrow(&result, &path).unwrap();

    let file = fs::File::open(&path).unwrap();
    let reader = FileReader::try_new(file, None).unwrap();
    let schema = reader.schema();
    assert_eq!(schema.fields().len(), 2);
    assert_eq!(schema.field(1).name(), "name");

    let batches: Vec<_> = reader.into_iter().collect::<Result<_, _>>().unwrap();
    let total_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(total_rows, 0);

    let _ = fs::remove_file(&path);
}

#[test]
fn missing_parent_directory_is_io_error() {
    let result = make_result(&["id"], vec![vec![Value::Int(1)]]);
    let path = std::env::temp_dir().join("rowset_no_such_dir/out.arrow");
    assert!(matches!(
        write_arrow(&result, &path),
        Err(rowset::RowsetError::Io(_))
    ));
}
