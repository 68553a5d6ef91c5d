use std::sync::Arc;

use arrow::array::{
    ArrayRef, BinaryArray, BooleanArray, Date32Array, Decimal128Array, Float64Array, Int64Array,
    StringArray, Time64MicrosecondArray, TimestampMicrosecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use tracing::trace;

use crate::error::RowsetError;
use crate::result::BaseResult;
use crate::value::{MAX_DECIMAL_SCALE, Value};

const DECIMAL_PRECISION: u8 = 38;

/// `num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Arrow type for a column, inferred from its non-null values.
///
/// A single value kind maps to its matching type; ints mixed with floats
/// widen to Float64 and ints mixed with decimals to Decimal128. Any other
/// mixture, or a column of nulls only, falls back to Utf8.
pub fn infer_arrow_type(values: &[Value]) -> DataType {
    let mut kind: Option<DataType> = None;
    let mut max_scale: u8 = 0;

    for value in values {
        let this = match value {
            Value::Null => continue,
            Value::Bool(_) => DataType::Boolean,
            Value::Int(_) => DataType::Int64,
            Value::Float(_) => DataType::Float64,
            Value::Decimal(d) => {
                max_scale = max_scale.max(d.scale());
                DataType::Decimal128(DECIMAL_PRECISION, 0)
            }
            Value::Date(_) => DataType::Date32,
            Value::DateTime(_) => DataType::Timestamp(TimeUnit::Microsecond, None),
            Value::Time(_) => DataType::Time64(TimeUnit::Microsecond),
            Value::Text(_) => DataType::Utf8,
            Value::Bytes(_) => DataType::Binary,
        };

        kind = Some(match (kind, this) {
            (None, t) => t,
            (Some(a), b) if a == b => a,
            (Some(DataType::Int64), DataType::Float64)
            | (Some(DataType::Float64), DataType::Int64) => DataType::Float64,
            (Some(DataType::Int64), d @ DataType::Decimal128(..))
            | (Some(d @ DataType::Decimal128(..)), DataType::Int64) => d,
            _ => return DataType::Utf8,
        });
    }

    match kind {
        Some(DataType::Decimal128(p, _)) => {
            DataType::Decimal128(p, max_scale.min(MAX_DECIMAL_SCALE) as i8)
        }
        Some(t) => t,
        None => DataType::Utf8,
    }
}

/// Build an Arrow RecordBatch from a result.
/// Each column becomes a typed Arrow array; a column whose values cannot be
/// represented in the inferred type falls back to Utf8.
pub fn build_record_batch(result: &BaseResult) -> Result<RecordBatch, RowsetError> {
    let num_cols = result.columns().len();

    let mut fields = Vec::with_capacity(num_cols);
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(num_cols);

    for name in result.columns() {
        let column = result.column(name)?;
        let values = column.values();
        let target_type = infer_arrow_type(values);

        let (final_type, array) = build_typed_array(&target_type, values).unwrap_or_else(|| {
            trace!(column = %name, "falling back to utf8 column");
            (DataType::Utf8, text_array(values))
        });

        fields.push(Field::new(name, final_type, true));
        arrays.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    let options = RecordBatchOptions::new().with_row_count(Some(result.len()));
    RecordBatch::try_new_with_options(schema, arrays, &options).map_err(|e| RowsetError::Format {
        message: format!("failed to build record batch: {e}"),
    })
}

fn text_array(values: &[Value]) -> ArrayRef {
    let text: Vec<Option<String>> = values
        .iter()
        .map(|v| match v {
            Value::Null => None,
            other => Some(other.to_string()),
        })
        .collect();
    Arc::new(StringArray::from(text))
}

/// Attempt to build a typed Arrow array.
/// Returns None if any non-null value does not fit the target type.
fn build_typed_array(target_type: &DataType, values: &[Value]) -> Option<(DataType, ArrayRef)> {
    let array: ArrayRef = match target_type {
        DataType::Boolean => {
            let parsed: Option<Vec<Option<bool>>> = values
                .iter()
                .map(|v| match v {
                    Value::Null => Some(None),
                    Value::Bool(b) => Some(Some(*b)),
                    _ => None,
                })
                .collect();
            Arc::new(BooleanArray::from(parsed?))
        }
        DataType::Int64 => {
            let parsed: Option<Vec<Option<i64>>> = values
                .iter()
                .map(|v| match v {
                    Value::Null => Some(None),
                    Value::Int(i) => Some(Some(*i)),
                    _ => None,
                })
                .collect();
            Arc::new(Int64Array::from(parsed?))
        }
        DataType::Float64 => {
            let parsed: Option<Vec<Option<f64>>> = values
                .iter()
                .map(|v| match v {
                    Value::Null => Some(None),
                    Value::Int(_) | Value::Float(_) => v.as_f64().map(Some),
                    _ => None,
                })
                .collect();
            Arc::new(Float64Array::from(parsed?))
        }
        DataType::Utf8 => text_array(values),
        DataType::Date32 => {
            let parsed: Option<Vec<Option<i32>>> = values
                .iter()
                .map(|v| match v {
                    Value::Null => Some(None),
                    Value::Date(d) => Some(Some(days_since_epoch(d))),
                    _ => None,
                })
                .collect();
            Arc::new(Date32Array::from(parsed?))
        }
        DataType::Timestamp(TimeUnit::Microsecond, None) => {
            let parsed: Option<Vec<Option<i64>>> = values
                .iter()
                .map(|v| match v {
                    Value::Null => Some(None),
                    Value::DateTime(dt) => Some(Some(dt.and_utc().timestamp_micros())),
                    _ => None,
                })
                .collect();
            Arc::new(TimestampMicrosecondArray::from(parsed?))
        }
        DataType::Time64(TimeUnit::Microsecond) => {
            let parsed: Option<Vec<Option<i64>>> = values
                .iter()
                .map(|v| match v {
                    Value::Null => Some(None),
                    Value::Time(t) => Some(Some(time_micros(t))),
                    _ => None,
                })
                .collect();
            Arc::new(Time64MicrosecondArray::from(parsed?))
        }
        DataType::Binary => {
            let parsed: Option<Vec<Option<&[u8]>>> = values
                .iter()
                .map(|v| match v {
                    Value::Null => Some(None),
                    Value::Bytes(b) => Some(Some(b.as_slice())),
                    _ => None,
                })
                .collect();
            Arc::new(BinaryArray::from(parsed?))
        }
        DataType::Decimal128(p, s) => {
            let scale = u8::try_from(*s).ok()?;
            let parsed: Option<Vec<Option<i128>>> = values
                .iter()
                .map(|v| match v {
                    Value::Null => Some(None),
                    Value::Decimal(d) => d.rescale(scale).map(Some),
                    Value::Int(i) => 10i128
                        .checked_pow(scale as u32)
                        .and_then(|factor| (*i as i128).checked_mul(factor))
                        .map(Some),
                    _ => None,
                })
                .collect();
            let arr = Decimal128Array::from(parsed?)
                .with_precision_and_scale(*p, *s)
                .ok()?;
            Arc::new(arr)
        }
        _ => text_array(values),
    };

    Some((target_type.clone(), array))
}

fn days_since_epoch(date: &NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

fn time_micros(time: &NaiveTime) -> i64 {
    time.num_seconds_from_midnight() as i64 * 1_000_000 + (time.nanosecond() / 1_000) as i64
}
