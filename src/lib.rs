//! Backend-agnostic tabular results.
//!
//! A [`BaseResult`] holds materialized rows under one ordered key list and
//! hands out row, column, JSON and Arrow views of them. [`QueryResult`] and
//! [`FileResult`] build one from driver cursors, warehouse payloads and flat
//! files.

pub mod cli;
pub mod codec;
pub mod column;
pub mod config;
pub mod error;
pub mod format_arrow;
pub mod format_columnar;
pub mod format_csv;
pub mod format_detect;
pub mod key;
pub mod output;
pub mod record;
pub mod result;
pub mod row;
pub mod source;
pub mod value;
pub mod verbose;

pub use column::{ColumnSelection, EMPTY_RESULT_SENTINEL, ResultColumn};
pub use error::RowsetError;
pub use key::{Key, Slice};
pub use record::Record;
pub use result::{BaseResult, IntoRows, Selection};
pub use row::ResultRow;
pub use source::file::{FileType, ReaderOptions};
pub use source::{ColumnMeta, Cursor, FileResult, QueryResult, QuerySource, RowIterator};
pub use value::{Decimal, Value};
