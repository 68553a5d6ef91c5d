use thiserror::Error;

#[derive(Debug, Error)]
pub enum RowsetError {
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("shape mismatch: {message}")]
    ShapeMismatch { message: String },

    #[error("key not found: {key:?}")]
    KeyNotFound { key: String },

    #[error("index out of range: {index} (length {len})")]
    IndexOutOfRange { index: isize, len: usize },

    #[error("invalid key type: {message}")]
    InvalidKeyType { message: String },

    #[error("key mismatch: expected {expected:?}, found {found:?}")]
    KeyMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("unsupported type: {type_name} is not JSON serializable")]
    UnsupportedType { type_name: String },

    #[error("unsupported source type: {message}")]
    UnsupportedSourceType { message: String },

    #[error("config: {message}")]
    Config { message: String },

    #[error("source: {message}")]
    Source { message: String },

    #[error("format: {message}")]
    Format { message: String },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
