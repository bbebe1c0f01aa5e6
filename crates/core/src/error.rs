use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum DewError {
    #[error("config error: {0}")]
    Config(String),

    /// The serial device could not be opened. Fatal at startup.
    #[error("transport unavailable on '{device}': {reason}")]
    TransportUnavailable { device: String, reason: String },

    /// A read on an already-open transport failed.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("UI error: {0}")]
    Ui(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Why a single wire record was rejected.
///
/// These are recovered locally: the tick is skipped and the buffer untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("record is not valid UTF-8")]
    Decode,

    #[error("expected 4 comma-separated fields, found {found}")]
    FieldCount { found: usize },

    #[error("field '{field}' is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

pub type Result<T, E = DewError> = std::result::Result<T, E>;
