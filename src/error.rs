use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Code has no entry in the static lookup table (front-end, PVT error..)
    #[error("unknown {table} code #{code}")]
    UnknownCode { table: &'static str, code: u32 },

    /// A set bit of the signal mask is not described by the signal table
    #[error("unknown signal type code #{0}")]
    UnknownSignalCode(u8),

    /// Label cannot be encoded back into a signal mask
    #[error("unknown signal label \"{0}\"")]
    UnknownSignalLabel(String),

    /// Number of set bits does not match the caller's expectation:
    /// malformed upstream data.
    #[error("inconsistent bit count: expected {expected}, found {found}")]
    InconsistentBitCount { expected: u32, found: u32 },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json formatting error: {0}")]
    Json(#[from] serde_json::Error),

    /// STF header does not describe a column we require
    #[error("missing \"{0}\" column")]
    MissingColumn(String),

    #[error("line {line}: invalid {column} value \"{value}\"")]
    InvalidField {
        line: usize,
        column: String,
        value: String,
    },

    /// STF file does not even contain a header
    #[error("empty STF file")]
    EmptyFile,

    #[error("directory {0} does not exist")]
    DirectoryNotFound(String),
}
