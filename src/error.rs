use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid log entry on line {line}: {tokens:?}")]
    InvalidLogEntry { line: usize, tokens: Vec<String> },
    #[error("Invalid json entry at position {index}: {record}")]
    InvalidRecord {
        index: usize,
        record: serde_json::Value,
    },
    #[error("Invalid json file, expected a list of entries: {0}")]
    InvalidRecordSet(serde_json::Value),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Bulk request rejected with {status}: {body}")]
    BulkStatus { status: StatusCode, body: String },
    #[error("Malformed cloud id: {0}")]
    CloudId(String),
}

pub type Result<O, E = Error> = std::result::Result<O, E>;

impl Error {
    /// Whether the error comes from validating input, as opposed to io or the remote sink
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidLogEntry { .. }
                | Error::InvalidRecord { .. }
                | Error::InvalidRecordSet(_)
        )
    }
}
