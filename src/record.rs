use serde::Serialize;
use serde_json::Value;

/// The tokens of a single log line
pub type Record = Vec<String>;

/// All records of a log, stored as a json array of arrays
pub type RecordSet = Vec<Record>;

/// Whether a json value can be uploaded as record: an array containing only strings.
///
/// Unlike [`is_valid_log_record`](crate::is_valid_log_record) an empty array is accepted.
pub fn is_valid_record(record: &Value) -> bool {
    match record {
        Value::Array(items) => items.iter().all(Value::is_string),
        _ => false,
    }
}

/// Extract the tokens from a record that passed [`is_valid_record`]
pub fn record_from_value(record: &Value) -> Option<Record> {
    match record {
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(String::from))
            .collect(),
        _ => None,
    }
}

/// A record tagged with the index it should be written to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadDocument<'a> {
    #[serde(rename = "_index")]
    pub index: &'a str,
    #[serde(rename = "_source")]
    pub source: &'a [String],
}

impl<'a> UploadDocument<'a> {
    pub fn new(index: &'a str, source: &'a [String]) -> Self {
        UploadDocument { index, source }
    }
}
