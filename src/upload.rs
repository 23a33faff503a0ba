use crate::record::{is_valid_record, record_from_value, RecordSet, UploadDocument};
use crate::sink::{BulkSink, BulkSummary, Credentials, Endpoint};
use crate::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Everything needed to reach the cluster and pick the target index
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub endpoint: Endpoint,
    pub index: String,
    pub credentials: Credentials,
}

/// Check every entry of a record set, failing on the first entry that isn't a list of strings
pub fn validate_records(values: &[Value]) -> Result<RecordSet> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| match record_from_value(value) {
            Some(record) if is_valid_record(value) => Ok(record),
            _ => {
                warn!(index, record = %value, "invalid json entry");
                Err(Error::InvalidRecord {
                    index,
                    record: value.clone(),
                })
            }
        })
        .collect()
}

/// Validate all records and send them to the sink in a single bulk call.
///
/// Nothing is sent unless every record is valid. An empty record set doesn't touch the sink.
pub fn upload_records<S: BulkSink>(
    mut sink: S,
    index: &str,
    values: &[Value],
) -> Result<BulkSummary> {
    let records = validate_records(values)?;
    if records.is_empty() {
        debug!(index, "no records to upload");
        return Ok(BulkSummary::default());
    }

    let documents: Vec<_> = records
        .iter()
        .map(|record| UploadDocument::new(index, record))
        .collect();
    sink.bulk(&documents)
}

/// Read a json record set from disk and upload it
pub fn upload_json<S: BulkSink>(
    sink: S,
    index: &str,
    json_path: impl AsRef<Path>,
) -> Result<BulkSummary> {
    let content = fs::read_to_string(json_path)?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Array(values) => upload_records(sink, index, &values),
        value => {
            warn!(%value, "invalid json file");
            Err(Error::InvalidRecordSet(value))
        }
    }
}
