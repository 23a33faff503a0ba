pub use crate::convert::{json_to_log, log_to_json, log_to_records, records_to_log};
pub use crate::error::{Error, Result};
pub use crate::parsing::{is_valid_log_record, tokenize, LineSplit, Tokens};
pub use crate::record::{is_valid_record, Record, RecordSet, UploadDocument};
pub use crate::sink::{BulkSink, BulkSummary, Credentials, ElasticsearchSink, Endpoint};
pub use crate::upload::{upload_json, upload_records, validate_records, UploadConfig};
use std::path::Path;
use tracing::info;

mod convert;
mod error;
mod parsing;
pub mod record;
pub mod sink;
mod upload;

/// Convert a log file into a json file of records
pub fn convert(log_path: impl AsRef<Path>, json_path: impl AsRef<Path>) -> Result<usize> {
    log_to_json(log_path, json_path)
}

/// Convert a json file of records back into a log file
pub fn convert_back(json_path: impl AsRef<Path>, log_path: impl AsRef<Path>) -> Result<usize> {
    json_to_log(json_path, log_path)
}

/// Upload a json file of records to elasticsearch in a single bulk request
pub fn upload(json_path: impl AsRef<Path>, config: &UploadConfig) -> Result<BulkSummary> {
    let sink = ElasticsearchSink::new(&config.endpoint, config.credentials.clone())?;
    upload_json(sink, &config.index, json_path)
}

/// Convert a log file and upload the resulting records
pub fn convert_and_upload(
    log_path: impl AsRef<Path>,
    json_path: impl AsRef<Path>,
    config: &UploadConfig,
) -> Result<BulkSummary> {
    let json_path = json_path.as_ref();
    let records = convert(log_path, json_path)?;
    info!(records, path = %json_path.display(), "log converted");
    upload(json_path, config)
}
