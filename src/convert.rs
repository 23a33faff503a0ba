use crate::parsing::{is_valid_log_record, tokenize, LineSplit};
use crate::record::{Record, RecordSet};
use crate::{Error, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Tokenize every line of a log.
///
/// Fails on the first line that is not a valid log record, no records are returned in that case.
pub fn log_to_records(log: &str) -> Result<RecordSet> {
    LineSplit::new(log)
        .enumerate()
        .map(|(index, line)| {
            let tokens = tokenize(line);
            if is_valid_log_record(&tokens) {
                Ok(tokens.into_iter().map(String::from).collect::<Record>())
            } else {
                warn!(line = index + 1, ?tokens, "invalid log entry");
                Err(Error::InvalidLogEntry {
                    line: index + 1,
                    tokens: tokens.into_iter().map(String::from).collect(),
                })
            }
        })
        .collect()
}

/// Join every record back into a space separated, newline terminated line
pub fn records_to_log(records: &[Record]) -> String {
    let mut log = String::new();
    for record in records {
        log.push_str(&record.join(" "));
        log.push('\n');
    }
    log
}

/// Convert a log file into a json file containing the tokens of each line.
///
/// The destination is only created once every line has been tokenized, so an invalid
/// log never leaves a partial json file behind. Returns the number of records written.
pub fn log_to_json(log_path: impl AsRef<Path>, json_path: impl AsRef<Path>) -> Result<usize> {
    let log_path = log_path.as_ref();
    let json_path = json_path.as_ref();
    let content = fs::read_to_string(log_path)?;
    let records = log_to_records(&content)?;

    let mut writer = BufWriter::new(File::create(json_path)?);
    serde_json::to_writer(&mut writer, &records)?;
    writer.flush()?;

    debug!(
        source = %log_path.display(),
        destination = %json_path.display(),
        records = records.len(),
        "converted log to json"
    );
    Ok(records.len())
}

/// Convert a json file of records back into a log file, one line per record.
///
/// Records containing anything but strings fail to deserialize, the log file is not created in that case.
/// Returns the number of lines written.
pub fn json_to_log(json_path: impl AsRef<Path>, log_path: impl AsRef<Path>) -> Result<usize> {
    let json_path = json_path.as_ref();
    let log_path = log_path.as_ref();
    let content = fs::read_to_string(json_path)?;
    let records: RecordSet = serde_json::from_str(&content)?;

    let mut writer = BufWriter::new(File::create(log_path)?);
    writer.write_all(records_to_log(&records).as_bytes())?;
    writer.flush()?;

    debug!(
        source = %json_path.display(),
        destination = %log_path.display(),
        lines = records.len(),
        "converted json to log"
    );
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tokens: &[&str]) -> Record {
        tokens.iter().map(|token| token.to_string()).collect()
    }

    #[test]
    fn test_log_to_records() {
        assert_eq!(
            vec![
                record(&["GET", "/index.html", "200"]),
                record(&["POST", "/login", "403"])
            ],
            log_to_records("GET /index.html 200\nPOST /login 403\n").unwrap()
        );
        assert!(log_to_records("").unwrap().is_empty());
    }

    #[test]
    fn test_log_to_records_keeps_empty_tokens() {
        assert_eq!(
            vec![record(&["a", "", "b"]), record(&[""])],
            log_to_records("a  b\n\n").unwrap()
        );
    }

    #[test]
    fn test_records_to_log() {
        assert_eq!(
            "a b\nc\n",
            records_to_log(&[record(&["a", "b"]), record(&["c"])])
        );
        assert_eq!("", records_to_log(&[]));
    }

    #[test]
    fn test_round_trip() {
        let log = "GET /index.html 200\nPOST /login 403\nsingle\n";
        assert_eq!(log, records_to_log(&log_to_records(log).unwrap()));
    }
}
