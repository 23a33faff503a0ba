use log_json_bridge::{convert, convert_back, log_to_records, records_to_log, Error, RecordSet};
use std::fs::{read_to_string, write};
use tempfile::TempDir;
use test_case::test_case;

#[test]
fn test_convert_log_file() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("access.log");
    let json = dir.path().join("access.json");
    write(&log, "GET /index.html 200\nPOST /login 403\n").unwrap();

    assert_eq!(2, convert(&log, &json).unwrap());
    assert_eq!(
        r#"[["GET","/index.html","200"],["POST","/login","403"]]"#,
        read_to_string(&json).unwrap()
    );
}

#[test]
fn test_convert_snapshot() {
    let records = log_to_records("GET /index.html 200\nPOST /login 403\n").unwrap();
    insta::assert_json_snapshot!(records, @r###"
    [
      [
        "GET",
        "/index.html",
        "200"
      ],
      [
        "POST",
        "/login",
        "403"
      ]
    ]
    "###);
}

#[test]
fn test_convert_empty_log() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("empty.log");
    let json = dir.path().join("empty.json");
    write(&log, "").unwrap();

    assert_eq!(0, convert(&log, &json).unwrap());
    assert_eq!("[]", read_to_string(&json).unwrap());
}

#[test]
fn test_convert_overwrites_destination() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("access.log");
    let json = dir.path().join("access.json");
    write(&log, "a b\n").unwrap();
    write(&json, "previous content that is longer than the new one").unwrap();

    convert(&log, &json).unwrap();
    assert_eq!(r#"[["a","b"]]"#, read_to_string(&json).unwrap());
}

#[test]
fn test_convert_missing_log() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("out.json");
    assert!(matches!(
        convert(dir.path().join("missing.log"), &json),
        Err(Error::Io(_))
    ));
    assert!(!json.exists());
}

#[test]
fn test_convert_back() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("records.json");
    let log = dir.path().join("records.log");
    write(&json, r#"[["a","b"],["c"]]"#).unwrap();

    assert_eq!(2, convert_back(&json, &log).unwrap());
    assert_eq!("a b\nc\n", read_to_string(&log).unwrap());
}

#[test_case(r#"[["a", 2]]"#; "non string token")]
#[test_case(r#"{"a": ["b"]}"#; "not a list")]
#[test_case("[[\"a\"]"; "truncated")]
fn test_convert_back_invalid(input: &str) {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("records.json");
    let log = dir.path().join("records.log");
    write(&json, input).unwrap();

    assert!(matches!(convert_back(&json, &log), Err(Error::Json(_))));
    assert!(!log.exists());
}

#[test_case("GET /index.html 200\n"; "single line")]
#[test_case("a\nb c\nd e f\n"; "multiple lines")]
#[test_case("ünïcödé tökens\n"; "unicode")]
#[test_case("tab\tseparated stays\n"; "tabs")]
fn test_log_round_trip(log: &str) {
    assert_eq!(log, records_to_log(&log_to_records(log).unwrap()));
}

#[test_case(r#"[["a","b"],["c"]]"#; "simple")]
#[test_case(r#"[["GET","/","200"]]"#; "single")]
#[test_case(r#"[["a","","b"]]"#; "empty token")]
#[test_case("[]"; "empty")]
fn test_record_round_trip(input: &str) {
    let records: RecordSet = serde_json::from_str(input).unwrap();
    assert_eq!(records, log_to_records(&records_to_log(&records)).unwrap());
}

#[test_case(r#"[["a b"]]"#; "token containing a space")]
#[test_case("[[]]"; "record without tokens")]
fn test_record_round_trip_is_lossy(input: &str) {
    let records: RecordSet = serde_json::from_str(input).unwrap();
    assert_ne!(records, log_to_records(&records_to_log(&records)).unwrap());
}
