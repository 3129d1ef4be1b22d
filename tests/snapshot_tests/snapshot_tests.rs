//! Snapshot Tests
//!
//! Tests verify:
//! - Missing files load as `None`
//! - Malformed files fail to load
//! - Saves are pretty JSON and round-trip
//! - No temp file is left behind

use std::fs;

use chrono::NaiveDate;
use rosterdb::config::SnapshotSync;
use rosterdb::model::Employee;
use rosterdb::snapshot::{read_snapshot, temp_path, write_snapshot, JsonSnapshot, Snapshot};
use rosterdb::RosterError;
use tempfile::TempDir;

fn sample() -> Vec<Employee> {
    vec![
        Employee::new(1, "Jane Doe", "CEO", NaiveDate::from_ymd_opt(2015, 4, 1).unwrap())
            .with_direct_reports(vec![2, 3]),
        Employee::new(2, "Amy Smith", "CTO", NaiveDate::from_ymd_opt(2017, 9, 12).unwrap())
            .with_active(false),
    ]
}

#[test]
fn test_read_missing_file_is_none() {
    let temp_dir = TempDir::new().unwrap();
    let result = read_snapshot(&temp_dir.path().join("absent.json")).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_read_malformed_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    fs::write(&path, "[{\"id\": 1, \"name\": ").unwrap();

    assert!(matches!(read_snapshot(&path), Err(RosterError::Serialization(_))));
}

#[test]
fn test_read_wrong_shape_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    fs::write(&path, r#"{"employees": []}"#).unwrap();

    assert!(read_snapshot(&path).is_err());
}

#[test]
fn test_write_then_read_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");

    write_snapshot(&path, &sample(), SnapshotSync::EveryWrite).unwrap();

    assert_eq!(read_snapshot(&path).unwrap(), Some(sample()));
    assert!(!temp_path(&path).exists());
}

#[test]
fn test_write_is_pretty_printed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");

    write_snapshot(&path, &sample(), SnapshotSync::OsBuffered).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("[\n"));
    assert!(text.contains("\"hireDate\": \"04/01/2015\""));
    assert!(text.contains("\"directReports\": ["));
}

#[test]
fn test_write_replaces_previous_content() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");

    write_snapshot(&path, &sample(), SnapshotSync::EveryWrite).unwrap();
    write_snapshot(&path, &sample()[..1], SnapshotSync::EveryWrite).unwrap();

    let records = read_snapshot(&path).unwrap().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, 1);
}

#[test]
fn test_write_into_missing_directory_fails_and_keeps_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no_such_dir").join("data.json");

    let result = write_snapshot(&path, &sample(), SnapshotSync::EveryWrite);

    assert!(matches!(result, Err(RosterError::Io(_))));
    assert!(!path.exists());
    assert!(!temp_path(&path).exists());
}

#[test]
fn test_unknown_fields_dropped_on_resave() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    fs::write(
        &path,
        r#"[{"id":1,"name":"Jane Doe","position":"CEO","hireDate":"01/02/2010",
             "active":true,"directReports":[],"nickname":"JD"}]"#,
    )
    .unwrap();

    let records = read_snapshot(&path).unwrap().unwrap();
    write_snapshot(&path, &records, SnapshotSync::EveryWrite).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("nickname"));
    assert_eq!(read_snapshot(&path).unwrap().unwrap(), records);
}

#[test]
fn test_json_snapshot_trait_impl() {
    let temp_dir = TempDir::new().unwrap();
    let snapshot = JsonSnapshot::new(temp_dir.path().join("data.json"), SnapshotSync::EveryWrite);

    assert!(snapshot.load().unwrap().is_none());
    snapshot.save(&sample()).unwrap();
    assert_eq!(snapshot.load().unwrap(), Some(sample()));
    assert!(snapshot.path().exists());
}
