//! Collection Tests
//!
//! Tests verify:
//! - Uniqueness on load and insert
//! - Deactivation
//! - Active-by-surname ordering
//! - Direct report resolution
//! - Hire date range filtering and ordering

use chrono::NaiveDate;
use rosterdb::collection::Collection;
use rosterdb::model::{Employee, UNKNOWN_REPORT};
use rosterdb::RosterError;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn employee(id: i64, name: &str, hired: NaiveDate) -> Employee {
    Employee::new(id, name, "Staff", hired)
}

fn ids(employees: &[Employee]) -> Vec<i64> {
    employees.iter().map(|e| e.id).collect()
}

// =============================================================================
// Load / Insert Tests
// =============================================================================

#[test]
fn test_new_collection_is_empty() {
    let collection = Collection::new();
    assert!(collection.is_empty());
    assert_eq!(collection.len(), 0);
}

#[test]
fn test_from_records_keeps_order() {
    let collection = Collection::from_records(vec![
        employee(3, "C C", date(2020, 1, 1)),
        employee(1, "A A", date(2020, 1, 1)),
        employee(2, "B B", date(2020, 1, 1)),
    ])
    .unwrap();

    assert_eq!(ids(collection.records()), vec![3, 1, 2]);
    assert_eq!(collection.get(1).unwrap().name, "A A");
}

#[test]
fn test_from_records_rejects_duplicates() {
    let result = Collection::from_records(vec![
        employee(1, "Jane Doe", date(2020, 1, 1)),
        employee(1, "John Doe", date(2021, 1, 1)),
    ]);

    assert!(matches!(result, Err(RosterError::DuplicateId(1))));
}

#[test]
fn test_insert_appends() {
    let mut collection = Collection::new();
    collection.insert(employee(2, "Amy Smith", date(2020, 1, 1))).unwrap();
    collection.insert(employee(1, "Jane Doe", date(2020, 1, 1))).unwrap();

    assert_eq!(ids(collection.records()), vec![2, 1]);
    assert!(collection.contains(1));
    assert!(collection.contains(2));
}

#[test]
fn test_insert_duplicate_leaves_collection_unchanged() {
    let mut collection = Collection::new();
    collection.insert(employee(1, "Jane Doe", date(2020, 1, 1))).unwrap();

    let result = collection.insert(employee(1, "Impostor Doe", date(2022, 1, 1)));

    assert!(matches!(result, Err(RosterError::DuplicateId(1))));
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.get(1).unwrap().name, "Jane Doe");
}

// =============================================================================
// Deactivation Tests
// =============================================================================

#[test]
fn test_deactivate_is_idempotent() {
    let mut collection = Collection::new();
    collection.insert(employee(1, "Jane Doe", date(2020, 1, 1))).unwrap();

    assert!(!collection.deactivate(1).unwrap().active);
    assert!(!collection.deactivate(1).unwrap().active);
    assert!(!collection.get(1).unwrap().active);
}

#[test]
fn test_deactivate_unknown_id() {
    let mut collection = Collection::new();
    assert!(collection.deactivate(42).is_none());
}

// =============================================================================
// Active Sorted Tests
// =============================================================================

#[test]
fn test_active_sorted_by_surname() {
    let collection = Collection::from_records(vec![
        employee(2, "Amy Smith", date(2020, 1, 1)),
        employee(1, "Jane Doe", date(2020, 1, 1)),
    ])
    .unwrap();

    let names: Vec<String> = collection.active_sorted().into_iter().map(|e| e.name).collect();
    assert_eq!(names, vec!["Jane Doe", "Amy Smith"]);
}

#[test]
fn test_active_sorted_excludes_inactive() {
    let collection = Collection::from_records(vec![
        employee(1, "Jane Doe", date(2020, 1, 1)),
        employee(2, "Amy Smith", date(2020, 1, 1)).with_active(false),
        employee(3, "Bob Adams", date(2020, 1, 1)),
    ])
    .unwrap();

    let active = collection.active_sorted();
    assert_eq!(ids(&active), vec![3, 1]);
    assert!(active.iter().all(|e| e.active));
}

#[test]
fn test_active_sorted_is_stable_for_equal_surnames() {
    let collection = Collection::from_records(vec![
        employee(5, "Zed Lee", date(2020, 1, 1)),
        employee(2, "Amy Lee", date(2020, 1, 1)),
        employee(9, "Mo Lee", date(2020, 1, 1)),
    ])
    .unwrap();

    assert_eq!(ids(&collection.active_sorted()), vec![5, 2, 9]);
}

#[test]
fn test_active_sorted_single_token_name_sorts_first() {
    let collection = Collection::from_records(vec![
        employee(1, "Jane Doe", date(2020, 1, 1)),
        employee(2, "Cher", date(2020, 1, 1)),
    ])
    .unwrap();

    assert_eq!(ids(&collection.active_sorted()), vec![2, 1]);
}

// =============================================================================
// Direct Reports Tests
// =============================================================================

#[test]
fn test_with_reports_resolves_names() {
    let collection = Collection::from_records(vec![
        employee(1, "Jane Doe", date(2020, 1, 1)).with_direct_reports(vec![3, 2]),
        employee(2, "Amy Smith", date(2020, 1, 1)),
        employee(3, "Bob Adams", date(2020, 1, 1)),
    ])
    .unwrap();

    let view = collection.with_reports(1).unwrap();
    assert_eq!(view.employee.id, 1);
    assert_eq!(view.direct_reports, vec!["Bob Adams", "Amy Smith"]);
}

#[test]
fn test_with_reports_dangling_reference_is_unknown() {
    let collection = Collection::from_records(vec![
        employee(1, "Jane Doe", date(2020, 1, 1)).with_direct_reports(vec![2, 99, 2]),
        employee(2, "Amy Smith", date(2020, 1, 1)),
    ])
    .unwrap();

    let view = collection.with_reports(1).unwrap();
    assert_eq!(view.direct_reports.len(), 3);
    assert_eq!(view.direct_reports, vec!["Amy Smith", UNKNOWN_REPORT, "Amy Smith"]);
}

#[test]
fn test_with_reports_includes_inactive_reports() {
    let collection = Collection::from_records(vec![
        employee(1, "Jane Doe", date(2020, 1, 1)).with_direct_reports(vec![2]),
        employee(2, "Amy Smith", date(2020, 1, 1)).with_active(false),
    ])
    .unwrap();

    assert_eq!(collection.with_reports(1).unwrap().direct_reports, vec!["Amy Smith"]);
}

#[test]
fn test_with_reports_missing_id() {
    let collection = Collection::new();
    assert!(collection.with_reports(1).is_none());
}

// =============================================================================
// Hire Range Tests
// =============================================================================

fn hire_fixture() -> Collection {
    Collection::from_records(vec![
        employee(1, "A One", date(2019, 3, 1)),
        employee(2, "B Two", date(2020, 6, 15)),
        employee(3, "C Three", date(2020, 6, 15)),
        employee(4, "D Four", date(2021, 12, 31)).with_active(false),
    ])
    .unwrap()
}

#[test]
fn test_hired_between_sorted_most_recent_first() {
    let hired = hire_fixture().hired_between(date(2019, 1, 1), date(2022, 1, 1));
    assert_eq!(ids(&hired), vec![4, 2, 3, 1]);
}

#[test]
fn test_hired_between_is_inclusive() {
    let collection = hire_fixture();

    assert_eq!(ids(&collection.hired_between(date(2019, 3, 1), date(2019, 3, 1))), vec![1]);
    assert_eq!(
        ids(&collection.hired_between(date(2019, 3, 1), date(2020, 6, 15))),
        vec![2, 3, 1]
    );
}

#[test]
fn test_hired_between_outside_all_dates_is_empty() {
    let collection = hire_fixture();

    assert!(collection.hired_between(date(2000, 1, 1), date(2019, 2, 28)).is_empty());
    assert!(collection.hired_between(date(2022, 1, 1), date(2030, 1, 1)).is_empty());
}

#[test]
fn test_hired_between_inverted_range_is_empty() {
    let collection = hire_fixture();
    assert!(collection.hired_between(date(2022, 1, 1), date(2019, 1, 1)).is_empty());
}
