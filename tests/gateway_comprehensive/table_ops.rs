//! Table lifecycle tests
//!
//! Creation is idempotent, drop disables before deleting, and both report
//! whether they changed anything.

use crate::*;

#[test]
fn test_create_table_reports_creation() {
    let (gateway, store) = create_gateway();

    assert!(gateway.create_table("events", "d").unwrap());
    assert!(gateway.table_exists("events").unwrap());
    assert_eq!(store.table_count(), 1);
}

#[test]
fn test_create_existing_table_is_noop() {
    let (gateway, store) = create_gateway_with_table();
    gateway.put_cell("t1", "r1", "f", "q", "v").unwrap();

    // Different families do not alter the existing schema
    assert!(!gateway.create_table("t1", "other").unwrap());
    assert_eq!(store.table_count(), 1);
    assert_eq!(gateway.get_cell("t1", "r1", "f", "q").unwrap().as_deref(), Some("v"));
    assert!(gateway.put_cell("t1", "r1", "other", "q", "v").is_err());
}

#[test]
fn test_create_table_with_several_families() {
    let (gateway, _) = create_gateway();
    gateway.create_table("users", "info, stats").unwrap();

    gateway.put_cell("users", "u1", "info", "name", "Alice").unwrap();
    gateway.put_cell("users", "u1", "stats", "logins", "3").unwrap();
    assert_eq!(gateway.get_row("users", "u1").unwrap().len(), 2);
}

#[test]
fn test_create_table_rejects_bad_input() {
    let (gateway, store) = create_gateway();

    for (name, families) in [("", "f"), ("bad name", "f"), ("-t", "f"), ("t", ""), ("t", "a,,b"), ("t", "a,a")] {
        let err = gateway.create_table(name, families).unwrap_err();
        assert!(err.is_invalid_input(), "{:?}/{:?}: {:?}", name, families, err);
    }
    assert_eq!(store.table_count(), 0);
}

#[test]
fn test_namespaced_table() {
    let (gateway, _) = create_gateway();
    assert!(gateway.create_table("metrics:cpu", "d").unwrap());
    assert!(gateway.table_exists("metrics:cpu").unwrap());
    assert!(!gateway.table_exists("cpu").unwrap());
}

#[test]
fn test_drop_table_removes_data() {
    let (gateway, store) = create_gateway_with_table();
    gateway.put_cell("t1", "r1", "f", "q", "v").unwrap();

    assert!(gateway.drop_table("t1").unwrap());
    assert!(!gateway.table_exists("t1").unwrap());
    assert_eq!(store.table_count(), 0);
    assert_eq!(store.total_cells(), 0);
}

#[test]
fn test_list_tables_sorted() {
    let (gateway, _) = create_gateway();
    assert!(gateway.list_tables().unwrap().is_empty());

    gateway.create_table("users", "info").unwrap();
    gateway.create_table("metrics:cpu", "d").unwrap();
    gateway.create_table("events", "d").unwrap();
    assert_eq!(
        gateway.list_tables().unwrap(),
        vec!["events", "metrics:cpu", "users"]
    );

    gateway.drop_table("users").unwrap();
    assert_eq!(gateway.list_tables().unwrap(), vec!["events", "metrics:cpu"]);
}

#[test]
fn test_drop_missing_table_is_noop() {
    let (gateway, store) = create_gateway();
    assert!(!gateway.drop_table("ghost").unwrap());
    assert_eq!(store.table_count(), 0);
}

#[test]
fn test_drop_then_recreate_starts_empty() {
    let (gateway, _) = create_gateway_with_table();
    gateway.put_cell("t1", "r1", "f", "q", "v").unwrap();

    gateway.drop_table("t1").unwrap();
    assert!(gateway.create_table("t1", "f").unwrap());
    assert_eq!(gateway.get_cell("t1", "r1", "f", "q").unwrap(), None);
}

#[test]
fn test_operations_after_drop_fail_with_not_found() {
    let (gateway, _) = create_gateway_with_table();
    gateway.drop_table("t1").unwrap();

    let err = gateway.put_cell("t1", "r1", "f", "q", "v").unwrap_err();
    assert!(matches!(err, Error::TableNotFound { ref table } if table == "t1"));
}
