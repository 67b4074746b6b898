//! Filtered scan tests
//!
//! Row keys are matched with regex search semantics, only rows holding the
//! requested family count, and results stop at the configured bound.

use crate::*;

fn populate(gateway: &Gateway, keys: &[&str]) {
    gateway.create_table("t1", "f,g").unwrap();
    for key in keys {
        gateway.put_cell("t1", key, "f", "q", "v").unwrap();
    }
}

#[test]
fn test_scan_counts_matching_rows() {
    let (gateway, _) = create_gateway();
    populate(&gateway, &["112213", "999"]);

    let summary = gateway.scan_rows_matching("t1", "f", "112213.*").unwrap();
    assert_eq!(summary.count, 1);
    assert_eq!(summary.row_keys, vec!["112213".to_string()]);
    assert!(!summary.truncated);
}

#[test]
fn test_scan_returns_keys_in_order() {
    let (gateway, _) = create_gateway();
    populate(&gateway, &["112213-c", "112213-a", "000", "112213-b"]);

    let summary = gateway.scan_rows_matching("t1", "f", "^112213").unwrap();
    assert_eq!(summary.row_keys, vec!["112213-a", "112213-b", "112213-c"]);
    assert_eq!(summary.count, summary.row_keys.len());
}

#[test]
fn test_scan_uses_search_semantics() {
    let (gateway, _) = create_gateway();
    populate(&gateway, &["a-112213-z", "112213", "zzz"]);

    let summary = gateway.scan_rows_matching("t1", "f", "112213").unwrap();
    assert_eq!(summary.count, 2);
}

#[test]
fn test_scan_skips_rows_without_family() {
    let (gateway, _) = create_gateway();
    populate(&gateway, &["r1"]);
    gateway.put_cell("t1", "r2", "g", "q", "v").unwrap();

    let summary = gateway.scan_rows_matching("t1", "f", "^r").unwrap();
    assert_eq!(summary.row_keys, vec!["r1"]);

    let summary = gateway.scan_rows_matching("t1", "g", "^r").unwrap();
    assert_eq!(summary.row_keys, vec!["r2"]);
}

#[test]
fn test_scan_empty_table() {
    let (gateway, _) = create_gateway();
    populate(&gateway, &[]);

    let summary = gateway.scan_rows_matching("t1", "f", ".*").unwrap();
    assert_eq!(summary, ScanSummary::default());
}

#[test]
fn test_scan_stops_at_bound() {
    let (gateway, _) = create_bounded_gateway(3);
    populate(&gateway, &["k1", "k2", "k3", "k4", "k5"]);

    let summary = gateway.scan_rows_matching("t1", "f", "^k").unwrap();
    assert_eq!(summary.count, 3);
    assert_eq!(summary.row_keys, vec!["k1", "k2", "k3"]);
    assert!(summary.truncated);
}

#[test]
fn test_scan_exactly_at_bound_is_not_truncated() {
    let (gateway, _) = create_bounded_gateway(3);
    populate(&gateway, &["k1", "k2", "k3"]);

    let summary = gateway.scan_rows_matching("t1", "f", "^k").unwrap();
    assert_eq!(summary.count, 3);
    assert!(!summary.truncated);
}

#[test]
fn test_scan_with_explicit_options() {
    let (gateway, _) = create_gateway();
    populate(&gateway, &["k1", "k2", "k3"]);

    let summary = gateway
        .scan_rows_matching_with("t1", "f", "^k", ScanOptions::with_max_rows(1))
        .unwrap();
    assert_eq!(summary.row_keys, vec!["k1"]);
    assert!(summary.truncated);

    let err = gateway
        .scan_rows_matching_with("t1", "f", "^k", ScanOptions::with_max_rows(0))
        .unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_scan_invalid_pattern() {
    let (gateway, store) = create_gateway();
    populate(&gateway, &["k1"]);

    let err = gateway.scan_rows_matching("t1", "f", "(unclosed").unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(store.open_handles(), 0);
}

#[test]
fn test_scan_missing_table_and_family() {
    let (gateway, _) = create_gateway();
    populate(&gateway, &["k1"]);

    assert!(matches!(
        gateway.scan_rows_matching("ghost", "f", ".*").unwrap_err(),
        Error::TableNotFound { .. }
    ));
    assert!(matches!(
        gateway.scan_rows_matching("t1", "nope", ".*").unwrap_err(),
        Error::FamilyNotFound { .. }
    ));
}

#[test]
fn test_handles_released_after_every_path() {
    let (gateway, store) = create_gateway();
    populate(&gateway, &["k1", "k2"]);

    let _ = gateway.scan_rows_matching("t1", "f", ".*");
    let _ = gateway.scan_rows_matching("t1", "nope", ".*");
    let _ = gateway.get_row("t1", "k1");
    let _ = gateway.get_cell("ghost", "k1", "f", "q");
    let _ = gateway.put_cell("t1", "k1", "nope", "q", "v");

    assert_eq!(store.open_handles(), 0);
}
