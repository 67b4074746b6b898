//! Single-cell and family tests
//!
//! Writes land exactly where addressed; a missing table is rejected before
//! the store is touched.

use crate::*;

#[test]
fn test_put_get_roundtrip() {
    let (gateway, _) = create_gateway_with_table();

    gateway.put_cell("t1", "r1", "f", "q", "hello").unwrap();
    assert_eq!(
        gateway.get_cell("t1", "r1", "f", "q").unwrap().as_deref(),
        Some("hello")
    );
}

#[test]
fn test_put_overwrites_latest_value() {
    let (gateway, store) = create_gateway_with_table();

    gateway.put_cell("t1", "r1", "f", "q", "v1").unwrap();
    gateway.put_cell("t1", "r1", "f", "q", "v2").unwrap();

    assert_eq!(gateway.get_cell("t1", "r1", "f", "q").unwrap().as_deref(), Some("v2"));
    assert_eq!(store.total_cells(), 1);
}

#[test]
fn test_put_to_missing_table_does_not_mutate() {
    let (gateway, store) = create_gateway();

    let err = gateway.put_cell("ghost", "r1", "f", "q", "v").unwrap_err();
    assert!(matches!(err, Error::TableNotFound { ref table } if table == "ghost"));
    assert!(err.is_not_found());

    assert_eq!(store.table_count(), 0);
    assert_eq!(store.total_cells(), 0);
    assert!(!gateway.table_exists("ghost").unwrap());
}

#[test]
fn test_put_to_unknown_family() {
    let (gateway, store) = create_gateway_with_table();

    let err = gateway.put_cell("t1", "r1", "nope", "q", "v").unwrap_err();
    assert!(matches!(err, Error::FamilyNotFound { ref family, .. } if family == "nope"));
    assert_eq!(store.total_cells(), 0);
}

#[test]
fn test_empty_row_key_rejected() {
    let (gateway, store) = create_gateway_with_table();

    assert!(gateway.put_cell("t1", "", "f", "q", "v").unwrap_err().is_invalid_input());
    assert!(gateway.get_cell("t1", "", "f", "q").unwrap_err().is_invalid_input());
    assert_eq!(store.total_cells(), 0);
}

#[test]
fn test_get_absent_cell_is_none() {
    let (gateway, _) = create_gateway_with_table();
    gateway.put_cell("t1", "r1", "f", "q", "v").unwrap();

    assert_eq!(gateway.get_cell("t1", "r1", "f", "other").unwrap(), None);
    assert_eq!(gateway.get_cell("t1", "r2", "f", "q").unwrap(), None);
}

#[test]
fn test_get_from_missing_table_fails() {
    let (gateway, _) = create_gateway();

    assert!(gateway.get_cell("ghost", "r1", "f", "q").unwrap_err().is_not_found());
    assert!(gateway.get_family("ghost", "r1", "f").unwrap_err().is_not_found());
}

#[test]
fn test_get_family_returns_only_that_family() {
    let (gateway, _) = create_gateway();
    gateway.create_table("t1", "f,g").unwrap();

    gateway.put_cell("t1", "r1", "f", "a", "1").unwrap();
    gateway.put_cell("t1", "r1", "f", "b", "2").unwrap();
    gateway.put_cell("t1", "r1", "g", "c", "3").unwrap();

    let cells = gateway.get_family("t1", "r1", "f").unwrap();
    assert_eq!(cells.len(), 2);
    assert_eq!(cells["a"], "1");
    assert_eq!(cells["b"], "2");
    assert!(!cells.contains_key("c"));
}

#[test]
fn test_get_family_of_absent_row_is_empty() {
    let (gateway, _) = create_gateway_with_table();
    assert!(gateway.get_family("t1", "nobody", "f").unwrap().is_empty());
}

#[test]
fn test_unicode_values_roundtrip() {
    let (gateway, _) = create_gateway_with_table();

    gateway.put_cell("t1", "clé", "f", "名前", "値 ✓").unwrap();
    assert_eq!(
        gateway.get_cell("t1", "clé", "f", "名前").unwrap().as_deref(),
        Some("値 ✓")
    );
}

#[test]
fn test_separator_characters_in_qualifier() {
    let (gateway, _) = create_gateway_with_table();

    gateway.put_cell("t1", "r1", "f", "a:b,c", "v").unwrap();
    assert_eq!(gateway.get_cell("t1", "r1", "f", "a:b,c").unwrap().as_deref(), Some("v"));
    assert_eq!(gateway.get_family("t1", "r1", "f").unwrap()["a:b,c"], "v");
}
