//! Whole-row read tests

use std::collections::BTreeSet;

use crate::*;

fn populate(gateway: &Gateway) {
    gateway.create_table("t1", "f,g").unwrap();
    gateway.put_cell("t1", "r1", "g", "z", "last").unwrap();
    gateway.put_cell("t1", "r1", "f", "b", "2").unwrap();
    gateway.put_cell("t1", "r1", "f", "a", "1").unwrap();
    gateway.put_cell("t1", "r2", "f", "a", "other-row").unwrap();
}

#[test]
fn test_get_row_is_ordered_by_family_then_qualifier() {
    let (gateway, _) = create_gateway();
    populate(&gateway);

    let cells = gateway.get_row("t1", "r1").unwrap();
    let order: Vec<(&str, &str)> = cells
        .iter()
        .map(|c| (c.family.as_str(), c.qualifier.as_str()))
        .collect();
    assert_eq!(order, vec![("f", "a"), ("f", "b"), ("g", "z")]);
    assert_eq!(cells[2].value, "last");
}

#[test]
fn test_get_row_delimited() {
    let (gateway, _) = create_gateway();
    populate(&gateway);

    let lines: BTreeSet<String> = gateway
        .get_row_delimited("t1", "r1")
        .unwrap()
        .into_iter()
        .collect();
    let expected: BTreeSet<String> = ["a&&&1", "b&&&2", "z&&&last"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(lines, expected);
}

#[test]
fn test_delimited_matches_structured_row() {
    let (gateway, _) = create_gateway();
    populate(&gateway);

    let structured: Vec<String> = gateway
        .get_row("t1", "r1")
        .unwrap()
        .iter()
        .map(RowCell::to_delimited)
        .collect();
    assert_eq!(gateway.get_row_delimited("t1", "r1").unwrap(), structured);
}

#[test]
fn test_get_absent_row_is_empty() {
    let (gateway, _) = create_gateway();
    populate(&gateway);

    assert!(gateway.get_row("t1", "r9").unwrap().is_empty());
    assert!(gateway.get_row_delimited("t1", "r9").unwrap().is_empty());
}

#[test]
fn test_get_row_from_missing_table() {
    let (gateway, _) = create_gateway();
    let err = gateway.get_row("ghost", "r1").unwrap_err();
    assert!(matches!(err, Error::TableNotFound { .. }));
}
