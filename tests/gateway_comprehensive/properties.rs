//! Property tests

use proptest::prelude::*;

use crate::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_put_get_roundtrip(
        row in "[a-zA-Z0-9_-]{1,32}",
        qualifier in "\\PC{1,16}",
        value in "\\PC{0,64}",
    ) {
        let (gateway, _) = create_gateway_with_table();

        gateway.put_cell("t1", &row, "f", &qualifier, &value).unwrap();
        prop_assert_eq!(gateway.get_cell("t1", &row, "f", &qualifier).unwrap(), Some(value.clone()));
        let family = gateway.get_family("t1", &row, "f").unwrap();
        prop_assert_eq!(family.get(&qualifier), Some(&value));
    }

    #[test]
    fn prop_scan_never_exceeds_bound(
        keys in prop::collection::btree_set("[a-c]{1,4}", 0..20),
        bound in 1usize..8,
    ) {
        let (gateway, _) = create_bounded_gateway(bound);
        gateway.create_table("t1", "f").unwrap();
        for key in &keys {
            gateway.put_cell("t1", key, "f", "q", "v").unwrap();
        }

        let summary = gateway.scan_rows_matching("t1", "f", "^a").unwrap();
        let matching = keys.iter().filter(|k| k.starts_with('a')).count();

        prop_assert_eq!(summary.count, matching.min(bound));
        prop_assert_eq!(summary.truncated, matching > bound);
        prop_assert_eq!(summary.count, summary.row_keys.len());
    }
}
