//! Property-based tests for exact, batch and prefix lookups
//!
//! **Feature: fast-rsid, Property 2: binary search lookups**

use fast_rsid::core::{
    find_exact, find_many, find_prefix, normalize_identifier, Record, RecordCollection,
};
use proptest::prelude::*;

/// Generate identifiers with shared prefixes so prefix scans have work to do
fn arb_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            (1u32..2000).prop_map(|n| format!("rs{}", n)),
            (1u32..500).prop_map(|n| format!("i{}", n)),
        ],
        0..120,
    )
}

/// Like `arb_ids`, with some upper-case identifiers mixed in
fn arb_mixed_case_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            (1u32..2000).prop_map(|n| format!("rs{}", n)),
            (1u32..2000).prop_map(|n| format!("RS{}", n)),
            (1u32..500).prop_map(|n| format!("i{}", n)),
        ],
        0..120,
    )
}

fn collection_of(ids: &[String]) -> RecordCollection {
    ids.iter()
        .enumerate()
        .map(|(i, id)| Record::new(id.clone(), "1", i as i64, "A", "C"))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// **Property 2a: sort idempotence and repeated lookups**
    #[test]
    fn prop_find_exact_idempotent(ids in arb_mixed_case_ids(), probe in 1u32..2000) {
        let mut collection = collection_of(&ids);
        let probe = probe.to_string();

        let first = find_exact(&mut collection, &probe).cloned();
        prop_assert!(collection.is_sorted());
        let snapshot = collection.records().to_vec();

        let second = find_exact(&mut collection, &probe).cloned();
        prop_assert_eq!(first, second);
        prop_assert!(collection.is_sorted());
        prop_assert_eq!(collection.records(), snapshot.as_slice());
    }

    /// **Property 2b: identifiers non-decreasing after sort**
    #[test]
    fn prop_sorted_non_decreasing(ids in arb_mixed_case_ids()) {
        let mut collection = collection_of(&ids);
        collection.sort();
        let sorted: Vec<&str> = collection.identifiers().collect();
        prop_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(collection.total_loaded(), ids.len());
    }

    /// **Property 2c: exact lookup agrees with a linear scan**
    #[test]
    fn prop_find_exact_matches_linear_scan(ids in arb_mixed_case_ids(), probe in "(rs|RS|i)?[0-9]{1,4}") {
        let mut collection = collection_of(&ids);
        let target = normalize_identifier(&probe).into_owned();
        let expected = ids.iter().any(|id| *id == target);

        let found = find_exact(&mut collection, &probe).map(|r| r.identifier.clone());
        prop_assert_eq!(found.is_some(), expected);
        if let Some(found) = found {
            prop_assert_eq!(found, target);
        }
    }

    /// **Property 2d: batch lookup = exact lookups in input order, duplicates kept**
    #[test]
    fn prop_find_many_order_and_duplicates(
        ids in arb_mixed_case_ids(),
        queries in prop::collection::vec("(rs)?[0-9]{1,4}", 0..30),
    ) {
        let mut collection = collection_of(&ids);
        let mut doubled = queries.clone();
        doubled.extend(queries.iter().cloned());

        let expected: Vec<Record> = doubled
            .iter()
            .filter_map(|q| find_exact(&mut collection, q).cloned())
            .collect();
        let found = find_many(&mut collection, &doubled);
        prop_assert_eq!(found, expected);
    }

    /// **Property 2e: prefix results bounded, matching, and complete up to limit**
    ///
    /// Completeness relies on byte order agreeing with lower-case order,
    /// which holds for lower-case identifiers.
    #[test]
    fn prop_find_prefix_bounded(
        ids in arb_ids(),
        prefix in "(rs|RS|r|i)?[0-9]{0,2}",
        limit in 0usize..20,
    ) {
        let mut collection = collection_of(&ids);
        let matches = find_prefix(&mut collection, &prefix, limit);
        let lower_prefix = prefix.to_lowercase();

        prop_assert!(matches.len() <= limit);
        for m in &matches {
            prop_assert!(m.to_lowercase().starts_with(&lower_prefix));
        }

        // Fewer than the limit only when fewer exist
        let available = ids.iter().filter(|id| id.to_lowercase().starts_with(&lower_prefix)).count();
        if matches.len() < limit {
            prop_assert_eq!(matches.len(), available);
        }
    }
}

#[test]
fn test_prefix_example() {
    let ids: Vec<String> = ["rs1", "rs10", "rs100", "rs2"].iter().map(|s| s.to_string()).collect();
    let mut collection = collection_of(&ids);
    collection.sort();
    assert_eq!(find_prefix(&mut collection, "rs1", 2), vec!["rs1", "rs10"]);
}

#[test]
fn test_batch_example() {
    let mut collection = collection_of(&["rs123".to_string()]);
    let found = find_many(&mut collection, &["123", "999"]);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].identifier, "rs123");
}
