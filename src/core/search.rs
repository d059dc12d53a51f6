//! Identifier lookups over a sorted record collection
//!
//! Every lookup is a binary search followed by at most a short forward
//! scan. Lookups come in two flavours:
//!
//! - `search_*` take `&RecordCollection` and require the collection to be
//!   sorted already (see [`RecordCollection::ensure_sorted`]).
//! - `find_*` take `&mut RecordCollection`, sort it if needed, then search.
//!   The lazy sort is the only mutation a lookup can cause.

use crate::core::record::{Record, RecordCollection};
use rayon::prelude::*;
use std::borrow::Cow;

/// Conventional identifier prefix
pub const RSID_PREFIX: &str = "rs";

/// Default number of identifiers returned by a live prefix search
pub const DEFAULT_PREFIX_LIMIT: usize = 10;

/// Add the `rs` prefix unless the identifier already has one
///
/// Prefix detection is case-insensitive (`RS12` is left alone);
/// the identifier is otherwise returned unchanged.
pub fn normalize_identifier(identifier: &str) -> Cow<'_, str> {
    let has_prefix = identifier
        .get(..RSID_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(RSID_PREFIX));
    if has_prefix {
        Cow::Borrowed(identifier)
    } else {
        Cow::Owned(format!("{}{}", RSID_PREFIX, identifier))
    }
}

/// Exact lookup on an already-sorted collection
///
/// `identifier` is compared as given (no normalization, case-sensitive).
pub fn search_exact<'a>(collection: &'a RecordCollection, identifier: &str) -> Option<&'a Record> {
    debug_assert!(collection.is_sorted(), "search_exact on unsorted collection");
    let records = collection.records();
    let idx = records.partition_point(|r| r.identifier.as_str() < identifier);

    // Must match exactly, not merely share a prefix
    records.get(idx).filter(|r| r.identifier == identifier)
}

/// Batch lookup on an already-sorted collection
///
/// Each identifier is normalized and looked up independently. Found
/// records are returned in input order; misses are simply absent.
pub fn search_many<S: AsRef<str> + Sync>(collection: &RecordCollection, identifiers: &[S]) -> Vec<Record> {
    debug_assert!(collection.is_sorted(), "search_many on unsorted collection");
    identifiers
        .par_iter()
        .filter_map(|id| {
            let id = normalize_identifier(id.as_ref());
            search_exact(collection, &id).cloned()
        })
        .collect()
}

/// Case-insensitive prefix lookup on an already-sorted collection
///
/// Returns up to `limit` original-case identifiers that start with
/// `prefix` once both are lowercased.
pub fn search_prefix(collection: &RecordCollection, prefix: &str, limit: usize) -> Vec<String> {
    debug_assert!(collection.is_sorted(), "search_prefix on unsorted collection");
    if limit == 0 {
        return Vec::new();
    }

    let lower_prefix = prefix.to_lowercase();
    let records = collection.records();
    let mut idx = records.partition_point(|r| r.identifier.to_lowercase() < lower_prefix);
    let mut matches = Vec::with_capacity(limit.min(DEFAULT_PREFIX_LIMIT));

    while idx < records.len() && matches.len() < limit {
        let identifier = &records[idx].identifier;
        let lower = identifier.to_lowercase();
        if lower.starts_with(&lower_prefix) {
            matches.push(identifier.clone());
        } else if lower > lower_prefix {
            // Sorted order: nothing further can match
            break;
        }
        idx += 1;
    }

    matches
}

/// Exact lookup, normalizing the identifier and sorting if needed
pub fn find_exact<'a>(collection: &'a mut RecordCollection, identifier: &str) -> Option<&'a Record> {
    collection.ensure_sorted();
    let identifier = normalize_identifier(identifier);
    search_exact(collection, &identifier)
}

/// Batch lookup, sorting if needed
pub fn find_many<S: AsRef<str> + Sync>(collection: &mut RecordCollection, identifiers: &[S]) -> Vec<Record> {
    collection.ensure_sorted();
    search_many(collection, identifiers)
}

/// Prefix lookup, sorting if needed
pub fn find_prefix(collection: &mut RecordCollection, prefix: &str, limit: usize) -> Vec<String> {
    collection.ensure_sorted();
    search_prefix(collection, prefix, limit)
}
