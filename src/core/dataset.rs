//! The single active dataset shared by every query
//!
//! Loads replace the collection wholesale under the write lock. Queries
//! run under the read lock; a query that finds the collection unsorted
//! upgrades to the write lock to sort it, so no reader can observe a
//! half-sorted collection.
//!
//! Loads are serialized by a separate mutex held from the start of the
//! parse until the swap. Queries keep running against the previous
//! collection while a parse is in progress, and the dataset always ends up
//! holding the result of the load that finished last.

use crate::core::error::ParseResult;
use crate::core::io::IoStrategy;
use crate::core::parser::{parse_file, parse_with_cancel, parse_with_stats, ParseStats};
use crate::core::record::{Record, RecordCollection};
use crate::core::search::{normalize_identifier, search_exact, search_many, search_prefix};
use std::io::BufRead;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Outcome of an exact lookup against the active dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// No dataset has been loaded yet
    NoData,
    /// A dataset is loaded but has no match
    NotFound,
    /// The match
    Found(T),
}

impl<T> Lookup<T> {
    /// Convert to `Option`, collapsing `NoData` and `NotFound`
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// Summary of the active dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetStats {
    pub total_loaded: usize,
    pub is_sorted: bool,
}

/// Process-wide holder of the current record collection
///
/// Results are returned by value, so they stay valid after the dataset
/// is replaced.
#[derive(Debug, Default)]
pub struct ActiveDataset {
    inner: RwLock<Option<RecordCollection>>,
    load_lock: Mutex<()>,
}

impl ActiveDataset {
    /// Create a holder with no dataset loaded
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking reader never leaves the collection half-written, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Option<RecordCollection>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<RecordCollection>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    // Guards no data; a load that panicked simply never swapped.
    fn lock_loads(&self) -> MutexGuard<'_, ()> {
        self.load_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the active dataset, returning the previous one
    pub fn replace(&self, collection: RecordCollection) -> Option<RecordCollection> {
        log::info!(
            "Replacing active dataset ({} records)",
            collection.total_loaded()
        );
        self.write().replace(collection)
    }

    /// Drop the active dataset
    pub fn clear(&self) -> Option<RecordCollection> {
        self.write().take()
    }

    /// Parse a reader and make the result the active dataset
    ///
    /// On error the previous dataset stays active.
    pub fn load_reader<R: BufRead>(&self, reader: R) -> ParseResult<ParseStats> {
        let _loading = self.lock_loads();
        let (collection, stats) = parse_with_stats(reader)?;
        self.replace(collection);
        Ok(stats)
    }

    /// Like [`ActiveDataset::load_reader`], abandoning the parse once `cancel` is set
    ///
    /// A cancelled load returns [`ParseError::Cancelled`](crate::core::ParseError::Cancelled)
    /// and leaves the previous dataset active.
    pub fn load_reader_with_cancel<R: BufRead>(&self, reader: R, cancel: &AtomicBool) -> ParseResult<ParseStats> {
        let _loading = self.lock_loads();
        let (collection, stats) = parse_with_cancel(reader, cancel)?;
        self.replace(collection);
        Ok(stats)
    }

    /// Parse a file and make the result the active dataset
    ///
    /// On error the previous dataset stays active.
    pub fn load_file<P: AsRef<Path>>(&self, path: P, strategy: IoStrategy) -> ParseResult<ParseStats> {
        let _loading = self.lock_loads();
        let (collection, stats) = parse_file(path, strategy)?;
        self.replace(collection);
        Ok(stats)
    }

    /// Whether any dataset has been loaded
    pub fn is_loaded(&self) -> bool {
        self.read().is_some()
    }

    /// Statistics for the active dataset, if any
    pub fn stats(&self) -> Option<DatasetStats> {
        self.read().as_ref().map(|c| DatasetStats {
            total_loaded: c.total_loaded(),
            is_sorted: c.is_sorted(),
        })
    }

    /// Run `f` against the sorted active dataset
    ///
    /// Returns `None` when nothing is loaded.
    pub fn with_sorted<R>(&self, f: impl FnOnce(&RecordCollection) -> R) -> Option<R> {
        {
            let guard = self.read();
            match guard.as_ref() {
                None => return None,
                Some(c) if c.is_sorted() => return Some(f(c)),
                Some(_) => {}
            }
        }

        let mut guard = self.write();
        let collection = guard.as_mut()?;
        if collection.ensure_sorted() {
            log::debug!("Sorted active dataset on first lookup");
        }
        Some(f(collection))
    }

    /// Exact lookup by identifier (normalized with the `rs` prefix)
    pub fn find_exact(&self, identifier: &str) -> Lookup<Record> {
        let identifier = normalize_identifier(identifier);
        match self.with_sorted(|c| search_exact(c, &identifier).cloned()) {
            None => Lookup::NoData,
            Some(None) => Lookup::NotFound,
            Some(Some(record)) => Lookup::Found(record),
        }
    }

    /// Batch lookup; `None` when nothing is loaded
    pub fn find_many<S: AsRef<str> + Sync>(&self, identifiers: &[S]) -> Option<Vec<Record>> {
        self.with_sorted(|c| search_many(c, identifiers))
    }

    /// Prefix lookup; `None` when nothing is loaded
    pub fn find_prefix(&self, prefix: &str, limit: usize) -> Option<Vec<String>> {
        self.with_sorted(|c| search_prefix(c, prefix, limit))
    }
}
