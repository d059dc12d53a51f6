//! Variant records and the collection that owns them
//!
//! A [`RecordCollection`] is a plain vector plus two pieces of metadata:
//! whether the vector is currently sorted by identifier, and how many
//! records have ever been appended to it.

use serde::Serialize;

/// A single variant entry from a genotype file
///
/// Fields are stored verbatim; the identifier is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Record {
    /// Variant identifier, conventionally `rs` followed by digits
    #[serde(rename = "rsid")]
    pub identifier: String,
    /// Chromosome label
    pub chromosome: String,
    /// Position on the chromosome (0 when the source field was unparseable)
    pub position: i64,
    pub allele1: String,
    pub allele2: String,
}

impl Record {
    /// Create a new record
    pub fn new(
        identifier: impl Into<String>,
        chromosome: impl Into<String>,
        position: i64,
        allele1: impl Into<String>,
        allele2: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            chromosome: chromosome.into(),
            position,
            allele1: allele1.into(),
            allele2: allele2.into(),
        }
    }
}

/// In-memory holder of all loaded records
///
/// Sortedness is tracked explicitly: appending always clears the flag,
/// and only [`RecordCollection::sort`] / [`RecordCollection::ensure_sorted`]
/// set it. Binary search over `records` is only valid while the flag is set.
#[derive(Debug, Clone, Default)]
pub struct RecordCollection {
    records: Vec<Record>,
    is_sorted: bool,
    total_loaded: usize,
}

impl RecordCollection {
    /// Create a new empty (unsorted) collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, invalidating sortedness unconditionally
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
        self.is_sorted = false;
        self.total_loaded += 1;
    }

    /// Sort records by identifier (byte-wise lexicographic order)
    ///
    /// No-op when the collection is already sorted.
    pub fn sort(&mut self) {
        if !self.is_sorted {
            self.records.sort_by(|a, b| a.identifier.cmp(&b.identifier));
            self.is_sorted = true;
        }
    }

    /// Make the collection searchable
    ///
    /// Returns `true` if a sort pass was actually performed.
    pub fn ensure_sorted(&mut self) -> bool {
        if self.is_sorted {
            return false;
        }
        self.sort();
        true
    }

    /// Whether the records are currently in identifier order
    pub fn is_sorted(&self) -> bool {
        self.is_sorted
    }

    /// Number of records ever appended
    pub fn total_loaded(&self) -> usize {
        self.total_loaded
    }

    /// Records in their current order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over identifiers in their current order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.identifier.as_str())
    }
}

impl Extend<Record> for RecordCollection {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

impl FromIterator<Record> for RecordCollection {
    /// Collect records in insertion order; the result is unsorted
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}
