//! FastRsid - Fast rsID lookup over genotype raw data files
//!
//! Loads the five-column text exports of consumer genotyping services
//! into a sorted in-memory collection and answers exact, batch and
//! prefix lookups by rsID.
//!
//! # Features
//!
//! - Binary search over a single sorted array
//! - Tolerant parsing: malformed lines are skipped, never fatal
//! - Transparent gzip/bzip2 input and memory mapping for large files
//! - Parallel batch lookups with rayon
//!
//! # Example
//!
//! ```ignore
//! use fast_rsid::{parse_file, find_exact, find_prefix, IoStrategy};
//!
//! // Load a raw data file
//! let (mut collection, _stats) = parse_file("genome.txt", IoStrategy::Auto)?;
//!
//! // Exact lookup ("rs" prefix is optional)
//! let record = find_exact(&mut collection, "4477212");
//!
//! // Live search
//! let ids = find_prefix(&mut collection, "rs44", 10);
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use core::{
    find_exact, find_many, find_prefix, normalize_identifier, parse, parse_file, parse_str,
    ActiveDataset, FastRsidError, IoStrategy, Lookup, ParseError, ParseStats, Record,
    RecordCollection, DEFAULT_PREFIX_LIMIT,
};
pub use formats::Response;
