//! Core lookup functionality
//!
//! This module contains the record model, the raw-data file parser,
//! the binary-search lookups and the shared active dataset.

mod dataset;
mod error;
pub mod io;
mod parser;
mod record;
mod search;

pub use dataset::{ActiveDataset, DatasetStats, Lookup};
pub use error::{FastRsidError, ParseError, ParseResult};
pub use io::{
    open_input, ByteLineIterator, CompressionFormat, IoStrategy, SmartReader, DEFAULT_BUFFER_SIZE,
    LARGE_BUFFER_SIZE, MMAP_THRESHOLD,
};
pub use parser::{
    parse, parse_file, parse_line, parse_str, parse_with_cancel, parse_with_stats, split_fields,
    ParseStats, CANCEL_CHECK_INTERVAL, FIELD_COUNT,
};
pub use record::{Record, RecordCollection};
pub use search::{
    find_exact, find_many, find_prefix, normalize_identifier, search_exact, search_many,
    search_prefix, DEFAULT_PREFIX_LIMIT, RSID_PREFIX,
};
