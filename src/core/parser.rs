//! Genotype raw-data file parsing
//!
//! Parses the five-column text exports produced by consumer genotyping
//! services into a sorted [`RecordCollection`].
//!
//! # File Format
//!
//! ```text
//! # optional comment/header lines
//! # rsid	chromosome	position	genotype
//! rs4477212	1	82154	A	A
//! rs3094315	1	752566	A	G
//! ```
//!
//! - Leading lines starting with `#` are skipped
//! - Data lines are tab-separated; whitespace-separated lines are accepted too
//! - Lines without exactly five fields are dropped
//! - An unparseable position becomes 0

use crate::core::error::{ParseError, ParseResult};
use crate::core::io::{open_input, ByteLineIterator, IoStrategy};
use crate::core::record::{Record, RecordCollection};
use memchr::memchr_iter;
use std::borrow::Cow;
use std::io::BufRead;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Number of fields in a data line
pub const FIELD_COUNT: usize = 5;

/// Lines read between checks of the cancellation flag
pub const CANCEL_CHECK_INTERVAL: usize = 4096;

/// Counters collected while parsing
///
/// Informational only; they never change what gets loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Leading `#` lines skipped before data began
    pub header_lines: usize,
    /// Lines considered as data
    pub data_lines: usize,
    /// Records appended to the collection
    pub loaded: usize,
    /// Data lines dropped for not having five fields
    pub skipped: usize,
    /// Records whose position field could not be parsed
    pub bad_positions: usize,
}

/// Split a data line into its five fields
///
/// Tab splitting is tried first; whitespace splitting is the fallback.
/// Returns `None` if neither produces exactly five fields.
pub fn split_fields(line: &str) -> Option<[&str; FIELD_COUNT]> {
    // Four tabs means exactly five tab-separated fields
    if memchr_iter(b'\t', line.as_bytes()).count() == FIELD_COUNT - 1 {
        return collect_fields(line.split('\t'));
    }
    collect_fields(line.split_whitespace())
}

fn collect_fields<'a>(mut iter: impl Iterator<Item = &'a str>) -> Option<[&'a str; FIELD_COUNT]> {
    let mut fields = [""; FIELD_COUNT];
    for slot in fields.iter_mut() {
        *slot = iter.next()?;
    }
    if iter.next().is_some() {
        return None;
    }
    Some(fields)
}

/// Parse one data line into a record
///
/// The second value reports whether the position had to default to 0.
pub fn parse_line(line: &str) -> Option<(Record, bool)> {
    let [identifier, chromosome, position, allele1, allele2] = split_fields(line)?;
    let (position, bad_position) = match position.parse::<i64>() {
        Ok(p) => (p, false),
        Err(_) => (0, true),
    };
    Some((
        Record::new(identifier, chromosome, position, allele1, allele2),
        bad_position,
    ))
}

/// Parse records from a reader, returning parse counters as well
///
/// This function handles the core parsing logic, supporting any `BufRead` source.
pub fn parse_with_stats<R: BufRead>(reader: R) -> ParseResult<(RecordCollection, ParseStats)> {
    parse_with_cancel(reader, &AtomicBool::new(false))
}

/// Like [`parse_with_stats`], but gives up once `cancel` is set
///
/// The flag is checked before the first line and then every
/// [`CANCEL_CHECK_INTERVAL`] lines. A cancelled parse returns
/// [`ParseError::Cancelled`] and the partial collection is dropped.
pub fn parse_with_cancel<R: BufRead>(
    reader: R,
    cancel: &AtomicBool,
) -> ParseResult<(RecordCollection, ParseStats)> {
    let mut collection = RecordCollection::new();
    let mut stats = ParseStats::default();
    let mut lines = ByteLineIterator::new(reader);
    let mut in_header = true;
    let mut line_count = 0usize;

    while let Some(line) = lines.next_line() {
        if line_count % CANCEL_CHECK_INTERVAL == 0 && cancel.load(Ordering::Relaxed) {
            log::info!("Parse cancelled after {} line(s)", line_count);
            return Err(ParseError::Cancelled(line_count));
        }
        line_count += 1;

        let line = String::from_utf8_lossy(line?);

        if in_header {
            if line.starts_with('#') {
                stats.header_lines += 1;
                continue;
            }
            in_header = false;
        }

        stats.data_lines += 1;
        match parse_line(&line) {
            Some((record, bad_position)) => {
                if bad_position {
                    stats.bad_positions += 1;
                }
                collection.push(record);
                stats.loaded += 1;
            }
            None => {
                stats.skipped += 1;
                log::trace!("Skipping malformed line {}: {:?}", stats.header_lines + stats.data_lines, truncate(&line));
            }
        }
    }

    collection.sort();

    if stats.skipped > 0 {
        log::debug!("Skipped {} malformed line(s)", stats.skipped);
    }
    if stats.bad_positions > 0 {
        log::debug!("{} record(s) had an unparseable position", stats.bad_positions);
    }
    log::info!("Loaded {} records", collection.total_loaded());

    Ok((collection, stats))
}

fn truncate(line: &str) -> Cow<'_, str> {
    if line.chars().count() <= 100 {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(line.chars().take(100).collect())
    }
}

/// Parse records from a reader into a sorted collection
pub fn parse<R: BufRead>(reader: R) -> ParseResult<RecordCollection> {
    parse_with_stats(reader).map(|(collection, _)| collection)
}

/// Parse records from a string
pub fn parse_str(content: &str) -> ParseResult<RecordCollection> {
    parse(content.as_bytes())
}

/// Parse a record file from a path
///
/// Automatically detects and handles compression:
/// - .gz extension or gzip magic bytes (1f 8b)
/// - .bz2 extension or bzip2 magic bytes (42 5a 68)
/// - Plain text otherwise
pub fn parse_file<P: AsRef<Path>>(path: P, strategy: IoStrategy) -> ParseResult<(RecordCollection, ParseStats)> {
    let path = path.as_ref();
    let reader = open_input(path, strategy).map_err(|e| ParseError::from_open(e, path))?;
    parse_with_stats(reader)
}
