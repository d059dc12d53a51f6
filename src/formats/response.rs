//! JSON responses for lookups
//!
//! Field names and messages follow the lookup API that consumer-facing
//! viewers expect (`success`, `data`, `count`, `message`, ...).

use crate::core::{DatasetStats, Lookup, ParseStats, Record};
use serde::Serialize;

/// Message used whenever a query runs before any dataset is loaded
pub const NO_DATA_MESSAGE: &str = "No DNA data loaded";

/// A lookup response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// Exact lookup hit
    Found {
        success: bool,
        data: Record,
        message: String,
    },
    /// Live (prefix) search result
    Partial {
        success: bool,
        partial: bool,
        matches: Vec<String>,
        count: usize,
    },
    /// Batch lookup result
    Batch {
        success: bool,
        data: Vec<Record>,
        count: usize,
        message: String,
    },
    /// Dataset load result
    Loaded {
        success: bool,
        count: usize,
        message: String,
    },
    /// Dataset statistics
    Stats {
        success: bool,
        #[serde(rename = "totalSNPs")]
        total_snps: usize,
        #[serde(rename = "isSorted")]
        is_sorted: bool,
        message: String,
    },
    /// Misses, missing data and invalid requests
    Failure { success: bool, message: String },
}

impl Response {
    /// A failed response with the given message
    pub fn failure(message: impl Into<String>) -> Self {
        Response::Failure {
            success: false,
            message: message.into(),
        }
    }

    /// Response for an exact lookup of an already-normalized identifier
    pub fn exact(identifier: &str, lookup: Lookup<Record>) -> Self {
        match lookup {
            Lookup::NoData => Self::failure(NO_DATA_MESSAGE),
            Lookup::NotFound => Self::failure(format!("RSID {} not found", identifier)),
            Lookup::Found(record) => Response::Found {
                success: true,
                data: record,
                message: format!("Found SNP: {}", identifier),
            },
        }
    }

    /// Response for a live prefix search
    pub fn partial(matches: Option<Vec<String>>) -> Self {
        match matches {
            None => Self::failure(NO_DATA_MESSAGE),
            Some(matches) => Response::Partial {
                success: true,
                partial: true,
                count: matches.len(),
                matches,
            },
        }
    }

    /// Response for a batch lookup of `requested` identifiers
    ///
    /// A missing dataset is reported before an empty request.
    pub fn batch(requested: usize, found: Option<Vec<Record>>) -> Self {
        match found {
            None => Self::failure(NO_DATA_MESSAGE),
            Some(_) if requested == 0 => Self::failure("No RSIDs provided"),
            Some(data) => Response::Batch {
                success: true,
                count: data.len(),
                message: format!("Found {} out of {} requested SNPs", data.len(), requested),
                data,
            },
        }
    }

    /// Response for a successful load
    pub fn loaded(stats: &ParseStats) -> Self {
        Response::Loaded {
            success: true,
            count: stats.loaded,
            message: format!("Successfully loaded {} SNPs", stats.loaded),
        }
    }

    /// Response for a stats request
    pub fn stats(stats: Option<DatasetStats>) -> Self {
        match stats {
            None => Self::failure(NO_DATA_MESSAGE),
            Some(stats) => Response::Stats {
                success: true,
                total_snps: stats.total_loaded,
                is_sorted: stats.is_sorted,
                message: "File statistics retrieved successfully".to_string(),
            },
        }
    }

    /// Whether the response reports success
    pub fn is_success(&self) -> bool {
        match self {
            Response::Found { success, .. }
            | Response::Partial { success, .. }
            | Response::Batch { success, .. }
            | Response::Loaded { success, .. }
            | Response::Stats { success, .. }
            | Response::Failure { success, .. } => *success,
        }
    }

    /// Render as JSON
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
