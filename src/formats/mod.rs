//! Output formats
//!
//! JSON responses for lookups, loads and dataset statistics.

pub mod response;

pub use response::{Response, NO_DATA_MESSAGE};
