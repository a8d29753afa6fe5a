//! Data layer for edgelog.
//!
//! Reads JSON and CSV access-log exports, aggregates records into a
//! dashboard [`Summary`](edgelog_core::models::Summary) and filters records
//! with fuzzy search.

pub mod aggregator;
pub mod reader;
pub mod search;

pub use edgelog_core as core;
