//! Shared domain types for edgelog.
//!
//! Log record and summary models, the edge-location coordinate table, the
//! error type, CLI settings and display formatting helpers.

pub mod error;
pub mod formatting;
pub mod geo;
pub mod models;
pub mod settings;
pub mod time_utils;
