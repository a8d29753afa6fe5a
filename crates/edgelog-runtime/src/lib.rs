//! Runtime layer for edgelog.
//!
//! Owns the dashboard session state and loads log files off the async
//! executor.

pub mod loader;
pub mod session;

pub use edgelog_core as core;
pub use edgelog_data as data;
