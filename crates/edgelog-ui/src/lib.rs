//! Terminal UI layer for edgelog.
//!
//! Themes, header, stat cards and search bar components, the Overview,
//! Rankings and Map views, and the application event loop, built on
//! [`ratatui`].

pub mod app;
pub mod components;
pub mod map_view;
pub mod overview_view;
pub mod ranking_view;
pub mod themes;

pub use edgelog_core as core;
