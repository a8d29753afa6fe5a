//! Reusable widgets shared by the dashboard views.

pub mod header;
pub mod rank_bar;
pub mod search_bar;
pub mod stat_cards;
