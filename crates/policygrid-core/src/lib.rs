//! Grid-side logic for the policy table: the filter model the grid owns,
//! the translation of row-block requests into search payloads, the
//! row-block data source, and the controllers that drive the filter
//! model from the status bar and search box.

pub mod columns;
pub mod config;
pub mod datasource;
pub mod filter_model;
pub mod grid;
pub mod query;
pub mod search_box;
pub mod stats;
pub mod status_filter;
