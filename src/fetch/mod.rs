// src/fetch/mod.rs

/// Locating a table from its portal URL.
pub mod source;

/// Downloading the table's CSV payload.
pub mod download;

pub use download::fetch_csv;
pub use source::{metadata_url, resolve, TableSource};
