// src/process/mod.rs
use csv::ReaderBuilder;
use std::io::Cursor;
use tracing::{debug, trace};

use crate::error::Result;

pub mod facets;
pub mod tree;
pub mod utils;

use utils::clean_header;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawTable {
    /// Column names from the header row, with BOM, quotes and whitespace removed.
    pub headers: Vec<String>,
    /// Each data row, one String per field. Rows may be shorter than `headers`.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Position of `name` in the header row. Duplicated names resolve to the last one.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().rposition(|h| h == name)
    }
}

/// Parse CSV text into a [`RawTable`]. The first record is the header row;
/// field values are kept verbatim.
pub fn load_csv(text: &str) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // short rows are handled per row by the reshaper
        .from_reader(Cursor::new(text.as_bytes()));

    let mut records = rdr.records();
    let headers: Vec<String> = match records.next() {
        Some(first) => first?.iter().map(clean_header).collect(),
        None => {
            debug!("CSV payload is empty");
            return Ok(RawTable::default());
        }
    };
    debug!(?headers, "cleaned headers");

    let mut rows = Vec::new();
    for result in records {
        let record = result?;
        trace!(fields = record.len(), "row");
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}
