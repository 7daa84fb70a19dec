//! Download a statistical table as CSV and regroup it into a nested JSON
//! document keyed by facet columns, with `[date, value]` series at the leaves.

pub mod diagnostics;
pub mod error;
pub mod fetch;
pub mod output;
pub mod process;
pub mod settings;

use reqwest::Client;

use diagnostics::DiagnosticSink;
use error::Result;
use process::tree::{self, LeafColumns};
use settings::Settings;

/// Turn CSV text into the rendered JSON document.
pub fn convert(text: &str, settings: &Settings, sink: &dyn DiagnosticSink) -> Result<String> {
    let table = process::load_csv(text)?;
    let facets = process::facets::validate(&settings.facets, &table.headers, sink);
    let columns = LeafColumns {
        date: &settings.date_column,
        value: &settings.value_column,
    };
    let reshaped = tree::reshape(&table, &facets, columns, sink)?;
    output::render(&reshaped.tree)
}

/// Resolve the table identifier, fetch the CSV and convert it.
pub async fn run(settings: &Settings, client: &Client, sink: &dyn DiagnosticSink) -> Result<String> {
    let source = fetch::resolve(&settings.data_url, &settings.identifier_param)?;
    let text = fetch::fetch_csv(client, &source.data_url).await?;
    convert(&text, settings, sink)
}
