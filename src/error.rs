use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions that abort a run.
#[derive(Error, Debug)]
pub enum ReshapeError {
    /// Not enough command-line arguments.
    #[error("usage: {0}")]
    Usage(String),

    #[error("invalid source URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The source URL carries no usable identifier parameter.
    #[error("'{param}' parameter not found in URL {url:?}")]
    MissingIdentifier { param: String, url: String },

    #[error("fetching {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A column every leaf needs is absent from the header row.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// `VALUE` field that is neither empty nor a finite number.
    #[error("row {row}: cannot parse value {value:?} as a number")]
    ValueParse { row: usize, value: String },

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReshapeError>;
