use std::path::PathBuf;

pub const DEFAULT_FACET: &str = "GEO";
pub const DATE_COLUMN: &str = "REF_DATE";
pub const VALUE_COLUMN: &str = "VALUE";
pub const IDENTIFIER_PARAM: &str = "pid";

/// `{base}` is the identifier minus its two-character suffix, `{pid}` the full identifier.
pub const METADATA_URL_TEMPLATE: &str = "https://www150.statcan.gc.ca/t1/tbl1/en/dtl!downloadDbLoadingData-nonTraduit.action?pid={base}&file={pid}-symbolsSeparate.csv";

/// Everything a single run needs to know, resolved from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_url: String,
    /// `None` writes to standard output. An empty path also means standard output.
    pub output: Option<PathBuf>,
    /// Requested facet hierarchy, outermost first. Never empty.
    pub facets: Vec<String>,
    pub date_column: String,
    pub value_column: String,
    pub identifier_param: String,
}

impl Settings {
    pub fn new(data_url: impl Into<String>, output: Option<PathBuf>, facets: Vec<String>) -> Self {
        let facets = if facets.is_empty() {
            vec![DEFAULT_FACET.to_string()]
        } else {
            facets
        };
        // "" lets a caller name facets while still writing to stdout
        let output = output.filter(|p| !p.as_os_str().is_empty());
        Self {
            data_url: data_url.into(),
            output,
            facets,
            date_column: DATE_COLUMN.to_string(),
            value_column: VALUE_COLUMN.to_string(),
            identifier_param: IDENTIFIER_PARAM.to_string(),
        }
    }
}
