// src/fetch/source.rs
use tracing::debug;
use url::Url;

use crate::error::{ReshapeError, Result};
use crate::settings::METADATA_URL_TEMPLATE;

/// A data table located by its portal URL.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSource {
    pub data_url: Url,
    /// Product identifier taken from the query string.
    pub pid: String,
    /// Companion symbols file. Derived for reference, never fetched.
    pub metadata_url: String,
}

/// Parse `data_url` and pull the identifier out of its `param` query parameter.
///
/// The first non-empty occurrence wins; `pid=` with no value counts as absent.
pub fn resolve(data_url: &str, param: &str) -> Result<TableSource> {
    let url = Url::parse(data_url).map_err(|source| ReshapeError::InvalidUrl {
        url: data_url.to_string(),
        source,
    })?;

    let pid = url
        .query_pairs()
        .filter(|(k, _)| k == param)
        .map(|(_, v)| v.into_owned())
        .find(|v| !v.is_empty())
        .ok_or_else(|| ReshapeError::MissingIdentifier {
            param: param.to_string(),
            url: data_url.to_string(),
        })?;
    debug!(%pid, "extracted identifier");

    let metadata_url = metadata_url(&pid);
    debug!(%metadata_url, "derived metadata URL");

    Ok(TableSource {
        data_url: url,
        pid,
        metadata_url,
    })
}

/// The symbols-separate download for `pid`, addressed by its base table id.
pub fn metadata_url(pid: &str) -> String {
    let keep = pid.chars().count().saturating_sub(2);
    let base: String = pid.chars().take(keep).collect();
    METADATA_URL_TEMPLATE
        .replace("{base}", &base)
        .replace("{pid}", pid)
}
