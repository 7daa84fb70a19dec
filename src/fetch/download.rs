// src/fetch/download.rs
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::error::{ReshapeError, Result};

/// GET `url` and return the body as text. Any non-success status is an error.
pub async fn fetch_csv(client: &Client, url: &Url) -> Result<String> {
    info!(%url, "fetching data CSV");
    let wrap = |source| ReshapeError::Fetch {
        url: url.to_string(),
        source,
    };
    let text = client
        .get(url.clone())
        .send()
        .await
        .map_err(wrap)?
        .error_for_status()
        .map_err(wrap)?
        .text()
        .await
        .map_err(wrap)?;
    debug!(bytes = text.len(), "downloaded");
    Ok(text)
}
