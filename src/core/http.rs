//! HTTP download of league archives.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use tracing::debug;

use super::row::Row;
use super::source::parse_csv_str;
use crate::Result;

/// Headers sent with every archive request.
pub fn archive_header_map() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("text/csv, text/plain, */*"));
    h.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("fixture-stats/", env!("CARGO_PKG_VERSION"))),
    );
    h
}

/// Fetch the raw CSV body of a league archive.
pub async fn fetch_archive_csv(client: &Client, url: &str) -> Result<String> {
    let body = client
        .get(url)
        .headers(archive_header_map())
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    debug!(url, bytes = body.len(), "fetched archive");
    Ok(body)
}

/// Fetch and parse a league archive.
pub async fn fetch_archive_rows(client: &Client, url: &str) -> Result<Vec<Row>> {
    let body = fetch_archive_csv(client, url).await?;
    parse_csv_str(&body)
}
