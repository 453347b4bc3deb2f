//! Paginated endpoint walking
//!
//! Open5e list endpoints return pages of the form
//! `{count, next, previous, results}`. Pages are fetched one at a time,
//! following `next` until it is null, with a fixed pause between requests.
//! A failed request ends the walk; whatever was collected so far is kept.

use crate::raw::RawRecord;
use crate::{HarvestError, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// One page of an Open5e list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub results: Vec<Value>,
}

/// Builds the first-page URL for an endpoint: `<base><endpoint>?limit=<n>`
///
/// # Example
///
/// ```
/// use open5e_harvest::fetch::endpoint_url;
///
/// let url = endpoint_url("https://api.open5e.com/", "/races", 1000).unwrap();
/// assert_eq!(url.as_str(), "https://api.open5e.com/races?limit=1000");
/// ```
pub fn endpoint_url(base_url: &str, endpoint: &str, page_limit: u32) -> Result<Url> {
    let mut url = Url::parse(&format!("{}{}", base_url.trim_end_matches('/'), endpoint))?;
    url.query_pairs_mut()
        .append_pair("limit", &page_limit.to_string());
    Ok(url)
}

/// Fetches and decodes a single page
///
/// # Returns
///
/// * `Ok(Page)` - The decoded page
/// * `Err(HarvestError)` - Network failure, non-success status or a body
///   that is not a page object
pub async fn fetch_page(client: &Client, url: &str) -> Result<Page> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| HarvestError::Http {
        url: url.to_string(),
        source,
    })?;

    serde_json::from_str(&body).map_err(|e| HarvestError::MalformedPage {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Walks a paginated endpoint and collects the records from every page
///
/// Non-object entries in `results` are skipped with a warning. A `next`
/// link pointing back to a page already fetched ends the walk.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `start_url` - URL of the first page
/// * `delay` - Pause before each follow-up page request
///
/// # Returns
///
/// All records collected, in page order. On a request failure the error is
/// logged and the records gathered before it are returned.
pub async fn fetch_all_pages(client: &Client, start_url: &Url, delay: Duration) -> Vec<RawRecord> {
    let mut records = Vec::new();
    let mut visited = HashSet::new();
    let mut next_url = Some(start_url.to_string());

    while let Some(url) = next_url.take() {
        if !visited.insert(url.clone()) {
            tracing::warn!("Pagination loop detected at {}, stopping", url);
            break;
        }

        tracing::info!("Fetching: {}", url);
        let page = match fetch_page(client, &url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Error fetching {}: {}", url, e);
                break;
            }
        };

        let before = records.len();
        for entry in page.results {
            match RawRecord::from_json(entry) {
                Some(record) => records.push(record),
                None => tracing::warn!("Skipping non-object result on {}", url),
            }
        }
        tracing::debug!(
            "Page yielded {} records ({} total{})",
            records.len() - before,
            records.len(),
            page.count
                .map(|count| format!(" of {}", count))
                .unwrap_or_default()
        );

        next_url = page.next.filter(|next| !next.is_empty());
        if next_url.is_some() && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    tracing::info!("Fetched {} items from {}", records.len(), start_url.path());
    records
}
