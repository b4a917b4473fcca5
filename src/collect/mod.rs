//! Paginated collection of search results.
//!
//! The [`Collector`] walks the search result window page by page, strictly in
//! order, and maps every item into a [`Record`]. An empty page ends the walk.

mod record;

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::CollectorConfig;
use crate::fetch::constants::{MAX_PAGES, PER_PAGE, SEARCH_REPOSITORIES_PATH};
use crate::fetch::{ApiClient, FetchError};

pub use record::{NO_LICENSE, Record, UNKNOWN};

/// Drives the request executor across the search result pages.
#[derive(Debug)]
pub struct Collector {
    client: ApiClient,
    search_url: String,
    page_delay: Duration,
}

impl Collector {
    /// Creates a collector for the search endpoint under the configured API root.
    #[must_use]
    pub fn new(client: ApiClient, config: &CollectorConfig) -> Self {
        Self {
            client,
            search_url: format!("{}{SEARCH_REPOSITORIES_PATH}", config.api_base_url()),
            page_delay: config.page_delay(),
        }
    }

    /// Fetches up to [`MAX_PAGES`] pages for `query`, most-starred first.
    ///
    /// Records come back in page-then-item order and may repeat a
    /// `full_name` if the ranking shifted between requests.
    ///
    /// # Errors
    ///
    /// Propagates the first terminal [`FetchError`] unchanged; records from
    /// earlier pages are discarded.
    #[instrument(skip(self))]
    pub async fn collect(&self, query: &str) -> Result<Vec<Record>, FetchError> {
        let sleeper = self.client.sleeper();
        let mut records = Vec::new();

        for page in 1..=MAX_PAGES {
            let params = page_params(query, page);
            let payload = self.client.execute(&self.search_url, &params).await?;

            let items = page_items(&payload);
            if items.is_empty() {
                debug!(page, "empty page; stopping");
                break;
            }

            records.reserve(items.len());
            for item in items {
                match Record::from_item(item) {
                    Some(record) => records.push(record),
                    None => warn!(page, "skipping search item that is not an object"),
                }
            }

            info!(page, collected = records.len(), "page fetched");
            sleeper.sleep(self.page_delay).await;
        }

        Ok(records)
    }
}

/// Query parameters for one page, sorted by stars descending.
#[must_use]
pub fn page_params(query: &str, page: u32) -> [(&'static str, String); 5] {
    [
        ("q", query.to_string()),
        ("sort", "stars".to_string()),
        ("order", "desc".to_string()),
        ("per_page", PER_PAGE.to_string()),
        ("page", page.to_string()),
    ]
}

/// The `items` array of a page; anything else reads as an empty page.
fn page_items(payload: &Value) -> &[Value] {
    payload
        .get("items")
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice)
}
