//! # Unified Feed Endpoint

use reqwest::Method;
use shared::FeedPage;
use tracing::{info, warn};

use super::client::ApiClient;
use crate::core::error::Result;

/// Fetch one page of the unified feed.
///
/// `cursor` is the `dataPublicacao` of the last post already held; `None`
/// asks for the newest page. Entries that fail to decode are logged and
/// left out; [`FeedPage::received`] still counts them.
#[tracing::instrument(skip(client))]
pub async fn feed_page(client: &ApiClient, page_size: usize, cursor: Option<&str>) -> Result<FeedPage> {
    let start = std::time::Instant::now();

    let mut request = client
        .request(Method::GET, "/feed/unificado")
        .query(&[("tamanhoPagina", page_size.to_string())]);
    if let Some(cursor) = cursor {
        request = request.query(&[("ultimoCursor", cursor)]);
    }

    let entries: Vec<serde_json::Value> = client.send_json(request).await?;
    let (page, skipped) = FeedPage::decode(entries);
    for entry in &skipped {
        warn!(index = entry.index, error = %entry.error, "Dropping malformed feed item");
    }
    info!(
        count = page.items.len(),
        received = page.received,
        skipped = skipped.len(),
        duration_ms = start.elapsed().as_millis(),
        "Feed page fetched"
    );
    Ok(page)
}
