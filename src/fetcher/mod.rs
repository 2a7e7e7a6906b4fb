pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

/// Retrieves raw page markup. Any failure surfaces as a transport error;
/// callers do not distinguish timeouts from bad statuses.
#[async_trait]
pub trait Fetcher {
    /// Markup of the front page listing topics.
    async fn fetch_topic_list_markup(&self) -> Result<Vec<u8>>;

    /// Markup of a single topic page.
    async fn fetch_topic_detail_markup(&self, url: &str) -> Result<Vec<u8>>;
}
