use std::sync::Arc;

use tracing::info;

use crate::app::error::Result;
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::config::NetworkConfig;
use crate::domain::{TopicDetail, TopicSummary};
use crate::extractor::Extractor;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::threader::thread_replies;

/// Wires the fetch → extract → thread pipeline and the clipboard together.
pub struct AppContext {
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub extractor: Extractor,
    pub clipboard: Arc<dyn Clipboard + Send + Sync>,
}

impl AppContext {
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(network)?);
        let extractor = Extractor::new(&network.base_url)?;

        Ok(Self {
            fetcher,
            extractor,
            clipboard: Arc::new(SystemClipboard),
        })
    }

    /// Context with caller-supplied collaborators.
    pub fn with_parts(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        extractor: Extractor,
        clipboard: Arc<dyn Clipboard + Send + Sync>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            clipboard,
        }
    }

    pub async fn load_topics(&self) -> Result<Vec<TopicSummary>> {
        let markup = self.fetcher.fetch_topic_list_markup().await?;
        let topics = self.extractor.extract_topic_list(&markup)?;
        info!("Loaded {} topics", topics.len());
        Ok(topics)
    }

    pub async fn load_topic(&self, url: &str) -> Result<TopicDetail> {
        let markup = self.fetcher.fetch_topic_detail_markup(url).await?;
        let mut detail = self.extractor.extract_topic_detail(&markup, url)?;
        thread_replies(&mut detail.replies);
        info!("Loaded topic {} with {} replies", url, detail.replies.len());
        Ok(detail)
    }
}
