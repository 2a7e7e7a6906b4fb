use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Proxy};
use tracing::debug;
use url::Url;

use crate::app::Result;
use crate::config::NetworkConfig;
use crate::fetcher::Fetcher;

pub struct HttpFetcher {
    client: Client,
    list_url: Url,
}

impl HttpFetcher {
    /// Builds a client honoring the configured timeout and proxy. Without an
    /// explicit proxy, reqwest picks up `HTTP_PROXY`/`HTTPS_PROXY`.
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str());

        if let Some(proxy) = config.proxy.as_deref().filter(|p| !p.trim().is_empty()) {
            builder = builder.proxy(Proxy::all(proxy.trim())?);
        }

        let client = builder.build()?;
        let list_url = config.list_url()?;

        Ok(Self { client, list_url })
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        response.error_for_status_ref()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_topic_list_markup(&self) -> Result<Vec<u8>> {
        self.get(self.list_url.as_str()).await
    }

    async fn fetch_topic_detail_markup(&self, url: &str) -> Result<Vec<u8>> {
        self.get(url).await
    }
}
