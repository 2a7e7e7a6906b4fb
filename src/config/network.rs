//! Network configuration for the page fetcher.

use serde::Deserialize;
use url::Url;

use crate::app::Result;

pub const DEFAULT_BASE_URL: &str = "https://www.v2ex.com";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Site origin; relative links in scraped pages resolve against it.
    pub base_url: String,
    /// Front page tab to list (`all`, `tech`, `hot`, ...).
    pub tab: String,
    /// Proxy URL for all requests. When unset, the environment is used.
    pub proxy: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tab: "all".to_string(),
            proxy: None,
            timeout_secs: 10,
            user_agent: concat!("v2ex-tui/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl NetworkConfig {
    /// URL of the topic list page, e.g. `https://www.v2ex.com/?tab=all`.
    pub fn list_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?.join("/")?;
        if !self.tab.is_empty() {
            url.query_pairs_mut().append_pair("tab", &self.tab);
        }
        Ok(url)
    }
}
