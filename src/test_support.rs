//! In-memory collaborators for unit tests.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::app::{AppContext, Result, V2exError};
use crate::clipboard::Clipboard;
use crate::extractor::Extractor;
use crate::fetcher::Fetcher;

pub const ORIGIN: &str = "https://www.v2ex.com";

pub fn list_markup() -> Vec<u8> {
    r#"<html><body>
<div class="cell item"><span class="item_title"><a href="/t/1">Alpha</a></span>
  <span class="topic_info"><a>node</a> • <strong><a>alice</a></strong> • 1 分钟前</span></div>
<div class="cell item"><span class="item_title"><a href="/t/2">Beta</a></span>
  <span class="topic_info"><a>node</a> • <strong><a>bob</a></strong> • 2 分钟前</span>
  <a class="count_livid">4</a></div>
<div class="cell item"><span class="item_title"><a href="https://www.v2ex.com/t/3">Gamma</a></span>
  <span class="topic_info"><a>node</a> • <strong><a>carol</a></strong> • 3 分钟前</span>
  <a class="count_livid">9</a></div>
</body></html>"#
        .as_bytes()
        .to_vec()
}

pub fn detail_markup() -> Vec<u8> {
    r#"<html><body>
<div class="header"><h1>Sample topic</h1>
  <small><a href="/member/alice">alice</a> · <span title="2024-05-01 10:00:00 +08:00">1 天前</span></small></div>
<div class="topic_content">Body text.</div>
<div id="r_1" class="cell"><strong><a>bob</a></strong> <span class="ago">1 小时前</span> <span class="no">1</span>
  <div class="reply_content">first!</div></div>
<div id="r_2" class="cell"><strong><a>carol</a></strong> <span class="ago">50 分钟前</span> <span class="no">2</span>
  <div class="reply_content">@bob hi</div></div>
<div id="r_3" class="cell"><strong><a>alice</a></strong> <span class="ago">40 分钟前</span> <span class="no">3</span>
  <div class="reply_content">@bob thanks</div></div>
</body></html>"#
        .as_bytes()
        .to_vec()
}

/// Serves fixed markup and records every request.
#[derive(Default)]
pub struct MockFetcher {
    list: Option<Vec<u8>>,
    detail: Option<Vec<u8>>,
    list_requests: AtomicUsize,
    detail_requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new(list: Vec<u8>, detail: Vec<u8>) -> Arc<Self> {
        Arc::new(Self {
            list: Some(list),
            detail: Some(detail),
            ..Self::default()
        })
    }

    pub fn with_detail(detail: Vec<u8>) -> Arc<Self> {
        Arc::new(Self {
            detail: Some(detail),
            ..Self::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn list_requests(&self) -> usize {
        self.list_requests.load(Ordering::SeqCst)
    }

    pub fn detail_requests(&self) -> Vec<String> {
        self.detail_requests.lock().unwrap().clone()
    }

    fn unreachable() -> V2exError {
        V2exError::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "offline"))
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch_topic_list_markup(&self) -> Result<Vec<u8>> {
        self.list_requests.fetch_add(1, Ordering::SeqCst);
        self.list.clone().ok_or_else(Self::unreachable)
    }

    async fn fetch_topic_detail_markup(&self, url: &str) -> Result<Vec<u8>> {
        self.detail_requests.lock().unwrap().push(url.to_string());
        self.detail.clone().ok_or_else(Self::unreachable)
    }
}

#[derive(Default)]
pub struct MockClipboard {
    pub fail: bool,
    pub writes: Mutex<Vec<String>>,
}

impl Clipboard for MockClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        self.writes.lock().unwrap().push(text.to_string());
        if self.fail {
            Err(V2exError::Clipboard("no display".into()))
        } else {
            Ok(())
        }
    }
}

pub fn context(fetcher: Arc<MockFetcher>) -> Arc<AppContext> {
    context_with_clipboard(fetcher, Arc::new(MockClipboard::default()))
}

pub fn context_with_clipboard(
    fetcher: Arc<MockFetcher>,
    clipboard: Arc<MockClipboard>,
) -> Arc<AppContext> {
    let extractor = Extractor::new(ORIGIN).unwrap();
    Arc::new(AppContext::with_parts(fetcher, extractor, clipboard))
}
