use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::app::{AppContext, Result};
use crate::domain::{TopicDetail, TopicSummary};
use crate::tui::event::{Action, AppEvent, EventSender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    /// Nothing requested since the last reset.
    Empty,
    Loading { url: String },
    Loaded(TopicDetail),
    Failed { url: String, message: String },
}

/// A single topic page. Every visit loads fresh; nothing is cached.
pub struct DetailView {
    state: DetailState,
    generation: u64,
    task: Option<JoinHandle<()>>,
    scroll: u16,
    /// Row count after wrapping and viewport height from the last frame.
    content_lines: u16,
    viewport_height: u16,
}

impl Default for DetailView {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailView {
    pub fn new() -> Self {
        Self {
            state: DetailState::Empty,
            generation: 0,
            task: None,
            scroll: 0,
            content_lines: 0,
            viewport_height: 0,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn topic(&self) -> Option<&TopicDetail> {
        match &self.state {
            DetailState::Loaded(detail) => Some(detail),
            _ => None,
        }
    }

    /// URL of whatever is loading, loaded or failed.
    pub fn url(&self) -> Option<&str> {
        match &self.state {
            DetailState::Empty => None,
            DetailState::Loading { url } | DetailState::Failed { url, .. } => Some(url.as_str()),
            DetailState::Loaded(detail) => Some(detail.url.as_str()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Loading { .. })
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Switches to the loading state and fetches the topic in the background.
    /// A fetch still in flight is aborted and its result would be discarded.
    pub fn load_topic(&mut self, summary: &TopicSummary, ctx: &Arc<AppContext>, tx: &EventSender) {
        self.load_url(summary.url.clone(), ctx, tx);
    }

    /// Loads the current URL again, if there is one.
    pub fn reload(&mut self, ctx: &Arc<AppContext>, tx: &EventSender) {
        if let Some(url) = self.url().map(String::from) {
            self.load_url(url, ctx, tx);
        }
    }

    fn load_url(&mut self, url: String, ctx: &Arc<AppContext>, tx: &EventSender) {
        self.invalidate();
        self.state = DetailState::Loading { url: url.clone() };

        let generation = self.generation;
        let ctx = Arc::clone(ctx);
        let tx = tx.clone();
        self.task = Some(tokio::spawn(async move {
            let result = ctx.load_topic(&url).await;
            let _ = tx.send(AppEvent::TopicLoaded { generation, result });
        }));
    }

    /// Applies a finished fetch. Results from superseded loads are dropped.
    pub fn apply_loaded(&mut self, generation: u64, result: Result<TopicDetail>) {
        if generation != self.generation || !self.is_loading() {
            debug!("Discarding stale topic detail (generation {})", generation);
            return;
        }
        self.task = None;

        self.state = match result {
            Ok(detail) => DetailState::Loaded(detail),
            Err(e) => {
                let url = self.url().unwrap_or_default().to_string();
                warn!("Failed to load topic {}: {}", url, e);
                DetailState::Failed {
                    url,
                    message: e.display_message(),
                }
            }
        };
    }

    /// Drops the loaded topic and any error; a pending fetch becomes stale.
    pub fn reset(&mut self) {
        self.invalidate();
        self.state = DetailState::Empty;
    }

    pub fn handle_action(&mut self, action: Action) {
        let page = self.viewport_height.max(1);
        let max_scroll = self.content_lines.saturating_sub(1);
        self.scroll = match action {
            Action::MoveUp => self.scroll.saturating_sub(1),
            Action::MoveDown => self.scroll.saturating_add(1),
            Action::PrevPage => self.scroll.saturating_sub(page),
            Action::NextPage => self.scroll.saturating_add(page),
            Action::First => 0,
            Action::Last => max_scroll,
            _ => return,
        }
        .min(max_scroll);
    }

    /// Called by the renderer with the wrapped row count and the frame height.
    pub fn set_viewport(&mut self, content_lines: u16, viewport_height: u16) {
        self.content_lines = content_lines;
        self.viewport_height = viewport_height;
        self.scroll = self.scroll.min(content_lines.saturating_sub(1));
    }

    fn invalidate(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;
        self.scroll = 0;
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::V2exError;
    use crate::test_support::{context, detail_markup, MockFetcher};
    use crate::tui::event;

    fn summary(url: &str) -> TopicSummary {
        TopicSummary::new("topic", url)
    }

    #[tokio::test]
    async fn test_load_shows_loading_then_threaded_topic() {
        let fetcher = MockFetcher::with_detail(detail_markup());
        let ctx = context(fetcher.clone());
        let (tx, mut rx) = event::channel();
        let mut view = DetailView::new();

        view.load_topic(&summary("https://www.v2ex.com/t/1"), &ctx, &tx);
        assert!(view.is_loading());
        assert!(view.topic().is_none());

        match rx.recv().await {
            Some(AppEvent::TopicLoaded { generation, result }) => {
                view.apply_loaded(generation, result)
            }
            other => panic!("unexpected event: {:?}", other),
        }

        let topic = view.topic().expect("topic should be loaded");
        assert_eq!(topic.title, "Sample topic");
        assert_eq!(topic.replies[0].reply_count, 2);
        assert_eq!(fetcher.detail_requests(), vec!["https://www.v2ex.com/t/1"]);
    }

    #[tokio::test]
    async fn test_failed_load_sets_error_state() {
        let ctx = context(MockFetcher::failing());
        let (tx, mut rx) = event::channel();
        let mut view = DetailView::new();

        view.load_topic(&summary("https://www.v2ex.com/t/2"), &ctx, &tx);
        if let Some(AppEvent::TopicLoaded { generation, result }) = rx.recv().await {
            view.apply_loaded(generation, result);
        }

        match view.state() {
            DetailState::Failed { url, message } => {
                assert_eq!(url, "https://www.v2ex.com/t/2");
                assert!(!message.is_empty());
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_result_after_reset_is_discarded() {
        let fetcher = MockFetcher::with_detail(detail_markup());
        let ctx = context(fetcher);
        let (tx, _rx) = event::channel();
        let mut view = DetailView::new();

        view.load_topic(&summary("https://www.v2ex.com/t/1"), &ctx, &tx);
        let stale_generation = view.generation();
        view.reset();

        let late = ctx.load_topic("https://www.v2ex.com/t/1").await;
        view.apply_loaded(stale_generation, late);

        assert_eq!(view.state(), &DetailState::Empty);
        assert!(view.topic().is_none());
    }

    #[tokio::test]
    async fn test_newer_load_supersedes_older() {
        let fetcher = MockFetcher::with_detail(detail_markup());
        let ctx = context(fetcher);
        let (tx, _rx) = event::channel();
        let mut view = DetailView::new();

        view.load_topic(&summary("https://www.v2ex.com/t/1"), &ctx, &tx);
        let first = view.generation();
        view.load_topic(&summary("https://www.v2ex.com/t/2"), &ctx, &tx);

        view.apply_loaded(first, Err(V2exError::Parse("late".into())));
        assert!(view.is_loading());
        assert_eq!(view.url(), Some("https://www.v2ex.com/t/2"));
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let mut view = DetailView::new();
        view.set_viewport(20, 5);

        view.handle_action(Action::NextPage);
        assert_eq!(view.scroll(), 5);
        view.handle_action(Action::Last);
        assert_eq!(view.scroll(), 19);
        view.handle_action(Action::MoveDown);
        assert_eq!(view.scroll(), 19);
        view.handle_action(Action::First);
        assert_eq!(view.scroll(), 0);
        view.handle_action(Action::MoveUp);
        assert_eq!(view.scroll(), 0);
    }

    #[test]
    fn test_reset_on_fresh_view_is_empty() {
        let mut view = DetailView::new();
        view.reset();
        assert_eq!(view.state(), &DetailState::Empty);
        assert!(view.url().is_none());
    }
}
