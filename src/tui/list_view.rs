use std::sync::Arc;

use ratatui::layout::Rect;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::app::{AppContext, Result};
use crate::domain::TopicSummary;
use crate::tui::event::{Action, AppEvent, EventSender};

pub const PAGE_SIZE: usize = 10;

/// Topic list state: the topics, a selection cursor and the scroll offset.
pub struct ListView {
    topics: Vec<TopicSummary>,
    selected: usize,
    scroll_offset: usize,
    /// Rows visible in the last rendered frame.
    viewport_height: usize,
    /// Screen area the rows were last drawn into, for mouse hit testing.
    rows_area: Rect,
    loading: bool,
    error: Option<String>,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    pub fn new() -> Self {
        Self {
            topics: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            viewport_height: PAGE_SIZE,
            rows_area: Rect::default(),
            loading: false,
            error: None,
            generation: 0,
            task: None,
        }
    }

    /// Starts fetching the topic list in the background. The result comes
    /// back as [`AppEvent::TopicsLoaded`]; any earlier fetch is superseded.
    pub fn load(&mut self, ctx: &Arc<AppContext>, tx: &EventSender) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;
        self.loading = true;
        self.error = None;

        let generation = self.generation;
        let ctx = Arc::clone(ctx);
        let tx = tx.clone();
        self.task = Some(tokio::spawn(async move {
            let result = ctx.load_topics().await;
            let _ = tx.send(AppEvent::TopicsLoaded { generation, result });
        }));
    }

    pub fn apply_loaded(&mut self, generation: u64, result: Result<Vec<TopicSummary>>) {
        if generation != self.generation {
            debug!("Discarding stale topic list (generation {})", generation);
            return;
        }
        self.task = None;
        self.loading = false;

        match result {
            Ok(topics) => {
                self.topics = topics;
                self.error = None;
                self.select(self.selected);
            }
            Err(e) => {
                warn!("Failed to load topic list: {}", e);
                self.topics.clear();
                self.selected = 0;
                self.scroll_offset = 0;
                self.error = Some(e.display_message());
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        let page = self.viewport_height.max(1);
        match action {
            Action::MoveUp => self.select(self.selected.saturating_sub(1)),
            Action::MoveDown => self.select(self.selected.saturating_add(1)),
            Action::PrevPage => self.select(self.selected.saturating_sub(page)),
            Action::NextPage => self.select(self.selected.saturating_add(page)),
            Action::First => self.select(0),
            Action::Last => self.select(usize::MAX),
            _ => {}
        }
    }

    /// Moves the cursor to `index`, clamped to the list bounds.
    pub fn select(&mut self, index: usize) {
        if self.topics.is_empty() {
            self.selected = 0;
            self.scroll_offset = 0;
            return;
        }
        self.selected = index.min(self.topics.len() - 1);
        self.ensure_visible();
    }

    pub fn selected(&self) -> Option<&TopicSummary> {
        self.topics.get(self.selected)
    }

    pub fn selected_index(&self) -> Option<usize> {
        (!self.topics.is_empty()).then_some(self.selected)
    }

    pub fn topics(&self) -> &[TopicSummary] {
        &self.topics
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Topics currently inside the viewport, with their list indices.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &TopicSummary)> {
        self.topics
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(self.viewport_height.max(1))
    }

    /// Records the area rows are drawn into and keeps the cursor on screen.
    pub fn set_viewport(&mut self, rows_area: Rect) {
        self.rows_area = rows_area;
        self.viewport_height = usize::from(rows_area.height).max(1);
        self.ensure_visible();
    }

    /// Index of the topic drawn at a screen position, if any.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.rows_area;
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        if !inside {
            return None;
        }
        let index = self.scroll_offset + usize::from(row - area.y);
        (index < self.topics.len()).then_some(index)
    }

    fn ensure_visible(&mut self) {
        let height = self.viewport_height.max(1);
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected + 1 - height;
        }
        let max_offset = self.topics.len().saturating_sub(height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}
