use std::sync::Arc;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, info, warn};

use crate::app::AppContext;
use crate::config::KeybindingConfig;
use crate::tui::detail_view::DetailView;
use crate::tui::event::{Action, AppEvent, EventSender};
use crate::tui::list_view::ListView;
use crate::tui::status::{StatusKind, StatusLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Detail,
}

/// Navigation controller: owns both views and routes every event.
///
/// Events are handled one at a time by [`App::handle_event`]. Background
/// work (fetches, the status timer, clipboard writes) only reports back
/// through the event channel.
pub struct App {
    pub view: View,
    pub list: ListView,
    pub detail: DetailView,
    pub status: StatusLine,
    pub mouse_enabled: bool,
    pub should_quit: bool,
    mouse_request: Option<bool>,
    ctx: Arc<AppContext>,
    keybindings: KeybindingConfig,
    tx: EventSender,
}

impl App {
    pub fn new(ctx: Arc<AppContext>, keybindings: KeybindingConfig, tx: EventSender) -> Self {
        Self {
            view: View::List,
            list: ListView::new(),
            detail: DetailView::new(),
            status: StatusLine::new(),
            mouse_enabled: true,
            should_quit: false,
            mouse_request: None,
            ctx,
            keybindings,
            tx,
        }
    }

    /// Issues the initial topic list fetch.
    pub fn init(&mut self) {
        self.list.load(&self.ctx, &self.tx);
    }

    /// A pending mouse capture change for the terminal, if any.
    pub fn take_mouse_request(&mut self) -> Option<bool> {
        self.mouse_request.take()
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => {
                let action = self.keybindings.get_action(&key);
                self.handle_action(action);
            }
            AppEvent::Mouse(mouse) => self.handle_mouse(mouse),
            AppEvent::Resize => {}
            AppEvent::TopicsLoaded { generation, result } => {
                self.list.apply_loaded(generation, result);
            }
            AppEvent::TopicLoaded { generation, result } => {
                self.detail.apply_loaded(generation, result);
            }
            AppEvent::StatusExpired { token } => {
                self.status.expire(token);
            }
            AppEvent::ClipboardFailed { token, error } => {
                if self.status.is_current(token) {
                    self.status
                        .show(format!("Copy failed: {}", error), StatusKind::Error, &self.tx);
                } else {
                    debug!("Ignoring clipboard failure for replaced status {}", token);
                }
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match (action, self.view) {
            (Action::Quit, _) => self.should_quit = true,
            (Action::ToggleMouse, _) => self.toggle_mouse(),
            (Action::OpenInBrowser, _) => self.open_in_browser(),
            (Action::Activate, View::List) => self.open_selected(),
            (Action::CopyUrl, View::List) => self.copy_selected_url(),
            (Action::Refresh, View::List) => self.list.load(&self.ctx, &self.tx),
            (Action::Back, View::Detail) => self.back_to_list(),
            (Action::Refresh, View::Detail) => self.detail.reload(&self.ctx, &self.tx),
            (other, View::List) => self.list.handle_action(other),
            (other, View::Detail) => self.detail.handle_action(other),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if self.view == View::List => {
                if let Some(index) = self.list.row_at(mouse.column, mouse.row) {
                    self.list.select(index);
                }
                self.open_selected();
            }
            MouseEventKind::ScrollUp => self.handle_action(Action::MoveUp),
            MouseEventKind::ScrollDown => self.handle_action(Action::MoveDown),
            _ => {}
        }
    }

    fn open_selected(&mut self) {
        let Some(topic) = self.list.selected().cloned() else {
            return;
        };
        info!("Opening topic {}", topic.url);
        self.view = View::Detail;
        self.detail.load_topic(&topic, &self.ctx, &self.tx);
    }

    fn back_to_list(&mut self) {
        self.detail.reset();
        self.view = View::List;
    }

    fn toggle_mouse(&mut self) {
        self.mouse_enabled = !self.mouse_enabled;
        self.mouse_request = Some(self.mouse_enabled);
        debug!("Mouse capture {}", if self.mouse_enabled { "on" } else { "off" });
    }

    fn copy_selected_url(&mut self) {
        let Some(url) = self.list.selected().map(|t| t.url.clone()) else {
            return;
        };

        let token = self.status.show(
            format!("Copied to clipboard: {}", url),
            StatusKind::Info,
            &self.tx,
        );

        let clipboard = Arc::clone(&self.ctx.clipboard);
        let tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = clipboard.write_text(&url) {
                warn!("Clipboard write failed: {}", e);
                let _ = tx.send(AppEvent::ClipboardFailed {
                    token,
                    error: e.to_string(),
                });
            }
        });
    }

    fn open_in_browser(&mut self) {
        let url = match self.view {
            View::List => self.list.selected().map(|t| t.url.clone()),
            View::Detail => self.detail.url().map(String::from),
        };
        let Some(url) = url else {
            return;
        };

        if let Err(e) = open::that_detached(&url) {
            warn!("Failed to open {}: {}", url, e);
            self.status
                .show(format!("Failed to open browser: {}", e), StatusKind::Error, &self.tx);
        }
    }
}
