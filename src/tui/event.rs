use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;
use tracing::warn;

use crate::app::Result;
use crate::domain::{TopicDetail, TopicSummary};

/// Everything the controller reacts to. Producers only ever send these;
/// state is mutated solely by the loop that receives them.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    TopicsLoaded {
        generation: u64,
        result: Result<Vec<TopicSummary>>,
    },
    TopicLoaded {
        generation: u64,
        result: Result<TopicDetail>,
    },
    StatusExpired {
        token: u64,
    },
    /// `token` is the status notification shown for that copy.
    ClipboardFailed {
        token: u64,
        error: String,
    },
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Reads terminal input on a dedicated thread and forwards it as events.
pub struct EventHandler {
    poll_rate: Duration,
}

impl EventHandler {
    pub fn new(poll_rate: Duration) -> Self {
        Self { poll_rate }
    }

    /// The thread exits once the receiving side is dropped.
    pub fn spawn(self, tx: EventSender) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            while !tx.is_closed() {
                match event::poll(self.poll_rate) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(e) => {
                        warn!("Terminal input poll failed: {}", e);
                        break;
                    }
                }

                let event = match event::read() {
                    Ok(event) => event,
                    Err(e) => {
                        warn!("Terminal input read failed: {}", e);
                        break;
                    }
                };

                if let Some(app_event) = translate(event) {
                    if tx.send(app_event).is_err() {
                        break;
                    }
                }
            }
        })
    }
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                Some(AppEvent::Mouse(mouse))
            }
            _ => None,
        },
        Event::Resize(_, _) => Some(AppEvent::Resize),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    First,
    Last,
    Activate,
    Back,
    ToggleMouse,
    CopyUrl,
    OpenInBrowser,
    Refresh,
    None,
}
