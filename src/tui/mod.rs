pub mod app;
pub mod detail_view;
pub mod event;
pub mod layout;
pub mod list_view;
pub mod status;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};

use crate::app::{AppContext, Result};
use crate::config::Config;

use self::app::App;
use self::event::EventHandler;

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let (tx, mut rx) = event::channel();
    let _input = EventHandler::new(Duration::from_millis(100)).spawn(tx.clone());

    let mut app = App::new(ctx, config.keybindings.clone(), tx);
    app.init();
    info!("TUI started");

    loop {
        terminal.draw(|frame| layout::render(frame, &mut app, &config.colors))?;

        // The controller holds a sender, so the channel never closes while
        // the loop runs.
        let Some(event) = rx.recv().await else {
            break;
        };
        app.handle_event(event);

        if let Some(enabled) = app.take_mouse_request() {
            debug!("Mouse capture {}", if enabled { "enabled" } else { "disabled" });
            if enabled {
                execute!(terminal.backend_mut(), EnableMouseCapture)?;
            } else {
                execute!(terminal.backend_mut(), DisableMouseCapture)?;
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Dropping the receiver stops the input thread on its next poll.
    drop(rx);
    info!("TUI stopped");
    Ok(())
}
