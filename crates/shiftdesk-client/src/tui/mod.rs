mod actions;
mod app;
mod event;
mod theme;
mod ui;
pub mod widgets;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::source::ShiftSource;
use shiftdesk_common::feed::ShiftQuery;
pub use app::App;

use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use app::FetchRequest;
use event::{Event, EventHandler};

/// Run the TUI application
pub fn run(config: Config, source: Arc<dyn ShiftSource>, query: ShiftQuery) -> Result<()> {
    // Setup terminal
    enable_raw_mode().map_err(|e| ClientError::Tui(e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| ClientError::Tui(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| ClientError::Tui(e.to_string()))?;

    // Create app and run
    let mut app = App::new(config, source).with_query(query);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().map_err(|e| ClientError::Tui(e.to_string()))?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(|e| ClientError::Tui(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| ClientError::Tui(e.to_string()))?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let events = EventHandler::new(app.config.tick_rate_ms);

    while app.running {
        terminal
            .draw(|f| ui::render(f, app))
            .map_err(|e| ClientError::Tui(e.to_string()))?;

        // The list only knows whether it needs more rows after a layout pass
        if let Some(request) = app.next_fetch(Instant::now()) {
            spawn_fetch(Arc::clone(&app.source), request, events.sender());
        }

        match events.next()? {
            Event::Key(key) => {
                actions::handle_key_event(app, key, Instant::now())?;
            }
            Event::Mouse(mouse) => {
                actions::handle_mouse_event(app, mouse);
            }
            Event::Tick => {
                app.tick(Instant::now());
            }
            // Picked up by the next layout pass
            Event::Resize(_, _) => {}
            Event::PageLoaded { ticket, result } => {
                app.apply_page(ticket, result, Instant::now());
            }
        }
    }

    Ok(())
}

/// Fetch one page off the UI thread and report it as `Event::PageLoaded`.
fn spawn_fetch(source: Arc<dyn ShiftSource>, request: FetchRequest, sender: mpsc::Sender<Event>) {
    thread::spawn(move || {
        let result = source.fetch_page(&request.query, request.cursor.as_deref(), request.limit);
        // The loop may be gone when the user quit mid-fetch
        let _ = sender.send(Event::PageLoaded {
            ticket: request.ticket,
            result,
        });
    });
}
