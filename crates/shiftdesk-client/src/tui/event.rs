use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, MouseEvent};

use crate::error::{ClientError, Result};
use shiftdesk_common::api::ShiftPage;
use shiftdesk_common::virtual_list::FetchTicket;

/// Terminal and background events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Mouse input (wheel scrolling)
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Frame tick; drives scroll animation and page polling
    Tick,
    /// A page fetch started for `ticket` finished
    PageLoaded {
        ticket: FetchTicket,
        result: Result<ShiftPage>,
    },
}

/// Event handler with background thread
pub struct EventHandler {
    sender: mpsc::Sender<Event>,
    receiver: mpsc::Receiver<Event>,
    #[allow(dead_code)]
    handler: thread::JoinHandle<()>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate in milliseconds
    pub fn new(tick_rate: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate.max(1));
        let (sender, receiver) = mpsc::channel();
        let input_sender = sender.clone();

        let handler = thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                // Ticks keep their rate even while input keeps arriving
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) {
                    let forwarded = match event::read() {
                        Ok(event::Event::Key(key)) => Some(Event::Key(key)),
                        Ok(event::Event::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                        Ok(event::Event::Resize(width, height)) => {
                            Some(Event::Resize(width, height))
                        }
                        _ => None,
                    };
                    if let Some(event) = forwarded {
                        if input_sender.send(event).is_err() {
                            break;
                        }
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    if input_sender.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self {
            sender,
            receiver,
            handler,
        }
    }

    /// Sender for worker threads reporting back into the loop
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.sender.clone()
    }

    /// Get the next event, blocking until one is available
    pub fn next(&self) -> Result<Event> {
        self.receiver
            .recv()
            .map_err(|e| ClientError::Tui(e.to_string()))
    }
}
