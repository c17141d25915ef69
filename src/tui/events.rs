//! TUI Event System
//!
//! Terminal input and background-task results funnel into one channel.

use crossterm::event::KeyEvent;
use tokio::sync::mpsc;

use crate::api::SuggestionField;

/// Events that can occur in the TUI
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// User pressed a key
    Key(KeyEvent),

    /// User pasted text
    Paste(String),

    /// Terminal was resized
    Resize(u16, u16),

    /// Create request finished: confirmation message or error text
    AgentCreated(Result<String, String>),

    /// Suggestion request finished
    SuggestionReady {
        field: SuggestionField,
        result: Result<String, String>,
    },

    /// Redraw timer
    Tick,
}

/// Event handler for the TUI
pub struct EventHandler {
    tx: mpsc::UnboundedSender<TuiEvent>,
    rx: mpsc::UnboundedReceiver<TuiEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Get a sender for sending events
    pub fn sender(&self) -> mpsc::UnboundedSender<TuiEvent> {
        self.tx.clone()
    }

    /// Receive the next event (blocks until available)
    pub async fn next(&mut self) -> Option<TuiEvent> {
        self.rx.recv().await
    }

    /// Try to receive the next event without blocking
    pub fn try_next(&mut self) -> Option<TuiEvent> {
        self.rx.try_recv().ok()
    }

    /// Start listening for terminal events on crossterm's async stream
    pub fn start_terminal_listener(tx: mpsc::UnboundedSender<TuiEvent>) {
        use crossterm::event::{Event, EventStream, KeyEventKind};
        use futures::StreamExt;

        tokio::spawn(async move {
            let mut reader = EventStream::new();
            let tick_interval = std::time::Duration::from_millis(250);

            loop {
                let event = tokio::select! {
                    maybe_event = reader.next() => {
                        match maybe_event {
                            Some(Ok(event)) => Some(event),
                            Some(Err(_)) => None,
                            None => break,
                        }
                    }
                    _ = tokio::time::sleep(tick_interval) => None,
                };

                let sent = match event {
                    // Only key presses; releases would double every keystroke
                    Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        tx.send(TuiEvent::Key(key))
                    }
                    Some(Event::Paste(text)) => tx.send(TuiEvent::Paste(text)),
                    Some(Event::Resize(w, h)) => tx.send(TuiEvent::Resize(w, h)),
                    Some(_) => Ok(()),
                    None => tx.send(TuiEvent::Tick),
                };
                if sent.is_err() {
                    break;
                }
            }
        });
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
