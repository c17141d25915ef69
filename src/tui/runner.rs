//! TUI Runner
//!
//! Main event loop and terminal setup for the wizard.

use super::app::WizardApp;
use super::events::{EventHandler, TuiEvent};
use super::render;
use crate::wizard::SubmissionStatus;
use anyhow::Result;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;

/// Run the wizard until the user quits. Returns the final submission state.
pub async fn run(mut app: WizardApp) -> Result<SubmissionStatus> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    EventHandler::start_terminal_listener(app.event_sender());

    let result = run_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result.map(|()| app.outcome().clone())
}

/// Main event loop
async fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut WizardApp) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| render::render(f, app))?;

        if app.should_quit {
            break;
        }

        let event =
            tokio::time::timeout(tokio::time::Duration::from_millis(250), app.next_event()).await;

        if let Ok(Some(event)) = event {
            app.handle_event(event);

            // Drain queued events before re-rendering
            while let Some(event) = app.try_next_event() {
                if matches!(event, TuiEvent::Tick) {
                    continue;
                }
                app.handle_event(event);
            }
        }
    }

    Ok(())
}
