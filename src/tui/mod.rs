//! Terminal UI
//!
//! ratatui front end for the agent creation wizard.

mod app;
pub mod events;
pub mod render;
mod runner;

pub use app::WizardApp;
pub use events::{EventHandler, TuiEvent};
pub use runner::run;
