//! Interactive wizard command

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::api::{AgentApiClient, SuggestionClient};
use crate::config::Config;
use crate::tui::{self, WizardApp};
use crate::wizard::{AgentWizard, SubmissionStatus};

use super::commands::load_draft;

pub(super) async fn cmd_wizard(config: &Config, draft_path: Option<&Path>) -> Result<()> {
    let wizard = match draft_path {
        Some(path) => AgentWizard::with_draft(config, load_draft(path, config)?),
        None => AgentWizard::new(config),
    };

    let backend = Arc::new(AgentApiClient::new(&config.api)?);
    let suggester = if config.suggestions.enabled {
        Some(SuggestionClient::new(&config.suggestions)?)
    } else {
        None
    };

    tracing::info!("Starting wizard (backend: {})", backend.url());
    let app = WizardApp::new(wizard, backend, suggester);

    match tui::run(app).await? {
        SubmissionStatus::Created(summary) => println!("✓ {}", summary),
        SubmissionStatus::Failed(message) => eprintln!("✗ {}", message),
        SubmissionStatus::Idle | SubmissionStatus::Pending => {
            println!("Wizard closed without creating an agent")
        }
    }
    Ok(())
}
