use crate::agent::{AgentDraft, BUILTIN_PLUGINS, CharacterDefaults, ClientKind, MemoryFlag};
use crate::api::SuggestionField;
use crate::config::Config;

use super::types::*;

/// Longest description shown on the review step before truncation
pub(super) const SUMMARY_DESCRIPTION_CHARS: usize = 30;
const NOT_SET: &str = "Not set";

fn or_not_set(value: &str) -> &str {
    if value.is_empty() { NOT_SET } else { value }
}

/// Main wizard state
pub struct AgentWizard {
    pub step: WizardStep,
    pub draft: AgentDraft,

    /// Message from the last failed validation pass
    pub validation_error: Option<String>,
    /// Non-validation notices (picture load, suggestion errors)
    pub status_message: Option<String>,

    /// Shows the memory/plugins panel under every step
    pub advanced_mode: bool,
    pub submission: SubmissionStatus,
    /// Field waiting on a suggestion response
    pub suggestion: Option<SuggestionField>,
    pub suggestions_enabled: bool,

    /// Raw text of the topics box; `draft.topics` is derived from it
    pub topics_input: String,
    /// Path typed into the picture field
    pub picture_input: String,
    pub custom_plugin_input: String,

    /// Navigation
    pub focused_field: usize,

    pub(super) character_defaults: CharacterDefaults,
}

impl Default for AgentWizard {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AgentWizard {
    pub fn new(config: &Config) -> Self {
        Self {
            step: WizardStep::Basic,
            draft: AgentDraft::with_template(config.agent.template_name.clone()),
            validation_error: None,
            status_message: None,
            advanced_mode: false,
            submission: SubmissionStatus::Idle,
            suggestion: None,
            suggestions_enabled: config.suggestions.enabled,
            topics_input: String::new(),
            picture_input: String::new(),
            custom_plugin_input: String::new(),
            focused_field: 0,
            character_defaults: config.agent.character_defaults(),
        }
    }

    /// Start from an existing draft (loaded from a file)
    pub fn with_draft(config: &Config, draft: AgentDraft) -> Self {
        let mut wizard = Self::new(config);
        wizard.topics_input = draft.topics.join("\n");
        wizard.draft = draft;
        wizard
    }

    pub fn character_defaults(&self) -> &CharacterDefaults {
        &self.character_defaults
    }

    /// Focusable slots on the current screen, in Tab order
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = match self.step {
            WizardStep::Basic => {
                let mut f = vec![
                    Field::Name,
                    Field::Ticker,
                    Field::Description,
                    Field::Picture,
                ];
                f.extend(ClientKind::ALL.iter().map(|k| Field::Client(*k)));
                f
            }
            WizardStep::Personality => {
                let mut f = vec![Field::Personality, Field::Topics];
                f.extend(MemoryFlag::ALL.iter().map(|m| Field::Memory(*m)));
                f
            }
            WizardStep::Tokenize => Vec::new(),
            WizardStep::Review => vec![Field::Create],
        };

        if self.advanced_mode {
            fields.extend(MemoryFlag::ALL.iter().map(|m| Field::AdvancedMemory(*m)));
            fields.extend((0..BUILTIN_PLUGINS.len()).map(Field::Plugin));
            fields.extend((0..self.draft.custom_plugins().count()).map(Field::CustomPlugin));
            fields.push(Field::CustomPluginInput);
        }
        fields
    }

    pub fn focused(&self) -> Option<Field> {
        self.fields().get(self.focused_field).copied()
    }

    pub fn focus_next(&mut self) {
        let count = self.fields().len();
        if count > 0 {
            self.focused_field = (self.focused_field + 1) % count;
        }
    }

    pub fn focus_prev(&mut self) {
        let count = self.fields().len();
        if count > 0 {
            self.focused_field = (self.focused_field + count - 1) % count;
        }
    }

    /// Keep focus inside the field list after it shrinks
    pub(super) fn clamp_focus(&mut self) {
        let count = self.fields().len();
        if self.focused_field >= count {
            self.focused_field = count.saturating_sub(1);
        }
    }

    pub fn toggle_advanced(&mut self) {
        self.advanced_mode = !self.advanced_mode;
        tracing::debug!("[wizard] advanced mode → {}", self.advanced_mode);
        self.clamp_focus();
    }

    /// "Generate Random"
    pub fn randomize_draft(&mut self) {
        self.draft.randomize(&mut rand::rng());
        self.status_message = None;
    }

    /// Description for the review step: first 30 characters, `...` when cut
    pub fn summary_description(&self) -> String {
        let text = &self.draft.description;
        if text.is_empty() {
            return NOT_SET.to_string();
        }
        if text.chars().count() > SUMMARY_DESCRIPTION_CHARS {
            let head: String = text.chars().take(SUMMARY_DESCRIPTION_CHARS).collect();
            format!("{}...", head)
        } else {
            text.clone()
        }
    }

    pub fn summary_name(&self) -> &str {
        or_not_set(&self.draft.name)
    }

    pub fn summary_ticker(&self) -> &str {
        or_not_set(&self.draft.ticker)
    }

    /// Enabled platform ids as stored in the draft
    pub fn summary_clients(&self) -> String {
        let enabled = self.draft.clients.enabled_ids();
        if enabled.is_empty() {
            "None".to_string()
        } else {
            enabled.join(", ")
        }
    }

    pub fn summary_plugins(&self) -> String {
        if self.draft.plugins.is_empty() {
            "None".to_string()
        } else {
            self.draft.plugins.join(", ")
        }
    }
}
