use crate::agent::{AgentDraft, CreateAgentRequest, build_create_request};
use crate::api::SuggestionField;
use crate::error::ValidationError;

use super::types::*;
use super::wizard::AgentWizard;

/// Shown when the backend rejects or never answers the create request
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create agent. Please try again.";

fn validate_basic(draft: &AgentDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    if draft.description.trim().is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }
    if !draft.clients.any_enabled() {
        return Err(ValidationError::ClientRequired);
    }
    Ok(())
}

fn validate_personality(draft: &AgentDraft) -> Result<(), ValidationError> {
    if draft.personality.trim().is_empty() {
        return Err(ValidationError::PersonalityRequired);
    }
    Ok(())
}

/// Check one step's rules against a draft. The first failing rule wins.
pub fn validate_step(draft: &AgentDraft, step: WizardStep) -> Result<(), ValidationError> {
    match step {
        WizardStep::Basic => validate_basic(draft),
        WizardStep::Personality => validate_personality(draft),
        WizardStep::Tokenize => Ok(()),
        WizardStep::Review => {
            validate_basic(draft)?;
            validate_personality(draft)
        }
    }
}

impl AgentWizard {
    /// Run the current step's validation, recording the failure message.
    pub fn validate_current_step(&mut self) -> bool {
        self.validation_error = None;
        match validate_step(&self.draft, self.step) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("[validate] step {} failed: {}", self.step.number(), e);
                self.validation_error = Some(e.to_string());
                false
            }
        }
    }

    fn set_step(&mut self, step: WizardStep) {
        tracing::debug!(
            "[nav] step {} → {}",
            self.step.number(),
            step.number()
        );
        self.step = step;
        self.focused_field = 0;
    }

    /// Advance to the next step. Tokenize is skipped going forward.
    pub fn next_step(&mut self) {
        // Creation is a separate operation
        if self.step == WizardStep::Review {
            return;
        }
        if !self.validate_current_step() {
            return;
        }
        let next = match self.step {
            WizardStep::Basic => WizardStep::Personality,
            WizardStep::Personality | WizardStep::Tokenize => WizardStep::Review,
            WizardStep::Review => return,
        };
        self.set_step(next);
    }

    /// Go back one step without validating. Review returns to Personality.
    pub fn prev_step(&mut self) {
        let prev = match self.step {
            WizardStep::Basic => return,
            WizardStep::Personality => WizardStep::Basic,
            WizardStep::Tokenize | WizardStep::Review => WizardStep::Personality,
        };
        self.set_step(prev);
    }

    /// Jump to a 1-based step number. Tokenize and out-of-range numbers are
    /// ignored.
    pub fn go_to_step(&mut self, n: usize) {
        match WizardStep::from_number(n) {
            Some(step) if step.is_selectable() => self.set_step(step),
            _ => tracing::debug!("[nav] ignoring jump to step {}", n),
        }
    }

    pub fn tokenize_go_back(&mut self) {
        if self.step == WizardStep::Tokenize {
            self.set_step(WizardStep::Personality);
        }
    }

    pub fn tokenize_skip_to_review(&mut self) {
        if self.step == WizardStep::Tokenize {
            self.set_step(WizardStep::Review);
        }
    }

    /// Validate the whole draft and hand back the request to send.
    ///
    /// Returns `None` off the review step, while a request is in flight, or
    /// when validation fails (the message lands in `validation_error`).
    pub fn request_create(&mut self) -> Option<CreateAgentRequest> {
        if self.step != WizardStep::Review || self.submission.is_pending() {
            return None;
        }
        if !self.validate_current_step() {
            return None;
        }
        self.submission = SubmissionStatus::Pending;
        tracing::info!("[create] submitting agent '{}'", self.draft.name);
        Some(build_create_request(&self.draft, &self.character_defaults))
    }

    /// Record the outcome of the create request. Ignored unless pending.
    pub fn finish_create(&mut self, result: Result<String, String>) {
        if !self.submission.is_pending() {
            return;
        }
        self.submission = match result {
            Ok(message) => {
                tracing::info!("[create] {}", message);
                SubmissionStatus::Created(message)
            }
            Err(err) => {
                tracing::error!("[create] failed: {}", err);
                SubmissionStatus::Failed(CREATE_FAILED_MESSAGE.to_string())
            }
        };
    }

    /// Mark a suggestion as in flight. False when suggestions are off or one
    /// is already running.
    pub fn begin_suggestion(&mut self, field: SuggestionField) -> bool {
        if !self.suggestions_enabled || self.suggestion.is_some() {
            return false;
        }
        self.suggestion = Some(field);
        self.status_message = None;
        true
    }

    /// Apply a suggestion response. Errors are shown inline and leave the
    /// draft untouched.
    pub fn apply_suggestion(&mut self, field: SuggestionField, result: Result<String, String>) {
        if self.suggestion != Some(field) {
            tracing::debug!("[suggest] dropping stale {} response", field.label());
            return;
        }
        self.suggestion = None;

        let text = match result {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("[suggest] {} failed: {}", field.label(), err);
                self.status_message = Some(format!("Could not generate {}", field.label()));
                return;
            }
        };

        match field {
            SuggestionField::Name => self.draft.name = text,
            SuggestionField::Description => self.draft.description = text,
            SuggestionField::Personality => self.draft.personality = text,
            SuggestionField::Topics => {
                self.draft.set_topics_from_csv(&text);
                self.topics_input = self.draft.topics.join("\n");
            }
        }
    }
}
