//! Wizard application state for the TUI loop.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::agent::CreateAgentRequest;
use crate::api::{AgentBackend, SuggestionClient, SuggestionField};
use crate::wizard::{AgentWizard, SubmissionStatus, WizardAction};

use super::events::{EventHandler, TuiEvent};

/// Owns the wizard and runs its network side effects
pub struct WizardApp {
    pub wizard: AgentWizard,
    pub should_quit: bool,

    backend: Arc<dyn AgentBackend>,
    suggester: Option<SuggestionClient>,
    events: EventHandler,
}

impl WizardApp {
    pub fn new(
        wizard: AgentWizard,
        backend: Arc<dyn AgentBackend>,
        suggester: Option<SuggestionClient>,
    ) -> Self {
        Self {
            wizard,
            should_quit: false,
            backend,
            suggester,
            events: EventHandler::new(),
        }
    }

    pub fn event_sender(&self) -> mpsc::UnboundedSender<TuiEvent> {
        self.events.sender()
    }

    pub async fn next_event(&mut self) -> Option<TuiEvent> {
        self.events.next().await
    }

    pub fn try_next_event(&mut self) -> Option<TuiEvent> {
        self.events.try_next()
    }

    /// Final submission state, read after the loop exits
    pub fn outcome(&self) -> &SubmissionStatus {
        &self.wizard.submission
    }

    pub fn handle_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key) => {
                let action = self.wizard.handle_key(key);
                self.dispatch(action);
            }
            TuiEvent::Paste(text) => self.wizard.handle_paste(&text),
            TuiEvent::AgentCreated(result) => self.wizard.finish_create(result),
            TuiEvent::SuggestionReady { field, result } => {
                self.wizard.apply_suggestion(field, result)
            }
            TuiEvent::Resize(..) | TuiEvent::Tick => {}
        }
    }

    fn dispatch(&mut self, action: WizardAction) {
        match action {
            WizardAction::None => {}
            WizardAction::Cancel => {
                tracing::debug!("[app] wizard cancelled");
                self.should_quit = true;
            }
            WizardAction::Complete => {
                tracing::debug!("[app] wizard complete");
                self.should_quit = true;
            }
            WizardAction::Create(request) => self.spawn_create(*request),
            WizardAction::Suggest(field) => self.spawn_suggestion(field),
        }
    }

    fn spawn_create(&self, request: CreateAgentRequest) {
        let backend = Arc::clone(&self.backend);
        let sender = self.event_sender();
        tokio::spawn(async move {
            let result = backend
                .create_agent(&request)
                .await
                .map(|created| created.summary(&request.name))
                .map_err(|e| e.to_string());
            let _ = sender.send(TuiEvent::AgentCreated(result));
        });
    }

    fn spawn_suggestion(&mut self, field: SuggestionField) {
        let Some(client) = self.suggester.clone() else {
            self.wizard
                .apply_suggestion(field, Err("no suggestion endpoint configured".to_string()));
            return;
        };
        let draft = self.wizard.draft.clone();
        let sender = self.event_sender();
        tokio::spawn(async move {
            let result = client
                .suggest(field, &draft)
                .await
                .map_err(|e| e.to_string());
            let _ = sender.send(TuiEvent::SuggestionReady { field, result });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CreatedAgent, MockAgentBackend};
    use crate::error::ApiError;
    use crate::wizard::{CREATE_FAILED_MESSAGE, WizardStep};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use serde_json::json;

    fn key(code: KeyCode) -> TuiEvent {
        TuiEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn review_wizard() -> AgentWizard {
        let mut wizard = AgentWizard::default();
        wizard.draft.name = "AlphaTrader".to_string();
        wizard.draft.description = "Crypto desk".to_string();
        wizard.draft.personality = "Focuses on forex.".to_string();
        wizard.go_to_step(4);
        wizard
    }

    #[tokio::test]
    async fn test_create_success_reports_back() {
        let mut backend = MockAgentBackend::new();
        backend
            .expect_create_agent()
            .withf(|req| req.name == "AlphaTrader")
            .times(1)
            .returning(|_| {
                Ok(CreatedAgent {
                    body: json!({"id": "agent-1"}),
                })
            });

        let mut app = WizardApp::new(review_wizard(), Arc::new(backend), None);
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(app.wizard.submission, SubmissionStatus::Pending);

        let event = app.next_event().await.expect("event");
        app.handle_event(event);
        assert_eq!(
            app.outcome(),
            &SubmissionStatus::Created("Agent 'AlphaTrader' created (id: agent-1)".to_string())
        );

        app.handle_event(key(KeyCode::Enter));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_create_failure_allows_retry() {
        let mut backend = MockAgentBackend::new();
        backend.expect_create_agent().times(2).returning(|_| {
            Err(ApiError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        });

        let mut app = WizardApp::new(review_wizard(), Arc::new(backend), None);
        for _ in 0..2 {
            app.handle_event(key(KeyCode::Enter));
            let event = app.next_event().await.expect("event");
            app.handle_event(event);
            assert_eq!(
                app.outcome(),
                &SubmissionStatus::Failed(CREATE_FAILED_MESSAGE.to_string())
            );
        }
        assert!(!app.should_quit);
        assert_eq!(app.wizard.step, WizardStep::Review);
    }

    #[tokio::test]
    async fn test_suggestion_without_client_fails_inline() {
        let backend = MockAgentBackend::new();
        let mut app = WizardApp::new(AgentWizard::default(), Arc::new(backend), None);
        app.handle_event(TuiEvent::Key(KeyEvent::new(
            KeyCode::Char('s'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.wizard.suggestion.is_none());
        assert_eq!(
            app.wizard.status_message.as_deref(),
            Some("Could not generate name")
        );
        assert!(app.wizard.draft.name.is_empty());
    }

    #[tokio::test]
    async fn test_escape_on_first_step_quits() {
        let backend = MockAgentBackend::new();
        let mut app = WizardApp::new(AgentWizard::default(), Arc::new(backend), None);
        app.handle_event(key(KeyCode::Esc));
        assert!(app.should_quit);
        assert_eq!(app.outcome(), &SubmissionStatus::Idle);
    }
}
