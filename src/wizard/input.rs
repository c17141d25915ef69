use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::Path;

use crate::agent::BUILTIN_PLUGINS;

use super::types::*;
use super::wizard::AgentWizard;

impl AgentWizard {
    /// Handle key events for the current step
    /// Returns `WizardAction` indicating what the app should do
    pub fn handle_key(&mut self, event: KeyEvent) -> WizardAction {
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return self.handle_shortcut(event);
        }

        match event.code {
            KeyCode::Esc => {
                if self.step == WizardStep::Basic {
                    return WizardAction::Cancel;
                }
                self.prev_step();
                return WizardAction::None;
            }
            KeyCode::F(n) => {
                self.go_to_step(n as usize);
                return WizardAction::None;
            }
            KeyCode::Tab => {
                self.focus_next();
                return WizardAction::None;
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return WizardAction::None;
            }
            _ => {}
        }

        match self.step {
            WizardStep::Tokenize => self.handle_tokenize_key(event),
            _ => self.handle_field_key(event),
        }
    }

    fn handle_shortcut(&mut self, event: KeyEvent) -> WizardAction {
        match event.code {
            KeyCode::Char('c') | KeyCode::Char('q') => WizardAction::Cancel,
            KeyCode::Char('n') => {
                self.next_step();
                WizardAction::None
            }
            KeyCode::Char('g') => {
                self.randomize_draft();
                WizardAction::None
            }
            KeyCode::Char('t') => {
                self.toggle_advanced();
                WizardAction::None
            }
            KeyCode::Char('s') => self.suggest_focused(),
            _ => WizardAction::None,
        }
    }

    fn suggest_focused(&mut self) -> WizardAction {
        let Some(field) = self.focused().and_then(|f| f.suggestion()) else {
            return WizardAction::None;
        };
        if self.begin_suggestion(field) {
            tracing::debug!("[suggest] requesting {}", field.label());
            WizardAction::Suggest(field)
        } else {
            WizardAction::None
        }
    }

    fn handle_tokenize_key(&mut self, event: KeyEvent) -> WizardAction {
        match event.code {
            KeyCode::Char('b') | KeyCode::Left => self.tokenize_go_back(),
            KeyCode::Char('s') | KeyCode::Right | KeyCode::Enter => {
                self.tokenize_skip_to_review()
            }
            // Advanced panel toggles stay usable here
            _ => return self.handle_field_key(event),
        }
        WizardAction::None
    }

    fn handle_field_key(&mut self, event: KeyEvent) -> WizardAction {
        let Some(field) = self.focused() else {
            if event.code == KeyCode::Enter {
                self.next_step();
            }
            return WizardAction::None;
        };

        if field.is_text() {
            self.handle_text_key(field, event);
            return WizardAction::None;
        }

        match (field, event.code) {
            (Field::Create, KeyCode::Enter) => return self.handle_create(),
            (Field::Client(kind), KeyCode::Char(' ')) => self.draft.toggle_client(kind),
            (Field::Memory(flag) | Field::AdvancedMemory(flag), KeyCode::Char(' ')) => {
                self.draft.toggle_memory(flag)
            }
            (Field::Plugin(i), KeyCode::Char(' ')) => {
                if let Some((id, _)) = BUILTIN_PLUGINS.get(i) {
                    self.draft.toggle_plugin(id);
                }
            }
            (
                Field::CustomPlugin(i),
                KeyCode::Char(' ') | KeyCode::Delete | KeyCode::Backspace,
            ) => {
                let id = self.draft.custom_plugins().nth(i).map(str::to_string);
                if let Some(id) = id {
                    self.draft.remove_plugin(&id);
                    self.clamp_focus();
                }
            }
            (_, KeyCode::Enter) => self.next_step(),
            (_, KeyCode::Up) => self.focus_prev(),
            (_, KeyCode::Down) => self.focus_next(),
            _ => {}
        }
        WizardAction::None
    }

    fn handle_create(&mut self) -> WizardAction {
        match self.submission {
            SubmissionStatus::Created(_) => WizardAction::Complete,
            SubmissionStatus::Pending => WizardAction::None,
            SubmissionStatus::Idle | SubmissionStatus::Failed(_) => match self.request_create() {
                Some(request) => WizardAction::Create(Box::new(request)),
                None => WizardAction::None,
            },
        }
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.draft.name),
            Field::Ticker => Some(&mut self.draft.ticker),
            Field::Description => Some(&mut self.draft.description),
            Field::Picture => Some(&mut self.picture_input),
            Field::Personality => Some(&mut self.draft.personality),
            Field::Topics => Some(&mut self.topics_input),
            Field::CustomPluginInput => Some(&mut self.custom_plugin_input),
            _ => None,
        }
    }

    fn handle_text_key(&mut self, field: Field, event: KeyEvent) {
        match event.code {
            KeyCode::Char(c) => {
                if let Some(text) = self.text_mut(field) {
                    text.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(text) = self.text_mut(field) {
                    text.pop();
                }
            }
            KeyCode::Enter if field.is_multiline() => {
                if let Some(text) = self.text_mut(field) {
                    text.push('\n');
                }
            }
            KeyCode::Enter => match field {
                Field::Picture => self.load_picture_input(),
                Field::CustomPluginInput => self.add_custom_plugin_input(),
                _ => self.focus_next(),
            },
            KeyCode::Up if field.is_multiline() => self.focus_prev(),
            KeyCode::Down if field.is_multiline() => self.focus_next(),
            _ => {}
        }
        if field == Field::Topics {
            self.sync_topics();
        }
    }

    /// Handle paste event. Multi-line fields keep newlines, the rest take
    /// the first line only.
    pub fn handle_paste(&mut self, text: &str) {
        let Some(field) = self.focused().filter(Field::is_text) else {
            return;
        };

        let clean = if field.is_multiline() {
            text.replace('\r', "")
        } else {
            text.split(['\r', '\n'])
                .next()
                .unwrap_or("")
                .trim()
                .to_string()
        };
        if clean.is_empty() {
            return;
        }

        tracing::debug!("[paste] {:?} pasted ({} chars)", field, clean.len());
        if let Some(target) = self.text_mut(field) {
            target.push_str(&clean);
        }
        if field == Field::Topics {
            self.sync_topics();
        }
    }

    fn sync_topics(&mut self) {
        let input = std::mem::take(&mut self.topics_input);
        self.draft.set_topics_from_lines(&input);
        self.topics_input = input;
    }

    fn load_picture_input(&mut self) {
        let path = self.picture_input.trim().to_string();
        if path.is_empty() {
            self.focus_next();
            return;
        }
        match self.draft.load_picture(Path::new(&path)) {
            Ok(()) => {
                self.status_message = Some("Picture loaded".to_string());
                self.picture_input.clear();
            }
            Err(e) => {
                tracing::warn!("[picture] {:#}", e);
                self.status_message = Some(e.to_string());
            }
        }
    }

    fn add_custom_plugin_input(&mut self) {
        let id = self.custom_plugin_input.trim().to_string();
        if self.draft.add_custom_plugin(&id) {
            tracing::debug!("[plugins] added custom plugin '{}'", id);
            self.custom_plugin_input.clear();
            // The new entry is listed just above the input box
            self.focused_field += 1;
        }
    }
}
