use crate::agent::{BUILTIN_PLUGINS, ClientKind, CreateAgentRequest, MemoryFlag};
use crate::api::SuggestionField;

/// Current step in the creation wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Basic,
    Personality,
    Tokenize,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        Self::Basic,
        Self::Personality,
        Self::Tokenize,
        Self::Review,
    ];

    /// Step number (1-based)
    pub fn number(&self) -> usize {
        match self {
            Self::Basic => 1,
            Self::Personality => 2,
            Self::Tokenize => 3,
            Self::Review => 4,
        }
    }

    pub fn from_number(n: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    pub fn total() -> usize {
        4
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Basic => "Basic Information",
            Self::Personality => "Personality & Knowledge",
            Self::Tokenize => "Tokenize",
            Self::Review => "Review & Create",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::Basic => "Set up the basic details and integrations for your trading agent",
            Self::Personality => "Define your agent's personality and knowledge areas",
            Self::Tokenize => "Configure your agent's ticker symbol and tokenization settings",
            Self::Review => "Review your agent's configuration and create it",
        }
    }

    /// Tokenize is shown but not reachable by direct jumps
    pub fn is_selectable(&self) -> bool {
        *self != Self::Tokenize
    }
}

/// A focusable slot on the current screen.
///
/// Focus is positional: the same memory flag can appear twice (step 2 and
/// the advanced panel) as two distinct slots editing the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Ticker,
    Description,
    Picture,
    Client(ClientKind),
    Personality,
    Topics,
    Memory(MemoryFlag),
    AdvancedMemory(MemoryFlag),
    /// Index into `BUILTIN_PLUGINS`
    Plugin(usize),
    /// Index into the draft's custom plugins
    CustomPlugin(usize),
    CustomPluginInput,
    Create,
}

impl Field {
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::Name
                | Self::Ticker
                | Self::Description
                | Self::Picture
                | Self::Personality
                | Self::Topics
                | Self::CustomPluginInput
        )
    }

    /// Multi-line fields take Enter as a newline
    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::Personality | Self::Topics)
    }

    /// Fields that have a suggest shortcut
    pub fn suggestion(&self) -> Option<SuggestionField> {
        match self {
            Self::Name => Some(SuggestionField::Name),
            Self::Description => Some(SuggestionField::Description),
            Self::Personality => Some(SuggestionField::Personality),
            Self::Topics => Some(SuggestionField::Topics),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Name => "Agent Name".to_string(),
            Self::Ticker => "Ticker".to_string(),
            Self::Description => "Description".to_string(),
            Self::Picture => "Picture (image path)".to_string(),
            Self::Client(kind) => kind.label().to_string(),
            Self::Personality => "Personality".to_string(),
            Self::Topics => "Topics (one per line)".to_string(),
            Self::Memory(flag) | Self::AdvancedMemory(flag) => flag.label().to_string(),
            Self::Plugin(i) => BUILTIN_PLUGINS
                .get(*i)
                .map(|(_, label)| label.to_string())
                .unwrap_or_default(),
            Self::CustomPlugin(_) => "Custom plugin".to_string(),
            Self::CustomPluginInput => "Add plugin".to_string(),
            Self::Create => "Create Agent".to_string(),
        }
    }
}

/// Lifecycle of the create request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Pending,
    Created(String),
    Failed(String),
}

impl SubmissionStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// What the app should do after handling a wizard key event
#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    /// Nothing special
    None,
    /// User left the wizard without creating anything
    Cancel,
    /// Agent was created and the user dismissed the confirmation
    Complete,
    /// Spawn the create request
    Create(Box<CreateAgentRequest>),
    /// Spawn a suggestion request for this field
    Suggest(SuggestionField),
}
