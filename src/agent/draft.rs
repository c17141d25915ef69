//! The in-progress agent configuration edited by the wizard.

use serde::{Deserialize, Serialize};

/// Placeholder image shown until the user uploads a picture.
pub const DEFAULT_PICTURE: &str = "https://source.unsplash.com/random/300x300/?robot,ai";

/// Plugins offered as one-key toggles in the advanced panel.
pub const BUILTIN_PLUGINS: &[(&str, &str)] = &[
    ("search", "Web Search"),
    ("weather", "Weather"),
    ("calendar", "Calendar"),
    ("news", "News"),
    ("crypto", "Crypto Prices"),
    ("stocks", "Stock Prices"),
];

/// Chat/social platform integrations an agent can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientKind {
    Discord,
    Telegram,
    Twitter,
    Slack,
    Direct,
    SimsAi,
}

impl ClientKind {
    /// Display order on the basic step
    pub const ALL: [ClientKind; 6] = [
        Self::Discord,
        Self::Twitter,
        Self::Telegram,
        Self::Slack,
        Self::Direct,
        Self::SimsAi,
    ];

    /// Identifier used in the character document
    pub fn id(&self) -> &'static str {
        match self {
            Self::Discord => "discord",
            Self::Telegram => "telegram",
            Self::Twitter => "twitter",
            Self::Slack => "slack",
            Self::Direct => "direct",
            Self::SimsAi => "simsai",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Discord => "Discord",
            Self::Telegram => "Telegram",
            Self::Twitter => "Twitter/X",
            Self::Slack => "Slack",
            Self::Direct => "Direct Chat",
            Self::SimsAi => "SimsAI",
        }
    }
}

/// Per-platform enable flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientFlags {
    pub discord: bool,
    pub telegram: bool,
    pub twitter: bool,
    pub slack: bool,
    pub direct: bool,
    pub simsai: bool,
}

impl Default for ClientFlags {
    fn default() -> Self {
        Self {
            discord: false,
            telegram: false,
            twitter: false,
            slack: false,
            direct: true,
            simsai: false,
        }
    }
}

impl ClientFlags {
    pub fn get(&self, kind: ClientKind) -> bool {
        match kind {
            ClientKind::Discord => self.discord,
            ClientKind::Telegram => self.telegram,
            ClientKind::Twitter => self.twitter,
            ClientKind::Slack => self.slack,
            ClientKind::Direct => self.direct,
            ClientKind::SimsAi => self.simsai,
        }
    }

    pub fn set(&mut self, kind: ClientKind, enabled: bool) {
        let slot = match kind {
            ClientKind::Discord => &mut self.discord,
            ClientKind::Telegram => &mut self.telegram,
            ClientKind::Twitter => &mut self.twitter,
            ClientKind::Slack => &mut self.slack,
            ClientKind::Direct => &mut self.direct,
            ClientKind::SimsAi => &mut self.simsai,
        };
        *slot = enabled;
    }

    pub fn any_enabled(&self) -> bool {
        ClientKind::ALL.iter().any(|k| self.get(*k))
    }

    /// Enabled platform ids in declaration order (discord, telegram, twitter,
    /// slack, direct, simsai).
    pub fn enabled_ids(&self) -> Vec<&'static str> {
        [
            ClientKind::Discord,
            ClientKind::Telegram,
            ClientKind::Twitter,
            ClientKind::Slack,
            ClientKind::Direct,
            ClientKind::SimsAi,
        ]
        .into_iter()
        .filter(|k| self.get(*k))
        .map(|k| k.id())
        .collect()
    }
}

/// Memory features toggled on the personality step and the advanced panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryFlag {
    RagKnowledge,
    LoreMemory,
    DescriptionMemory,
    DocumentsMemory,
}

impl MemoryFlag {
    pub const ALL: [MemoryFlag; 4] = [
        Self::RagKnowledge,
        Self::LoreMemory,
        Self::DescriptionMemory,
        Self::DocumentsMemory,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::RagKnowledge => "Enable RAG Knowledge",
            Self::LoreMemory => "Enable Lore Memory",
            Self::DescriptionMemory => "Enable Description Memory",
            Self::DocumentsMemory => "Enable Documents Memory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemorySettings {
    pub enable_rag_knowledge: bool,
    pub enable_lore_memory: bool,
    pub enable_description_memory: bool,
    pub enable_documents_memory: bool,
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self {
            enable_rag_knowledge: false,
            enable_lore_memory: true,
            enable_description_memory: true,
            enable_documents_memory: false,
        }
    }
}

impl MemorySettings {
    pub fn get(&self, flag: MemoryFlag) -> bool {
        match flag {
            MemoryFlag::RagKnowledge => self.enable_rag_knowledge,
            MemoryFlag::LoreMemory => self.enable_lore_memory,
            MemoryFlag::DescriptionMemory => self.enable_description_memory,
            MemoryFlag::DocumentsMemory => self.enable_documents_memory,
        }
    }

    pub fn toggle(&mut self, flag: MemoryFlag) {
        let slot = match flag {
            MemoryFlag::RagKnowledge => &mut self.enable_rag_knowledge,
            MemoryFlag::LoreMemory => &mut self.enable_lore_memory,
            MemoryFlag::DescriptionMemory => &mut self.enable_description_memory,
            MemoryFlag::DocumentsMemory => &mut self.enable_documents_memory,
        };
        *slot = !*slot;
    }
}

/// Everything the user has entered so far.
///
/// Deserializes with defaults for every omitted field so a draft file only
/// needs the values it cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentDraft {
    pub name: String,
    pub description: String,
    pub ticker: String,
    pub personality: String,
    pub picture: String,
    pub topics: Vec<String>,
    pub clients: ClientFlags,
    pub template_name: String,
    pub memory_settings: MemorySettings,
    pub plugins: Vec<String>,

    // Editable through "Generate Random" only; the request always carries
    // the fixed disabled tokenization block.
    pub initial_token_supply: u64,
    pub creator_share: u8,
    pub liquidity_share: u8,
}

impl Default for AgentDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            ticker: String::new(),
            personality: String::new(),
            picture: DEFAULT_PICTURE.to_string(),
            topics: Vec::new(),
            clients: ClientFlags::default(),
            template_name: "trading-agent".to_string(),
            memory_settings: MemorySettings::default(),
            plugins: Vec::new(),
            initial_token_supply: 1_000_000,
            creator_share: 20,
            liquidity_share: 80,
        }
    }
}

impl AgentDraft {
    pub fn with_template(template_name: impl Into<String>) -> Self {
        Self {
            template_name: template_name.into(),
            ..Self::default()
        }
    }

    pub fn toggle_client(&mut self, kind: ClientKind) {
        let enabled = !self.clients.get(kind);
        tracing::debug!("[draft] client '{}' → {}", kind.id(), enabled);
        self.clients.set(kind, enabled);
    }

    pub fn toggle_memory(&mut self, flag: MemoryFlag) {
        self.memory_settings.toggle(flag);
    }

    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.iter().any(|p| p == id)
    }

    /// Flip a plugin on or off, keeping insertion order for the rest.
    pub fn toggle_plugin(&mut self, id: &str) {
        if self.has_plugin(id) {
            self.remove_plugin(id);
        } else {
            self.plugins.push(id.to_string());
        }
    }

    /// Add a user-supplied plugin id. Returns false for blank or duplicate ids.
    pub fn add_custom_plugin(&mut self, id: &str) -> bool {
        if id.is_empty() || self.has_plugin(id) {
            return false;
        }
        self.plugins.push(id.to_string());
        true
    }

    pub fn remove_plugin(&mut self, id: &str) {
        self.plugins.retain(|p| p != id);
    }

    /// Plugins in the draft that are not one of the built-in toggles
    pub fn custom_plugins(&self) -> impl Iterator<Item = &str> {
        self.plugins
            .iter()
            .map(String::as_str)
            .filter(|p| !BUILTIN_PLUGINS.iter().any(|(id, _)| id == p))
    }

    /// Manual topic entry: one topic per line, blank lines dropped.
    pub fn set_topics_from_lines(&mut self, text: &str) {
        self.topics = text
            .split('\n')
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
            .collect();
    }

    /// Suggested topics arrive as a comma-separated list.
    pub fn set_topics_from_csv(&mut self, text: &str) {
        self.topics = text
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
    }

    /// Non-blank personality lines, untrimmed.
    pub fn personality_lines(&self) -> impl Iterator<Item = &str> {
        self.personality.split('\n').filter(|l| !l.trim().is_empty())
    }
}
