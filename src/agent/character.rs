//! Character document and agent-creation request assembly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::draft::{AgentDraft, ClientKind};
use super::personality::parse_personality;

/// Model settings that are not editable in the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterDefaults {
    pub model_provider: String,
    pub model: String,
}

impl Default for CharacterDefaults {
    fn default() -> Self {
        Self {
            model_provider: "openrouter".to_string(),
            model: "openai/gpt-4o-mini".to_string(),
        }
    }
}

/// Body of `POST /api/agents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentRequest {
    pub template_name: String,
    pub name: String,
    pub description: String,
    pub character: CharacterDocument,
    pub tokenization: Tokenization,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterDocument {
    pub name: String,
    pub model_provider: String,
    pub clients: Vec<String>,
    pub plugins: Vec<String>,
    pub settings: CharacterSettings,
    pub system: String,
    pub lore: Vec<String>,
    pub topics: Vec<String>,
    pub adjectives: Vec<String>,
    pub bio: Vec<String>,
    pub message_examples: Vec<Vec<MessageExample>>,
    pub post_examples: Vec<String>,
    pub style: CharacterStyle,
    pub memory_settings: MemorySettingsDoc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSettings {
    pub rag_knowledge: bool,
    pub secrets: Map<String, Value>,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageExample {
    pub user: String,
    pub content: MessageContent,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterStyle {
    pub all: Vec<String>,
    pub chat: Vec<String>,
    pub post: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySettingsDoc {
    pub enable_rag_knowledge: bool,
    pub enable_lore_memory: bool,
    pub enable_description_memory: bool,
    pub enable_documents_memory: bool,
}

/// Tokenization is not offered yet; every request carries this disabled block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tokenization {
    pub enabled: bool,
    pub initial_supply: u64,
    pub distribution: TokenDistribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDistribution {
    pub creator: u8,
    pub liquidity_pool: u8,
}

impl Tokenization {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            initial_supply: 1_000_000,
            distribution: TokenDistribution {
                creator: 20,
                liquidity_pool: 80,
            },
        }
    }
}

/// Platform ids for the character. Direct chat is always listed first,
/// whatever the draft's `direct` flag says.
pub fn active_clients(draft: &AgentDraft) -> Vec<String> {
    let mut clients = vec![ClientKind::Direct.id().to_string()];
    for kind in [
        ClientKind::Discord,
        ClientKind::Twitter,
        ClientKind::Telegram,
        ClientKind::Slack,
        ClientKind::SimsAi,
    ] {
        if draft.clients.get(kind) {
            clients.push(kind.id().to_string());
        }
    }
    clients
}

/// Build the character document for a draft.
pub fn build_character(draft: &AgentDraft, defaults: &CharacterDefaults) -> CharacterDocument {
    // Manually entered topics are for editing only; the parser decides
    let profile = parse_personality(&draft.personality);

    let mut bio = vec![draft.description.clone()];
    bio.extend(draft.personality_lines().map(str::to_string));

    let chat_style: Vec<String> = draft
        .personality_lines()
        .map(|l| l.trim().to_string())
        .collect();

    let first_line = draft
        .personality
        .split('\n')
        .next()
        .filter(|l| !l.is_empty())
        .unwrap_or("technical analysis");

    CharacterDocument {
        name: draft.name.clone(),
        model_provider: defaults.model_provider.clone(),
        clients: active_clients(draft),
        plugins: draft.plugins.clone(),
        settings: CharacterSettings {
            rag_knowledge: draft.memory_settings.enable_rag_knowledge,
            secrets: Map::new(),
            model: defaults.model.clone(),
        },
        system: format!(
            "You are {}. {}\n\nPersonality: {}",
            draft.name, draft.description, draft.personality
        ),
        lore: profile.lore,
        topics: profile.topics,
        adjectives: profile.adjectives,
        bio,
        message_examples: vec![vec![MessageExample {
            user: "user1".to_string(),
            content: MessageContent {
                text: "What's your trading strategy?".to_string(),
            },
            response: format!("As {}, I {}", draft.name, draft.description),
        }]],
        post_examples: vec![
            format!(
                "{} analyzing market trends: {}",
                draft.name, draft.description
            ),
            format!(
                "Trading update from {}: Market analysis based on {}",
                draft.name, first_line
            ),
        ],
        style: CharacterStyle {
            all: Vec::new(),
            chat: chat_style,
            post: Vec::new(),
        },
        memory_settings: MemorySettingsDoc {
            enable_rag_knowledge: draft.memory_settings.enable_rag_knowledge,
            enable_lore_memory: draft.memory_settings.enable_lore_memory,
            enable_description_memory: draft.memory_settings.enable_description_memory,
            enable_documents_memory: draft.memory_settings.enable_documents_memory,
        },
    }
}

/// Assemble the full creation request. Tokenization fields on the draft are
/// ignored.
pub fn build_create_request(
    draft: &AgentDraft,
    defaults: &CharacterDefaults,
) -> CreateAgentRequest {
    CreateAgentRequest {
        template_name: draft.template_name.clone(),
        name: draft.name.clone(),
        description: draft.description.clone(),
        character: build_character(draft, defaults),
        tokenization: Tokenization::disabled(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_draft() -> AgentDraft {
        AgentDraft {
            name: "AlphaTrader".to_string(),
            description: "trade crypto".to_string(),
            personality: "Analytical and data-driven.\n\n  Specializes in Bitcoin. ".to_string(),
            ..AgentDraft::default()
        }
    }

    #[test]
    fn test_tokenization_always_disabled_placeholder() {
        let mut draft = sample_draft();
        draft.initial_token_supply = 7_654_321;
        draft.creator_share = 35;
        draft.liquidity_share = 65;

        let request = build_create_request(&draft, &CharacterDefaults::default());
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value["tokenization"],
            json!({
                "enabled": false,
                "initialSupply": 1000000,
                "distribution": { "creator": 20, "liquidityPool": 80 }
            })
        );
    }

    #[test]
    fn test_direct_always_first_even_when_unchecked() {
        let mut draft = sample_draft();
        draft.clients.direct = false;
        draft.clients.telegram = true;
        draft.clients.discord = true;
        draft.clients.twitter = true;
        assert_eq!(
            active_clients(&draft),
            vec!["direct", "discord", "twitter", "telegram"]
        );
    }

    #[test]
    fn test_direct_not_duplicated() {
        let draft = sample_draft();
        assert_eq!(active_clients(&draft), vec!["direct"]);
    }

    #[test]
    fn test_character_shape() {
        let mut draft = sample_draft();
        draft.plugins = vec!["news".to_string(), "custom-x".to_string()];
        draft.memory_settings.enable_rag_knowledge = true;

        let request = build_create_request(&draft, &CharacterDefaults::default());
        let value = serde_json::to_value(&request).expect("serialize");

        assert_eq!(value["templateName"], "trading-agent");
        assert_eq!(value["name"], "AlphaTrader");
        let character = &value["character"];
        assert_eq!(character["modelProvider"], "openrouter");
        assert_eq!(character["plugins"], json!(["news", "custom-x"]));
        assert_eq!(
            character["settings"],
            json!({ "ragKnowledge": true, "secrets": {}, "model": "openai/gpt-4o-mini" })
        );
        assert_eq!(
            character["system"],
            "You are AlphaTrader. trade crypto\n\nPersonality: Analytical and data-driven.\n\n  Specializes in Bitcoin. "
        );
        assert_eq!(
            character["bio"],
            json!(["trade crypto", "Analytical and data-driven.", "  Specializes in Bitcoin. "])
        );
        assert_eq!(
            character["style"]["chat"],
            json!(["Analytical and data-driven.", "Specializes in Bitcoin."])
        );
        assert_eq!(
            character["messageExamples"][0][0]["response"],
            "As AlphaTrader, I trade crypto"
        );
        assert_eq!(
            character["postExamples"][1],
            "Trading update from AlphaTrader: Market analysis based on Analytical and data-driven."
        );
        assert_eq!(character["memorySettings"]["enableRagKnowledge"], true);
        assert_eq!(character["memorySettings"]["enableLoreMemory"], true);
        assert!(character["lore"].is_array());
        assert!(character["adjectives"].is_array());
    }

    #[test]
    fn test_post_example_falls_back_without_personality() {
        let draft = AgentDraft {
            name: "X".to_string(),
            ..AgentDraft::default()
        };
        let character = build_character(&draft, &CharacterDefaults::default());
        assert_eq!(
            character.post_examples[1],
            "Trading update from X: Market analysis based on technical analysis"
        );
        assert_eq!(character.bio, vec![String::new()]);
    }

    #[test]
    fn test_manual_topics_do_not_reach_payload() {
        let mut draft = AgentDraft {
            name: "Fx".to_string(),
            description: "Desk".to_string(),
            personality: "Specializes in forex. Calm".to_string(),
            ..AgentDraft::default()
        };
        let parsed = build_character(&draft, &CharacterDefaults::default());

        draft.set_topics_from_lines("Gardening");
        let manual = build_character(&draft, &CharacterDefaults::default());
        assert_eq!(manual.topics, vec!["Specializes in forex"]);
        assert_eq!(manual, parsed);
    }
}
