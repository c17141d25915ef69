//! Personality text → character lore/topics/adjectives.
//!
//! A keyword heuristic, not NLP: the text is cut into sentences on `.`, and
//! each sentence is classified by case-insensitive *substring* matching
//! against two ordered keyword lists. Short linking words such as "is" are
//! in the adjective list, so any sentence containing those letters counts as
//! an adjective sentence.

use serde::{Deserialize, Serialize};

/// Phrases that mark a sentence as describing what the agent knows about.
pub const TOPIC_KEYWORDS: &[&str] = &[
    "specializes in",
    "expertise in",
    "focus on",
    "knowledge of",
    "skilled in",
    "specializing in",
    "expert in",
    "focuses on",
    "familiar with",
    "proficient in",
    "trading",
    "market",
    "analysis",
    "strategy",
    "investment",
    "risk",
    "technical",
    "fundamental",
    "cryptocurrency",
    "forex",
    "stocks",
    "options",
    "commodities",
];

/// Phrases that mark a sentence as describing how the agent behaves.
pub const ADJECTIVE_KEYWORDS: &[&str] = &[
    "is",
    "approach is",
    "style is",
    "personality is",
    "character is",
    "analytical",
    "conservative",
    "aggressive",
    "balanced",
    "methodical",
    "cautious",
    "risk-averse",
    "risk-taking",
    "data-driven",
    "intuitive",
    "technical",
    "fundamental",
    "quantitative",
    "qualitative",
];

pub const DEFAULT_TOPICS: [&str; 3] = ["trading", "market analysis", "investment strategies"];
pub const DEFAULT_ADJECTIVES: [&str; 3] = ["analytical", "data-driven", "strategic"];
pub const EMPTY_INPUT_LORE: &str = "A trading agent focused on market analysis";
pub const FALLBACK_LORE: &str =
    "A trading agent specializing in market analysis and strategic investment decisions";

/// Structured character fields derived from free-form personality text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub lore: Vec<String>,
    pub topics: Vec<String>,
    pub adjectives: Vec<String>,
}

impl PersonalityProfile {
    fn defaults() -> Self {
        Self {
            lore: vec![EMPTY_INPUT_LORE.to_string()],
            topics: owned(&DEFAULT_TOPICS),
            adjectives: owned(&DEFAULT_ADJECTIVES),
        }
    }
}

/// Split personality text into lore, topic and adjective sentences.
///
/// Topic matching runs first; a sentence that matches a topic keyword is not
/// considered for adjectives. Each list keeps first-occurrence order, drops
/// duplicate sentences, and falls back to fixed defaults when empty.
pub fn parse_personality(personality: &str) -> PersonalityProfile {
    if personality.is_empty() {
        return PersonalityProfile::defaults();
    }

    let mut topics: Vec<String> = Vec::new();
    let mut adjectives: Vec<String> = Vec::new();
    let mut lore: Vec<String> = Vec::new();

    for sentence in personality.split('.').filter(|s| !s.trim().is_empty()) {
        let lower = sentence.to_lowercase();
        let trimmed = sentence.trim();

        if matches_any(&lower, TOPIC_KEYWORDS) {
            push_unique(&mut topics, trimmed);
        } else if matches_any(&lower, ADJECTIVE_KEYWORDS) {
            push_unique(&mut adjectives, trimmed);
        } else {
            lore.push(trimmed.to_string());
        }
    }

    if topics.is_empty() {
        topics = owned(&DEFAULT_TOPICS);
    }
    if adjectives.is_empty() {
        adjectives = owned(&DEFAULT_ADJECTIVES);
    }
    if lore.is_empty() {
        lore.push(FALLBACK_LORE.to_string());
    }

    tracing::debug!(
        "[personality] topics={} adjectives={} lore={}",
        topics.len(),
        adjectives.len(),
        lore.len()
    );

    PersonalityProfile {
        lore,
        topics,
        adjectives,
    }
}

fn matches_any(lower_sentence: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lower_sentence.contains(k))
}

fn push_unique(list: &mut Vec<String>, sentence: &str) {
    if !list.iter().any(|s| s == sentence) {
        list.push(sentence.to_string());
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_returns_defaults() {
        let profile = parse_personality("");
        assert_eq!(profile.lore, vec![EMPTY_INPUT_LORE]);
        assert_eq!(profile.topics, DEFAULT_TOPICS);
        assert_eq!(profile.adjectives, DEFAULT_ADJECTIVES);
    }

    #[test]
    fn test_partitions_topic_adjective_lore() {
        let profile = parse_personality(
            "I specialize in technical analysis. I am analytical. The sky looks blue.",
        );
        assert_eq!(profile.topics, vec!["I specialize in technical analysis"]);
        assert_eq!(profile.adjectives, vec!["I am analytical"]);
        assert_eq!(profile.lore, vec!["The sky looks blue"]);
    }

    #[test]
    fn test_linking_word_is_matches_as_substring() {
        // "is" matches inside "sky is" and even inside words like "this"
        let profile = parse_personality(
            "I specialize in technical analysis. I am analytical. The sky is blue.",
        );
        assert_eq!(profile.topics, vec!["I specialize in technical analysis"]);
        assert_eq!(profile.adjectives, vec!["I am analytical", "The sky is blue"]);
        assert_eq!(profile.lore, vec![FALLBACK_LORE]);

        let profile = parse_personality("This sounds great");
        assert_eq!(profile.adjectives, vec!["This sounds great"]);
    }

    #[test]
    fn test_topic_match_excludes_adjectives() {
        // "technical" is in both keyword lists
        let profile = parse_personality("Technical and methodical. Loves the sea.");
        assert_eq!(profile.topics, vec!["Technical and methodical"]);
        assert_eq!(profile.adjectives, DEFAULT_ADJECTIVES);
        assert_eq!(profile.lore, vec!["Loves the sea"]);
    }

    #[test]
    fn test_duplicate_sentences_suppressed() {
        let profile = parse_personality("Trading all day. Trading all day.  Trading all day. ");
        assert_eq!(profile.topics, vec!["Trading all day"]);
        assert_eq!(profile.lore, vec![FALLBACK_LORE]);
    }

    #[test]
    fn test_case_insensitive_match_keeps_original_case() {
        let profile = parse_personality("FOCUSES ON FOREX MARKETS");
        assert_eq!(profile.topics, vec!["FOCUSES ON FOREX MARKETS"]);
    }

    #[test]
    fn test_lore_keeps_duplicates_and_order() {
        let profile = parse_personality("Born in Lagos. Loves jazz. Born in Lagos.");
        assert_eq!(profile.lore, vec!["Born in Lagos", "Loves jazz", "Born in Lagos"]);
        assert_eq!(profile.topics, DEFAULT_TOPICS);
        assert_eq!(profile.adjectives, DEFAULT_ADJECTIVES);
    }

    #[test]
    fn test_only_periods_falls_back_everywhere() {
        let profile = parse_personality(" . .. ");
        assert_eq!(profile.topics, DEFAULT_TOPICS);
        assert_eq!(profile.adjectives, DEFAULT_ADJECTIVES);
        assert_eq!(profile.lore, vec![FALLBACK_LORE]);
    }

    proptest! {
        #[test]
        fn prop_never_empty_and_never_panics(text in ".{0,200}") {
            let profile = parse_personality(&text);
            prop_assert!(!profile.topics.is_empty());
            prop_assert!(!profile.adjectives.is_empty());
            prop_assert!(!profile.lore.is_empty());
        }

        #[test]
        fn prop_topic_and_adjective_sentences_disjoint(text in "[a-z .]{0,120}") {
            let profile = parse_personality(&text);
            for topic in &profile.topics {
                if DEFAULT_TOPICS.contains(&topic.as_str()) {
                    continue;
                }
                prop_assert!(!profile.adjectives.contains(topic));
            }
        }
    }
}
