//! "Generate Random" presets for quickly filling a draft.

use rand::Rng;

use super::draft::{AgentDraft, DEFAULT_PICTURE};

struct Preset {
    name: &'static str,
    ticker: &'static str,
    description: &'static str,
    personality: &'static str,
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "AlphaTrader",
        ticker: "ALPH",
        description: "A trading agent specializing in cryptocurrency analysis and trading strategies",
        personality: "Analytical and data-driven with a focus on technical analysis. Provides clear entry and exit points for trades. Risk-conscious but willing to take calculated risks when the reward potential is high. Specializes in cryptocurrency markets with emphasis on Bitcoin and major altcoins.",
    },
    Preset {
        name: "QuantumFinance",
        ticker: "QFIN",
        description: "A quantitative finance specialist focused on stock market analysis",
        personality: "Conservative and methodical with emphasis on fundamental analysis. Prefers long-term investment strategies over short-term trading. Focuses on value stocks with strong fundamentals and dividend history. Provides thorough market analysis with economic context.",
    },
    Preset {
        name: "MarketOracle",
        ticker: "ORCL",
        description: "An oracle for market predictions and trading insights",
        personality: "Balanced approach combining technical and fundamental analysis. Adapts strategy based on market conditions. Specializes in forex markets with particular expertise in major currency pairs. Emphasizes proper risk management and position sizing.",
    },
    Preset {
        name: "TradingTitan",
        ticker: "TITN",
        description: "A powerful trading assistant for all financial markets",
        personality: "Macro-focused with strong emphasis on intermarket relationships. Specializes in commodity trading with expertise in seasonal patterns. Considers geopolitical factors in analysis. Provides both short and medium-term trading opportunities.",
    },
    Preset {
        name: "FinanceForge",
        ticker: "FORG",
        description: "A comprehensive financial analysis and trading strategy agent",
        personality: "Mathematical and probability-based approach to markets. Specializes in options trading strategies. Focuses on volatility analysis and risk/reward optimization. Provides detailed explanations of complex trading concepts.",
    },
];

impl AgentDraft {
    /// Overwrite identity fields with a random preset.
    ///
    /// Direct chat is switched on; Twitter and Discord are coin flips; the
    /// other platform flags, plugins, topics and memory settings are kept.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        let preset = &PRESETS[rng.random_range(0..PRESETS.len())];
        tracing::debug!("[draft] randomized with preset '{}'", preset.name);

        self.name = preset.name.to_string();
        self.ticker = preset.ticker.to_string();
        self.description = preset.description.to_string();
        self.personality = preset.personality.to_string();
        self.picture = format!("{}&{}", DEFAULT_PICTURE, rng.random::<u32>());

        self.clients.direct = true;
        self.clients.twitter = rng.random_bool(0.5);
        self.clients.discord = rng.random_bool(0.5);

        self.initial_token_supply = rng.random_range(1_000_000..10_000_000);
        self.creator_share = rng.random_range(10..40);
        self.liquidity_share = 100 - self.creator_share;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_randomize_fills_identity_and_keeps_plugins() {
        let mut draft = AgentDraft::default();
        draft.plugins.push("news".to_string());
        draft.clients.direct = false;
        draft.clients.slack = true;

        let mut rng = StdRng::seed_from_u64(7);
        draft.randomize(&mut rng);

        assert!(PRESETS.iter().any(|p| p.name == draft.name));
        assert!(!draft.description.is_empty());
        assert!(!draft.personality.is_empty());
        assert!(draft.picture.starts_with(DEFAULT_PICTURE));
        assert!(draft.clients.direct);
        assert!(draft.clients.slack);
        assert_eq!(draft.plugins, vec!["news"]);
    }

    #[test]
    fn test_randomize_tokenization_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let mut draft = AgentDraft::default();
            draft.randomize(&mut rng);
            assert!((1_000_000..10_000_000).contains(&draft.initial_token_supply));
            assert!((10..40).contains(&draft.creator_share));
            assert_eq!(
                u16::from(draft.creator_share) + u16::from(draft.liquidity_share),
                100
            );
        }
    }
}
