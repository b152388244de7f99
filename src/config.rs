//! Engine configuration.
//!
//! Every field has a default, so an empty TOML file (or none at all) gives the
//! standard engine. Example:
//!
//! ```toml
//! strength = "greedy"
//! legacy_vertical_template = false
//! cache_limit = 200000
//! reply_delay_ms = 0
//! seed = 7
//!
//! [[schedule]]
//! from_turn = 0
//! max_depth = 3
//! max_move_breadth = 27
//! min_move_breadth = 64
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cache::ScoreCache;
use crate::constants::DEFAULT_REPLY_DELAY_MS;
use crate::schedule::Schedule;
use crate::score::ScoringRules;
use crate::scorer::Scorer;
use crate::strategy::Strength;

/// Offsets from `seed` for each consumer of randomness, so no two share a
/// stream.
pub const OPENING_STREAM: u64 = 0;
pub const SUPPLY_STREAM: u64 = 1;
pub const STRATEGY_STREAM: u64 = 2;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub strength: Strength,
    pub schedule: Schedule,
    /// Score the vertical potential template with the historical offsets.
    pub legacy_vertical_template: bool,
    /// Flush the score cache once it holds this many boards.
    pub cache_limit: Option<usize>,
    /// Pause before each reply on the placement channel.
    pub reply_delay_ms: u64,
    /// Seed for every random choice the engine makes.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strength: Strength::default(),
            schedule: Schedule::default(),
            legacy_vertical_template: ScoringRules::default().legacy_vertical_template,
            cache_limit: None,
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid engine configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in config file {}", path.display()))
    }

    pub fn rules(&self) -> ScoringRules {
        ScoringRules {
            legacy_vertical_template: self.legacy_vertical_template,
        }
    }

    /// A fresh scorer with an empty cache sized by `cache_limit`.
    pub fn scorer(&self) -> Scorer {
        Scorer::with_cache(self.rules(), ScoreCache::with_limit(self.cache_limit))
    }

    /// Seed for one RNG stream, if the engine is seeded at all.
    pub fn stream_seed(&self, stream: u64) -> Option<u64> {
        self.seed.map(|seed| seed.wrapping_add(stream))
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchParams;

    #[test]
    fn test_empty_is_default() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.strength, Strength::Search);
        assert!(config.legacy_vertical_template);
        assert_eq!(config.reply_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_overrides() {
        let config = EngineConfig::from_toml_str(
            r#"
            strength = "greedy"
            legacy_vertical_template = false
            cache_limit = 1000
            reply_delay_ms = 0
            seed = 42

            [[schedule]]
            from_turn = 0
            max_depth = 2
            max_move_breadth = 9
            min_move_breadth = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.strength, Strength::Greedy);
        assert!(!config.rules().legacy_vertical_template);
        assert_eq!(config.cache_limit, Some(1000));
        assert_eq!(config.reply_delay(), Duration::ZERO);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.schedule.params_for(20), SearchParams::new(2, 9, 3));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(EngineConfig::from_toml_str("strength = \"perfect\"").is_err());
        assert!(EngineConfig::from_toml_str("unknown_key = 1").is_err());
        assert!(EngineConfig::from_toml_str("schedule = []").is_err());
    }

    #[test]
    fn test_stream_seeds_differ() {
        let config = EngineConfig {
            seed: Some(u64::MAX),
            ..EngineConfig::default()
        };
        assert_eq!(config.stream_seed(OPENING_STREAM), Some(u64::MAX));
        assert_eq!(config.stream_seed(SUPPLY_STREAM), Some(0));
        assert_eq!(config.stream_seed(STRATEGY_STREAM), Some(1));
        assert_eq!(EngineConfig::default().stream_seed(STRATEGY_STREAM), None);
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::load(Path::new("/nonexistent/tristack.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
