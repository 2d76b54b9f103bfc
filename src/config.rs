//! Host-supplied configuration: where state is stored and which mode a fresh
//! scoreboard starts in.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;

use crate::game::rules::GameMode;

const DEFAULT_KEY_PREFIX: &str = "yahtzee-scoreboard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardConfig {
    /// Prefix for the three storage keys.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Mode used when nothing has been persisted yet.
    #[serde(default)]
    pub default_mode: GameMode,
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            default_mode: GameMode::default(),
        }
    }
}

/// The three logical storage keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub players: String,
    pub categories: String,
    pub game_mode: String,
}

impl ScoreboardConfig {
    /// Parse overrides from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys {
            players: format!("{}-players", self.key_prefix),
            categories: format!("{}-categories", self.key_prefix),
            game_mode: format!("{}-game-mode", self.key_prefix),
        }
    }
}

thread_local! {
    static CONFIG: RefCell<ScoreboardConfig> = RefCell::new(ScoreboardConfig::default());
}

/// Read the active configuration.
pub fn current() -> ScoreboardConfig {
    CONFIG.with(|c| c.borrow().clone())
}

/// Replace the active configuration.
pub fn set_config(config: ScoreboardConfig) {
    CONFIG.with(|c| *c.borrow_mut() = config);
}
