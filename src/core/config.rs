//! Run configuration.
//!
//! Every tunable constant of a run lives in `RunConfig`. The defaults are
//! the standard game; a TOML document may override any subset of fields.
//!
//! ```
//! use tower_battle::core::RunConfig;
//!
//! let config = RunConfig::from_toml_str("rest_heal = 15").unwrap();
//! assert_eq!(config.rest_heal, 15);
//! assert_eq!(config.player_max_health, 30);
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// One entry of the starter deck: a card name and how many copies to add.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarterCard {
    /// Card definition name.
    pub name: String,
    /// Number of copies.
    pub copies: u8,
}

impl StarterCard {
    /// Create a starter deck entry.
    pub fn new(name: impl Into<String>, copies: u8) -> Self {
        Self {
            name: name.into(),
            copies,
        }
    }
}

/// Tunable constants of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Player health at the start of a run.
    pub player_max_health: i32,

    /// Energy restored at the start of each player turn.
    pub start_energy: i32,

    /// Hand size above which draws are ignored.
    pub max_hand_size: usize,

    /// Cards drawn when a player turn begins.
    pub cards_drawn_per_turn: usize,

    /// Health restored by resting at a rest stop.
    pub rest_heal: i32,

    /// Game-clock seconds between two enemy actions.
    pub enemy_action_interval: f32,

    /// Game-clock seconds between the deciding blow and the reward
    /// screen, victory or defeat.
    pub encounter_end_delay: f32,

    /// Number of encounters per difficulty tier, tier 0 first.
    pub encounters_per_tier: Vec<usize>,

    /// Leading card definitions excluded from rewards.
    pub starter_card_count: usize,

    /// Trailing card definitions excluded from rewards.
    pub status_card_count: usize,

    /// Cards the player starts every run with.
    pub starter_deck: Vec<StarterCard>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            player_max_health: 30,
            start_energy: 3,
            max_hand_size: 5,
            cards_drawn_per_turn: 5,
            rest_heal: 10,
            enemy_action_interval: 2.0,
            encounter_end_delay: 3.0,
            encounters_per_tier: vec![3, 3, 3],
            starter_card_count: 2,
            status_card_count: 2,
            starter_deck: vec![
                StarterCard::new("Slash", 4),
                StarterCard::new("Guard", 4),
                StarterCard::new("Shield Bash", 1),
                StarterCard::new("Bash N' Smash", 1),
            ],
        }
    }
}

impl RunConfig {
    /// Parse a configuration from TOML. Missing fields keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the constraints the run relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_max_health <= 0 || self.player_max_health > i32::from(u8::MAX) {
            return Err(ConfigError::Invalid {
                field: "player_max_health",
                reason: "must be between 1 and 255 to fit the save layout",
            });
        }
        if self.encounters_per_tier.is_empty() || self.encounters_per_tier.contains(&0) {
            return Err(ConfigError::Invalid {
                field: "encounters_per_tier",
                reason: "every tier needs at least one encounter",
            });
        }
        if self.enemy_action_interval < 0.0 || self.encounter_end_delay < 0.0 {
            return Err(ConfigError::Invalid {
                field: "enemy_action_interval",
                reason: "timers cannot be negative",
            });
        }
        Ok(())
    }

    /// Total number of tiered encounters before the boss.
    #[must_use]
    pub fn tiered_encounter_count(&self) -> usize {
        self.encounters_per_tier.iter().sum()
    }
}
