//! Simulation configuration

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Game format; multiplayer formats let crowd lands enter untapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    #[default]
    Duel,
    Commander,
}

impl GameMode {
    pub fn is_multiplayer(self) -> bool {
        self == GameMode::Commander
    }
}

/// Knobs controlling what the spell-cast loop may do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    /// Cast ramp spells after mana producers
    pub include_ramp_spells: bool,

    /// Ramp spells (by name) never to cast
    pub disabled_ramp_spells: FxHashSet<String>,

    pub mode: GameMode,
}

impl SimulationConfig {
    pub fn is_ramp_disabled(&self, name: &str) -> bool {
        self.disabled_ramp_spells.contains(name)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            include_ramp_spells: true,
            disabled_ramp_spells: FxHashSet::default(),
            mode: GameMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{ "disabledRampSpells": ["Harrow"], "mode": "commander" }"#).unwrap();
        assert!(config.include_ramp_spells);
        assert!(config.is_ramp_disabled("Harrow"));
        assert!(!config.is_ramp_disabled("Cultivate"));
        assert!(config.mode.is_multiplayer());
    }
}
