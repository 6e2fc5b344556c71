//! Deck file loader (JSON)
//!
//! ```json
//! {
//!   "name": "Simic Ramp",
//!   "keyCards": ["Growth Spiral"],
//!   "config": { "mode": "commander" },
//!   "cards": [
//!     { "count": 10, "name": "Forest", "type": "land", "produces": "G", "basic": true },
//!     { "count": 4, "name": "Cultivate", "manaCost": "{2}{G}", "type": "rampSpell", "toHand": 1 }
//!   ]
//! }
//! ```

use crate::core::Card;
use crate::game::{KeyCards, SimulationConfig};
use crate::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Deck loader for JSON deck files
pub struct DeckLoader;

impl DeckLoader {
    /// Load a deck from a JSON file
    pub fn load_from_file(path: &Path) -> Result<DeckList> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a deck from its JSON content
    pub fn parse(content: &str) -> Result<DeckList> {
        let mut deck: DeckList = serde_json::from_str(content)?;

        deck.cards.retain(|entry| entry.count > 0);
        if deck.cards.is_empty() {
            return Err(SimError::InvalidDeckFormat("Empty deck".to_string()));
        }
        for entry in &mut deck.cards {
            if entry.card.name.trim().is_empty() {
                return Err(SimError::InvalidDeckFormat("Card without a name".to_string()));
            }
            // Records may leave mana value implicit in the cost
            if entry.card.cmc == 0 {
                entry.card.cmc = entry.card.mana_cost.cmc();
            }
        }

        Ok(deck)
    }
}

/// Represents a deck entry (card record and count)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub count: u8,
    #[serde(flatten)]
    pub card: Card,
}

/// Represents a complete deck list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckList {
    #[serde(default)]
    pub name: String,

    /// Spells whose colors fetches and thriving lands should prioritize
    #[serde(default)]
    pub key_cards: Vec<String>,

    /// Deck-specific simulation settings
    #[serde(default)]
    pub config: Option<SimulationConfig>,

    pub cards: Vec<DeckEntry>,
}

impl DeckList {
    /// Total cards in the deck
    pub fn total_cards(&self) -> usize {
        self.cards.iter().map(|e| e.count as usize).sum()
    }

    /// Total lands in the deck
    pub fn land_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|e| e.card.is_land())
            .map(|e| e.count as usize)
            .sum()
    }

    /// Expand the entries into an unshuffled library
    pub fn library(&self) -> Vec<Card> {
        self.cards
            .iter()
            .flat_map(|e| std::iter::repeat(&e.card).take(e.count as usize).cloned())
            .collect()
    }

    /// One record per distinct card
    pub fn unique_cards(&self) -> Vec<Card> {
        self.cards.iter().map(|e| e.card.clone()).collect()
    }

    /// Resolve `key_cards` against the deck
    ///
    /// With `strict`, a name matching no card is an error; otherwise it is skipped.
    pub fn resolve_key_cards(&self, strict: bool) -> Result<KeyCards> {
        let (key_cards, unresolved) = KeyCards::resolve(&self.key_cards, &self.unique_cards());
        match unresolved.into_iter().next() {
            Some(name) if strict => Err(SimError::UnknownKeyCard(name)),
            _ => Ok(key_cards),
        }
    }

    /// The deck's own settings, or the defaults
    pub fn simulation_config(&self) -> SimulationConfig {
        self.config.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardKind, LandArchetype};
    use crate::game::GameMode;

    const DECK: &str = r#"{
        "name": "Test Deck",
        "keyCards": ["Growth Spiral", "Missing Card"],
        "config": { "mode": "commander" },
        "cards": [
            { "count": 20, "name": "Forest", "type": "land", "produces": "G", "basic": true },
            { "count": 4, "name": "Breeding Pool", "type": "land", "produces": "GU",
              "subtypes": ["Forest", "Island"], "archetype": { "kind": "shock" } },
            { "count": 4, "name": "Cultivate", "manaCost": "{2}{G}", "type": "rampSpell", "toHand": 1 },
            { "count": 4, "name": "Growth Spiral", "manaCost": "{G}{U}", "type": "spell" },
            { "count": 0, "name": "Ghost", "type": "spell" }
        ]
    }"#;

    #[test]
    fn test_parse_json_deck() {
        let deck = DeckLoader::parse(DECK).unwrap();
        assert_eq!(deck.name, "Test Deck");
        assert_eq!(deck.cards.len(), 4);
        assert_eq!(deck.total_cards(), 32);
        assert_eq!(deck.land_count(), 24);
        assert_eq!(deck.library().len(), 32);

        let pool = &deck.cards[1].card;
        assert!(matches!(
            pool.as_land().map(|l| &l.archetype),
            Some(LandArchetype::Shock { life: 2 })
        ));
        let cultivate = &deck.cards[2].card;
        assert_eq!(cultivate.cmc, 3);
        match &cultivate.kind {
            CardKind::RampSpell(profile) => assert_eq!(profile.min_fetch(), 2),
            other => panic!("expected ramp spell, got {:?}", other),
        }
        assert_eq!(deck.simulation_config().mode, GameMode::Commander);
    }

    #[test]
    fn test_key_card_resolution() {
        let deck = DeckLoader::parse(DECK).unwrap();
        let keys = deck.resolve_key_cards(false).unwrap();
        assert_eq!(keys.cards().len(), 1);
        assert!(matches!(
            deck.resolve_key_cards(true),
            Err(SimError::UnknownKeyCard(name)) if name == "Missing Card"
        ));
    }

    #[test]
    fn test_malformed_cost_loads() {
        let deck = DeckLoader::parse(
            r#"{ "cards": [ { "count": 1, "name": "Typo", "manaCost": "{255}{G}", "type": "spell" } ] }"#,
        )
        .unwrap();
        assert_eq!(deck.cards[0].card.cmc, u8::MAX);
    }

    #[test]
    fn test_empty_deck_rejected() {
        let result = DeckLoader::parse(r#"{ "cards": [] }"#);
        assert!(matches!(result, Err(SimError::InvalidDeckFormat(_))));
        assert!(matches!(DeckLoader::parse("not json"), Err(SimError::SerializationError(_))));
    }
}
