//! Key cards: the spells a deck most wants to cast early
//!
//! Fetch targeting and thriving-land color choice look at the pips of these
//! cards to decide which colors are still missing.

use crate::core::{Card, Color, ColorSet};
use deunicode::deunicode;

/// Resolved key cards, kept in ascending mana value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyCards {
    cards: Vec<Card>,
}

/// Normalize a card name for lookups ("Lórien Revealed" == "lorien revealed")
pub fn normalize_name(name: &str) -> String {
    deunicode(name.trim()).to_lowercase()
}

impl KeyCards {
    pub fn new(mut cards: Vec<Card>) -> Self {
        cards.sort_by_key(|c| c.cmc);
        KeyCards { cards }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up `names` in the parsed deck
    ///
    /// Returns the resolved set plus every name that matched no deck card.
    pub fn resolve(names: &[String], deck: &[Card]) -> (Self, Vec<String>) {
        let mut found = Vec::new();
        let mut unresolved = Vec::new();
        for name in names {
            let wanted = normalize_name(name);
            match deck.iter().find(|card| normalize_name(&card.name) == wanted) {
                Some(card) => found.push(card.clone()),
                None => unresolved.push(name.clone()),
            }
        }
        (Self::new(found), unresolved)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Colors demanded by the cheapest key cards that `available` cannot supply
    ///
    /// Key cards are grouped by mana value; the first group naming any
    /// unavailable color decides the result.
    pub fn missing_colors(&self, available: ColorSet) -> ColorSet {
        let mut index = 0;
        while index < self.cards.len() {
            let cmc = self.cards[index].cmc;
            let mut demanded = ColorSet::new();
            while index < self.cards.len() && self.cards[index].cmc == cmc {
                demanded = demanded.union(self.cards[index].mana_cost.colors());
                index += 1;
            }
            let missing = demanded.difference(available);
            if !missing.is_empty() {
                return missing;
            }
        }
        ColorSet::new()
    }

    /// Color with the most pips across all key cards, ignoring `exclude`
    ///
    /// Ties go to the earlier color in WUBRG order.
    pub fn most_demanded_color(&self, exclude: Color) -> Option<Color> {
        let mut best: Option<(Color, u32)> = None;
        for color in Color::WUBRG {
            if color == exclude {
                continue;
            }
            let pips: u32 = self.cards.iter().map(|c| u32::from(c.mana_cost.count(color))).sum();
            if pips > 0 && best.map_or(true, |(_, count)| pips > count) {
                best = Some((color, pips));
            }
        }
        best.map(|(color, _)| color)
    }
}
