//! Permanents on the battlefield

use crate::core::{Card, CardKind, Color, LandArchetype, Produces};
use serde::{Deserialize, Serialize};

/// A card on the battlefield together with its mutable state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permanent {
    pub card: Card,

    /// Already used this turn
    pub tapped: bool,

    /// Entered this turn (only matters for creatures)
    pub summoning_sick: bool,

    /// Entered the battlefield tapped
    pub entered_tapped: bool,

    /// Extra color picked as the permanent entered (thriving lands)
    pub chosen_color: Option<Color>,
}

impl Permanent {
    /// Put `card` onto the battlefield
    ///
    /// Only creatures are summoning sick; artifacts and lands can be used at once.
    pub fn enter(card: Card, tapped: bool) -> Self {
        let summoning_sick = card.is_creature();
        Permanent {
            card,
            tapped,
            summoning_sick,
            entered_tapped: tapped,
            chosen_color: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.card.name
    }

    pub fn is_land(&self) -> bool {
        self.card.is_land()
    }

    pub fn is_basic_land(&self) -> bool {
        self.card.is_basic_land()
    }

    pub fn is_bounce_land(&self) -> bool {
        self.card.as_land().is_some_and(|land| land.is_bounce())
    }

    /// Can this permanent's mana ability be activated right now?
    pub fn can_tap_for_mana(&self) -> bool {
        if self.tapped {
            return false;
        }
        match &self.card.kind {
            CardKind::Land(_) => true,
            CardKind::Artifact(_) => true,
            CardKind::Creature(_) => !self.summoning_sick,
            _ => false,
        }
    }

    /// Base production, including a thriving land's chosen color
    ///
    /// Fetch lands have no mana ability.
    pub fn produces(&self) -> Option<Produces> {
        let base = match &self.card.kind {
            CardKind::Land(land) if land.is_fetch() => return None,
            CardKind::Land(land) => land.produces,
            CardKind::Artifact(producer) | CardKind::Creature(producer) => producer.produces,
            _ => return None,
        };
        Some(match self.chosen_color {
            Some(color) => base.with(color),
            None => base,
        })
    }

    /// Units of mana one activation yields
    pub fn mana_amount(&self) -> u8 {
        match &self.card.kind {
            CardKind::Land(land) => land.mana_amount,
            CardKind::Artifact(producer) | CardKind::Creature(producer) => producer.mana_amount,
            _ => 0,
        }
    }

    pub fn land_archetype(&self) -> Option<&LandArchetype> {
        self.card.as_land().map(|land| &land.archetype)
    }

    pub fn tap(&mut self) {
        self.tapped = true;
    }

    pub fn untap(&mut self) {
        self.tapped = false;
    }
}
