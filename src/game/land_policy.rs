//! Enters-tapped policy for lands
//!
//! First matching rule wins:
//!
//! | archetype | enters tapped when |
//! |-----------|--------------------|
//! | shock     | always (the executor may pay life to untap it) |
//! | fast      | more than two lands already in play |
//! | battle    | fewer than two basics in play |
//! | check     | no land in play has a required basic type |
//! | crowd     | not a multiplayer game |
//! | slow      | fewer than two other lands in play |
//! | MDFC      | always (the executor decides by turn) |
//! | otherwise | the card's explicit entry flag, untapped by default |

use crate::core::{BasicType, Card, EntryRule, LandArchetype, Permanent};
use crate::game::config::GameMode;
use smallvec::SmallVec;

/// Does any land on the battlefield have `basic_type`?
pub fn controls_basic_type(battlefield: &[Permanent], basic_type: BasicType) -> bool {
    battlefield
        .iter()
        .filter_map(|p| p.card.as_land())
        .any(|land| land.has_basic_type(basic_type))
}

/// Decide whether `land` would enter tapped right now
///
/// Non-land cards never "enter tapped" here.
pub fn does_land_enter_tapped(land: &Card, battlefield: &[Permanent], mode: GameMode) -> bool {
    let Some(profile) = land.as_land() else {
        return false;
    };
    let lands_in_play = battlefield.iter().filter(|p| p.is_land()).count();

    match &profile.archetype {
        LandArchetype::Shock { .. } => true,
        LandArchetype::Fast => lands_in_play > 2,
        LandArchetype::Battle => battlefield.iter().filter(|p| p.is_basic_land()).count() < 2,
        LandArchetype::Check { required } => {
            let required: SmallVec<[BasicType; 2]> = if required.is_empty() {
                profile
                    .produces
                    .colors()
                    .iter()
                    .filter_map(BasicType::for_color)
                    .collect()
            } else {
                required.clone()
            };
            !required.iter().any(|t| controls_basic_type(battlefield, *t))
        }
        LandArchetype::Crowd => !mode.is_multiplayer(),
        LandArchetype::Slow => lands_in_play < 2,
        LandArchetype::Mdfc { .. } => true,
        _ => profile.entry == EntryRule::AlwaysTapped,
    }
}
