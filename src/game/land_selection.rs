//! Land-drop heuristic

use crate::core::{Card, FetchTiming, LandArchetype, Permanent};
use crate::game::config::GameMode;
use crate::game::land_policy::does_land_enter_tapped;
use crate::game::mana_engine::calculate_mana_availability;

/// Could a bounce land entering now return `permanent`?
///
/// Lands sacrificed by the incoming land drop don't count.
pub fn is_bounce_target(permanent: &Permanent) -> bool {
    permanent.is_land()
        && !permanent.is_bounce_land()
        && !matches!(permanent.land_archetype(), Some(LandArchetype::SacrificeOnNextLand))
}

/// Is there a land in play for a bounce land to return?
pub fn has_bounce_target(battlefield: &[Permanent]) -> bool {
    battlefield.iter().any(is_bounce_target)
}

/// Can `card` be played as this turn's land drop?
fn is_playable_land(card: &Card, battlefield: &[Permanent]) -> bool {
    match card.as_land() {
        Some(land) if land.is_bounce() => has_bounce_target(battlefield),
        Some(_) => true,
        None => false,
    }
}

/// Pick the land to play from hand, returning its hand index
///
/// Priority:
/// 1. a fetch land whose activation cost the untapped sources can pay
/// 2. a land that enters untapped (not a bounce land)
/// 3. a bounce land
/// 4. anything else playable
///
/// `_library` is part of the land-drop signature but not read here: fetch
/// targets are scored when the fetch resolves, not when it is chosen.
pub fn select_best_land(
    hand: &[Card],
    battlefield: &[Permanent],
    _library: &[Card],
    mode: GameMode,
) -> Option<usize> {
    let playable: Vec<usize> = hand
        .iter()
        .enumerate()
        .filter(|(_, card)| is_playable_land(card, battlefield))
        .map(|(index, _)| index)
        .collect();
    if playable.is_empty() {
        return None;
    }

    let untapped_mana = calculate_mana_availability(battlefield).total;
    let fetch = playable.iter().copied().find(|&index| {
        match hand[index].as_land().map(|land| &land.archetype) {
            Some(LandArchetype::Fetch(fetch)) => {
                fetch.timing == FetchTiming::OnEntry || untapped_mana >= usize::from(fetch.mana_cost)
            }
            _ => false,
        }
    });
    if fetch.is_some() {
        return fetch;
    }

    let untapped = playable.iter().copied().find(|&index| {
        let card = &hand[index];
        !card.as_land().is_some_and(|land| land.is_bounce())
            && !does_land_enter_tapped(card, battlefield, mode)
    });
    if untapped.is_some() {
        return untapped;
    }

    let bounce = playable
        .iter()
        .copied()
        .find(|&index| hand[index].as_land().is_some_and(|land| land.is_bounce()));
    bounce.or_else(|| playable.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, EntryRule, FetchProfile, LandProfile, Produces};

    fn tapped_dual() -> Card {
        Card::land(
            "Dimir Guildgate",
            LandProfile {
                produces: Produces::Colors("UB".parse().unwrap()),
                entry: EntryRule::AlwaysTapped,
                ..LandProfile::default()
            },
        )
    }

    fn bounce() -> Card {
        Card::land(
            "Dimir Aqueduct",
            LandProfile {
                produces: Produces::Colors("UB".parse().unwrap()),
                mana_amount: 2,
                archetype: LandArchetype::Bounce,
                entry: EntryRule::AlwaysTapped,
                ..LandProfile::default()
            },
        )
    }

    fn fetch(mana_cost: u8) -> Card {
        Card::land(
            "Prismatic Vista",
            LandProfile {
                archetype: LandArchetype::Fetch(FetchProfile {
                    mana_cost,
                    ..FetchProfile::default()
                }),
                ..LandProfile::default()
            },
        )
    }

    fn island() -> Permanent {
        Permanent::enter(Card::basic_land("Island", Color::Blue), false)
    }

    #[test]
    fn test_no_lands_in_hand() {
        let hand = vec![Card::spell("Opt", "{U}")];
        assert_eq!(select_best_land(&hand, &[], &[], GameMode::Duel), None);
    }

    #[test]
    fn test_bounce_land_unplayable_without_target() {
        let hand = vec![bounce()];
        assert_eq!(select_best_land(&hand, &[], &[], GameMode::Duel), None);
        assert_eq!(select_best_land(&hand, &[island()], &[], GameMode::Duel), Some(0));
    }

    #[test]
    fn test_priority_order() {
        let hand = vec![tapped_dual(), bounce(), Card::basic_land("Swamp", Color::Black)];
        let battlefield = vec![island()];
        // Untapped basic beats the bounce land and the tapped dual
        assert_eq!(select_best_land(&hand, &battlefield, &[], GameMode::Duel), Some(2));

        let hand = vec![tapped_dual(), bounce()];
        assert_eq!(select_best_land(&hand, &battlefield, &[], GameMode::Duel), Some(1));

        let hand = vec![tapped_dual()];
        assert_eq!(select_best_land(&hand, &battlefield, &[], GameMode::Duel), Some(0));
    }

    #[test]
    fn test_fetch_needs_activation_mana() {
        let hand = vec![Card::basic_land("Swamp", Color::Black), fetch(1)];
        assert_eq!(select_best_land(&hand, &[], &[], GameMode::Duel), Some(0));
        assert_eq!(select_best_land(&hand, &[island()], &[], GameMode::Duel), Some(1));

        let free = vec![Card::basic_land("Swamp", Color::Black), fetch(0)];
        assert_eq!(select_best_land(&free, &[], &[], GameMode::Duel), Some(1));
    }
}
