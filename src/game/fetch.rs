//! Fetch-target scoring
//!
//! Picks the library land a fetch effect (fetch land or ramp spell) should
//! find, favoring colors the cheapest key cards still need.

use crate::core::{Card, ColorSet, FetchFilter, LandProfile, Permanent};
use crate::game::key_cards::KeyCards;
use crate::game::mana_engine::unit_production;

const MISSING_COLOR_BONUS: i32 = 300;
const EARLY_FIXING_BONUS: i32 = 1000;
const LATE_SHOCK_PENALTY: i32 = -100;
const MULTICOLOR_BONUS: i32 = 100;
const PER_MISSING_COLOR: i32 = 250;

/// Colors any mana permanent on the battlefield can make, tapped or not
pub fn battlefield_colors(battlefield: &[Permanent]) -> ColorSet {
    battlefield
        .iter()
        .filter_map(|p| unit_production(p, battlefield))
        .fold(ColorSet::new(), |acc, produces| acc.union(produces.colors()))
}

/// Score one candidate land
pub fn score_fetch_target(land: &LandProfile, missing: ColorSet, turn: u32) -> i32 {
    let colors = land.produces.colors().colored();
    let supplied = colors.intersection(missing).len() as i32;
    let mut score = 0;

    if supplied > 0 {
        score += MISSING_COLOR_BONUS;
    }
    if turn <= 2 && colors.len() > 1 {
        score += EARLY_FIXING_BONUS;
    }
    if turn >= 6 && land.is_shock() {
        score += LATE_SHOCK_PENALTY;
    }
    if colors.len() >= 2 {
        score += MULTICOLOR_BONUS;
    }
    score + PER_MISSING_COLOR * supplied
}

/// Index of the best library land matching `filter`, if any
///
/// Ties keep the earliest candidate.
pub fn select_fetch_target(
    filter: &FetchFilter,
    library: &[Card],
    battlefield: &[Permanent],
    key_cards: &KeyCards,
    turn: u32,
) -> Option<usize> {
    let missing = key_cards.missing_colors(battlefield_colors(battlefield)).colored();

    let mut best: Option<(usize, i32)> = None;
    for (index, card) in library.iter().enumerate() {
        let Some(land) = card.as_land() else {
            continue;
        };
        if !filter.matches(land) {
            continue;
        }
        let score = score_fetch_target(land, missing, turn);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}

/// Number of library lands `filter` can find
pub fn count_fetchable(filter: &FetchFilter, library: &[Card]) -> usize {
    library
        .iter()
        .filter_map(Card::as_land)
        .filter(|land| filter.matches(land))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BasicType, Color, LandArchetype, Produces};
    use smallvec::SmallVec;

    fn shock(name: &str, colors: &str, types: &[BasicType]) -> Card {
        Card::land(
            name,
            LandProfile {
                produces: Produces::try_from(colors.to_string()).unwrap(),
                subtypes: SmallVec::from_slice(types),
                archetype: LandArchetype::Shock { life: 2 },
                ..LandProfile::default()
            },
        )
    }

    fn library() -> Vec<Card> {
        vec![
            Card::spell("Counterspell", "{U}{U}"),
            Card::basic_land("Forest", Color::Green),
            Card::basic_land("Island", Color::Blue),
            shock("Breeding Pool", "GU", &[BasicType::Forest, BasicType::Island]),
        ]
    }

    fn forest_in_play() -> Vec<Permanent> {
        vec![Permanent::enter(Card::basic_land("Forest", Color::Green), false)]
    }

    #[test]
    fn test_early_turns_favor_duals() {
        let filter = FetchFilter {
            colors: "GU".parse().unwrap(),
            basic_only: false,
        };
        let pick = select_fetch_target(&filter, &library(), &forest_in_play(), &KeyCards::empty(), 1);
        assert_eq!(pick, Some(3));
    }

    #[test]
    fn test_missing_key_color_wins_over_duplicate() {
        let keys = KeyCards::new(vec![Card::spell("Counterspell", "{U}{U}")]);
        let pick = select_fetch_target(&FetchFilter::default(), &library(), &forest_in_play(), &keys, 4);
        assert_eq!(pick, Some(2));
    }

    #[test]
    fn test_no_candidate_returns_none() {
        let library = vec![Card::spell("Counterspell", "{U}{U}")];
        let pick = select_fetch_target(&FetchFilter::any_land(), &library, &[], &KeyCards::empty(), 3);
        assert_eq!(pick, None);
    }

    #[test]
    fn test_scores() {
        let pool = shock("Breeding Pool", "GU", &[BasicType::Forest, BasicType::Island]);
        let pool = pool.as_land().unwrap();
        let blue: ColorSet = "U".parse().unwrap();
        assert_eq!(score_fetch_target(pool, blue, 1), 300 + 1000 + 100 + 250);
        assert_eq!(score_fetch_target(pool, ColorSet::new(), 6), -100 + 100);
        assert_eq!(count_fetchable(&FetchFilter::default(), &library()), 2);
    }
}
