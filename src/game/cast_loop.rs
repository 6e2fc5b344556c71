//! Spell-cast loop
//!
//! Two phases, each run to a fixpoint:
//!
//! 1. **Mana producers**: mana creatures, mana rocks and exploration effects,
//!    cheapest first with moxen ahead of everything.
//! 2. **Ramp spells** (when enabled): cheapest castable ramp spell whose
//!    search would actually find something.
//!
//! Every action takes one nonland card out of hand, so neither phase can run
//! more iterations than the hand had spells.

use crate::core::{Card, CardKind, EtbCost, Permanent, RampProfile};
use crate::game::config::SimulationConfig;
use crate::game::fetch::{count_fetchable, select_fetch_target};
use crate::game::key_cards::KeyCards;
use crate::game::logger::ActionLog;
use crate::game::mana_engine::calculate_mana_availability;
use crate::game::mana_payment::{can_play_card, tap_mana_for_spell};
use crate::zones::Zones;

/// What one call to [`cast_spells`] did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastReport {
    /// Mana producers and exploration effects put onto the battlefield
    pub permanents: Vec<String>,
    /// Ramp spells resolved
    pub ramp_spells: Vec<String>,
}

impl CastReport {
    pub fn total(&self) -> usize {
        self.permanents.len() + self.ramp_spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Cast everything worth casting this turn
pub fn cast_spells(
    zones: &mut Zones,
    mut log: Option<&mut ActionLog>,
    key_cards: &KeyCards,
    turn: u32,
    config: &SimulationConfig,
) -> CastReport {
    let mut report = CastReport::default();

    while let Some(index) = next_mana_producer(zones) {
        let spells_before = spells_in_hand(zones);
        let name = cast_mana_producer(index, zones, &mut log);
        debug_assert!(spells_in_hand(zones) < spells_before);
        report.permanents.push(name);
    }

    if config.include_ramp_spells {
        while let Some(index) = next_ramp_spell(zones, config) {
            let spells_before = spells_in_hand(zones);
            let name = resolve_ramp_spell(index, zones, &mut log, key_cards, turn);
            debug_assert!(spells_in_hand(zones) < spells_before);
            report.ramp_spells.push(name);
        }
    }

    report
}

fn spells_in_hand(zones: &Zones) -> usize {
    zones.hand.iter().filter(|card| !card.is_land()).count()
}

/// Mana creatures, non-burst mana rocks and exploration effects
fn is_mana_permanent(card: &Card) -> bool {
    match &card.kind {
        CardKind::Artifact(producer) | CardKind::Creature(producer) => !producer.burst,
        CardKind::Exploration(_) => true,
        _ => false,
    }
}

/// Sort key: moxen first, then ascending mana value
fn cast_priority(card: &Card) -> i16 {
    match card.as_producer() {
        Some(producer) if producer.mox_priority => -1,
        _ => i16::from(card.cmc),
    }
}

fn etb_cost(card: &Card) -> EtbCost {
    match &card.kind {
        CardKind::Artifact(producer) | CardKind::Creature(producer) => producer.etb_cost,
        CardKind::Exploration(profile) => profile.etb_cost,
        _ => EtbCost::None,
    }
}

/// Can the ETB cost of `zones.hand[index]` be paid once it has been cast?
fn can_pay_etb_cost(index: usize, zones: &Zones) -> bool {
    let mut others = zones.hand.iter().enumerate().filter(|(i, _)| *i != index).map(|(_, c)| c);
    match etb_cost(&zones.hand[index]) {
        EtbCost::None | EtbCost::DiscardHand => true,
        EtbCost::DiscardLand => others.any(Card::is_land),
        EtbCost::ImprintNonland => others.any(|c| !c.is_land()),
        EtbCost::SacrificeLand => zones.battlefield.iter().any(Permanent::is_land),
    }
}

fn next_mana_producer(zones: &Zones) -> Option<usize> {
    let availability = calculate_mana_availability(&zones.battlefield);
    let mut candidates: Vec<usize> = zones
        .hand
        .iter()
        .enumerate()
        .filter(|(_, card)| is_mana_permanent(card) && can_play_card(card, &availability))
        .map(|(index, _)| index)
        .collect();
    candidates.sort_by_key(|&index| cast_priority(&zones.hand[index]));
    candidates.into_iter().find(|&index| can_pay_etb_cost(index, zones))
}

/// Cast `zones.hand[index]`, pay its costs and put it onto the battlefield
fn cast_mana_producer(index: usize, zones: &mut Zones, log: &mut Option<&mut ActionLog>) -> String {
    let card = zones.hand.remove(index);
    tap_mana_for_spell(&card, &mut zones.battlefield);
    log_action!(log, "Cast {} ({})", card.name, card.mana_cost);

    match etb_cost(&card) {
        EtbCost::None => {}
        EtbCost::DiscardLand => {
            if let Some(land) = zones.hand.iter().position(Card::is_land) {
                let discarded = zones.hand.remove(land);
                log_action!(log, "Discarded {} to {}", discarded.name, card.name);
                zones.graveyard.push(discarded);
            }
        }
        EtbCost::ImprintNonland => {
            let pick = zones
                .hand
                .iter()
                .position(|c| matches!(c.kind, CardKind::Spell))
                .or_else(|| zones.hand.iter().position(|c| !c.is_land()));
            if let Some(pick) = pick {
                let exiled = zones.hand.remove(pick);
                log_action!(log, "Exiled {} to {}", exiled.name, card.name);
                zones.exile.push(exiled);
            }
        }
        EtbCost::DiscardHand => {
            let count = zones.hand.len();
            zones.graveyard.append(&mut zones.hand);
            log_action!(log, "Discarded hand ({} cards) to {}", count, card.name);
        }
        EtbCost::SacrificeLand => {
            let land = zones
                .battlefield
                .iter()
                .position(|p| p.is_land() && p.tapped)
                .or_else(|| zones.battlefield.iter().position(Permanent::is_land));
            if let Some(land) = land {
                let sacrificed = zones.sacrifice(land).name.clone();
                log_action!(log, "Sacrificed {} to {}", sacrificed, card.name);
            }
        }
    }

    if let Some(condition) = card.as_producer().and_then(|p| p.condition) {
        log_detail!(log, "{} only produces mana with {}", card.name, condition);
    }

    let tapped = card.as_producer().is_some_and(|p| p.enters_tapped);
    let name = card.name.clone();
    zones.battlefield.push(Permanent::enter(card, tapped));
    name
}

fn ramp_profile(card: &Card) -> Option<&RampProfile> {
    match &card.kind {
        CardKind::RampSpell(profile) => Some(profile),
        _ => None,
    }
}

fn next_ramp_spell(zones: &Zones, config: &SimulationConfig) -> Option<usize> {
    let availability = calculate_mana_availability(&zones.battlefield);
    let mut candidates: Vec<usize> = zones
        .hand
        .iter()
        .enumerate()
        .filter(|(_, card)| {
            ramp_profile(card).is_some()
                && !config.is_ramp_disabled(&card.name)
                && can_play_card(card, &availability)
        })
        .map(|(index, _)| index)
        .collect();
    candidates.sort_by_key(|&index| zones.hand[index].cmc);

    candidates.into_iter().find(|&index| {
        let Some(profile) = ramp_profile(&zones.hand[index]) else {
            return false;
        };
        let enough_lands = count_fetchable(&profile.filter, &zones.library) >= profile.min_fetch();
        enough_lands && (!profile.sacrifice_land || zones.battlefield.iter().any(Permanent::is_land))
    })
}

/// Land to sacrifice for a ramp spell: basic, then non-bounce, then bounce
fn ramp_sacrifice_choice(battlefield: &[Permanent]) -> Option<usize> {
    battlefield
        .iter()
        .position(Permanent::is_basic_land)
        .or_else(|| battlefield.iter().position(|p| p.is_land() && !p.is_bounce_land()))
        .or_else(|| battlefield.iter().position(Permanent::is_bounce_land))
}

fn resolve_ramp_spell(
    index: usize,
    zones: &mut Zones,
    log: &mut Option<&mut ActionLog>,
    key_cards: &KeyCards,
    turn: u32,
) -> String {
    let Some(profile) = ramp_profile(&zones.hand[index]).cloned() else {
        return String::new();
    };
    let card = zones.hand.remove(index);
    tap_mana_for_spell(&card, &mut zones.battlefield);
    log_action!(log, "Cast {} ({})", card.name, card.mana_cost);

    if profile.sacrifice_land {
        if let Some(land) = ramp_sacrifice_choice(&zones.battlefield) {
            let sacrificed = zones.sacrifice(land).name.clone();
            log_action!(log, "Sacrificed {} to {}", sacrificed, card.name);
        }
    }

    for _ in 0..profile.to_battlefield {
        let Some(target) = select_fetch_target(&profile.filter, &zones.library, &zones.battlefield, key_cards, turn)
        else {
            break;
        };
        let found = zones.library.remove(target);
        log_action!(
            log,
            "{} put {} onto the battlefield{}",
            card.name,
            found.name,
            if profile.enters_tapped { " tapped" } else { "" }
        );
        zones.battlefield.push(Permanent::enter(found, profile.enters_tapped));
    }

    for _ in 0..profile.to_hand {
        let Some(target) = select_fetch_target(&profile.filter, &zones.library, &zones.battlefield, key_cards, turn)
        else {
            break;
        };
        let found = zones.library.remove(target);
        log_action!(log, "{} put {} into hand", card.name, found.name);
        zones.hand.push(found);
    }

    let name = card.name.clone();
    zones.graveyard.push(card);
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Color, ExplorationProfile, ManaProducer, Produces};

    fn forest() -> Card {
        Card::basic_land("Forest", Color::Green)
    }

    fn elf() -> Card {
        Card::creature(
            "Llanowar Elves",
            "{G}",
            ManaProducer {
                produces: Produces::Colors(Color::Green.into()),
                ..ManaProducer::default()
            },
        )
    }

    fn rock(name: &str, cost: &str) -> Card {
        Card::artifact(name, cost, ManaProducer::default())
    }

    fn cultivate() -> Card {
        Card::ramp_spell(
            "Cultivate",
            "{2}{G}",
            RampProfile {
                to_hand: 1,
                ..RampProfile::default()
            },
        )
    }

    fn in_play(card: Card) -> Permanent {
        Permanent::enter(card, false)
    }

    #[test]
    fn test_forest_casts_elf() {
        let mut zones = Zones::default();
        zones.battlefield.push(in_play(forest()));
        zones.hand.push(elf());

        let report = cast_spells(&mut zones, None, &KeyCards::empty(), 1, &SimulationConfig::default());
        assert_eq!(report.permanents, vec!["Llanowar Elves".to_string()]);
        assert!(zones.hand.is_empty());
        assert_eq!(zones.battlefield.len(), 2);
        assert!(zones.battlefield[1].summoning_sick);
        assert!(!zones.battlefield[1].can_tap_for_mana());
    }

    #[test]
    fn test_rocks_chain_into_each_other() {
        let mut zones = Zones::default();
        zones.battlefield.push(in_play(forest()));
        zones.hand.push(rock("Mind Stone", "{2}"));
        zones.hand.push(rock("Sol Ring", "{1}"));

        let report = cast_spells(&mut zones, None, &KeyCards::empty(), 1, &SimulationConfig::default());
        // Sol Ring goes first; one Forest can't pay for both
        assert_eq!(report.permanents, vec!["Sol Ring".to_string()]);
        assert_eq!(zones.hand.len(), 1);

        let mut zones = Zones::default();
        zones.battlefield.push(in_play(forest()));
        zones.battlefield.push(in_play(forest()));
        zones.hand.push(rock("Mind Stone", "{2}"));
        zones.hand.push(rock("Sol Ring", "{1}"));
        let report = cast_spells(&mut zones, None, &KeyCards::empty(), 1, &SimulationConfig::default());
        assert_eq!(report.permanents, vec!["Sol Ring".to_string(), "Mind Stone".to_string()]);
        assert!(zones.hand.is_empty());
    }

    #[test]
    fn test_mox_priority_and_etb_costs() {
        let mox_diamond = Card::artifact(
            "Mox Diamond",
            "{0}",
            ManaProducer {
                produces: Produces::Any,
                mox_priority: true,
                etb_cost: EtbCost::DiscardLand,
                ..ManaProducer::default()
            },
        );

        // No land to discard: Mox Diamond stays in hand
        let mut zones = Zones::default();
        zones.hand.push(mox_diamond.clone());
        assert!(cast_spells(&mut zones, None, &KeyCards::empty(), 1, &SimulationConfig::default()).is_empty());

        zones.hand.push(forest());
        let report = cast_spells(&mut zones, None, &KeyCards::empty(), 1, &SimulationConfig::default());
        assert_eq!(report.permanents, vec!["Mox Diamond".to_string()]);
        assert!(zones.hand.is_empty());
        assert_eq!(zones.graveyard[0].name, "Forest");
    }

    #[test]
    fn test_exploration_is_cast_in_phase_one() {
        let mut zones = Zones::default();
        zones.battlefield.push(in_play(forest()));
        zones.hand.push(Card::exploration("Exploration", "{G}", ExplorationProfile::default()));
        let report = cast_spells(&mut zones, None, &KeyCards::empty(), 1, &SimulationConfig::default());
        assert_eq!(report.permanents.len(), 1);
    }

    #[test]
    fn test_cultivate_scenario() {
        let mut zones = Zones::new(vec![forest(), forest(), Card::spell("Craterhoof Behemoth", "{5}{G}{G}{G}")]);
        for _ in 0..3 {
            zones.battlefield.push(in_play(forest()));
        }
        zones.hand.push(cultivate());

        let report = cast_spells(&mut zones, None, &KeyCards::empty(), 3, &SimulationConfig::default());
        assert_eq!(report.ramp_spells, vec!["Cultivate".to_string()]);
        assert_eq!(zones.graveyard[0].name, "Cultivate");
        assert_eq!(zones.battlefield.len(), 4);
        assert!(zones.battlefield[3].tapped);
        assert_eq!(zones.hand.len(), 1);
        assert_eq!(zones.hand[0].name, "Forest");
        assert_eq!(zones.library.len(), 1);
    }

    #[test]
    fn test_ramp_needs_library_lands() {
        let mut zones = Zones::new(vec![forest()]);
        for _ in 0..3 {
            zones.battlefield.push(in_play(forest()));
        }
        zones.hand.push(cultivate());
        let report = cast_spells(&mut zones, None, &KeyCards::empty(), 3, &SimulationConfig::default());
        assert!(report.is_empty());
        assert_eq!(zones.hand.len(), 1);
    }

    #[test]
    fn test_ramp_disabled_by_config() {
        let mut zones = Zones::new(vec![forest(), forest()]);
        for _ in 0..3 {
            zones.battlefield.push(in_play(forest()));
        }
        zones.hand.push(cultivate());

        let mut config = SimulationConfig::default();
        config.disabled_ramp_spells.insert("Cultivate".to_string());
        assert!(cast_spells(&mut zones, None, &KeyCards::empty(), 3, &config).is_empty());

        let config = SimulationConfig {
            include_ramp_spells: false,
            ..SimulationConfig::default()
        };
        assert!(cast_spells(&mut zones, None, &KeyCards::empty(), 3, &config).is_empty());
    }

    #[test]
    fn test_ramp_sacrifice_prefers_basic() {
        let harrow = Card::ramp_spell(
            "Harrow",
            "{2}{G}",
            RampProfile {
                to_battlefield: 2,
                enters_tapped: false,
                sacrifice_land: true,
                ..RampProfile::default()
            },
        );
        let dual = Card::land(
            "Breeding Pool",
            crate::core::LandProfile {
                produces: Produces::Colors("GU".parse().unwrap()),
                ..crate::core::LandProfile::default()
            },
        );
        let mut zones = Zones::new(vec![forest(), forest()]);
        zones.battlefield.push(in_play(dual));
        zones.battlefield.push(in_play(forest()));
        zones.battlefield.push(in_play(forest()));
        zones.hand.push(harrow);

        cast_spells(&mut zones, None, &KeyCards::empty(), 3, &SimulationConfig::default());
        assert_eq!(zones.graveyard.len(), 2);
        assert_eq!(zones.graveyard[0].name, "Forest");
        assert_eq!(zones.battlefield.len(), 4);
        assert_eq!(zones.battlefield[0].name(), "Breeding Pool");
        assert!(!zones.battlefield[3].tapped);
    }
}
