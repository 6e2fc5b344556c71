//! Land-drop resolution
//!
//! [`play_land`] moves one land from hand to the battlefield and resolves
//! everything that happens as it enters: City of Traitors style sacrifices,
//! on-entry fetches, shock and MDFC life payments, thriving color choice and
//! bounce returns. [`crack_fetch_lands`] later activates fetch lands that
//! search on activation.
//!
//! Both return the life paid. Nothing here fails: an impossible play is
//! rejected before any zone is touched.

use crate::core::{Card, FetchProfile, FetchTiming, LandArchetype, ManaCost, Permanent};
use crate::game::config::GameMode;
use crate::game::fetch::select_fetch_target;
use crate::game::key_cards::KeyCards;
use crate::game::land_policy::does_land_enter_tapped;
use crate::game::land_selection::{has_bounce_target, is_bounce_target};
use crate::game::logger::ActionLog;
use crate::game::mana_engine::calculate_mana_availability;
use crate::game::mana_payment::tap_mana_for_cost;
use crate::zones::Zones;

/// Turns on which paying for a shock land is worth it
const SHOCK_PAY_LAST_TURN: u32 = 6;
/// Turns on which an MDFC is played untapped for life
const MDFC_PAY_LAST_TURN: u32 = 4;

/// Play `zones.hand[hand_index]` as a land, returning the life paid
///
/// A bounce land with nothing to return is rejected: zones are left as they
/// were and 0 is returned. So is an index that doesn't name a land.
pub fn play_land(
    hand_index: usize,
    zones: &mut Zones,
    turn: u32,
    mut log: Option<&mut ActionLog>,
    key_cards: &KeyCards,
    mode: GameMode,
) -> u32 {
    let Some(land) = zones.hand.get(hand_index).and_then(Card::as_land) else {
        return 0;
    };
    if land.is_bounce() && !has_bounce_target(&zones.battlefield) {
        log_detail!(log, "Can't play {}: no land to return", zones.hand[hand_index].name);
        return 0;
    }
    let archetype = land.archetype.clone();
    let card = zones.hand.remove(hand_index);

    if archetype != LandArchetype::SacrificeOnNextLand {
        sacrifice_on_next_land(zones, &mut log);
    }

    if let LandArchetype::Fetch(fetch) = archetype {
        return match fetch.timing {
            FetchTiming::OnEntry => fetch_on_entry(card, &fetch, zones, turn, &mut log, key_cards),
            FetchTiming::Activated => {
                let tapped = does_land_enter_tapped(&card, &zones.battlefield, mode);
                log_action!(log, "Played {}{}", card.name, tapped_suffix(tapped));
                zones.battlefield.push(Permanent::enter(card, tapped));
                0
            }
        };
    }

    let mut tapped = does_land_enter_tapped(&card, &zones.battlefield, mode);
    let mut life = 0;
    match archetype {
        LandArchetype::Shock { life: cost } if tapped && turn <= SHOCK_PAY_LAST_TURN => {
            tapped = false;
            life = u32::from(cost);
        }
        LandArchetype::Mdfc { life: cost } => {
            tapped = turn > MDFC_PAY_LAST_TURN;
            if !tapped {
                life = u32::from(cost);
            }
        }
        _ => {}
    }

    let name = card.name.clone();
    let mut permanent = Permanent::enter(card, tapped);
    if life > 0 {
        log_action!(log, "Played {} untapped, paying {} life", name, life);
    } else {
        log_action!(log, "Played {}{}", name, tapped_suffix(tapped));
    }

    if let LandArchetype::Thriving { primary } = archetype {
        permanent.chosen_color = key_cards.most_demanded_color(primary);
        match permanent.chosen_color {
            Some(color) => log_detail!(log, "{} chose {}", name, color),
            None => log_detail!(log, "{} chose no color: no key card demand", name),
        }
    }

    let is_bounce = archetype == LandArchetype::Bounce;
    zones.battlefield.push(permanent);
    if is_bounce {
        return_land_to_hand(zones, &mut log, &name);
    }
    life
}

/// Activate every untapped on-activation fetch land that can be paid for
///
/// Each cracked fetch goes to the graveyard and the best matching library
/// land takes its place. Fetches with no target stay where they are.
/// Returns the total life paid.
pub fn crack_fetch_lands(
    zones: &mut Zones,
    turn: u32,
    mut log: Option<&mut ActionLog>,
    key_cards: &KeyCards,
) -> u32 {
    let mut life = 0;
    let mut index = 0;
    while index < zones.battlefield.len() {
        let permanent = &zones.battlefield[index];
        let fetch = match permanent.land_archetype() {
            Some(LandArchetype::Fetch(fetch)) if fetch.timing == FetchTiming::Activated && !permanent.tapped => *fetch,
            _ => {
                index += 1;
                continue;
            }
        };
        let mana_ready = calculate_mana_availability(&zones.battlefield).total >= usize::from(fetch.mana_cost);
        let target = select_fetch_target(&fetch.filter, &zones.library, &zones.battlefield, key_cards, turn);
        let Some(target) = target.filter(|_| mana_ready) else {
            index += 1;
            continue;
        };

        if fetch.mana_cost > 0 {
            tap_mana_for_cost(&ManaCost::generic(fetch.mana_cost), &mut zones.battlefield);
        }
        let found = zones.library.remove(target);
        let fetch_name = zones.sacrifice(index).name.clone();
        log_action!(
            log,
            "Cracked {}, fetching {}{}",
            fetch_name,
            found.name,
            tapped_suffix(fetch.fetched_tapped)
        );
        zones.battlefield.push(Permanent::enter(found, fetch.fetched_tapped));
        life += u32::from(fetch.life);
    }
    life
}

fn fetch_on_entry(
    card: Card,
    fetch: &FetchProfile,
    zones: &mut Zones,
    turn: u32,
    log: &mut Option<&mut ActionLog>,
    key_cards: &KeyCards,
) -> u32 {
    match select_fetch_target(&fetch.filter, &zones.library, &zones.battlefield, key_cards, turn) {
        Some(target) => {
            let found = zones.library.remove(target);
            log_action!(log, "Played {}, fetching {} (tapped)", card.name, found.name);
            zones.battlefield.push(Permanent::enter(found, true));
            zones.graveyard.push(card);
            u32::from(fetch.life)
        }
        None => {
            log_action!(log, "Played {} (tapped), nothing to fetch", card.name);
            zones.battlefield.push(Permanent::enter(card, true));
            0
        }
    }
}

/// Sacrifice every land that dies when another land enters
fn sacrifice_on_next_land(zones: &mut Zones, log: &mut Option<&mut ActionLog>) {
    while let Some(index) = zones
        .battlefield
        .iter()
        .position(|p| matches!(p.land_archetype(), Some(LandArchetype::SacrificeOnNextLand)))
    {
        let name = zones.sacrifice(index).name.clone();
        log_action!(log, "Sacrificed {}", name);
    }
}

/// Bounce land trigger: return a land, tapped ones first
fn return_land_to_hand(zones: &mut Zones, log: &mut Option<&mut ActionLog>, bounce_name: &str) {
    let choice = zones
        .battlefield
        .iter()
        .position(|p| is_bounce_target(p) && p.tapped)
        .or_else(|| zones.battlefield.iter().position(is_bounce_target));
    if let Some(index) = choice {
        let returned = zones.battlefield.remove(index).card;
        log_action!(log, "{} returned {} to hand", bounce_name, returned.name);
        zones.hand.push(returned);
    }
}

fn tapped_suffix(tapped: bool) -> &'static str {
    if tapped {
        " (tapped)"
    } else {
        ""
    }
}
