//! Mana payment: pip feasibility, castability and tapping
//!
//! # Pip feasibility
//!
//! Paying `{U}{B}` means finding a *distinct* unit for every colored pip.
//! That is bipartite matching between pips and units, solved here with
//! augmenting paths (Kuhn's algorithm). The sizes involved are tiny
//! (a handful of pips, a dozen or so units), so the O(V·E) bound is irrelevant.
//!
//! # Tapping
//!
//! [`tap_mana_for_cost`] mutates the battlefield greedily and does not
//! re-check feasibility: callers confirm castability first. A filter land
//! taps together with the source that activates it, so the tapped state
//! always agrees with what availability counted.

use crate::core::{Card, Color, LandArchetype, ManaCost, Permanent, Produces};
use crate::game::mana_engine::{
    pick_filter_activator, pick_odyssey_activator, unit_production, ManaAvailability, ManaUnit,
};

/// Can every pip be paid by a different unit offering that pip's color?
pub fn solve_color_pips(pips: &[Color], sources: &[ManaUnit]) -> bool {
    if pips.len() > sources.len() {
        return false;
    }
    // assigned[source] = index of the pip that source currently pays
    let mut assigned: Vec<Option<usize>> = vec![None; sources.len()];
    for pip in 0..pips.len() {
        let mut visited = vec![false; sources.len()];
        if !augment(pip, pips, sources, &mut assigned, &mut visited) {
            return false;
        }
    }
    true
}

fn augment(
    pip: usize,
    pips: &[Color],
    sources: &[ManaUnit],
    assigned: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for (index, unit) in sources.iter().enumerate() {
        if visited[index] || !unit.produces.can_produce(pips[pip]) {
            continue;
        }
        visited[index] = true;
        let free = match assigned[index] {
            None => true,
            Some(other) => augment(other, pips, sources, assigned, visited),
        };
        if free {
            assigned[index] = Some(pip);
            return true;
        }
    }
    false
}

/// Can `cost` be paid from `availability`?
///
/// With a unit list the pips go through the matching solver; aggregate-only
/// availability falls back to per-color counts.
pub fn can_pay_cost(cost: &ManaCost, availability: &ManaAvailability) -> bool {
    can_pay(cost, cost.cmc(), availability)
}

/// Castability check for a card: enough total mana, and pips payable
pub fn can_play_card(card: &Card, availability: &ManaAvailability) -> bool {
    can_pay(&card.mana_cost, card.cmc, availability)
}

fn can_pay(cost: &ManaCost, cmc: u8, availability: &ManaAvailability) -> bool {
    if availability.total < usize::from(cmc) {
        return false;
    }
    match &availability.sources {
        Some(sources) => solve_color_pips(&cost.pips(), sources),
        None => availability.colors.covers(cost),
    }
}

/// What tapping one permanent yields right now
struct PlannedTap {
    produces: Produces,
    amount: usize,
    /// Land spent to activate a filter land
    activator: Option<usize>,
}

/// Plan tapping `battlefield[index]`, or `None` if it can't be tapped for mana
///
/// An activated filter land gives two mana of its colors and spends another
/// source, picked the same way [`calculate_mana_availability`] picks it.
/// Without an activator it taps for one colorless.
///
/// [`calculate_mana_availability`]: crate::game::calculate_mana_availability
fn plan_tap(battlefield: &[Permanent], offers: &[Option<Produces>], index: usize) -> Option<PlannedTap> {
    let permanent = &battlefield[index];
    if !permanent.can_tap_for_mana() {
        return None;
    }
    let produces = offers[index]?;
    let odyssey = match permanent.land_archetype() {
        Some(LandArchetype::Filter) => false,
        Some(LandArchetype::OdysseyFilter) => true,
        _ => {
            return Some(PlannedTap {
                produces,
                amount: usize::from(permanent.mana_amount()),
                activator: None,
            })
        }
    };

    let (indices, units): (Vec<usize>, Vec<ManaUnit>) = battlefield
        .iter()
        .enumerate()
        .filter(|(other, p)| *other != index && p.can_tap_for_mana() && !is_filter(p))
        .filter_map(|(other, _)| offers[other].map(|offer| (other, ManaUnit::new(offer))))
        .unzip();
    let pick = if odyssey {
        pick_odyssey_activator(&units)
    } else {
        pick_filter_activator(&units, produces.colors().colored())
    };

    Some(match pick {
        Some(unit) => PlannedTap {
            produces,
            amount: 2,
            activator: Some(indices[unit]),
        },
        None => PlannedTap {
            produces: ManaUnit::colorless().produces,
            amount: 1,
            activator: None,
        },
    })
}

fn is_filter(permanent: &Permanent) -> bool {
    matches!(
        permanent.land_archetype(),
        Some(LandArchetype::Filter | LandArchetype::OdysseyFilter)
    )
}

/// Tap what `planned` describes, adding the mana to `pool`; returns mana produced
fn apply_tap(
    battlefield: &mut [Permanent],
    offers: &[Option<Produces>],
    index: usize,
    planned: &PlannedTap,
    pool: &mut Vec<Produces>,
) -> usize {
    battlefield[index].tap();
    pool.extend(std::iter::repeat(planned.produces).take(planned.amount));
    let mut amount = planned.amount;
    if let Some(activator) = planned.activator {
        battlefield[activator].tap();
        // A multi-mana activator only spends one of its mana on the filter
        let leftover = usize::from(battlefield[activator].mana_amount()).saturating_sub(1);
        if let Some(offer) = offers[activator] {
            pool.extend(std::iter::repeat(offer).take(leftover));
            amount += leftover;
        }
    }
    amount
}

fn take_from_pool(pool: &mut Vec<Produces>, color: Color) -> bool {
    match pool.iter().position(|mana| mana.can_produce(color)) {
        Some(position) => {
            pool.swap_remove(position);
            true
        }
        None => false,
    }
}

/// Tap permanents to pay `cost`, returning the mana produced
///
/// Colored pips are paid first, each from the first untapped qualifying
/// source in battlefield order. Mana left over from a multi-mana source or a
/// filter land pays later pips and then the generic part; the rest of the
/// generic cost taps remaining sources in battlefield order.
pub fn tap_mana_for_cost(cost: &ManaCost, battlefield: &mut [Permanent]) -> usize {
    let offers: Vec<Option<Produces>> = {
        let view: &[Permanent] = battlefield;
        view.iter().map(|p| unit_production(p, view)).collect()
    };
    let mut pool: Vec<Produces> = Vec::new();
    let mut produced = 0usize;

    for color in Color::ALL {
        for _ in 0..cost.count(color) {
            if take_from_pool(&mut pool, color) {
                continue;
            }
            let next = {
                let view: &[Permanent] = battlefield;
                (0..view.len()).find_map(|index| {
                    plan_tap(view, &offers, index)
                        .filter(|planned| planned.produces.can_produce(color))
                        .map(|planned| (index, planned))
                })
            };
            let Some((index, planned)) = next else {
                break;
            };
            produced += apply_tap(battlefield, &offers, index, &planned, &mut pool);
            take_from_pool(&mut pool, color);
        }
    }

    let mut generic = usize::from(cost.generic).saturating_sub(pool.len());
    for index in 0..battlefield.len() {
        if generic == 0 {
            break;
        }
        let Some(planned) = plan_tap(battlefield, &offers, index) else {
            continue;
        };
        let amount = apply_tap(battlefield, &offers, index, &planned, &mut pool);
        produced += amount;
        generic = generic.saturating_sub(amount);
    }

    produced
}

/// Tap for a card's own cost
pub fn tap_mana_for_spell(card: &Card, battlefield: &mut [Permanent]) -> usize {
    tap_mana_for_cost(&card.mana_cost, battlefield)
}
