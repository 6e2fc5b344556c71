//! Mana availability computation
//!
//! Scans the battlefield and produces the authoritative list of atomic mana
//! units that could be tapped right now.
//!
//! # Units, not colors
//!
//! A permanent with `mana_amount = k` contributes `k` independent units. A
//! permanent that can make one of several colors contributes ONE unit offering
//! a choice, never one unit per color. The per-color [`ColorCounts`] summary is
//! only a fast pre-filter: a single Underground Sea shows up under both U and
//! B there, but can pay only one of them. Simultaneous feasibility is decided
//! by [`crate::game::mana_payment::solve_color_pips`] over `sources`.
//!
//! # Conditional archetypes
//!
//! - **Filter lands** need a matching colored unit to activate. Activated,
//!   they consume that unit and emit two units of their own colors;
//!   otherwise they tap for one colorless.
//! - **Odyssey filters** accept any one unit, colorless preferred.
//! - **Verge lands** add their secondary color only while a land with the
//!   required basic type is in play.

use crate::core::{Color, ColorCounts, ColorSet, LandArchetype, Permanent, Produces};
use crate::game::land_policy::controls_basic_type;

/// One atomic, independently tappable unit of mana
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManaUnit {
    pub produces: Produces,
}

impl ManaUnit {
    pub fn new(produces: Produces) -> Self {
        ManaUnit { produces }
    }

    pub fn colorless() -> Self {
        ManaUnit::new(Produces::Colors(ColorSet::single(Color::Colorless)))
    }
}

impl From<Produces> for ManaUnit {
    fn from(produces: Produces) -> Self {
        ManaUnit::new(produces)
    }
}

/// What the battlefield can pay right now
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManaAvailability {
    /// Number of mana units
    pub total: usize,
    /// Per-color pre-filter (over-counts multi-color units)
    pub colors: ColorCounts,
    /// Authoritative unit list; `None` for aggregate-only callers
    pub sources: Option<Vec<ManaUnit>>,
}

impl ManaAvailability {
    pub fn from_units(units: Vec<ManaUnit>) -> Self {
        let mut colors = ColorCounts::new();
        for unit in &units {
            colors.add_unit(&unit.produces);
        }
        ManaAvailability {
            total: units.len(),
            colors,
            sources: Some(units),
        }
    }

    /// Availability known only in aggregate
    pub fn aggregate_only(total: usize, colors: ColorCounts) -> Self {
        ManaAvailability {
            total,
            colors,
            sources: None,
        }
    }

    /// Every color at least one unit can make
    pub fn available_colors(&self) -> ColorSet {
        self.colors.available()
    }
}

/// What a single activation of `permanent` offers, given the rest of the battlefield
///
/// Filter lands report their own colors here; whether they can actually be
/// activated is decided by [`calculate_mana_availability`].
pub fn unit_production(permanent: &Permanent, battlefield: &[Permanent]) -> Option<Produces> {
    let produces = permanent.produces()?;
    match permanent.land_archetype() {
        Some(LandArchetype::Verge {
            primary,
            secondary,
            required,
        }) => {
            let mut colors = ColorSet::single(*primary);
            if controls_basic_type(battlefield, *required) {
                colors.insert(*secondary);
            }
            Some(Produces::Colors(colors))
        }
        _ => Some(produces),
    }
}

/// Build the list of mana units the untapped battlefield can produce
///
/// Tapped permanents and summoning-sick creatures contribute nothing.
pub fn calculate_mana_availability(battlefield: &[Permanent]) -> ManaAvailability {
    let mut units = Vec::new();
    let mut filters: Vec<(&Permanent, bool)> = Vec::new();

    for permanent in battlefield {
        if !permanent.can_tap_for_mana() {
            continue;
        }
        match permanent.land_archetype() {
            Some(LandArchetype::Filter) => filters.push((permanent, false)),
            Some(LandArchetype::OdysseyFilter) => filters.push((permanent, true)),
            _ => {
                if let Some(produces) = unit_production(permanent, battlefield) {
                    for _ in 0..permanent.mana_amount() {
                        units.push(ManaUnit::new(produces));
                    }
                }
            }
        }
    }

    for (filter, odyssey) in filters {
        let Some(own) = filter.produces() else {
            continue;
        };
        let activator = if odyssey {
            pick_odyssey_activator(&units)
        } else {
            pick_filter_activator(&units, own.colors().colored())
        };
        match activator {
            Some(index) => {
                units.remove(index);
                units.push(ManaUnit::new(own));
                units.push(ManaUnit::new(own));
            }
            None => units.push(ManaUnit::colorless()),
        }
    }

    ManaAvailability::from_units(units)
}

/// Least flexible unit offering one of `colors`; colorless never qualifies
pub(crate) fn pick_filter_activator(units: &[ManaUnit], colors: ColorSet) -> Option<usize> {
    units
        .iter()
        .enumerate()
        .filter(|(_, unit)| unit.produces.colors().colored().intersects(colors))
        .min_by_key(|(_, unit)| unit.produces.color_count())
        .map(|(index, _)| index)
}

/// Any unit pays an Odyssey filter; spend colorless before colored
pub(crate) fn pick_odyssey_activator(units: &[ManaUnit]) -> Option<usize> {
    units
        .iter()
        .position(|unit| unit.produces.is_colorless_only())
        .or_else(|| {
            units
                .iter()
                .enumerate()
                .min_by_key(|(_, unit)| unit.produces.color_count())
                .map(|(index, _)| index)
        })
}
