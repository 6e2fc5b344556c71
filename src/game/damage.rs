//! Passive life loss from painful mana sources

use crate::core::{CardKind, LandArchetype, ManaPain, Permanent};
use serde::{Deserialize, Serialize};

/// Expected damage of a coin-flip rock per turn
pub const COIN_FLIP_DAMAGE: f64 = 1.5;

/// Pain lands and talismans stop mattering after this turn
pub const PAIN_LAND_LAST_TURN: u32 = 5;

/// Expected damage taken this turn
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageReport {
    pub total: f64,
    /// One line per contributing source
    pub breakdown: Vec<String>,
}

impl DamageReport {
    fn add(&mut self, name: &str, amount: f64, reason: &str) {
        self.total += amount;
        self.breakdown.push(format!("{}: {} ({})", name, amount, reason));
    }
}

/// Sum the passive life loss of every painful source on `battlefield`
pub fn calculate_battlefield_damage(battlefield: &[Permanent], turn: u32) -> DamageReport {
    let mut report = DamageReport::default();

    for permanent in battlefield {
        let name = permanent.name();
        let pain = match &permanent.card.kind {
            CardKind::Land(land) => {
                if let LandArchetype::Horizon { life } = land.archetype {
                    report.add(name, f64::from(life), "horizon land");
                    continue;
                }
                land.pain
            }
            CardKind::Artifact(producer) | CardKind::Creature(producer) => producer.pain,
            _ => None,
        };

        match pain {
            Some(ManaPain::CoinFlip) => report.add(name, COIN_FLIP_DAMAGE, "coin flip"),
            Some(ManaPain::Always(life)) => report.add(name, f64::from(life), "painful"),
            Some(ManaPain::EarlyTurns(life)) if turn <= PAIN_LAND_LAST_TURN => {
                report.add(name, f64::from(life), "pain land")
            }
            Some(ManaPain::WhenTapped(life)) if permanent.tapped => report.add(name, f64::from(life), "tapped"),
            _ => {}
        }
    }

    report
}
