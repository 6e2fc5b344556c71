//! Monte Carlo trials: many independent games run in parallel
//!
//! Each game gets its own seed, drawn from a master Xoshiro stream, so the
//! whole batch is reproducible from one number no matter how rayon schedules
//! the work. Games share nothing; only their snapshots are aggregated.

use crate::core::Card;
use crate::game::{GameSimulation, KeyCards, SimulationConfig, TurnSnapshot};
use crate::{Result, SimError};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How many games to run and what to measure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialOptions {
    pub trials: usize,
    pub turns: u32,
    /// Mana count whose per-turn probability is reported
    pub target_mana: usize,
    /// Master seed; `None` picks one at random
    pub seed: Option<u64>,
}

impl Default for TrialOptions {
    fn default() -> Self {
        TrialOptions {
            trials: 1000,
            turns: 10,
            target_mana: 5,
            seed: None,
        }
    }
}

impl TrialOptions {
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(SimError::InvalidConfig("trials must be at least 1".to_string()));
        }
        if self.turns == 0 {
            return Err(SimError::InvalidConfig("turns must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Averages over all games for one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnStats {
    pub turn: u32,
    pub avg_lands: f64,
    pub avg_mana: f64,
    /// Fraction of games with at least the target mana
    pub target_probability: f64,
    pub avg_life_lost: f64,
    pub avg_damage: f64,
}

/// Aggregated result of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    pub trials: usize,
    pub seed: u64,
    pub target_mana: usize,
    pub turns: Vec<TurnStats>,
}

impl TrialSummary {
    /// First turn on which at least `probability` of games reached the target
    pub fn turn_reaching(&self, probability: f64) -> Option<u32> {
        self.turns
            .iter()
            .find(|stats| stats.target_probability >= probability)
            .map(|stats| stats.turn)
    }
}

/// Per-game seeds derived from `master`
pub fn trial_seeds(master: u64, trials: usize) -> Vec<u64> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(master);
    (0..trials).map(|_| rng.gen()).collect()
}

/// Run `options.trials` games of `library` and aggregate them
pub fn run_trials(
    library: &[Card],
    key_cards: &KeyCards,
    config: &SimulationConfig,
    options: &TrialOptions,
) -> Result<TrialSummary> {
    options.validate()?;
    let seed = options.seed.unwrap_or_else(|| rand::thread_rng().gen());

    let games: Vec<Vec<TurnSnapshot>> = trial_seeds(seed, options.trials)
        .into_par_iter()
        .map(|game_seed| {
            GameSimulation::new(library.to_vec(), key_cards.clone(), game_seed)
                .with_config(config.clone())
                .run_turns(options.turns)
        })
        .collect();

    Ok(TrialSummary {
        trials: options.trials,
        seed,
        target_mana: options.target_mana,
        turns: aggregate(&games, options.turns, options.target_mana),
    })
}

fn aggregate(games: &[Vec<TurnSnapshot>], turns: u32, target_mana: usize) -> Vec<TurnStats> {
    let count = games.len().max(1) as f64;
    (0..turns as usize)
        .map(|index| {
            let snapshots = games.iter().filter_map(|game| game.get(index));
            let mut lands = 0.0;
            let mut mana = 0.0;
            let mut reached = 0.0;
            let mut life = 0.0;
            let mut damage = 0.0;
            for snapshot in snapshots {
                lands += snapshot.lands as f64;
                mana += snapshot.mana_total as f64;
                life += f64::from(snapshot.life_lost);
                damage += snapshot.damage;
                if snapshot.mana_total >= target_mana {
                    reached += 1.0;
                }
            }
            TurnStats {
                turn: index as u32 + 1,
                avg_lands: lands / count,
                avg_mana: mana / count,
                target_probability: reached / count,
                avg_life_lost: life / count,
                avg_damage: damage / count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    fn forests(n: usize) -> Vec<Card> {
        (0..n).map(|_| Card::basic_land("Forest", Color::Green)).collect()
    }

    #[test]
    fn test_seeds_are_reproducible() {
        assert_eq!(trial_seeds(7, 5), trial_seeds(7, 5));
        assert_ne!(trial_seeds(7, 5), trial_seeds(8, 5));
    }

    #[test]
    fn test_all_land_deck_hits_target_on_schedule() {
        let options = TrialOptions {
            trials: 16,
            turns: 4,
            target_mana: 3,
            seed: Some(1),
        };
        let summary = run_trials(&forests(40), &KeyCards::empty(), &SimulationConfig::default(), &options).unwrap();
        assert_eq!(summary.turns.len(), 4);
        assert_eq!(summary.turns[0].avg_lands, 1.0);
        assert_eq!(summary.turns[1].target_probability, 0.0);
        assert_eq!(summary.turns[2].target_probability, 1.0);
        assert_eq!(summary.turn_reaching(0.5), Some(3));
    }

    #[test]
    fn test_invalid_options() {
        let options = TrialOptions {
            trials: 0,
            ..TrialOptions::default()
        };
        let result = run_trials(&forests(40), &KeyCards::empty(), &SimulationConfig::default(), &options);
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }
}
