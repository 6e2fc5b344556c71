//! Per-turn resource simulation

#[macro_use]
pub mod logger;

pub mod cast_loop;
pub mod config;
pub mod damage;
pub mod fetch;
pub mod key_cards;
pub mod land_play;
pub mod land_policy;
pub mod land_selection;
pub mod mana_engine;
pub mod mana_payment;
pub mod turn;

pub use cast_loop::{cast_spells, CastReport};
pub use config::{GameMode, SimulationConfig};
pub use damage::{calculate_battlefield_damage, DamageReport};
pub use fetch::select_fetch_target;
pub use key_cards::KeyCards;
pub use land_play::{crack_fetch_lands, play_land};
pub use land_policy::does_land_enter_tapped;
pub use land_selection::select_best_land;
pub use logger::{ActionLog, LogEntry, OutputMode, VerbosityLevel};
pub use mana_engine::{calculate_mana_availability, ManaAvailability, ManaUnit};
pub use mana_payment::{can_pay_cost, can_play_card, solve_color_pips, tap_mana_for_cost, tap_mana_for_spell};
pub use turn::{GameSimulation, TurnSnapshot};
