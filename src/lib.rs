//! MTG Mana Sim - turn-by-turn resource simulation for deck mana bases
//!
//! Models land drops, mana production and mana-gated permanents/ramp spells
//! so an outer driver can estimate how quickly a deck reaches a target mana
//! base over many simulated games.

pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod trials;
pub mod zones;

pub use error::{Result, SimError};
