//! Deck loaders
//!
//! Parser for the JSON deck format consumed by the simulator

pub mod deck;

pub use deck::{DeckEntry, DeckList, DeckLoader};
