//! Core card and mana types

pub mod card;
pub mod mana;
pub mod permanent;

pub use card::{
    BasicType, Card, CardKind, EntryRule, EtbCost, ExplorationProfile, FetchFilter, FetchProfile, FetchTiming,
    LandArchetype, LandProfile, ManaPain, ManaProducer, ProductionCondition, RampProfile, RitualProfile,
};
pub use mana::{Color, ColorCounts, ColorSet, ManaCost, Produces};
pub use permanent::Permanent;
