//! Card records consumed by the simulation
//!
//! Cards arrive already classified by an external processor. Each card has a
//! shared base (name, cmc, mana cost) and exactly one [`CardKind`] carrying the
//! attributes relevant to that kind, so impossible flag combinations (a fetch
//! land that is also a bounce land) cannot be expressed.

use crate::core::{Color, ColorSet, ManaCost, Produces};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Basic land types (the subtypes fetch, check and verge lands care about)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicType {
    Plains,
    Island,
    Swamp,
    Mountain,
    Forest,
}

impl BasicType {
    pub fn color(self) -> Color {
        match self {
            BasicType::Plains => Color::White,
            BasicType::Island => Color::Blue,
            BasicType::Swamp => Color::Black,
            BasicType::Mountain => Color::Red,
            BasicType::Forest => Color::Green,
        }
    }

    pub fn for_color(color: Color) -> Option<Self> {
        match color {
            Color::White => Some(BasicType::Plains),
            Color::Blue => Some(BasicType::Island),
            Color::Black => Some(BasicType::Swamp),
            Color::Red => Some(BasicType::Mountain),
            Color::Green => Some(BasicType::Forest),
            Color::Colorless => None,
        }
    }
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A card in a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Card name (e.g., "Cultivate")
    pub name: String,

    /// Mana value
    #[serde(default)]
    pub cmc: u8,

    /// Mana cost
    #[serde(default)]
    pub mana_cost: ManaCost,

    /// Kind-specific attributes
    #[serde(flatten)]
    pub kind: CardKind,
}

/// Closed set of card kinds the simulation distinguishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CardKind {
    Land(LandProfile),
    Artifact(ManaProducer),
    Creature(ManaProducer),
    /// Anything the simulation does not cast (removal, threats, ...)
    Spell,
    RampSpell(RampProfile),
    Ritual(RitualProfile),
    Exploration(ExplorationProfile),
}

fn one() -> u8 {
    1
}

fn two() -> u8 {
    2
}

fn three() -> u8 {
    3
}

fn yes() -> bool {
    true
}

/// Land attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandProfile {
    #[serde(default)]
    pub produces: Produces,

    /// Units of mana one activation yields
    #[serde(default = "one")]
    pub mana_amount: u8,

    /// Basic land (Forest, Island, ...)
    #[serde(default)]
    pub basic: bool,

    /// Explicit basic land types; derived from `produces` for basics when empty
    #[serde(default)]
    pub subtypes: SmallVec<[BasicType; 2]>,

    #[serde(default)]
    pub archetype: LandArchetype,

    /// Explicit always-tapped / always-untapped flag
    #[serde(default)]
    pub entry: EntryRule,

    #[serde(default)]
    pub pain: Option<ManaPain>,
}

impl LandProfile {
    /// Basic land types this land has
    pub fn basic_types(&self) -> SmallVec<[BasicType; 2]> {
        if !self.subtypes.is_empty() || !self.basic {
            return self.subtypes.clone();
        }
        self.produces
            .colors()
            .iter()
            .filter_map(BasicType::for_color)
            .collect()
    }

    pub fn has_basic_type(&self, basic_type: BasicType) -> bool {
        self.basic_types().contains(&basic_type)
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self.archetype, LandArchetype::Fetch(_))
    }

    pub fn is_bounce(&self) -> bool {
        matches!(self.archetype, LandArchetype::Bounce)
    }

    pub fn is_shock(&self) -> bool {
        matches!(self.archetype, LandArchetype::Shock { .. })
    }
}

impl Default for LandProfile {
    fn default() -> Self {
        LandProfile {
            produces: Produces::default(),
            mana_amount: 1,
            basic: false,
            subtypes: SmallVec::new(),
            archetype: LandArchetype::default(),
            entry: EntryRule::default(),
            pain: None,
        }
    }
}

/// Land archetypes with special entry or production rules
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LandArchetype {
    #[default]
    Plain,
    Fetch(FetchProfile),
    /// Returns a land you control to hand when it enters
    Bounce,
    /// May enter untapped for life
    Shock {
        #[serde(default = "two")]
        life: u8,
    },
    /// Untapped while you control two or fewer other lands
    Fast,
    /// Untapped with two or more basics in play
    Battle,
    /// Untapped if you control a land with one of the required types
    Check {
        #[serde(default)]
        required: SmallVec<[BasicType; 2]>,
    },
    /// Untapped in multiplayer games
    Crowd,
    /// Untapped if you control two or more other lands
    Slow,
    /// `{1}, {T}` style filter: needs a matching colored mana to activate
    Filter,
    /// Odyssey filter: any one mana activates it
    OdysseyFilter,
    /// Dual with a life cost per activation
    Horizon {
        #[serde(default = "one")]
        life: u8,
    },
    /// Secondary color only with the required basic type in play
    Verge {
        primary: Color,
        secondary: Color,
        required: BasicType,
    },
    /// Modal double-faced card: untapped for life early, tapped and free later
    Mdfc {
        #[serde(default = "three")]
        life: u8,
    },
    /// Chooses an extra color as it enters
    Thriving { primary: Color },
    /// Sacrificed when another land enters (City of Traitors)
    SacrificeOnNextLand,
}

/// Explicit tapped/untapped behavior for lands without a special rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryRule {
    #[default]
    Default,
    AlwaysTapped,
    AlwaysUntapped,
}

/// When a fetch land searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FetchTiming {
    /// Searches as it enters, then goes to the graveyard
    OnEntry,
    /// Searches when activated later (Polluted Delta, Evolving Wilds)
    #[default]
    Activated,
}

/// Which library lands a search may find
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchFilter {
    /// Allowed colors; empty means any color
    #[serde(default)]
    pub colors: ColorSet,

    /// Only basic lands
    #[serde(default = "yes")]
    pub basic_only: bool,
}

impl FetchFilter {
    /// Any land at all
    pub fn any_land() -> Self {
        FetchFilter {
            colors: ColorSet::new(),
            basic_only: false,
        }
    }

    /// Does `land` satisfy this filter?
    pub fn matches(&self, land: &LandProfile) -> bool {
        if self.basic_only && !land.basic {
            return false;
        }
        if self.colors.is_empty() {
            return true;
        }
        land.produces.colors().intersects(self.colors)
            || land.basic_types().iter().any(|t| self.colors.contains(t.color()))
    }
}

impl Default for FetchFilter {
    /// Unknown filters fall back to "basic land"
    fn default() -> Self {
        FetchFilter {
            colors: ColorSet::new(),
            basic_only: true,
        }
    }
}

/// Fetch land attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchProfile {
    #[serde(default)]
    pub timing: FetchTiming,

    /// Generic mana paid to activate
    #[serde(default)]
    pub mana_cost: u8,

    /// Life paid to activate
    #[serde(default)]
    pub life: u8,

    #[serde(default)]
    pub filter: FetchFilter,

    /// The found land enters tapped
    #[serde(default)]
    pub fetched_tapped: bool,
}

/// Extra cost paid as a mana permanent enters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EtbCost {
    #[default]
    None,
    /// Discard a land card (Mox Diamond)
    DiscardLand,
    /// Exile a nonland card from hand (Chrome Mox)
    ImprintNonland,
    /// Discard the rest of the hand (Lion's Eye Diamond style)
    DiscardHand,
    /// Sacrifice a land you control
    SacrificeLand,
}

/// Production that only works under a condition; recorded, never enforced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductionCondition {
    Metalcraft,
    Legendary,
}

impl fmt::Display for ProductionCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductionCondition::Metalcraft => write!(f, "metalcraft"),
            ProductionCondition::Legendary => write!(f, "legendary"),
        }
    }
}

/// Mana artifacts and mana creatures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManaProducer {
    #[serde(default)]
    pub produces: Produces,

    #[serde(default = "one")]
    pub mana_amount: u8,

    /// Cast before anything else regardless of cost (moxen)
    #[serde(default)]
    pub mox_priority: bool,

    /// One-shot mana (Lotus Petal); never cast by the simulation
    #[serde(default)]
    pub burst: bool,

    #[serde(default)]
    pub etb_cost: EtbCost,

    #[serde(default)]
    pub condition: Option<ProductionCondition>,

    #[serde(default)]
    pub enters_tapped: bool,

    #[serde(default)]
    pub pain: Option<ManaPain>,
}

impl Default for ManaProducer {
    fn default() -> Self {
        ManaProducer {
            produces: Produces::default(),
            mana_amount: 1,
            mox_priority: false,
            burst: false,
            etb_cost: EtbCost::None,
            condition: None,
            enters_tapped: false,
            pain: None,
        }
    }
}

/// Ramp spell attributes (Cultivate, Rampant Growth, Harrow, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RampProfile {
    #[serde(default)]
    pub filter: FetchFilter,

    /// Lands put onto the battlefield
    #[serde(default = "one")]
    pub to_battlefield: u8,

    /// Lands put into hand
    #[serde(default)]
    pub to_hand: u8,

    /// Battlefield lands enter tapped
    #[serde(default = "yes")]
    pub enters_tapped: bool,

    /// Sacrifice a land as an additional cost
    #[serde(default)]
    pub sacrifice_land: bool,
}

impl RampProfile {
    /// Matching library lands needed before the spell is worth casting
    pub fn min_fetch(&self) -> usize {
        usize::from(self.to_battlefield > 0) + usize::from(self.to_hand > 0)
    }
}

impl Default for RampProfile {
    /// Unknown ramp spells fetch one tapped basic
    fn default() -> Self {
        RampProfile {
            filter: FetchFilter::default(),
            to_battlefield: 1,
            to_hand: 0,
            enters_tapped: true,
            sacrifice_land: false,
        }
    }
}

/// Rituals (one-shot mana spells); the simulation never casts them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RitualProfile {
    #[serde(default)]
    pub produces: Produces,

    #[serde(default)]
    pub mana_amount: u8,
}

/// Permanents granting additional land drops (Exploration, Azusa)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorationProfile {
    #[serde(default = "one")]
    pub extra_land_drops: u8,

    #[serde(default)]
    pub etb_cost: EtbCost,
}

impl Default for ExplorationProfile {
    fn default() -> Self {
        ExplorationProfile {
            extra_land_drops: 1,
            etb_cost: EtbCost::None,
        }
    }
}

/// Passive life loss from using a mana source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "life", rename_all = "camelCase")]
pub enum ManaPain {
    /// Coin flip on upkeep (Mana Crypt): 1.5 expected damage per turn
    CoinFlip,
    /// Always hurts when used (Ancient Tomb)
    Always(u8),
    /// Pain lands and talismans; only relevant in the early turns
    EarlyTurns(u8),
    /// Five-color pain lands; counted only once tapped
    WhenTapped(u8),
}

impl Card {
    fn with_kind(name: impl Into<String>, mana_cost: &str, kind: CardKind) -> Self {
        let mana_cost = ManaCost::from_string(mana_cost);
        Card {
            name: name.into(),
            cmc: mana_cost.cmc(),
            mana_cost,
            kind,
        }
    }

    /// A land card
    pub fn land(name: impl Into<String>, profile: LandProfile) -> Self {
        Self::with_kind(name, "", CardKind::Land(profile))
    }

    /// A basic land producing `color`
    pub fn basic_land(name: impl Into<String>, color: Color) -> Self {
        Self::land(
            name,
            LandProfile {
                produces: Produces::Colors(color.into()),
                basic: true,
                ..LandProfile::default()
            },
        )
    }

    /// A mana artifact
    pub fn artifact(name: impl Into<String>, mana_cost: &str, producer: ManaProducer) -> Self {
        Self::with_kind(name, mana_cost, CardKind::Artifact(producer))
    }

    /// A mana creature
    pub fn creature(name: impl Into<String>, mana_cost: &str, producer: ManaProducer) -> Self {
        Self::with_kind(name, mana_cost, CardKind::Creature(producer))
    }

    /// A spell the simulation only tracks (never casts)
    pub fn spell(name: impl Into<String>, mana_cost: &str) -> Self {
        Self::with_kind(name, mana_cost, CardKind::Spell)
    }

    /// A ramp spell
    pub fn ramp_spell(name: impl Into<String>, mana_cost: &str, profile: RampProfile) -> Self {
        Self::with_kind(name, mana_cost, CardKind::RampSpell(profile))
    }

    /// An exploration-style permanent
    pub fn exploration(name: impl Into<String>, mana_cost: &str, profile: ExplorationProfile) -> Self {
        Self::with_kind(name, mana_cost, CardKind::Exploration(profile))
    }

    pub fn is_land(&self) -> bool {
        matches!(self.kind, CardKind::Land(_))
    }

    pub fn as_land(&self) -> Option<&LandProfile> {
        match &self.kind {
            CardKind::Land(profile) => Some(profile),
            _ => None,
        }
    }

    /// Mana artifact or mana creature attributes
    pub fn as_producer(&self) -> Option<&ManaProducer> {
        match &self.kind {
            CardKind::Artifact(producer) | CardKind::Creature(producer) => Some(producer),
            _ => None,
        }
    }

    pub fn is_creature(&self) -> bool {
        matches!(self.kind, CardKind::Creature(_))
    }

    pub fn is_basic_land(&self) -> bool {
        self.as_land().is_some_and(|land| land.basic)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
