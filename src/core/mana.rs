//! Mana symbols, costs and color sets

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Mana colors in MTG
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
}

impl Color {
    /// All six mana types in WUBRGC order
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Colorless,
    ];

    /// The five colors (no colorless)
    pub const WUBRG: [Color; 5] = [Color::White, Color::Blue, Color::Black, Color::Red, Color::Green];

    pub fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Colorless => 'C',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'W' | 'w' => Some(Color::White),
            'U' | 'u' => Some(Color::Blue),
            'B' | 'b' => Some(Color::Black),
            'R' | 'r' => Some(Color::Red),
            'G' | 'g' => Some(Color::Green),
            'C' | 'c' => Some(Color::Colorless),
            _ => None,
        }
    }

    pub fn is_colored(self) -> bool {
        self != Color::Colorless
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A set of mana colors, stored as a bit mask
///
/// Serialized as a symbol string such as `"UB"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorSet(u8);

impl ColorSet {
    pub const EMPTY: ColorSet = ColorSet(0);

    pub fn new() -> Self {
        Self::EMPTY
    }

    pub fn single(color: Color) -> Self {
        ColorSet(color.bit())
    }

    /// All five colors
    pub fn wubrg() -> Self {
        Color::WUBRG.into_iter().collect()
    }

    pub fn contains(&self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    pub fn insert(&mut self, color: Color) {
        self.0 |= color.bit();
    }

    pub fn remove(&mut self, color: Color) {
        self.0 &= !color.bit();
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn intersects(&self, other: ColorSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(&self, other: ColorSet) -> ColorSet {
        ColorSet(self.0 | other.0)
    }

    pub fn intersection(&self, other: ColorSet) -> ColorSet {
        ColorSet(self.0 & other.0)
    }

    pub fn difference(&self, other: ColorSet) -> ColorSet {
        ColorSet(self.0 & !other.0)
    }

    /// The same set without colorless
    pub fn colored(&self) -> ColorSet {
        self.difference(ColorSet::single(Color::Colorless))
    }

    /// Iterate members in WUBRGC order
    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        Color::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl From<Color> for ColorSet {
    fn from(color: Color) -> Self {
        ColorSet::single(color)
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        let mut set = ColorSet::new();
        for color in iter {
            set.insert(color);
        }
        set
    }
}

impl FromStr for ColorSet {
    type Err = String;

    /// Parse symbols like `"UB"`, `"{U}{B}"` or `"U,B"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = ColorSet::new();
        for c in s.chars() {
            if matches!(c, '{' | '}' | ',' | ' ' | '/') {
                continue;
            }
            match Color::from_symbol(c) {
                Some(color) => set.insert(color),
                None => return Err(format!("unknown color symbol '{c}' in \"{s}\"")),
            }
        }
        Ok(set)
    }
}

impl TryFrom<String> for ColorSet {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ColorSet> for String {
    fn from(set: ColorSet) -> Self {
        set.to_string()
    }
}

impl fmt::Display for ColorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in self.iter() {
            write!(f, "{color}")?;
        }
        Ok(())
    }
}

/// What a mana source can produce: a fixed set of colors, or any color
///
/// Serialized as `"any"` or as a symbol string (`"G"`, `"UB"`, `"C"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Produces {
    Colors(ColorSet),
    Any,
}

impl Produces {
    pub fn can_produce(&self, color: Color) -> bool {
        match self {
            Produces::Any => color.is_colored(),
            Produces::Colors(set) => set.contains(color),
        }
    }

    /// Concrete colors this source may choose from (`Any` expands to WUBRG)
    pub fn colors(&self) -> ColorSet {
        match self {
            Produces::Any => ColorSet::wubrg(),
            Produces::Colors(set) => *set,
        }
    }

    /// Number of distinct colored options
    pub fn color_count(&self) -> usize {
        self.colors().colored().len()
    }

    /// True for sources that only make colorless mana
    pub fn is_colorless_only(&self) -> bool {
        self.colors().colored().is_empty()
    }

    /// A copy of this production with one more color option
    pub fn with(&self, color: Color) -> Produces {
        match self {
            Produces::Any => Produces::Any,
            Produces::Colors(set) => {
                let mut set = *set;
                set.insert(color);
                Produces::Colors(set)
            }
        }
    }
}

impl Default for Produces {
    fn default() -> Self {
        Produces::Colors(ColorSet::single(Color::Colorless))
    }
}

impl From<ColorSet> for Produces {
    fn from(set: ColorSet) -> Self {
        Produces::Colors(set)
    }
}

impl TryFrom<String> for Produces {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.trim().eq_ignore_ascii_case("any") {
            Ok(Produces::Any)
        } else {
            Ok(Produces::Colors(s.parse()?))
        }
    }
}

impl From<Produces> for String {
    fn from(produces: Produces) -> Self {
        produces.to_string()
    }
}

impl fmt::Display for Produces {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Produces::Any => write!(f, "any"),
            Produces::Colors(set) => write!(f, "{set}"),
        }
    }
}

/// Represents a mana cost (e.g., "{2}{R}{R}" = 2 generic + 2 red)
/// Copy-eligible since it's just 8 u8 fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ManaCost {
    pub generic: u8,
    pub white: u8,
    pub blue: u8,
    pub black: u8,
    pub red: u8,
    pub green: u8,
    pub colorless: u8,
    /// Number of {X} symbols (valued at zero)
    pub x_count: u8,
}

impl ManaCost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cost of `amount` generic mana
    pub fn generic(amount: u8) -> Self {
        ManaCost {
            generic: amount,
            ..Self::default()
        }
    }

    /// Parse a mana cost string like `"{2}{G}"`, `"2RR"` or `"{G/U}{B}"`
    ///
    /// Hybrid and Phyrexian symbols count toward the generic part; unknown
    /// symbols are ignored.
    pub fn from_string(s: &str) -> Self {
        let mut cost = ManaCost::new();
        for token in tokenize(s) {
            cost.add_symbol(&token);
        }
        cost
    }

    fn add_symbol(&mut self, symbol: &str) {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return;
        }
        if symbol.bytes().all(|b| b.is_ascii_digit()) {
            let n = symbol.parse::<u8>().unwrap_or(u8::MAX);
            self.generic = self.generic.saturating_add(n);
            return;
        }
        if let Some((left, _)) = symbol.split_once('/') {
            let amount = left.parse::<u8>().unwrap_or(1);
            self.generic = self.generic.saturating_add(amount);
            return;
        }
        let mut chars = symbol.chars();
        match (chars.next(), chars.next()) {
            (Some('X' | 'x'), None) => self.x_count = self.x_count.saturating_add(1),
            (Some(c), None) => {
                if let Some(color) = Color::from_symbol(c) {
                    let count = self.count_mut(color);
                    *count = count.saturating_add(1);
                }
            }
            _ => {}
        }
    }

    fn count_mut(&mut self, color: Color) -> &mut u8 {
        match color {
            Color::White => &mut self.white,
            Color::Blue => &mut self.blue,
            Color::Black => &mut self.black,
            Color::Red => &mut self.red,
            Color::Green => &mut self.green,
            Color::Colorless => &mut self.colorless,
        }
    }

    /// Number of pips of one mana type
    pub fn count(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white,
            Color::Blue => self.blue,
            Color::Black => self.black,
            Color::Red => self.red,
            Color::Green => self.green,
            Color::Colorless => self.colorless,
        }
    }

    /// Total converted mana cost, saturating at `u8::MAX`
    pub fn cmc(&self) -> u8 {
        [self.white, self.blue, self.black, self.red, self.green, self.colorless]
            .into_iter()
            .fold(self.generic, u8::saturating_add)
    }

    /// Every non-generic pip, in WUBRGC order
    pub fn pips(&self) -> SmallVec<[Color; 8]> {
        let mut pips = SmallVec::new();
        for color in Color::ALL {
            for _ in 0..self.count(color) {
                pips.push(color);
            }
        }
        pips
    }

    /// Colors named by the cost's pips (colorless excluded)
    pub fn colors(&self) -> ColorSet {
        Color::WUBRG.into_iter().filter(|c| self.count(*c) > 0).collect()
    }
}

/// Split a cost string into symbols: brace contents, or single characters
/// with consecutive digits grouped together
fn tokenize(s: &str) -> Vec<String> {
    if s.contains('{') {
        return s
            .split(|c| c == '{' || c == '}')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
    }

    let mut tokens = Vec::new();
    let mut digits = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if !digits.is_empty() {
            tokens.push(std::mem::take(&mut digits));
        }
        if !c.is_whitespace() {
            tokens.push(c.to_string());
        }
    }
    if !digits.is_empty() {
        tokens.push(digits);
    }
    tokens
}

impl From<String> for ManaCost {
    fn from(s: String) -> Self {
        ManaCost::from_string(&s)
    }
}

impl From<&str> for ManaCost {
    fn from(s: &str) -> Self {
        ManaCost::from_string(s)
    }
}

impl From<ManaCost> for String {
    fn from(cost: ManaCost) -> Self {
        cost.to_string()
    }
}

impl fmt::Display for ManaCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.x_count {
            write!(f, "{{X}}")?;
        }
        if self.generic > 0 {
            write!(f, "{{{}}}", self.generic)?;
        }
        for color in Color::ALL {
            for _ in 0..self.count(color) {
                write!(f, "{{{color}}}")?;
            }
        }
        Ok(())
    }
}

/// Per-color production counts, used as a fast aggregate pre-filter
///
/// A source offering several colors counts toward each of them, so these
/// numbers can over-state what is payable at the same time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorCounts {
    pub white: u8,
    pub blue: u8,
    pub black: u8,
    pub red: u8,
    pub green: u8,
    pub colorless: u8,
}

impl ColorCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white,
            Color::Blue => self.blue,
            Color::Black => self.black,
            Color::Red => self.red,
            Color::Green => self.green,
            Color::Colorless => self.colorless,
        }
    }

    /// Count one unit of production toward every color it offers
    pub fn add_unit(&mut self, produces: &Produces) {
        for color in produces.colors().iter() {
            let slot = match color {
                Color::White => &mut self.white,
                Color::Blue => &mut self.blue,
                Color::Black => &mut self.black,
                Color::Red => &mut self.red,
                Color::Green => &mut self.green,
                Color::Colorless => &mut self.colorless,
            };
            *slot = slot.saturating_add(1);
        }
    }

    /// Colors with at least one unit of production
    pub fn available(&self) -> ColorSet {
        Color::ALL.into_iter().filter(|c| self.get(*c) > 0).collect()
    }

    /// Aggregate check: every pip color is covered by enough units
    pub fn covers(&self, cost: &ManaCost) -> bool {
        Color::ALL.into_iter().all(|c| self.get(c) >= cost.count(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mana_cost_parsing() {
        let cost = ManaCost::from_string("2RR");
        assert_eq!(cost.generic, 2);
        assert_eq!(cost.red, 2);
        assert_eq!(cost.cmc(), 4);

        let cost2 = ManaCost::from_string("{1}{U}{B}");
        assert_eq!(cost2.generic, 1);
        assert_eq!(cost2.blue, 1);
        assert_eq!(cost2.black, 1);
        assert_eq!(cost2.cmc(), 3);

        let big = ManaCost::from_string("{10}{G}");
        assert_eq!(big.generic, 10);
        assert_eq!(big.cmc(), 11);
    }

    #[test]
    fn test_oversized_costs_saturate() {
        let cost = ManaCost::from_string("{255}{G}");
        assert_eq!(cost.generic, 255);
        assert_eq!(cost.green, 1);
        assert_eq!(cost.cmc(), u8::MAX);

        let huge = ManaCost::from_string("{99999}");
        assert_eq!(huge.generic, u8::MAX);

        let many_pips = ManaCost::from_string(&"G".repeat(300));
        assert_eq!(many_pips.green, u8::MAX);
        assert_eq!(many_pips.cmc(), u8::MAX);
    }

    #[test]
    fn test_hybrid_and_x_symbols() {
        let cost = ManaCost::from_string("{X}{G/U}{2/W}{B/P}");
        assert_eq!(cost.x_count, 1);
        assert_eq!(cost.generic, 4);
        assert!(cost.pips().is_empty());
    }

    #[test]
    fn test_pips_order() {
        let cost = ManaCost::from_string("{2}{G}{U}{C}");
        assert_eq!(cost.pips().as_slice(), &[Color::Blue, Color::Green, Color::Colorless]);
        assert_eq!(cost.colors().to_string(), "UG");
    }

    #[test]
    fn test_cost_display_round_trip() {
        let cost = ManaCost::from_string("2GG");
        assert_eq!(cost.to_string(), "{2}{G}{G}");
        assert_eq!(ManaCost::from_string(&cost.to_string()), cost);
    }

    #[test]
    fn test_produces_parsing() {
        assert_eq!(Produces::try_from("any".to_string()), Ok(Produces::Any));
        let ub = Produces::try_from("UB".to_string()).unwrap();
        assert!(ub.can_produce(Color::Blue));
        assert!(ub.can_produce(Color::Black));
        assert!(!ub.can_produce(Color::Green));
        assert_eq!(ub.color_count(), 2);
        assert!(Produces::try_from("Q".to_string()).is_err());
    }

    #[test]
    fn test_any_does_not_make_colorless() {
        assert!(!Produces::Any.can_produce(Color::Colorless));
        assert!(Produces::Any.can_produce(Color::Red));
        assert!(Produces::default().is_colorless_only());
    }

    #[test]
    fn test_color_counts_over_count_duals() {
        let mut counts = ColorCounts::new();
        counts.add_unit(&Produces::Colors("UB".parse().unwrap()));
        assert_eq!(counts.blue, 1);
        assert_eq!(counts.black, 1);
        // The aggregate view believes {U}{B} is payable; only the matching solver knows better
        assert!(counts.covers(&ManaCost::from_string("{U}{B}")));
    }
}
