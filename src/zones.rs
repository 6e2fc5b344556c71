//! Game zones (Library, Hand, Battlefield, Graveyard, Exile)
//!
//! Zones are owned by the calling game context and lent to the simulation
//! functions, which mutate them in place.

use crate::core::{Card, Permanent};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// All zones of the simulated player
///
/// The top of the library is the end of the vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Zones {
    pub library: Vec<Card>,
    pub hand: Vec<Card>,
    pub battlefield: Vec<Permanent>,
    pub graveyard: Vec<Card>,
    pub exile: Vec<Card>,
}

impl Zones {
    pub fn new(library: Vec<Card>) -> Self {
        Zones {
            library,
            ..Self::default()
        }
    }

    /// Draw from top of library into hand; false when the library is empty
    pub fn draw(&mut self) -> bool {
        match self.library.pop() {
            Some(card) => {
                self.hand.push(card);
                true
            }
            None => false,
        }
    }

    /// Draw up to `count` cards, returning how many were drawn
    pub fn draw_n(&mut self, count: usize) -> usize {
        (0..count).take_while(|_| self.draw()).count()
    }

    /// Shuffle the library
    pub fn shuffle_library(&mut self, rng: &mut impl Rng) {
        self.library = shuffle(&self.library, rng);
    }

    /// Untap step: untap everything and clear summoning sickness
    pub fn untap_step(&mut self) {
        for permanent in &mut self.battlefield {
            permanent.untap();
            permanent.summoning_sick = false;
        }
    }

    /// Number of lands on the battlefield
    pub fn lands_in_play(&self) -> usize {
        self.battlefield.iter().filter(|p| p.is_land()).count()
    }

    /// Move a battlefield permanent to the graveyard, returning its card
    pub fn sacrifice(&mut self, index: usize) -> &Card {
        let permanent = self.battlefield.remove(index);
        self.graveyard.push(permanent.card);
        &self.graveyard[self.graveyard.len() - 1]
    }
}

/// Return a random permutation of `items`
pub fn shuffle<T: Clone>(items: &[T], rng: &mut impl Rng) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::HashSet;

    fn forest() -> Card {
        Card::basic_land("Forest", Color::Green)
    }

    #[test]
    fn test_library_operations() {
        let mut zones = Zones::new(vec![forest(), Card::spell("Bottom", "{1}"), Card::spell("Top", "{2}")]);

        assert!(zones.draw());
        assert_eq!(zones.hand[0].name, "Top");
        assert_eq!(zones.draw_n(5), 2);
        assert!(zones.library.is_empty());
        assert!(!zones.draw());
        assert_eq!(zones.hand.len(), 3);
    }

    #[test]
    fn test_untap_step_clears_state() {
        let mut zones = Zones::default();
        let mut permanent = Permanent::enter(forest(), true);
        permanent.summoning_sick = true;
        zones.battlefield.push(permanent);

        zones.untap_step();
        assert!(!zones.battlefield[0].tapped);
        assert!(!zones.battlefield[0].summoning_sick);
        assert_eq!(zones.lands_in_play(), 1);
    }

    #[test]
    fn test_sacrifice_moves_to_graveyard() {
        let mut zones = Zones::default();
        zones.battlefield.push(Permanent::enter(forest(), false));
        assert_eq!(zones.sacrifice(0).name, "Forest");
        assert!(zones.battlefield.is_empty());
        assert_eq!(zones.graveyard.len(), 1);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        let items = vec![1, 2, 2, 3, 5, 8];
        let mut shuffled = shuffle(&items, &mut rng);
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn test_shuffle_reaches_every_ordering() {
        let mut rng = ChaCha12Rng::seed_from_u64(42);
        let items = ['a', 'b', 'c'];
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.insert(shuffle(&items, &mut rng));
            if seen.len() == 6 {
                break;
            }
        }
        assert_eq!(seen.len(), 6);
    }
}
