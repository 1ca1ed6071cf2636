//! Shuffled pool of undrawn tile instances.

use hearthstead_core::{TileDefinition, TileInstance, TileInstanceId};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Ordered deck consumed from the end only.
///
/// The deck is permuted exactly once at construction with a Fisher-Yates
/// shuffle driven by a seeded ChaCha8 generator and never reshuffled.
#[derive(Debug)]
pub(crate) struct Deck {
    tiles: Vec<TileInstance>,
}

impl Deck {
    /// Expands each definition into `count` instances and shuffles the result.
    ///
    /// Instance identifiers are allocated sequentially starting at `first_id`
    /// in definition order, before the shuffle is applied.
    pub(crate) fn new(definitions: &[TileDefinition], first_id: u32, seed: u64) -> Self {
        let mut tiles = Vec::new();
        let mut next_id = first_id;
        for definition in definitions {
            for _ in 0..definition.count {
                tiles.push(TileInstance::from_definition(
                    TileInstanceId::new(next_id),
                    definition,
                ));
                next_id = next_id.saturating_add(1);
            }
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        tiles.shuffle(&mut rng);

        Self { tiles }
    }

    /// Removes and returns the top instance; `None` signals exhaustion.
    pub(crate) fn draw(&mut self) -> Option<TileInstance> {
        self.tiles.pop()
    }

    /// Number of undrawn instances.
    pub(crate) fn remaining(&self) -> usize {
        self.tiles.len()
    }

    /// Reports whether the identified instance is still undrawn.
    pub(crate) fn contains(&self, id: TileInstanceId) -> bool {
        self.tiles.iter().any(|tile| tile.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearthstead_core::{TileCategory, TileColor};

    fn definitions() -> Vec<TileDefinition> {
        vec![
            TileDefinition::new(
                "kitchen",
                "Kitchen",
                TileColor::from_rgb(0xf7, 0xd0, 0x8a),
                TileCategory::Indoor,
                1,
            ),
            TileDefinition::new(
                "tree",
                "Tree",
                TileColor::from_rgb(0x58, 0x81, 0x57),
                TileCategory::Outdoor,
                3,
            ),
        ]
    }

    #[test]
    fn expansion_honors_definition_counts() {
        let deck = Deck::new(&definitions(), 1, 7);
        assert_eq!(deck.remaining(), 4);
    }

    #[test]
    fn draw_consumes_until_exhaustion() {
        let mut deck = Deck::new(&definitions(), 1, 7);
        let mut drawn = 0;
        while deck.draw().is_some() {
            drawn += 1;
        }
        assert_eq!(drawn, 4);
        assert_eq!(deck.remaining(), 0);
        assert!(deck.draw().is_none());
    }

    #[test]
    fn equal_seeds_produce_equal_order() {
        let mut first = Deck::new(&definitions(), 1, 99);
        let mut second = Deck::new(&definitions(), 1, 99);

        while let Some(tile) = first.draw() {
            assert_eq!(second.draw(), Some(tile));
        }
        assert!(second.draw().is_none());
    }

    #[test]
    fn differing_seeds_permute_the_same_multiset() {
        let collect = |seed: u64| {
            let mut deck = Deck::new(&definitions(), 1, seed);
            let mut ids = Vec::new();
            while let Some(tile) = deck.draw() {
                ids.push(tile.id);
            }
            ids
        };

        let mut first = collect(1);
        let mut second = collect(2);
        first.sort();
        second.sort();
        assert_eq!(first, second);
    }
}
