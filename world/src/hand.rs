//! Working set of drawn, unplaced tiles.

use hearthstead_core::{TileInstance, TileInstanceId};

/// Tray-ordered collection of tiles available for placement.
///
/// No capacity ceiling is enforced; deck-draw pacing keeps the hand small in
/// practice.
#[derive(Debug, Default)]
pub(crate) struct Hand {
    tiles: Vec<TileInstance>,
}

impl Hand {
    pub(crate) fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    /// Appends a drawn tile to the end of the tray.
    pub(crate) fn add(&mut self, tile: TileInstance) {
        self.tiles.push(tile);
    }

    /// Removes and returns the identified tile.
    ///
    /// Returns `None` without touching the tray when the identifier is
    /// absent, which keeps duplicate removal attempts harmless.
    pub(crate) fn remove(&mut self, id: TileInstanceId) -> Option<TileInstance> {
        let index = self.tiles.iter().position(|tile| tile.id == id)?;
        Some(self.tiles.remove(index))
    }

    /// Reports whether the identified tile is currently in the tray.
    pub(crate) fn contains(&self, id: TileInstanceId) -> bool {
        self.tiles.iter().any(|tile| tile.id == id)
    }

    /// Iterator over the tray tiles in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &TileInstance> {
        self.tiles.iter()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearthstead_core::{TileCategory, TileColor};

    fn tile(id: u32) -> TileInstance {
        TileInstance {
            id: TileInstanceId::new(id),
            kind: "tree".to_owned(),
            label: "Tree".to_owned(),
            color: TileColor::from_rgb(0x58, 0x81, 0x57),
            category: TileCategory::Outdoor,
        }
    }

    #[test]
    fn remove_preserves_tray_order_of_remaining_tiles() {
        let mut hand = Hand::new();
        hand.add(tile(1));
        hand.add(tile(2));
        hand.add(tile(3));

        let removed = hand.remove(TileInstanceId::new(2));
        assert_eq!(removed.map(|tile| tile.id), Some(TileInstanceId::new(2)));

        let remaining: Vec<_> = hand.iter().map(|tile| tile.id.get()).collect();
        assert_eq!(remaining, vec![1, 3]);
    }

    #[test]
    fn remove_of_absent_tile_is_a_silent_no_op() {
        let mut hand = Hand::new();
        hand.add(tile(1));

        assert!(hand.remove(TileInstanceId::new(9)).is_none());
        assert_eq!(hand.iter().count(), 1);
    }

    #[test]
    fn duplicate_removal_only_succeeds_once() {
        let mut hand = Hand::new();
        hand.add(tile(4));

        assert!(hand.remove(TileInstanceId::new(4)).is_some());
        assert!(hand.remove(TileInstanceId::new(4)).is_none());
        assert!(hand.is_empty());
    }
}
