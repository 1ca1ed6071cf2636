#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that derives per-edge wall segments from board snapshots.
//!
//! The policy holds no independent state: every pass rebuilds its result
//! from the provided view alone, so the walls can never desync from the
//! board. Indoor tiles wall themselves off against anything that is not
//! another indoor tile; indoor pairs join seamlessly; outdoor tiles never
//! produce walls. Each indoor/outdoor or indoor/empty boundary therefore
//! yields exactly one segment, emitted on the indoor side.

use std::collections::BTreeMap;

use hearthstead_core::{BoardView, Direction, GridCoord, TileCategory, WallSegment};

/// Wall policy pass that reuses scratch buffers between recomputes.
#[derive(Debug, Default)]
pub struct BoundaryPolicy {
    categories: BTreeMap<GridCoord, TileCategory>,
}

impl BoundaryPolicy {
    /// Creates a new policy instance with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the wall segments for every occupied cell edge.
    ///
    /// The output buffer is cleared before being repopulated. Segment order
    /// is deterministic: tiles in placement order, edges in canonical order.
    pub fn handle(&mut self, board: &BoardView, out: &mut Vec<WallSegment>) {
        out.clear();

        self.categories.clear();
        for snapshot in board.iter() {
            let _ = self.categories.insert(snapshot.cell, snapshot.category);
        }

        for snapshot in board.iter() {
            if !snapshot.category.is_indoor() {
                continue;
            }

            for edge in Direction::CANONICAL {
                let neighbor = self.categories.get(&snapshot.cell.neighbor(edge));
                let neighbor_indoor =
                    matches!(neighbor, Some(category) if category.is_indoor());
                if !neighbor_indoor {
                    out.push(WallSegment::new(snapshot.cell, edge));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearthstead_core::{PlacedTileSnapshot, TileColor, TileInstanceId};

    fn snapshot(
        id: u32,
        cell: GridCoord,
        category: TileCategory,
        sequence: u64,
    ) -> PlacedTileSnapshot {
        PlacedTileSnapshot {
            instance: TileInstanceId::new(id),
            cell,
            kind: "test".to_owned(),
            label: "Test".to_owned(),
            color: TileColor::from_rgb(0, 0, 0),
            category,
            sequence,
        }
    }

    #[test]
    fn lone_indoor_tile_walls_all_four_edges() {
        let board = BoardView::from_snapshots(vec![snapshot(
            0,
            GridCoord::ORIGIN,
            TileCategory::Indoor,
            0,
        )]);
        let mut policy = BoundaryPolicy::new();
        let mut walls = Vec::new();

        policy.handle(&board, &mut walls);

        assert_eq!(
            walls,
            Direction::CANONICAL
                .into_iter()
                .map(|edge| WallSegment::new(GridCoord::ORIGIN, edge))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn outdoor_tiles_never_produce_walls() {
        let board = BoardView::from_snapshots(vec![
            snapshot(0, GridCoord::ORIGIN, TileCategory::Outdoor, 0),
            snapshot(1, GridCoord::new(1, 0), TileCategory::Outdoor, 1),
        ]);
        let mut policy = BoundaryPolicy::new();
        let mut walls = Vec::new();

        policy.handle(&board, &mut walls);

        assert!(walls.is_empty());
    }
}
