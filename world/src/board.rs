//! Authoritative placed-tile storage and the placement validity rule.

use std::collections::BTreeMap;

use hearthstead_core::{GridCoord, PlacementError, TileInstance, TileInstanceId};

/// Tile committed to the board together with its commit order.
#[derive(Clone, Debug)]
pub(crate) struct PlacedTile {
    /// Instance that now permanently occupies the cell.
    pub(crate) tile: TileInstance,
    /// Monotonic commit order used for deterministic render layering.
    pub(crate) sequence: u64,
}

/// Mapping from grid cell to placed tile; one tile per cell, placements
/// permanent. The board grows outward from the seed cell as one connected
/// polyomino because every regular placement must touch an occupied neighbor.
#[derive(Debug, Default)]
pub(crate) struct Board {
    cells: BTreeMap<GridCoord, PlacedTile>,
}

impl Board {
    pub(crate) fn new() -> Self {
        Self {
            cells: BTreeMap::new(),
        }
    }

    /// Reports whether the cell already holds a placed tile.
    pub(crate) fn is_occupied(&self, cell: GridCoord) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Checks the placement rule: the cell must be free and at least one of
    /// its four neighbors must be occupied.
    pub(crate) fn validate(&self, cell: GridCoord) -> Result<(), PlacementError> {
        if self.is_occupied(cell) {
            return Err(PlacementError::Occupied);
        }
        if !cell
            .neighbors()
            .iter()
            .any(|neighbor| self.is_occupied(*neighbor))
        {
            return Err(PlacementError::NoAdjacentTile);
        }
        Ok(())
    }

    /// Commits a tile to the cell, re-checking validity at call time.
    ///
    /// On rejection the tile is handed back untouched so the caller can
    /// restore it to its previous owner.
    pub(crate) fn place(
        &mut self,
        cell: GridCoord,
        tile: TileInstance,
        sequence: u64,
    ) -> Result<(), (TileInstance, PlacementError)> {
        if let Err(reason) = self.validate(cell) {
            return Err((tile, reason));
        }
        let _ = self.cells.insert(cell, PlacedTile { tile, sequence });
        Ok(())
    }

    /// Seeds the board with its first tile, bypassing the adjacency rule.
    ///
    /// Only the session-start Hearth placement may use this entry point.
    pub(crate) fn place_seed(&mut self, cell: GridCoord, tile: TileInstance, sequence: u64) {
        debug_assert!(self.cells.is_empty(), "seed placement requires an empty board");
        let _ = self.cells.insert(cell, PlacedTile { tile, sequence });
    }

    /// Number of tiles placed so far, the seed included.
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the identified instance has been placed.
    pub(crate) fn contains_instance(&self, id: TileInstanceId) -> bool {
        self.cells.values().any(|placed| placed.tile.id == id)
    }

    /// Iterator over placed tiles and their cells, keyed order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&GridCoord, &PlacedTile)> {
        self.cells.iter()
    }
}
