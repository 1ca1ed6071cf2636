#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure drag system that funnels pointer and touch gestures into one state
//! machine.
//!
//! Whatever input layer is in use only ever calls the four entry points
//! [`DragController::on_pick_up`], [`DragController::on_move`],
//! [`DragController::on_drop`], and [`DragController::on_cancel`], so both
//! input modalities share identical commit and cancel semantics. The move
//! path is a pure projection used for preview rendering; only a drop over a
//! valid cell emits a [`Command`], and the world re-validates that command
//! before committing.

use std::mem;

use hearthstead_core::{view_to_grid, Camera, Command, GridCoord, TileInstance, ViewPoint};

/// Translucent preview of the dragged tile over the hovered cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GhostPreview<'drag> {
    /// Cell currently hovered by the pointer.
    pub cell: GridCoord,
    /// Tile carried by the active drag.
    pub tile: &'drag TileInstance,
    /// Indicates whether dropping here would satisfy the placement rule.
    pub placeable: bool,
}

/// Outcome of a release gesture reported to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The hovered cell was valid; a placement command was emitted.
    Committed {
        /// Cell named in the emitted placement command.
        cell: GridCoord,
    },
    /// The drag ended over an invalid or unknown cell; nothing was emitted.
    Cancelled,
    /// No drag was in progress; the stale gesture was dropped.
    Ignored,
}

#[derive(Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        tile: TileInstance,
        hover: Option<GridCoord>,
    },
}

/// State machine that owns the lifecycle of a single tile drag.
///
/// At most one tile is mid-drag at a time; pick-up gestures arriving while a
/// drag is active are rejected silently.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Creates a new controller resting in the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts dragging the provided hand tile.
    ///
    /// Ignored while another drag is active; the first gesture keeps the
    /// machine.
    pub fn on_pick_up(&mut self, tile: TileInstance) {
        if matches!(self.state, DragState::Dragging { .. }) {
            return;
        }
        self.state = DragState::Dragging { tile, hover: None };
    }

    /// Projects the pointer position onto the grid to refresh the hover cell.
    ///
    /// A pure preview update: no board, hand, or deck state changes here.
    /// Stale moves arriving after the drag resolved are ignored.
    pub fn on_move(&mut self, pointer: ViewPoint, camera: Camera, tile_length: f32) {
        if let DragState::Dragging { hover, .. } = &mut self.state {
            *hover = Some(view_to_grid(pointer, camera, tile_length));
        }
    }

    /// Resolves a release gesture.
    ///
    /// When the hovered cell satisfies the caller-supplied validity check, a
    /// [`Command::PlaceTile`] is emitted for the world to re-validate and
    /// commit; otherwise the drag cancels with no effects. Either way the
    /// machine returns to idle.
    pub fn on_drop<F>(&mut self, mut is_valid: F, out: &mut Vec<Command>) -> DropOutcome
    where
        F: FnMut(GridCoord) -> bool,
    {
        match mem::take(&mut self.state) {
            DragState::Idle => DropOutcome::Ignored,
            DragState::Dragging { tile, hover } => match hover {
                Some(cell) if is_valid(cell) => {
                    out.push(Command::PlaceTile {
                        instance: tile.id,
                        cell,
                    });
                    DropOutcome::Committed { cell }
                }
                _ => DropOutcome::Cancelled,
            },
        }
    }

    /// Abandons the active drag with no effects.
    pub fn on_cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Reports whether a tile is currently mid-drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Tile carried by the active drag, if any.
    #[must_use]
    pub fn dragged_tile(&self) -> Option<&TileInstance> {
        match &self.state {
            DragState::Dragging { tile, .. } => Some(tile),
            DragState::Idle => None,
        }
    }

    /// Ghost-tile preview for the hovered cell, if a drag is hovering one.
    #[must_use]
    pub fn ghost_preview<F>(&self, mut is_valid: F) -> Option<GhostPreview<'_>>
    where
        F: FnMut(GridCoord) -> bool,
    {
        match &self.state {
            DragState::Dragging {
                tile,
                hover: Some(cell),
            } => Some(GhostPreview {
                cell: *cell,
                tile,
                placeable: is_valid(*cell),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearthstead_core::{TileCategory, TileColor, TileInstanceId};

    fn tile(id: u32) -> TileInstance {
        TileInstance {
            id: TileInstanceId::new(id),
            kind: "pond".to_owned(),
            label: "Pond".to_owned(),
            color: TileColor::from_rgb(0x45, 0x7b, 0x9d),
            category: TileCategory::Outdoor,
        }
    }

    #[test]
    fn second_pick_up_is_rejected_while_dragging() {
        let mut controller = DragController::new();
        controller.on_pick_up(tile(1));
        controller.on_pick_up(tile(2));

        assert_eq!(
            controller.dragged_tile().map(|tile| tile.id),
            Some(TileInstanceId::new(1))
        );
    }

    #[test]
    fn move_while_idle_is_ignored() {
        let mut controller = DragController::new();
        controller.on_move(ViewPoint::new(250.0, 250.0), Camera::ZERO, 100.0);

        assert!(!controller.is_dragging());
        assert!(controller.ghost_preview(|_| true).is_none());
    }

    #[test]
    fn drop_while_idle_reports_ignored() {
        let mut controller = DragController::new();
        let mut commands = Vec::new();

        assert_eq!(
            controller.on_drop(|_| true, &mut commands),
            DropOutcome::Ignored
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn drop_without_hover_cancels() {
        let mut controller = DragController::new();
        controller.on_pick_up(tile(3));
        let mut commands = Vec::new();

        assert_eq!(
            controller.on_drop(|_| true, &mut commands),
            DropOutcome::Cancelled
        );
        assert!(commands.is_empty());
        assert!(!controller.is_dragging());
    }

    #[test]
    fn hover_tracks_the_pointer_through_the_mapper() {
        let mut controller = DragController::new();
        controller.on_pick_up(tile(4));
        controller.on_move(ViewPoint::new(310.0, -95.0), Camera::new(10.0, 5.0), 100.0);

        let preview = controller
            .ghost_preview(|_| true)
            .expect("hovered drag exposes a preview");
        assert_eq!(preview.cell, GridCoord::new(3, -1));
        assert!(preview.placeable);
    }
}
