#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Hearthstead.
//!
//! The world owns the board, deck, hand, and camera. Adapters and systems
//! never mutate that state directly; they submit [`Command`] values through
//! [`apply`] and observe the resulting [`Event`] broadcast. The placement
//! transaction is atomic: board, hand, and deck change together or not at
//! all.

mod board;
mod deck;
mod hand;

use board::Board;
use deck::Deck;
use hand::Hand;

use hearthstead_core::{
    Camera, Command, Event, GridCoord, PlacementError, TileCategory, TileColor, TileDefinition,
    TileInstance, TileInstanceId, DEFAULT_TILE_LENGTH, WELCOME_BANNER,
};

/// Identifier reserved for the Hearth tile seeded at session start.
const HEARTH_INSTANCE_ID: TileInstanceId = TileInstanceId::new(0);
/// First identifier handed out while expanding the deck.
const FIRST_DECK_INSTANCE_ID: u32 = 1;
/// Number of tiles drawn into the hand at session start, deck permitting.
const INITIAL_HAND_SIZE: usize = 3;

const HEARTH_COLOR: TileColor = TileColor::from_rgb(0xd1, 0x8c, 0x8c);

/// Configuration required to start a Hearthstead session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    definitions: Vec<TileDefinition>,
    rng_seed: u64,
    tile_length: f32,
}

impl SessionConfig {
    /// Creates a session configuration with the default tile length.
    #[must_use]
    pub fn new(definitions: Vec<TileDefinition>, rng_seed: u64) -> Self {
        Self {
            definitions,
            rng_seed,
            tile_length: DEFAULT_TILE_LENGTH,
        }
    }

    /// Overrides the side length of a square tile in view units.
    #[must_use]
    pub fn with_tile_length(mut self, tile_length: f32) -> Self {
        self.tile_length = tile_length;
        self
    }
}

/// Represents the authoritative Hearthstead session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    board: Board,
    deck: Deck,
    hand: Hand,
    camera: Camera,
    tile_length: f32,
    next_sequence: u64,
    completed: bool,
}

impl World {
    /// Creates a new session: shuffled deck, Hearth seeded at the origin,
    /// and an initial hand of up to three tiles.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let mut deck = Deck::new(&config.definitions, FIRST_DECK_INSTANCE_ID, config.rng_seed);

        let mut board = Board::new();
        board.place_seed(GridCoord::ORIGIN, hearth_tile(), 0);

        let mut hand = Hand::new();
        for _ in 0..INITIAL_HAND_SIZE {
            if let Some(tile) = deck.draw() {
                hand.add(tile);
            }
        }

        Self {
            banner: WELCOME_BANNER,
            board,
            deck,
            hand,
            camera: Camera::ZERO,
            tile_length: config.tile_length,
            next_sequence: 1,
            completed: false,
        }
    }

    fn commit_placement(
        &mut self,
        instance: TileInstanceId,
        cell: GridCoord,
        out_events: &mut Vec<Event>,
    ) {
        // Reject before touching the hand so a failed attempt has no effects.
        if let Err(reason) = self.board.validate(cell) {
            out_events.push(Event::TilePlacementRejected {
                instance,
                cell,
                reason,
            });
            return;
        }

        let Some(tile) = self.hand.remove(instance) else {
            out_events.push(Event::TilePlacementRejected {
                instance,
                cell,
                reason: PlacementError::TileNotInHand,
            });
            return;
        };

        // Ownership exclusivity audit: once removed from the hand, the
        // identifier must not exist anywhere else.
        debug_assert!(
            !self.hand.contains(instance),
            "instance {instance:?} duplicated inside the hand"
        );
        debug_assert!(
            !self.deck.contains(instance),
            "instance {instance:?} still present in the deck"
        );
        debug_assert!(
            !self.board.contains_instance(instance),
            "instance {instance:?} already placed on the board"
        );

        let sequence = self.next_sequence;
        match self.board.place(cell, tile, sequence) {
            Ok(()) => {
                self.next_sequence = self.next_sequence.saturating_add(1);
                out_events.push(Event::TilePlaced { instance, cell });

                if let Some(drawn) = self.deck.draw() {
                    let drawn_id = drawn.id;
                    self.hand.add(drawn);
                    out_events.push(Event::TileDrawn { instance: drawn_id });
                }

                if !self.completed && self.deck.remaining() == 0 && self.hand.is_empty() {
                    self.completed = true;
                    out_events.push(Event::SessionCompleted);
                }
            }
            Err((tile, reason)) => {
                // Validation passed moments ago on this same call stack, so
                // reaching this arm means the board bookkeeping broke.
                debug_assert!(false, "board rejected a validated placement: {reason:?}");
                self.hand.add(tile);
                out_events.push(Event::TilePlacementRejected {
                    instance,
                    cell,
                    reason,
                });
            }
        }
    }
}

/// Creates the Hearth tile seeded at the origin of every session.
fn hearth_tile() -> TileInstance {
    TileInstance {
        id: HEARTH_INSTANCE_ID,
        kind: "hearth".to_owned(),
        label: "Hearth".to_owned(),
        color: HEARTH_COLOR,
        category: TileCategory::Indoor,
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PlaceTile { instance, cell } => {
            world.commit_placement(instance, cell, out_events);
        }
        Command::PanCamera { delta_x, delta_y } => {
            world.camera = world.camera.translated(delta_x, delta_y);
            out_events.push(Event::CameraPanned {
                camera: world.camera,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use hearthstead_core::{BoardView, Camera, GridCoord, HandView, PlacedTileSnapshot};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Side length of a square tile in view units for this session.
    #[must_use]
    pub fn tile_length(world: &World) -> f32 {
        world.tile_length
    }

    /// Current camera offset applied when mapping grid to view.
    #[must_use]
    pub fn camera(world: &World) -> Camera {
        world.camera
    }

    /// Captures a read-only view of the placed tiles in placement order.
    #[must_use]
    pub fn board_view(world: &World) -> BoardView {
        let snapshots: Vec<PlacedTileSnapshot> = world
            .board
            .iter()
            .map(|(cell, placed)| PlacedTileSnapshot {
                instance: placed.tile.id,
                cell: *cell,
                kind: placed.tile.kind.clone(),
                label: placed.tile.label.clone(),
                color: placed.tile.color,
                category: placed.tile.category,
                sequence: placed.sequence,
            })
            .collect();
        BoardView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the hand in tray order.
    #[must_use]
    pub fn hand_view(world: &World) -> HandView {
        HandView::from_snapshots(world.hand.iter().cloned().collect())
    }

    /// Number of undrawn tiles remaining in the deck.
    #[must_use]
    pub fn deck_remaining(world: &World) -> usize {
        world.deck.remaining()
    }

    /// Number of tiles placed on the board, the Hearth included.
    #[must_use]
    pub fn placed_count(world: &World) -> usize {
        world.board.len()
    }

    /// Reports whether the cell already holds a placed tile.
    #[must_use]
    pub fn is_occupied(world: &World, cell: GridCoord) -> bool {
        world.board.is_occupied(cell)
    }

    /// Evaluates the placement rule for the provided cell.
    #[must_use]
    pub fn is_valid_placement(world: &World, cell: GridCoord) -> bool {
        world.board.validate(cell).is_ok()
    }

    /// Reports whether the session has reached its terminal state.
    #[must_use]
    pub fn session_complete(world: &World) -> bool {
        world.completed
    }
}
