#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Hearthstead engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Hearthstead.";

/// Default side length of a square tile expressed in view units.
pub const DEFAULT_TILE_LENGTH: f32 = 100.0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Requests that a tile from the hand be committed to the board.
    PlaceTile {
        /// Identifier of the hand tile the player dropped.
        instance: TileInstanceId,
        /// Grid cell the tile should occupy.
        cell: GridCoord,
    },
    /// Translates the camera by the provided view-space delta.
    PanCamera {
        /// Horizontal translation in view units.
        delta_x: f32,
        /// Vertical translation in view units.
        delta_y: f32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that a tile moved from the hand onto the board.
    TilePlaced {
        /// Identifier of the placed tile.
        instance: TileInstanceId,
        /// Cell the tile now permanently occupies.
        cell: GridCoord,
    },
    /// Reports that a placement request was rejected.
    TilePlacementRejected {
        /// Identifier of the tile named in the request.
        instance: TileInstanceId,
        /// Cell provided in the placement request.
        cell: GridCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a replacement tile was drawn from the deck into the hand.
    TileDrawn {
        /// Identifier assigned to the drawn tile.
        instance: TileInstanceId,
    },
    /// Announces the camera position after a pan command.
    CameraPanned {
        /// Camera offset that became active after processing commands.
        camera: Camera,
    },
    /// Signals that the deck and hand are both empty; fired once per session.
    SessionCompleted,
}

/// Reasons a tile placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell already holds a placed tile.
    Occupied,
    /// None of the four neighboring cells holds a placed tile.
    NoAdjacentTile,
    /// The named instance is not currently part of the hand.
    TileNotInHand,
}

/// Location of a single grid cell on the unbounded board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    x: i32,
    y: i32,
}

impl GridCoord {
    /// Cell that anchors the board; the Hearth tile lives here.
    pub const ORIGIN: GridCoord = GridCoord::new(0, 0);

    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal cell index; positive values extend to the right.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical cell index; positive values extend downward.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the cell adjacent to this one across the provided edge.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Enumerates the four axis-adjacent cells in canonical order.
    #[must_use]
    pub const fn neighbors(self) -> [GridCoord; 4] {
        [
            self.neighbor(Direction::East),
            self.neighbor(Direction::West),
            self.neighbor(Direction::South),
            self.neighbor(Direction::North),
        ]
    }
}

/// Edges of a square cell, ordered canonically as +x, -x, +y, -y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Edge toward increasing x.
    East,
    /// Edge toward decreasing x.
    West,
    /// Edge toward increasing y.
    South,
    /// Edge toward decreasing y.
    North,
}

impl Direction {
    /// Canonical edge enumeration order used wherever determinism matters.
    pub const CANONICAL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
    ];

    /// Unit cell offset crossed when stepping over this edge.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::South => (0, 1),
            Self::North => (0, -1),
        }
    }
}

/// Distinguishes interior rooms from open grounds for the wall policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileCategory {
    /// Room tiles that join seamlessly and wall themselves off otherwise.
    Indoor,
    /// Ground tiles that never draw walls.
    Outdoor,
}

impl TileCategory {
    /// Returns `true` for interior room tiles.
    #[must_use]
    pub const fn is_indoor(self) -> bool {
        matches!(self, Self::Indoor)
    }
}

/// Fill color applied when presenting a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl TileColor {
    /// Creates a new tile color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Unique identifier assigned to a tile instance for its whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileInstanceId(u32);

impl TileInstanceId {
    /// Creates a new tile instance identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable template describing one kind of tile in the full set.
///
/// Definitions are configuration data owned by the adapter layer; the engine
/// only ever reads them while expanding the deck.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileDefinition {
    /// Stable identifier naming the tile kind.
    pub kind: String,
    /// Text presented on the tile face.
    pub label: String,
    /// Fill color presented behind the label.
    pub color: TileColor,
    /// Category consumed by the wall policy.
    pub category: TileCategory,
    /// Number of copies of this tile in the full set.
    pub count: u32,
}

impl TileDefinition {
    /// Creates a new tile definition template.
    #[must_use]
    pub fn new<K, L>(kind: K, label: L, color: TileColor, category: TileCategory, count: u32) -> Self
    where
        K: Into<String>,
        L: Into<String>,
    {
        Self {
            kind: kind.into(),
            label: label.into(),
            color,
            category,
            count,
        }
    }
}

/// A single drawn copy of a tile definition, independently owned.
///
/// An instance belongs to exactly one of deck, hand, or board at any moment;
/// the world enforces that exclusivity on its commit path.
#[derive(Clone, Debug, PartialEq)]
pub struct TileInstance {
    /// Identifier allocated when the deck was expanded.
    pub id: TileInstanceId,
    /// Kind copied from the originating definition.
    pub kind: String,
    /// Label copied from the originating definition.
    pub label: String,
    /// Fill color copied from the originating definition.
    pub color: TileColor,
    /// Category copied from the originating definition.
    pub category: TileCategory,
}

impl TileInstance {
    /// Instantiates one copy of the provided definition.
    #[must_use]
    pub fn from_definition(id: TileInstanceId, definition: &TileDefinition) -> Self {
        Self {
            id,
            kind: definition.kind.clone(),
            label: definition.label.clone(),
            color: definition.color,
            category: definition.category,
        }
    }
}

/// View-space translation applied uniformly when mapping grid to view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    x: f32,
    y: f32,
}

impl Camera {
    /// Camera with no translation applied.
    pub const ZERO: Camera = Camera::new(0.0, 0.0);

    /// Creates a new camera offset.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal view-space offset.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical view-space offset.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Returns a camera translated by the provided delta.
    #[must_use]
    pub const fn translated(self, delta_x: f32, delta_y: f32) -> Self {
        Self {
            x: self.x + delta_x,
            y: self.y + delta_y,
        }
    }
}

/// Continuous position expressed in view units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewPoint {
    x: f32,
    y: f32,
}

impl ViewPoint {
    /// Creates a new view-space point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal view-space coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical view-space coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }
}

/// Maps a grid cell to the view-space position of its center.
#[must_use]
pub fn grid_to_view(cell: GridCoord, camera: Camera, tile_length: f32) -> ViewPoint {
    ViewPoint::new(
        cell.x() as f32 * tile_length + camera.x(),
        cell.y() as f32 * tile_length + camera.y(),
    )
}

/// Maps a view-space position to the grid cell it falls in.
///
/// Each axis rounds to the nearest integer independently; exact half-tile
/// positions round away from zero, matching [`f32::round`]. This tie-break
/// determines snap behavior when the pointer sits on a cell boundary.
#[must_use]
pub fn view_to_grid(point: ViewPoint, camera: Camera, tile_length: f32) -> GridCoord {
    GridCoord::new(
        ((point.x() - camera.x()) / tile_length).round() as i32,
        ((point.y() - camera.y()) / tile_length).round() as i32,
    )
}

/// Wall segment derived by the boundary policy for a single tile edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WallSegment {
    /// Cell whose edge carries the wall.
    pub cell: GridCoord,
    /// Edge of the cell the wall runs along.
    pub edge: Direction,
}

impl WallSegment {
    /// Creates a new wall segment descriptor.
    #[must_use]
    pub const fn new(cell: GridCoord, edge: Direction) -> Self {
        Self { cell, edge }
    }
}

/// Immutable representation of a single placed tile used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedTileSnapshot {
    /// Identifier the tile has carried since the deck was expanded.
    pub instance: TileInstanceId,
    /// Cell the tile permanently occupies.
    pub cell: GridCoord,
    /// Kind copied from the originating definition.
    pub kind: String,
    /// Label presented on the tile face.
    pub label: String,
    /// Fill color presented behind the label.
    pub color: TileColor,
    /// Category consumed by the wall policy.
    pub category: TileCategory,
    /// Monotonic commit order used for deterministic render layering.
    pub sequence: u64,
}

/// Read-only snapshot describing all tiles placed on the board.
#[derive(Clone, Debug, Default)]
pub struct BoardView {
    snapshots: Vec<PlacedTileSnapshot>,
}

impl BoardView {
    /// Creates a new board view, ordering snapshots by commit sequence.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PlacedTileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.sequence);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedTileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of tiles captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PlacedTileSnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot of the hand in tray order.
#[derive(Clone, Debug, Default)]
pub struct HandView {
    snapshots: Vec<TileInstance>,
}

impl HandView {
    /// Creates a new hand view preserving the provided insertion order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<TileInstance>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the hand tiles in tray order.
    pub fn iter(&self) -> impl Iterator<Item = &TileInstance> {
        self.snapshots.iter()
    }

    /// Retrieves the tile occupying the provided tray slot, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TileInstance> {
        self.snapshots.get(index)
    }

    /// Number of tiles currently in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the hand holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{
        grid_to_view, view_to_grid, Camera, Direction, GridCoord, PlacementError, TileCategory,
        TileColor, TileDefinition, TileInstance, TileInstanceId, ViewPoint,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn neighbors_enumerate_in_canonical_order() {
        let cell = GridCoord::new(2, -3);
        assert_eq!(
            cell.neighbors(),
            [
                GridCoord::new(3, -3),
                GridCoord::new(1, -3),
                GridCoord::new(2, -2),
                GridCoord::new(2, -4),
            ]
        );
    }

    #[test]
    fn mapper_round_trips_for_any_camera() {
        let cameras = [
            Camera::ZERO,
            Camera::new(480.0, 360.0),
            Camera::new(-123.5, 77.25),
        ];
        let cells = [
            GridCoord::ORIGIN,
            GridCoord::new(4, 7),
            GridCoord::new(-9, 3),
            GridCoord::new(-2, -11),
        ];

        for camera in cameras {
            for cell in cells {
                let view = grid_to_view(cell, camera, 100.0);
                assert_eq!(view_to_grid(view, camera, 100.0), cell);
            }
        }
    }

    #[test]
    fn view_to_grid_rounds_half_away_from_zero() {
        let camera = Camera::ZERO;
        assert_eq!(
            view_to_grid(ViewPoint::new(50.0, -50.0), camera, 100.0),
            GridCoord::new(1, -1)
        );
        assert_eq!(
            view_to_grid(ViewPoint::new(49.9, -49.9), camera, 100.0),
            GridCoord::ORIGIN
        );
    }

    #[test]
    fn instance_copies_definition_fields() {
        let definition = TileDefinition::new(
            "pond",
            "Pond",
            TileColor::from_rgb(0x45, 0x7b, 0x9d),
            TileCategory::Outdoor,
            2,
        );
        let instance = TileInstance::from_definition(TileInstanceId::new(5), &definition);

        assert_eq!(instance.id, TileInstanceId::new(5));
        assert_eq!(instance.kind, "pond");
        assert_eq!(instance.label, "Pond");
        assert_eq!(instance.color, definition.color);
        assert_eq!(instance.category, TileCategory::Outdoor);
    }

    #[test]
    fn camera_translation_accumulates() {
        let camera = Camera::new(10.0, -4.0).translated(-2.5, 6.0);
        assert_eq!(camera, Camera::new(7.5, 2.0));
    }

    #[test]
    fn direction_offsets_are_unit_steps() {
        for direction in Direction::CANONICAL {
            let (dx, dy) = direction.offset();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn grid_coord_round_trips_through_bincode() {
        assert_round_trip(&GridCoord::new(-17, 42));
    }

    #[test]
    fn tile_definition_round_trips_through_bincode() {
        let definition = TileDefinition::new(
            "library",
            "Library",
            TileColor::from_rgb(0x5e, 0x50, 0x3f),
            TileCategory::Indoor,
            1,
        );
        assert_round_trip(&definition);
    }

    #[test]
    fn placement_error_round_trips_through_bincode() {
        assert_round_trip(&PlacementError::NoAdjacentTile);
    }

    #[test]
    fn tile_instance_id_round_trips_through_bincode() {
        assert_round_trip(&TileInstanceId::new(42));
    }
}
