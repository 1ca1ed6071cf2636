#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Hearthstead adapters.
//!
//! The engine supplies scene data; backends draw it. Nothing in this crate
//! touches the session state directly, so any backend able to present a
//! [`Scene`] and gather a [`FrameInput`] can host the game.

use anyhow::Result as AnyResult;
use glam::Vec2;
use hearthstead_core::{GridCoord, TileCategory, TileColor, TileInstanceId, WallSegment};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts an engine tile color into a presentation color.
    #[must_use]
    pub const fn from_tile_color(color: TileColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }

    /// Returns the same color with the provided alpha channel.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
///
/// Both mouse and touch gestures are reduced to this one shape so the drag
/// semantics downstream cannot diverge between modalities.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Pointer position in view space (origin at the screen center, the same
    /// space the camera pans in), when a pointer or touch is known.
    pub pointer_position: Option<Vec2>,
    /// Tray slot the player started dragging on this frame.
    pub pick_up_slot: Option<usize>,
    /// Whether the active drag was released on this frame.
    pub drag_released: bool,
    /// Whether the active drag was abandoned on this frame.
    pub drag_cancelled: bool,
    /// Camera pan delta gathered from background drags.
    pub pan_delta: Option<Vec2>,
}

/// Placed tile ready for presentation.
#[derive(Clone, Debug, PartialEq)]
pub struct TilePresentation {
    /// Cell the tile occupies.
    pub cell: GridCoord,
    /// Fill color drawn behind the label.
    pub color: Color,
    /// Text drawn on the tile face.
    pub label: String,
    /// Category the tile belongs to.
    pub category: TileCategory,
}

impl TilePresentation {
    /// Creates a new placed-tile descriptor.
    #[must_use]
    pub fn new(cell: GridCoord, color: Color, label: String, category: TileCategory) -> Self {
        Self {
            cell,
            color,
            label,
            category,
        }
    }
}

/// Stroke styling shared by every wall segment in a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallStyle {
    /// Stroke thickness in view units.
    pub thickness: f32,
    /// Stroke color.
    pub color: Color,
}

impl WallStyle {
    /// Creates a new wall style descriptor.
    #[must_use]
    pub const fn new(thickness: f32, color: Color) -> Self {
        Self { thickness, color }
    }
}

impl Default for WallStyle {
    fn default() -> Self {
        // Dark wood stroke matching the indoor tile palette.
        Self {
            thickness: 6.0,
            color: Color::from_rgb_u8(0x5c, 0x40, 0x33),
        }
    }
}

/// Translucent preview of the dragged tile over the hovered cell.
#[derive(Clone, Debug, PartialEq)]
pub struct GhostPresentation {
    /// Cell the ghost hovers over.
    pub cell: GridCoord,
    /// Fill color of the dragged tile.
    pub color: Color,
    /// Label of the dragged tile.
    pub label: String,
    /// Whether dropping here would commit; invalid hovers are not drawn.
    pub placeable: bool,
}

/// Hand tile presented inside the tray panel.
#[derive(Clone, Debug, PartialEq)]
pub struct TrayTilePresentation {
    /// Identifier the adapter echoes back on pick-up.
    pub instance: TileInstanceId,
    /// Fill color of the tray chip.
    pub color: Color,
    /// Label drawn on the tray chip.
    pub label: String,
}

/// Read-only counters surfaced by the status display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct StatusPresentation {
    /// Number of tiles placed on the board, the Hearth included.
    pub placed_count: usize,
    /// Number of undrawn tiles remaining in the deck.
    pub deck_remaining: usize,
}

/// Scene description combining the board, tray and transient previews.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Side length of a square tile in view units.
    pub tile_length: f32,
    /// Camera offset applied when mapping cells to the screen.
    pub camera: Vec2,
    /// Placed tiles in placement order for deterministic layering.
    pub tiles: Vec<TilePresentation>,
    /// Wall segments derived by the boundary policy.
    pub walls: Vec<WallSegment>,
    /// Styling shared by every wall segment.
    pub wall_style: WallStyle,
    /// Optional ghost-tile preview for the active drag.
    pub ghost: Option<GhostPresentation>,
    /// Hand tiles in tray order.
    pub tray: Vec<TrayTilePresentation>,
    /// Counters surfaced by the status display.
    pub status: StatusPresentation,
    /// Whether the session reached its terminal state.
    pub completed: bool,
}

impl Scene {
    /// Creates an empty scene for the provided tile length.
    ///
    /// Returns an error when `tile_length` is not strictly positive.
    pub fn new(tile_length: f32, wall_style: WallStyle) -> Result<Self, RenderingError> {
        if tile_length <= 0.0 {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }

        Ok(Self {
            tile_length,
            camera: Vec2::ZERO,
            tiles: Vec::new(),
            walls: Vec::new(),
            wall_style,
            ghost: None,
            tray: Vec::new(),
            status: StatusPresentation::default(),
            completed: false,
        })
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Tray panel geometry shared between drawing and hit testing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrayLayout {
    origin: Vec2,
    slot_size: Vec2,
    gap: f32,
}

impl TrayLayout {
    /// Width and height of a single tray chip in screen pixels.
    pub const SLOT_SIZE: Vec2 = Vec2::new(88.0, 88.0);
    /// Horizontal spacing between tray chips in screen pixels.
    pub const SLOT_GAP: f32 = 12.0;
    /// Distance between the tray and the bottom screen edge.
    pub const BOTTOM_MARGIN: f32 = 16.0;

    /// Lays the tray out centered along the bottom edge of the screen.
    #[must_use]
    pub fn bottom_centered(screen_width: f32, screen_height: f32, slot_count: usize) -> Self {
        let slots = slot_count as f32;
        let total_width = slots * Self::SLOT_SIZE.x + (slots - 1.0).max(0.0) * Self::SLOT_GAP;
        let origin = Vec2::new(
            (screen_width - total_width) * 0.5,
            screen_height - Self::SLOT_SIZE.y - Self::BOTTOM_MARGIN,
        );
        Self {
            origin,
            slot_size: Self::SLOT_SIZE,
            gap: Self::SLOT_GAP,
        }
    }

    /// Top-left corner of the chip occupying the provided slot.
    #[must_use]
    pub fn slot_position(&self, index: usize) -> Vec2 {
        Vec2::new(
            self.origin.x + index as f32 * (self.slot_size.x + self.gap),
            self.origin.y,
        )
    }

    /// Dimensions of a single tray chip.
    #[must_use]
    pub const fn slot_size(&self) -> Vec2 {
        self.slot_size
    }

    /// Resolves the tray slot under the provided screen position, if any.
    #[must_use]
    pub fn hit_test(&self, point: Vec2, slot_count: usize) -> Option<usize> {
        for index in 0..slot_count {
            let position = self.slot_position(index);
            if point.x >= position.x
                && point.x < position.x + self.slot_size.x
                && point.y >= position.y
                && point.y < position.y + self.slot_size.y
            {
                return Some(index);
            }
        }
        None
    }
}

/// Rendering backend capable of presenting Hearthstead scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and may mutate the scene
    /// before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Tile length must be positive to avoid zero-sized cells.
    InvalidTileLength {
        /// Provided length that failed validation.
        tile_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileLength { tile_length } => {
                write!(f, "tile_length must be positive (received {tile_length})")
            }
        }
    }
}

impl Error for RenderingError {}
