#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Hearthstead experience.

use hearthstead_core::{BoardView, HandView};
use hearthstead_world::{query, World};

/// Produces data required to greet the player and seed the first frame.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self, world: &World) -> &'static str {
        query::welcome_banner(world)
    }

    /// Exposes the tile side length required for presentation mapping.
    #[must_use]
    pub fn tile_length(&self, world: &World) -> f32 {
        query::tile_length(world)
    }

    /// Captures the board contents for the initial scene.
    #[must_use]
    pub fn board_view(&self, world: &World) -> BoardView {
        query::board_view(world)
    }

    /// Captures the tray contents for the initial scene.
    #[must_use]
    pub fn hand_view(&self, world: &World) -> HandView {
        query::hand_view(world)
    }
}
