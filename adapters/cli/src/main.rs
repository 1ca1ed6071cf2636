#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Hearthstead experience.
//!
//! The binary wires the authoritative world, the pure systems, and the
//! macroquad backend together: per-frame input becomes drag-controller
//! calls, emitted commands flow through the world, and the resulting state
//! is re-projected into the scene the backend draws.

mod layout_transfer;
mod tile_set;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use hearthstead_core::{
    BoardView, Command, Event, HandView, ViewPoint, WallSegment, DEFAULT_TILE_LENGTH,
};
use hearthstead_rendering::{
    Color, GhostPresentation, Presentation, RenderingBackend, Scene, StatusPresentation,
    TilePresentation, TrayTilePresentation, WallStyle,
};
use hearthstead_rendering_macroquad::MacroquadBackend;
use hearthstead_system_bootstrap::Bootstrap;
use hearthstead_system_boundary::BoundaryPolicy;
use hearthstead_system_drag::DragController;
use hearthstead_world::{apply, query, SessionConfig, World};
use rand::Rng;

const WINDOW_TITLE: &str = "Hearthstead";
const BACKGROUND_COLOR: Color = Color::from_rgb_u8(0xe6, 0xe8, 0xe3);
const FINALE_NOTE: &str = "The deck is empty and the tray is clear. The homestead is complete.";

/// Command-line options accepted by the Hearthstead binary.
#[derive(Debug, Parser)]
#[command(name = "hearthstead", about = "Cozy tile placement on an endless grid")]
struct Args {
    /// Seed for the deck shuffle; a random seed is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a TOML tile set overriding the built-in standard set.
    #[arg(long)]
    tile_set: Option<PathBuf>,

    /// Side length of a square tile in view units.
    #[arg(long, default_value_t = DEFAULT_TILE_LENGTH)]
    tile_length: f32,

    /// Print a shareable layout snapshot when the session completes.
    #[arg(long)]
    export_layout: bool,

    /// Decode the provided layout snapshot, print its summary, and exit.
    #[arg(long, value_name = "SNAPSHOT")]
    inspect_layout: Option<String>,
}

/// Entry point for the Hearthstead command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(snapshot) = &args.inspect_layout {
        let layout = layout_transfer::LayoutSnapshot::decode(snapshot).with_context(|| {
            format!(
                "the provided layout snapshot could not be decoded (expected a \
                 '{}:<count>:<payload>' string)",
                layout_transfer::SNAPSHOT_HEADER
            )
        })?;
        println!(
            "layout holds {} tiles at tile length {}",
            layout.tiles.len(),
            layout.tile_length
        );
        return Ok(());
    }

    let definitions = match &args.tile_set {
        Some(path) => tile_set::load_definitions(path)
            .with_context(|| format!("failed to load tile set from {}", path.display()))?,
        None => tile_set::standard_definitions(),
    };
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());

    let mut world = World::new(
        SessionConfig::new(definitions, seed).with_tile_length(args.tile_length),
    );

    let bootstrap = Bootstrap::default();
    println!("{}", bootstrap.welcome_banner(&world));
    println!("deck seed: {seed}");

    let mut drag = DragController::new();
    let mut boundary = BoundaryPolicy::new();
    let mut walls: Vec<WallSegment> = Vec::new();

    let mut scene = Scene::new(bootstrap.tile_length(&world), WallStyle::default())
        .context("session tile length rejected by the rendering contracts")?;
    boundary.handle(&bootstrap.board_view(&world), &mut walls);
    scene.tiles = scene_tiles(&bootstrap.board_view(&world));
    scene.tray = scene_tray(&bootstrap.hand_view(&world));
    scene.walls = walls.clone();
    scene.status = StatusPresentation {
        placed_count: query::placed_count(&world),
        deck_remaining: query::deck_remaining(&world),
    };

    let export_layout = args.export_layout;
    let presentation = Presentation::new(WINDOW_TITLE, BACKGROUND_COLOR, scene);

    MacroquadBackend::new().run(presentation, move |_frame_dt, input, scene| {
        let mut commands = Vec::new();

        if let Some(delta) = input.pan_delta {
            commands.push(Command::PanCamera {
                delta_x: delta.x,
                delta_y: delta.y,
            });
        }

        if let Some(slot) = input.pick_up_slot {
            if let Some(tile) = query::hand_view(&world).get(slot) {
                drag.on_pick_up(tile.clone());
            }
        }

        if let Some(pointer) = input.pointer_position {
            drag.on_move(
                ViewPoint::new(pointer.x, pointer.y),
                query::camera(&world),
                query::tile_length(&world),
            );
        }

        if input.drag_cancelled {
            drag.on_cancel();
        }

        if input.drag_released {
            let _ = drag.on_drop(
                |cell| query::is_valid_placement(&world, cell),
                &mut commands,
            );
        }

        let mut events = Vec::new();
        for command in commands {
            apply(&mut world, command, &mut events);
        }

        for event in &events {
            if matches!(event, Event::SessionCompleted) {
                println!("{FINALE_NOTE}");
                if export_layout {
                    let snapshot = layout_transfer::LayoutSnapshot::capture(&world);
                    println!("{}", snapshot.encode());
                }
            }
        }

        populate_scene(&world, &drag, &mut boundary, &mut walls, scene);
    })
}

/// Re-projects the session state into the scene the backend draws.
fn populate_scene(
    world: &World,
    drag: &DragController,
    boundary: &mut BoundaryPolicy,
    walls: &mut Vec<WallSegment>,
    scene: &mut Scene,
) {
    let board = query::board_view(world);
    boundary.handle(&board, walls);

    let camera = query::camera(world);
    scene.camera = Vec2::new(camera.x(), camera.y());
    scene.tiles = scene_tiles(&board);
    scene.walls = walls.clone();
    scene.ghost = drag
        .ghost_preview(|cell| query::is_valid_placement(world, cell))
        .map(|preview| GhostPresentation {
            cell: preview.cell,
            color: Color::from_tile_color(preview.tile.color),
            label: preview.tile.label.clone(),
            placeable: preview.placeable,
        });
    scene.tray = scene_tray(&query::hand_view(world));
    scene.status = StatusPresentation {
        placed_count: query::placed_count(world),
        deck_remaining: query::deck_remaining(world),
    };
    scene.completed = query::session_complete(world);
}

fn scene_tiles(board: &BoardView) -> Vec<TilePresentation> {
    board
        .iter()
        .map(|snapshot| {
            TilePresentation::new(
                snapshot.cell,
                Color::from_tile_color(snapshot.color),
                snapshot.label.clone(),
                snapshot.category,
            )
        })
        .collect()
}

fn scene_tray(hand: &HandView) -> Vec<TrayTilePresentation> {
    hand.iter()
        .map(|tile| TrayTilePresentation {
            instance: tile.id,
            color: Color::from_tile_color(tile.color),
            label: tile.label.clone(),
        })
        .collect()
}
