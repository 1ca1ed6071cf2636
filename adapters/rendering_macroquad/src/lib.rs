#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Hearthstead.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Mouse and touch gestures are reduced to one [`FrameInput`] shape by the
//! pointer tracker, so the drag semantics downstream are identical for both
//! modalities. Pointer positions are exported in view space (origin
//! at the screen center) while tray hit-testing happens in raw screen space;
//! the tracker owns that distinction so consumers never see it.

mod tray;

use std::time::Duration;

use anyhow::Result;
use glam::Vec2;
use hearthstead_core::Direction;
use hearthstead_rendering::{
    FrameInput, GhostPresentation, Presentation, RenderingBackend, Scene, TrayLayout,
};
use macroquad::input::{
    is_key_pressed, is_mouse_button_pressed, is_mouse_button_released, mouse_position, touches,
    KeyCode, MouseButton, TouchPhase,
};

const DEFAULT_WINDOW_WIDTH: i32 = 960;
const DEFAULT_WINDOW_HEIGHT: i32 = 720;

const GHOST_ALPHA: f32 = 0.5;
const GHOST_OUTLINE_THICKNESS: f32 = 2.0;
const TILE_LABEL_FONT_SIZE: f32 = 18.0;
const STATUS_FONT_SIZE: f32 = 22.0;
const FINALE_FONT_SIZE: f32 = 40.0;
const FINALE_MESSAGE: &str = "Every tile has found its home.";

/// Rendering backend that presents scenes through a macroquad window.
#[derive(Clone, Copy, Debug)]
pub struct MacroquadBackend {
    window_width: i32,
    window_height: i32,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl MacroquadBackend {
    /// Creates a backend using the default window dimensions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the initial window dimensions in pixels.
    #[must_use]
    pub fn with_window_size(mut self, width: i32, height: i32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let config = macroquad::window::Conf {
            window_title,
            window_width: self.window_width,
            window_height: self.window_height,
            ..macroquad::window::Conf::default()
        };

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut tracker = PointerTracker::default();
            let background = to_macroquad_color(clear_color);

            loop {
                if is_key_pressed(KeyCode::Q) {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let frame_input = tracker.gather(&scene, screen);
                let hovered_slot = tracker.hovered_tray_slot(&scene, screen);

                update_scene(frame_dt, frame_input, &mut scene);

                draw_board(&scene, screen);
                draw_walls(&scene, screen);
                draw_ghost(&scene, screen);
                tray::draw_tray(&scene, screen, hovered_slot);
                draw_status(&scene);
                if scene.completed {
                    draw_finale(screen);
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// What the active press gesture is steering, if anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum PointerMode {
    #[default]
    Idle,
    /// The press began on a tray chip and now drives a tile drag.
    DragFromTray,
    /// The press began on open board and now drives a camera pan.
    Panning,
}

/// Folds mouse and touch observations into per-frame input snapshots.
#[derive(Debug, Default)]
struct PointerTracker {
    mode: PointerMode,
    last_position: Option<Vec2>,
}

/// Raw pointer observation shared by the mouse and touch paths.
#[derive(Clone, Copy, Debug)]
struct PointerObservation {
    position: Vec2,
    pressed: bool,
    released: bool,
    interrupted: bool,
}

impl PointerTracker {
    fn gather(&mut self, scene: &Scene, screen: Vec2) -> FrameInput {
        let observation = observe_pointer();
        self.fold(observation, scene, screen)
    }

    fn fold(
        &mut self,
        observation: PointerObservation,
        scene: &Scene,
        screen: Vec2,
    ) -> FrameInput {
        let PointerObservation {
            position,
            pressed,
            released,
            interrupted,
        } = observation;

        let mut input = FrameInput {
            pointer_position: Some(position - screen * 0.5),
            ..FrameInput::default()
        };

        if pressed && self.mode == PointerMode::Idle {
            let layout = TrayLayout::bottom_centered(screen.x, screen.y, scene.tray.len());
            match layout.hit_test(position, scene.tray.len()) {
                Some(slot) => {
                    self.mode = PointerMode::DragFromTray;
                    input.pick_up_slot = Some(slot);
                }
                None => {
                    self.mode = PointerMode::Panning;
                }
            }
            self.last_position = Some(position);
        }

        if self.mode == PointerMode::Panning {
            if let Some(last) = self.last_position {
                let delta = position - last;
                if delta != Vec2::ZERO {
                    input.pan_delta = Some(delta);
                }
            }
            self.last_position = Some(position);
        }

        if released {
            if self.mode == PointerMode::DragFromTray {
                input.drag_released = true;
            }
            self.mode = PointerMode::Idle;
            self.last_position = None;
        }

        if interrupted || is_key_pressed(KeyCode::Escape) {
            if self.mode == PointerMode::DragFromTray {
                input.drag_cancelled = true;
            }
            self.mode = PointerMode::Idle;
            self.last_position = None;
        }

        input
    }

    fn hovered_tray_slot(&self, scene: &Scene, screen: Vec2) -> Option<usize> {
        let (x, y) = mouse_position();
        let layout = TrayLayout::bottom_centered(screen.x, screen.y, scene.tray.len());
        layout.hit_test(Vec2::new(x, y), scene.tray.len())
    }
}

/// Reads the current pointer state, preferring an active touch over the mouse.
fn observe_pointer() -> PointerObservation {
    if let Some(touch) = touches().first() {
        let position = Vec2::new(touch.position.x, touch.position.y);
        let (pressed, released, interrupted) = match touch.phase {
            TouchPhase::Started => (true, false, false),
            TouchPhase::Moved | TouchPhase::Stationary => (false, false, false),
            TouchPhase::Ended => (false, true, false),
            TouchPhase::Cancelled => (false, false, true),
        };
        return PointerObservation {
            position,
            pressed,
            released,
            interrupted,
        };
    }

    let (x, y) = mouse_position();
    PointerObservation {
        position: Vec2::new(x, y),
        pressed: is_mouse_button_pressed(MouseButton::Left),
        released: is_mouse_button_released(MouseButton::Left),
        interrupted: false,
    }
}

/// Screen position of a cell's center for the current camera.
fn cell_center(scene: &Scene, cell_x: i32, cell_y: i32, screen: Vec2) -> Vec2 {
    screen * 0.5
        + scene.camera
        + Vec2::new(
            cell_x as f32 * scene.tile_length,
            cell_y as f32 * scene.tile_length,
        )
}

fn draw_board(scene: &Scene, screen: Vec2) {
    let half = scene.tile_length * 0.5;
    for tile in &scene.tiles {
        let center = cell_center(scene, tile.cell.x(), tile.cell.y(), screen);
        macroquad::shapes::draw_rectangle(
            center.x - half,
            center.y - half,
            scene.tile_length,
            scene.tile_length,
            to_macroquad_color(tile.color),
        );
        draw_centered_label(&tile.label, center, TILE_LABEL_FONT_SIZE);
    }
}

fn draw_walls(scene: &Scene, screen: Vec2) {
    let half = scene.tile_length * 0.5;
    let style = scene.wall_style;
    let color = to_macroquad_color(style.color);
    for segment in &scene.walls {
        let center = cell_center(scene, segment.cell.x(), segment.cell.y(), screen);
        let (from, to) = wall_segment_endpoints(center, half, segment.edge, style.thickness);
        macroquad::shapes::draw_line(from.x, from.y, to.x, to.y, style.thickness, color);
    }
}

/// Endpoints of a wall stroke along the given edge of a cell.
///
/// Each end is extended by half the stroke thickness so neighboring strokes
/// close their shared corners, matching a square line cap.
fn wall_segment_endpoints(
    center: Vec2,
    half: f32,
    edge: Direction,
    thickness: f32,
) -> (Vec2, Vec2) {
    let cap = thickness * 0.5;
    match edge {
        Direction::East => (
            Vec2::new(center.x + half, center.y - half - cap),
            Vec2::new(center.x + half, center.y + half + cap),
        ),
        Direction::West => (
            Vec2::new(center.x - half, center.y - half - cap),
            Vec2::new(center.x - half, center.y + half + cap),
        ),
        Direction::South => (
            Vec2::new(center.x - half - cap, center.y + half),
            Vec2::new(center.x + half + cap, center.y + half),
        ),
        Direction::North => (
            Vec2::new(center.x - half - cap, center.y - half),
            Vec2::new(center.x + half + cap, center.y - half),
        ),
    }
}

fn draw_ghost(scene: &Scene, screen: Vec2) {
    let Some(GhostPresentation {
        cell,
        color,
        label,
        placeable,
    }) = &scene.ghost
    else {
        return;
    };
    if !placeable {
        return;
    }

    let half = scene.tile_length * 0.5;
    let center = cell_center(scene, cell.x(), cell.y(), screen);
    macroquad::shapes::draw_rectangle(
        center.x - half,
        center.y - half,
        scene.tile_length,
        scene.tile_length,
        to_macroquad_color(color.with_alpha(GHOST_ALPHA)),
    );
    macroquad::shapes::draw_rectangle_lines(
        center.x - half,
        center.y - half,
        scene.tile_length,
        scene.tile_length,
        GHOST_OUTLINE_THICKNESS,
        macroquad::color::WHITE,
    );
    draw_centered_label(label, center, TILE_LABEL_FONT_SIZE);
}

fn draw_status(scene: &Scene) {
    let text = format!(
        "Placed: {}   Deck: {}",
        scene.status.placed_count, scene.status.deck_remaining
    );
    macroquad::text::draw_text(
        &text,
        16.0,
        16.0 + STATUS_FONT_SIZE,
        STATUS_FONT_SIZE,
        macroquad::color::DARKGRAY,
    );
}

fn draw_finale(screen: Vec2) {
    macroquad::shapes::draw_rectangle(
        0.0,
        0.0,
        screen.x,
        screen.y,
        macroquad::color::Color::new(0.0, 0.0, 0.0, 0.45),
    );
    let dimensions =
        macroquad::text::measure_text(FINALE_MESSAGE, None, FINALE_FONT_SIZE as u16, 1.0);
    macroquad::text::draw_text(
        FINALE_MESSAGE,
        (screen.x - dimensions.width) * 0.5,
        screen.y * 0.5,
        FINALE_FONT_SIZE,
        macroquad::color::WHITE,
    );
}

pub(crate) fn draw_centered_label(label: &str, center: Vec2, font_size: f32) {
    if label.is_empty() {
        return;
    }
    let dimensions = macroquad::text::measure_text(label, None, font_size as u16, 1.0);
    macroquad::text::draw_text(
        label,
        center.x - dimensions.width * 0.5,
        center.y + dimensions.offset_y * 0.5,
        font_size,
        macroquad::color::WHITE,
    );
}

pub(crate) fn to_macroquad_color(color: hearthstead_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_endpoints_trace_the_requested_edge() {
        let center = Vec2::new(100.0, 100.0);
        let (from, to) = wall_segment_endpoints(center, 50.0, Direction::East, 6.0);
        assert_eq!(from, Vec2::new(150.0, 47.0));
        assert_eq!(to, Vec2::new(150.0, 153.0));

        let (from, to) = wall_segment_endpoints(center, 50.0, Direction::North, 6.0);
        assert_eq!(from, Vec2::new(47.0, 50.0));
        assert_eq!(to, Vec2::new(153.0, 50.0));
    }

    #[test]
    fn color_conversion_preserves_channels() {
        let color = to_macroquad_color(hearthstead_rendering::Color::new(0.1, 0.2, 0.3, 0.4));
        assert_eq!(color.r, 0.1);
        assert_eq!(color.g, 0.2);
        assert_eq!(color.b, 0.3);
        assert_eq!(color.a, 0.4);
    }
}
