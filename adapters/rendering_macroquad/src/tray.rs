//! Tray panel drawing for the Macroquad rendering backend.
//!
//! The tray's geometry comes from [`TrayLayout`] so the hit testing performed
//! during input gathering and the chips drawn here can never disagree.

use glam::Vec2;
use hearthstead_rendering::{Scene, TrayLayout};

use crate::{draw_centered_label, to_macroquad_color};

const CHIP_LABEL_FONT_SIZE: f32 = 16.0;
const CHIP_HOVER_LIGHTEN: f32 = 0.25;

pub(crate) fn draw_tray(scene: &Scene, screen: Vec2, hovered_slot: Option<usize>) {
    if scene.tray.is_empty() {
        return;
    }

    let layout = TrayLayout::bottom_centered(screen.x, screen.y, scene.tray.len());
    let slot_size = layout.slot_size();

    for (index, chip) in scene.tray.iter().enumerate() {
        let position = layout.slot_position(index);
        let fill = if hovered_slot == Some(index) {
            chip.color.lighten(CHIP_HOVER_LIGHTEN)
        } else {
            chip.color
        };

        macroquad::shapes::draw_rectangle(
            position.x,
            position.y,
            slot_size.x,
            slot_size.y,
            to_macroquad_color(fill),
        );
        draw_centered_label(
            &chip.label,
            position + slot_size * 0.5,
            CHIP_LABEL_FONT_SIZE,
        );
    }
}
