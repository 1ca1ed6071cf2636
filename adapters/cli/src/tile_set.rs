//! Tile-set configuration: the built-in standard set and TOML overrides.
//!
//! The tile table is configuration data, not engine state; the world only
//! ever sees the expanded [`TileDefinition`] list.

use std::{fs, path::Path};

use hearthstead_core::{TileCategory, TileColor, TileDefinition};
use serde::Deserialize;
use thiserror::Error;

const SUPPORTED_TILE_SET_VERSION: u32 = 1;

/// Errors that can occur while loading a tile-set file.
#[derive(Debug, Error)]
pub(crate) enum TileSetError {
    #[error("failed to read tile set at {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tile set toml contents")]
    Parse(#[from] toml::de::Error),
    #[error("unsupported tile set version {version} (expected {SUPPORTED_TILE_SET_VERSION})")]
    UnsupportedVersion { version: u32 },
    #[error("tile set contains no tiles")]
    Empty,
    #[error("tile '{kind}' has a zero count")]
    ZeroCount { kind: String },
    #[error("tile '{kind}' has invalid color '{value}' (expected #rrggbb)")]
    InvalidColor { kind: String, value: String },
}

#[derive(Debug, Deserialize)]
struct TileSetFile {
    version: u32,
    tiles: Vec<TileSetEntry>,
}

#[derive(Debug, Deserialize)]
struct TileSetEntry {
    kind: String,
    label: String,
    color: String,
    category: TileCategory,
    count: u32,
}

/// Loads and validates the tile set stored at the provided path.
pub(crate) fn load_definitions(path: &Path) -> Result<Vec<TileDefinition>, TileSetError> {
    let contents = fs::read_to_string(path).map_err(|source| TileSetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_definitions(&contents)
}

fn parse_definitions(contents: &str) -> Result<Vec<TileDefinition>, TileSetError> {
    let file: TileSetFile = toml::from_str(contents)?;

    if file.version != SUPPORTED_TILE_SET_VERSION {
        return Err(TileSetError::UnsupportedVersion {
            version: file.version,
        });
    }
    if file.tiles.is_empty() {
        return Err(TileSetError::Empty);
    }

    file.tiles
        .into_iter()
        .map(|entry| {
            if entry.count == 0 {
                return Err(TileSetError::ZeroCount { kind: entry.kind });
            }
            let color = parse_hex_color(&entry.color).ok_or_else(|| TileSetError::InvalidColor {
                kind: entry.kind.clone(),
                value: entry.color.clone(),
            })?;
            Ok(TileDefinition::new(
                entry.kind,
                entry.label,
                color,
                entry.category,
                entry.count,
            ))
        })
        .collect()
}

fn parse_hex_color(value: &str) -> Option<TileColor> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let red = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let green = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let blue = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(TileColor::from_rgb(red, green, blue))
}

/// The standard Hearthstead tile table.
pub(crate) fn standard_definitions() -> Vec<TileDefinition> {
    use TileCategory::{Indoor, Outdoor};

    let rgb = TileColor::from_rgb;
    vec![
        TileDefinition::new("living_room", "Living Room", rgb(0xde, 0xcb, 0xb7), Indoor, 1),
        TileDefinition::new("kitchen", "Kitchen", rgb(0xf7, 0xd0, 0x8a), Indoor, 1),
        TileDefinition::new("bedroom", "Bedroom", rgb(0xe3, 0xd5, 0xca), Indoor, 1),
        TileDefinition::new(
            "children_room",
            "Children Room?",
            rgb(0xe3, 0xd5, 0xca),
            Indoor,
            2,
        ),
        TileDefinition::new(
            "reading_room",
            "Reading Room",
            rgb(0x8d, 0x7b, 0x68),
            Indoor,
            1,
        ),
        TileDefinition::new("library", "Library", rgb(0x5e, 0x50, 0x3f), Indoor, 1),
        TileDefinition::new("office", "Office", rgb(0xaa, 0xb3, 0xab), Indoor, 1),
        TileDefinition::new("guest_room", "Guest Room", rgb(0xd6, 0xcf, 0xcb), Indoor, 1),
        TileDefinition::new("music_room", "Music Room", rgb(0xb0, 0x89, 0x68), Indoor, 1),
        TileDefinition::new("storage", "Storage", rgb(0x7f, 0x55, 0x39), Indoor, 1),
        TileDefinition::new("food_storage", "Pantry", rgb(0xdd, 0xb8, 0x92), Indoor, 1),
        TileDefinition::new("art_room", "Art Room", rgb(0xe6, 0xcc, 0xb2), Indoor, 1),
        TileDefinition::new(
            "pottery_room",
            "Pottery Room",
            rgb(0xc4, 0xa4, 0x84),
            Indoor,
            1,
        ),
        TileDefinition::new("tree", "Tree", rgb(0x58, 0x81, 0x57), Outdoor, 10),
        TileDefinition::new("playground", "Playground", rgb(0xa3, 0xb1, 0x8a), Outdoor, 1),
        TileDefinition::new("swing", "Swing", rgb(0xa3, 0xb1, 0x8a), Outdoor, 1),
        TileDefinition::new("tree_cabin", "Tree Cabin", rgb(0x3a, 0x5a, 0x40), Outdoor, 1),
        TileDefinition::new("pond", "Pond", rgb(0x45, 0x7b, 0x9d), Outdoor, 2),
        TileDefinition::new("grass_bees", "Bees", rgb(0xff, 0xea, 0x00), Outdoor, 2),
        TileDefinition::new("flower_field", "Flowers", rgb(0xff, 0xb5, 0xa7), Outdoor, 2),
        TileDefinition::new("veg_garden", "Veg Garden", rgb(0xfc, 0xd5, 0xce), Outdoor, 1),
        TileDefinition::new("herb_garden", "Herbs", rgb(0x99, 0xd9, 0x8c), Outdoor, 1),
    ]
}
