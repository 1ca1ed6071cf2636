#![allow(clippy::missing_errors_doc)]

use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use hearthstead_core::{GridCoord, TileCategory, TileColor};
use hearthstead_world::{query, World};
use serde::{Deserialize, Serialize};

const SNAPSHOT_DOMAIN: &str = "hearthstead";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "hearthstead:v1";
/// Delimiter used to separate the prefix, tile count and payload.
const FIELD_DELIMITER: char = ':';

/// Snapshot of a finished homestead layout suitable for clipboard sharing.
///
/// The snapshot is export-only: it can be decoded for inspection but never
/// restored into a running session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct LayoutSnapshot {
    /// Side length of a square tile in view units.
    pub tile_length: f32,
    /// Placed tiles composing the layout, in placement order.
    pub tiles: Vec<LayoutTile>,
}

impl LayoutSnapshot {
    /// Captures the placed tiles of the provided session.
    pub(crate) fn capture(world: &World) -> Self {
        let tiles = query::board_view(world)
            .iter()
            .map(|snapshot| LayoutTile {
                kind: snapshot.kind.clone(),
                cell: snapshot.cell,
                color: snapshot.color,
                category: snapshot.category,
            })
            .collect();

        Self {
            tile_length: query::tile_length(world),
            tiles,
        }
    }

    /// Encodes the snapshot into a single-line string suitable for clipboard transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializableSnapshot {
            tile_length: self.tile_length,
            tiles: self.tiles.clone(),
        };
        let json = serde_json::to_vec(&payload).expect("layout snapshot serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{SNAPSHOT_HEADER}:{}:{encoded}", self.tiles.len())
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LayoutTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
        let tile_count = parts.next().ok_or(LayoutTransferError::MissingTileCount)?;
        let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;

        if domain != SNAPSHOT_DOMAIN {
            return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
        }

        let expected = tile_count
            .trim()
            .parse::<usize>()
            .map_err(|_| LayoutTransferError::InvalidTileCount(tile_count.to_owned()))?;

        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(LayoutTransferError::InvalidEncoding)?;
        let decoded: SerializableSnapshot =
            serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;

        if decoded.tiles.len() != expected {
            return Err(LayoutTransferError::TileCountMismatch {
                expected,
                actual: decoded.tiles.len(),
            });
        }

        Ok(Self {
            tile_length: decoded.tile_length,
            tiles: decoded.tiles,
        })
    }
}

/// Placed tile description captured within a layout snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct LayoutTile {
    /// Kind identifier copied from the originating definition.
    pub kind: String,
    /// Cell the tile occupies.
    pub cell: GridCoord,
    /// Fill color of the tile.
    pub color: TileColor,
    /// Category the tile belongs to.
    pub category: TileCategory,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableSnapshot {
    tile_length: f32,
    tiles: Vec<LayoutTile>,
}

/// Errors that can occur while decoding layout transfer strings.
#[derive(Debug)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    MissingVersion,
    /// The encoded snapshot did not include its tile count.
    MissingTileCount,
    /// The encoded snapshot did not include the payload segment.
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The tile count could not be parsed from the encoded snapshot.
    InvalidTileCount(String),
    /// The payload held a different number of tiles than the header claimed.
    TileCountMismatch {
        /// Tile count announced by the header.
        expected: usize,
        /// Tile count actually present in the payload.
        actual: usize,
    },
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The decoded payload could not be deserialised.
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for LayoutTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "layout payload was empty"),
            Self::MissingPrefix => write!(f, "layout string is missing the prefix"),
            Self::MissingVersion => write!(f, "layout string is missing the version"),
            Self::MissingTileCount => write!(f, "layout string is missing the tile count"),
            Self::MissingPayload => write!(f, "layout string is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "layout prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "layout version '{version}' is not supported")
            }
            Self::InvalidTileCount(count) => {
                write!(f, "could not parse tile count '{count}'")
            }
            Self::TileCountMismatch { expected, actual } => {
                write!(
                    f,
                    "layout header announced {expected} tiles but the payload holds {actual}"
                )
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode layout payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not parse layout payload: {error}")
            }
        }
    }
}

impl Error for LayoutTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearthstead_core::{Command, Event, TileDefinition};
    use hearthstead_world::{apply, SessionConfig};

    fn sample_snapshot() -> LayoutSnapshot {
        LayoutSnapshot {
            tile_length: 100.0,
            tiles: vec![
                LayoutTile {
                    kind: "hearth".to_owned(),
                    cell: GridCoord::ORIGIN,
                    color: TileColor::from_rgb(0xd1, 0x8c, 0x8c),
                    category: TileCategory::Indoor,
                },
                LayoutTile {
                    kind: "tree".to_owned(),
                    cell: GridCoord::new(-1, 0),
                    color: TileColor::from_rgb(0x58, 0x81, 0x57),
                    category: TileCategory::Outdoor,
                },
            ],
        }
    }

    #[test]
    fn round_trip_preserves_the_layout() {
        let snapshot = sample_snapshot();
        let encoded = snapshot.encode();
        assert!(encoded.starts_with(&format!("{SNAPSHOT_HEADER}:2:")));

        let decoded = LayoutSnapshot::decode(&encoded).expect("snapshot decodes");
        assert_eq!(snapshot, decoded);
    }

    #[test]
    fn capture_reflects_the_placed_board() {
        let definitions = vec![TileDefinition::new(
            "pond",
            "Pond",
            TileColor::from_rgb(0x45, 0x7b, 0x9d),
            TileCategory::Outdoor,
            1,
        )];
        let mut world = World::new(SessionConfig::new(definitions, 9));
        let instance = query::hand_view(&world)
            .iter()
            .next()
            .map(|tile| tile.id)
            .expect("pond in hand");
        let mut events: Vec<Event> = Vec::new();
        apply(
            &mut world,
            Command::PlaceTile {
                instance,
                cell: GridCoord::new(1, 0),
            },
            &mut events,
        );

        let snapshot = LayoutSnapshot::capture(&world);
        assert_eq!(snapshot.tiles.len(), 2);
        assert_eq!(snapshot.tiles[0].kind, "hearth");
        assert_eq!(snapshot.tiles[1].kind, "pond");
        assert_eq!(snapshot.tiles[1].cell, GridCoord::new(1, 0));
    }

    #[test]
    fn decode_rejects_foreign_prefixes() {
        let encoded = sample_snapshot().encode();
        let foreign = encoded.replacen(SNAPSHOT_DOMAIN, "elsewhere", 1);

        assert!(matches!(
            LayoutSnapshot::decode(&foreign),
            Err(LayoutTransferError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn decode_rejects_unsupported_versions() {
        let encoded = sample_snapshot().encode();
        let future = encoded.replacen(SNAPSHOT_VERSION, "v9", 1);

        assert!(matches!(
            LayoutSnapshot::decode(&future),
            Err(LayoutTransferError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn decode_rejects_mismatched_tile_counts() {
        let encoded = sample_snapshot().encode();
        let tampered = encoded.replacen(":2:", ":3:", 1);

        assert!(matches!(
            LayoutSnapshot::decode(&tampered),
            Err(LayoutTransferError::TileCountMismatch {
                expected: 3,
                actual: 2,
            })
        ));
    }

    #[test]
    fn decode_rejects_corrupted_payloads() {
        assert!(matches!(
            LayoutSnapshot::decode("hearthstead:v1:0:!!!"),
            Err(LayoutTransferError::InvalidEncoding(_))
        ));
        assert!(matches!(
            LayoutSnapshot::decode("   "),
            Err(LayoutTransferError::EmptyPayload)
        ));
    }
}
