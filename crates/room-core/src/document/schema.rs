//! Serde schema for layout documents.
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` take the return
//! value of `some_fn()` when absent, so hand-edited files and files from
//! older versions (which had no `openings` array) still load.

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::document::codec::DocumentError;
use crate::domain::entities::{
    validate_dimension, Colour, FloorTexture, FurniturePiece, Opening, OpeningKind, Room,
    DEFAULT_ROOM_NAME,
};
use crate::domain::layout::RoomLayout;

/// Top-level layout document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LayoutDocument {
    #[serde(default)]
    pub room: RoomRecord,
    #[serde(default)]
    pub furniture: Vec<FurnitureRecord>,
    #[serde(default)]
    pub openings: Vec<OpeningRecord>,
}

/// The room section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomRecord {
    #[serde(default = "default_room_name")]
    pub name: String,
    #[serde(default = "default_room_width")]
    pub width_m: f64,
    #[serde(default = "default_room_depth")]
    pub depth_m: f64,
    /// Texture name; unknown names load as `"None"`.
    #[serde(default = "default_floor_texture")]
    pub floor_texture: String,
    #[serde(default = "default_true")]
    pub show_border: bool,
}

/// One furniture piece.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FurnitureRecord {
    pub name: String,
    pub width_m: f64,
    pub depth_m: f64,
    #[serde(default = "default_colour")]
    pub colour: Colour,
    pub x_m: f64,
    pub y_m: f64,
    #[serde(default)]
    pub rotation: f64,
}

/// One door or window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpeningRecord {
    pub name: String,
    pub width_m: f64,
    pub thickness_m: f64,
    pub x_m: f64,
    pub y_m: f64,
    #[serde(default = "default_true")]
    pub is_door: bool,
    #[serde(default)]
    pub rotation: f64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_room_name() -> String {
    DEFAULT_ROOM_NAME.to_string()
}
fn default_room_width() -> f64 {
    5.0
}
fn default_room_depth() -> f64 {
    4.0
}
fn default_floor_texture() -> String {
    FloorTexture::None.name().to_string()
}
fn default_true() -> bool {
    true
}
fn default_colour() -> Colour {
    Colour::DEFAULT_FURNITURE
}

impl Default for RoomRecord {
    fn default() -> Self {
        Self {
            name: default_room_name(),
            width_m: default_room_width(),
            depth_m: default_room_depth(),
            floor_texture: default_floor_texture(),
            show_border: default_true(),
        }
    }
}

// ── Conversion ────────────────────────────────────────────────────────────────

impl LayoutDocument {
    /// Captures the canonical state of `layout`.  Display geometry, the scale
    /// and the snap flag are not part of a document.
    pub fn capture(layout: &RoomLayout) -> Self {
        let room = layout.room();
        Self {
            room: RoomRecord {
                name: room.name.clone(),
                width_m: room.width_m(),
                depth_m: room.depth_m(),
                floor_texture: room.floor_texture.name().to_string(),
                show_border: room.show_border,
            },
            furniture: layout
                .furniture()
                .iter()
                .map(|f| FurnitureRecord {
                    name: f.name.clone(),
                    width_m: f.width_m,
                    depth_m: f.depth_m,
                    colour: f.colour,
                    x_m: f.x_m,
                    y_m: f.y_m,
                    rotation: f.rotation,
                })
                .collect(),
            openings: layout
                .openings()
                .iter()
                .map(|o| OpeningRecord {
                    name: o.name.clone(),
                    width_m: o.width_m,
                    thickness_m: o.thickness_m,
                    x_m: o.x_m,
                    y_m: o.y_m,
                    is_door: o.kind.is_door(),
                    rotation: o.rotation,
                })
                .collect(),
        }
    }

    /// Checks every record without building anything.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Invalid`] for the first non-positive or
    /// non-finite dimension, or a non-finite position or rotation.
    pub fn validate(&self) -> Result<(), DocumentError> {
        validate_dimension("room width", self.room.width_m)?;
        validate_dimension("room depth", self.room.depth_m)?;
        for f in &self.furniture {
            validate_dimension("furniture width", f.width_m)?;
            validate_dimension("furniture depth", f.depth_m)?;
            check_finite(&f.name, &[f.x_m, f.y_m, f.rotation])?;
        }
        for o in &self.openings {
            validate_dimension("opening width", o.width_m)?;
            validate_dimension("opening thickness", o.thickness_m)?;
            check_finite(&o.name, &[o.x_m, o.y_m, o.rotation])?;
        }
        Ok(())
    }

    /// Converts the document into fresh entities, ready for
    /// [`RoomLayout::replace_contents`].  Every item gets a new id.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Invalid`] if [`LayoutDocument::validate`] fails;
    /// nothing is produced in that case.
    pub fn into_parts(self) -> Result<(Room, Vec<FurniturePiece>, Vec<Opening>), DocumentError> {
        self.validate()?;

        let mut room = Room::new(self.room.name, self.room.width_m, self.room.depth_m)?;
        room.floor_texture = FloorTexture::from_name(&self.room.floor_texture).unwrap_or_else(|| {
            warn!(texture = %self.room.floor_texture, "unknown floor texture, using None");
            FloorTexture::None
        });
        room.show_border = self.room.show_border;

        let furniture = self
            .furniture
            .into_iter()
            .map(|f| FurniturePiece {
                id: Uuid::new_v4(),
                name: f.name,
                width_m: f.width_m,
                depth_m: f.depth_m,
                colour: f.colour,
                x_m: f.x_m,
                y_m: f.y_m,
                rotation: f.rotation,
            })
            .collect();

        let openings = self
            .openings
            .into_iter()
            .map(|o| Opening {
                id: Uuid::new_v4(),
                name: o.name,
                kind: if o.is_door { OpeningKind::Door } else { OpeningKind::Window },
                width_m: o.width_m,
                thickness_m: o.thickness_m,
                x_m: o.x_m,
                y_m: o.y_m,
                rotation: o.rotation,
            })
            .collect();

        Ok((room, furniture, openings))
    }
}

fn check_finite(name: &str, values: &[f64]) -> Result<(), DocumentError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(DocumentError::NonFinite(name.to_string()))
    }
}
