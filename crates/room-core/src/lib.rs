//! # room-core
//!
//! Shared library for Room Planner containing the room layout model, the
//! unit converter, the model↔display transform, and the layout document codec.
//!
//! It has zero dependencies on OS APIs, UI frameworks, or the file system.
//!
//! # Architecture overview (for beginners)
//!
//! Room Planner lets a user place furniture, doors and windows inside a
//! rectangular room and save the arrangement.  Everything the user sees is
//! drawn in *pixels*, but everything the program stores is in *metres*.
//! Keeping those two worlds apart is the main job of this crate.
//!
//! - **`domain`** – Pure business logic.  The most important piece is the
//!   `RoomLayout`: the room plus every placed item, together with the scale
//!   factor that turns metres into pixels and the optional "snap to border"
//!   constraint.
//!
//! - **`document`** – How a layout is written to disk.  A layout is captured
//!   into a plain `LayoutDocument`, encoded as JSON, and decoded + validated
//!   back before it is allowed to replace the live layout.

pub mod document;
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `room_core::RoomLayout` instead of `room_core::domain::layout::RoomLayout`.
pub use document::codec::{decode_document, encode_document, DocumentError};
pub use document::schema::LayoutDocument;
pub use domain::entities::{
    Colour, ColourError, FloorTexture, FurniturePiece, ItemId, Opening, OpeningKind, Room,
};
pub use domain::layout::{LayoutError, LayoutItem, NewFurniture, NewOpening, RoomLayout};
pub use domain::scale::{DisplayGeometry, DisplayPoint, DisplaySize, ScaleTransform};
pub use domain::units::{LinearUnit, UnitError};
