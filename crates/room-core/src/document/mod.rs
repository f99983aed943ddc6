//! Layout document: the persisted form of a [`crate::RoomLayout`].
//!
//! The same document shape is used for user-chosen layout files and for the
//! autosave cache.
//!
//! # Document format
//!
//! ```json
//! {
//!   "room": {
//!     "name": "My Room",
//!     "width_m": 4.8768,
//!     "depth_m": 3.6576,
//!     "floor_texture": "Hardwood",
//!     "show_border": true
//!   },
//!   "furniture": [
//!     { "name": "Sofa", "width_m": 1.8288, "depth_m": 0.9144,
//!       "colour": "#4a90e2", "x_m": 0.5, "y_m": 0.25, "rotation": 90.0 }
//!   ],
//!   "openings": [
//!     { "name": "Door 1", "width_m": 1.0, "thickness_m": 0.1,
//!       "x_m": 1.9384, "y_m": 3.5576, "is_door": true, "rotation": 0.0 }
//!   ]
//! }
//! ```
//!
//! Every field of `room`, and the `furniture` and `openings` arrays, may be
//! omitted; see [`schema`] for the defaults.  Door open/closed state is never
//! written, so a reloaded door is always closed.
//!
//! Loading is two-phase: [`codec::decode_document`] parses and validates the
//! whole document, and only then does
//! [`schema::LayoutDocument::into_parts`] produce entities that
//! [`crate::RoomLayout::replace_contents`] swaps in at once.

pub mod codec;
pub mod schema;
