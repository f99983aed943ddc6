//! Domain entities for Room Planner.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # Model space and display space (for beginners)
//!
//! Every length stored by the domain is in the *canonical unit* (metres).
//! Feet and inches exist only at the edges of the program: a value typed in
//! feet is converted to metres on the way in, and converted back for display.
//!
//! Pixels are a second, separate coordinate system.  The [`scale`] module
//! holds the single scale factor (pixels per metre) shared by every item.
//! Changing the zoom level changes the pixels but never the metres.
//!
//! Code in outer layers (application, storage, UI) depends on the domain,
//! but the domain never depends on them.

/// Saturating clamp that keeps items inside the room while snapping is on.
pub mod boundary;
/// Room, furniture and opening data types.
pub mod entities;
/// The layout aggregate: the core domain concept.
///
/// See [`layout::RoomLayout`] for the main type.
pub mod layout;
/// Default-name allocation for doors and windows.
pub mod naming;
/// Model ↔ display coordinate transform.
pub mod scale;
/// Linear unit conversion (metre, foot, inch).
pub mod units;
