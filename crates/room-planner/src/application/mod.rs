//! Application layer use cases for Room Planner.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules in `room_core`) and the infrastructure (files,
//! settings storage).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "paste the
//!   copied sofa at the point the user right-clicked").
//! - **Depend on abstractions** (the `SettingsStore` trait) rather than
//!   concrete implementations, so tests never touch the real config directory.
//! - **Hold view-local state** that must not leak into the model: the
//!   clipboard, which doors are drawn open, and the display units.
//!
//! # Sub-modules
//!
//! - **`edit_layout`**    – The command surface a UI calls: add, move, rotate,
//!   delete, copy/paste, doors and windows, units, zoom.
//!
//! - **`persist_layout`** – Saving and loading layout files, and writing /
//!   restoring the autosave cache held in the application settings.

pub mod edit_layout;
pub mod persist_layout;
