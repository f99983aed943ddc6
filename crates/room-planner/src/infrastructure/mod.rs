//! Infrastructure layer for Room Planner.
//!
//! Contains OS-facing adapters: layout files and the settings file.
//!
//! **Dependency rule**: this layer may depend on `room_core`, but MUST NOT be
//! imported by the domain.  The application layer only uses its public
//! functions and the `SettingsStore` trait.

pub mod storage;
