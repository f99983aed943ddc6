//! Room, furniture and opening data types.
//!
//! All lengths and positions are in metres (the canonical unit).  Positions
//! are relative to the room's top-left corner.  Nothing in this module knows
//! about pixels; see [`crate::domain::scale`] for that.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::layout::LayoutError;

/// Stable handle for a furniture piece or opening, derived from UUID v4.
///
/// Identity is by handle, never by name: two pieces may share a name.
pub type ItemId = Uuid;

/// Name shown for a room whose name is blank.
pub const DEFAULT_ROOM_NAME: &str = "My Room";
/// Default room width: 16 ft.
pub const DEFAULT_ROOM_WIDTH_M: f64 = 16.0 * 0.3048;
/// Default room depth: 12 ft.
pub const DEFAULT_ROOM_DEPTH_M: f64 = 12.0 * 0.3048;

/// Normalises an angle in degrees into `[0, 360)`.
///
/// Non-finite input normalises to 0.
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let r = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Rejects non-positive and non-finite lengths.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidDimension`] naming `field`.
pub fn validate_dimension(field: &'static str, value: f64) -> Result<f64, LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::InvalidDimension { field, value })
    }
}

// ── Floor texture ─────────────────────────────────────────────────────────────

/// Floor surface of the room, chosen from a fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FloorTexture {
    #[default]
    None,
    Hardwood,
    Carpet,
    Tile,
    Concrete,
}

impl FloorTexture {
    pub const ALL: [FloorTexture; 5] = [
        FloorTexture::None,
        FloorTexture::Hardwood,
        FloorTexture::Carpet,
        FloorTexture::Tile,
        FloorTexture::Concrete,
    ];

    /// Name used in documents and settings.
    pub fn name(self) -> &'static str {
        match self {
            FloorTexture::None => "None",
            FloorTexture::Hardwood => "Hardwood",
            FloorTexture::Carpet => "Carpet",
            FloorTexture::Tile => "Tile",
            FloorTexture::Concrete => "Concrete",
        }
    }

    /// Looks a texture up by its document name (exact match).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Base fill colour used by renderers.
    pub fn base_colour(self) -> Colour {
        match self {
            FloorTexture::None => Colour::rgb(0xfa, 0xfa, 0xfa),
            FloorTexture::Hardwood => Colour::rgb(0xd2, 0xb4, 0x8c),
            FloorTexture::Carpet => Colour::rgb(0xdd, 0xa0, 0xdd),
            FloorTexture::Tile => Colour::rgb(0xf0, 0xf8, 0xff),
            FloorTexture::Concrete => Colour::rgb(0xc0, 0xc0, 0xc0),
        }
    }
}

impl fmt::Display for FloorTexture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Colour ────────────────────────────────────────────────────────────────────

/// Error returned when a colour string cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColourError {
    #[error("invalid colour {0:?}: expected #rrggbb or #rgb")]
    Invalid(String),
}

/// An opaque RGB colour, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Default colour for new furniture.
    pub const DEFAULT_FURNITURE: Colour = Colour::rgb(0x4a, 0x90, 0xe2);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Colour {
    type Err = ColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColourError::Invalid(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Colour::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #abc is shorthand for #aabbcc
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Colour::rgb(r * 17, g * 17, b * 17))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Colour {
    type Error = ColourError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Colour> for String {
    fn from(c: Colour) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ── Room ──────────────────────────────────────────────────────────────────────

/// The rectangular room.  Exactly one exists per open layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// User-editable name; may be blank (see [`Room::display_name`]).
    pub name: String,
    width_m: f64,
    depth_m: f64,
    pub floor_texture: FloorTexture,
    pub show_border: bool,
}

impl Room {
    /// Creates a room with the default texture and a visible border.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] if either dimension is not > 0.
    pub fn new(name: impl Into<String>, width_m: f64, depth_m: f64) -> Result<Self, LayoutError> {
        Ok(Self {
            name: name.into(),
            width_m: validate_dimension("room width", width_m)?,
            depth_m: validate_dimension("room depth", depth_m)?,
            floor_texture: FloorTexture::None,
            show_border: true,
        })
    }

    pub fn width_m(&self) -> f64 {
        self.width_m
    }

    pub fn depth_m(&self) -> f64 {
        self.depth_m
    }

    /// The name, or "My Room" when the name is blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            DEFAULT_ROOM_NAME
        } else {
            &self.name
        }
    }

    /// Changes the room dimensions.  Both values are validated before either
    /// is applied.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] if either dimension is not > 0.
    pub fn resize(&mut self, width_m: f64, depth_m: f64) -> Result<(), LayoutError> {
        let width_m = validate_dimension("room width", width_m)?;
        let depth_m = validate_dimension("room depth", depth_m)?;
        self.width_m = width_m;
        self.depth_m = depth_m;
        Ok(())
    }
}

impl Default for Room {
    fn default() -> Self {
        Self {
            name: DEFAULT_ROOM_NAME.to_string(),
            width_m: DEFAULT_ROOM_WIDTH_M,
            depth_m: DEFAULT_ROOM_DEPTH_M,
            floor_texture: FloorTexture::None,
            show_border: true,
        }
    }
}

// ── Furniture ─────────────────────────────────────────────────────────────────

/// A piece of furniture placed in the room.
#[derive(Debug, Clone, PartialEq)]
pub struct FurniturePiece {
    pub id: ItemId,
    pub name: String,
    pub width_m: f64,
    pub depth_m: f64,
    pub colour: Colour,
    /// X of the top-left corner, relative to the room origin.
    pub x_m: f64,
    /// Y of the top-left corner, relative to the room origin.
    pub y_m: f64,
    /// Degrees, always in `[0, 360)`.
    pub rotation: f64,
}

// ── Openings ──────────────────────────────────────────────────────────────────

/// Discriminates doors from windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    /// Category word used in default names ("Door 1", "Window 2").
    pub fn label(self) -> &'static str {
        match self {
            OpeningKind::Door => "Door",
            OpeningKind::Window => "Window",
        }
    }

    /// Default `(width_m, thickness_m)` offered when adding an opening.
    pub fn default_dimensions(self) -> (f64, f64) {
        match self {
            OpeningKind::Door => (1.0, 0.1),
            OpeningKind::Window => (1.5, 0.2),
        }
    }

    pub fn is_door(self) -> bool {
        self == OpeningKind::Door
    }
}

/// A door or window placed on (or near) a wall.
///
/// Door open/closed state is deliberately absent: it is view-local and is
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Opening {
    pub id: ItemId,
    pub name: String,
    pub kind: OpeningKind,
    pub width_m: f64,
    pub thickness_m: f64,
    pub x_m: f64,
    pub y_m: f64,
    /// Degrees, always in `[0, 360)`.
    pub rotation: f64,
}

impl Opening {
    /// Conventional position for a new opening of `width_m` × `thickness_m`:
    /// doors centred on the bottom wall, windows centred on the top wall.
    pub fn wall_position(
        kind: OpeningKind,
        room: &Room,
        width_m: f64,
        thickness_m: f64,
    ) -> (f64, f64) {
        let x = (room.width_m() - width_m) / 2.0;
        let y = match kind {
            OpeningKind::Door => room.depth_m() - thickness_m,
            OpeningKind::Window => 0.0,
        };
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_rotation_wraps_into_range() {
        assert_eq!(normalize_rotation(0.0), 0.0);
        assert_eq!(normalize_rotation(360.0), 0.0);
        assert_eq!(normalize_rotation(450.0), 90.0);
        assert_eq!(normalize_rotation(-90.0), 270.0);
        assert_eq!(normalize_rotation(-720.0), 0.0);
    }

    #[test]
    fn test_normalize_rotation_tiny_negative_stays_below_360() {
        let r = normalize_rotation(-1e-20);
        assert!((0.0..360.0).contains(&r));
    }

    #[test]
    fn test_normalize_rotation_non_finite_is_zero() {
        assert_eq!(normalize_rotation(f64::NAN), 0.0);
        assert_eq!(normalize_rotation(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_validate_dimension_rejects_non_positive() {
        assert!(validate_dimension("width", 0.0).is_err());
        assert!(validate_dimension("width", -1.0).is_err());
        assert!(validate_dimension("width", f64::NAN).is_err());
        assert_eq!(validate_dimension("width", 0.5), Ok(0.5));
    }

    #[test]
    fn test_room_new_rejects_zero_depth() {
        let err = Room::new("Den", 3.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidDimension { field: "room depth", value: 0.0 }
        );
    }

    #[test]
    fn test_room_resize_is_all_or_nothing() {
        let mut room = Room::new("Den", 3.0, 4.0).unwrap();
        assert!(room.resize(5.0, -1.0).is_err());
        assert_eq!(room.width_m(), 3.0);
        assert_eq!(room.depth_m(), 4.0);
    }

    #[test]
    fn test_room_default_is_sixteen_by_twelve_feet() {
        let room = Room::default();
        assert!((room.width_m() - 4.8768).abs() < 1e-9);
        assert!((room.depth_m() - 3.6576).abs() < 1e-9);
        assert_eq!(room.name, "My Room");
        assert!(room.show_border);
    }

    #[test]
    fn test_room_display_name_falls_back_when_blank() {
        let mut room = Room::default();
        room.name = "   ".to_string();
        assert_eq!(room.display_name(), "My Room");
        room.name = "Lounge".to_string();
        assert_eq!(room.display_name(), "Lounge");
    }

    #[test]
    fn test_colour_parses_long_and_short_hex() {
        assert_eq!("#4a90e2".parse::<Colour>(), Ok(Colour::rgb(0x4a, 0x90, 0xe2)));
        assert_eq!("#FFF".parse::<Colour>(), Ok(Colour::rgb(255, 255, 255)));
    }

    #[test]
    fn test_colour_rejects_garbage() {
        assert!("4a90e2".parse::<Colour>().is_err());
        assert!("#4a90e".parse::<Colour>().is_err());
        assert!("#zzzzzz".parse::<Colour>().is_err());
        assert!("#ééé".parse::<Colour>().is_err());
    }

    #[test]
    fn test_colour_displays_lowercase_hex() {
        assert_eq!(Colour::rgb(0xAB, 0x01, 0xFF).to_string(), "#ab01ff");
    }

    #[test]
    fn test_floor_texture_lookup_by_name() {
        assert_eq!(FloorTexture::from_name("Carpet"), Some(FloorTexture::Carpet));
        assert_eq!(FloorTexture::from_name("Marble"), None);
        assert_eq!(FloorTexture::Hardwood.base_colour().to_string(), "#d2b48c");
    }

    #[test]
    fn test_wall_position_centres_door_on_bottom_wall() {
        let room = Room::new("r", 4.0, 3.0).unwrap();
        assert_eq!(
            Opening::wall_position(OpeningKind::Door, &room, 1.0, 0.1),
            (1.5, 2.9)
        );
    }

    #[test]
    fn test_wall_position_centres_window_on_top_wall() {
        let room = Room::new("r", 4.0, 3.0).unwrap();
        assert_eq!(
            Opening::wall_position(OpeningKind::Window, &room, 1.5, 0.2),
            (1.25, 0.0)
        );
    }
}
