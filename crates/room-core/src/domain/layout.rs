//! Room layout aggregate.
//!
//! [`RoomLayout`] owns the room, every furniture piece and opening, and the
//! configuration that governs them: the shared [`ScaleTransform`], the
//! snap-to-border [`BoundaryConstraint`] and the door/window
//! [`NameAllocator`].  Every mutation goes through it, so the display
//! geometry it caches per item can never drift from the model.
//!
//! Items are addressed by [`ItemId`]; names are labels only.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::boundary::BoundaryConstraint;
use crate::domain::entities::{
    normalize_rotation, validate_dimension, Colour, FloorTexture, FurniturePiece, ItemId, Opening,
    OpeningKind, Room,
};
use crate::domain::naming::NameAllocator;
use crate::domain::scale::{DisplayGeometry, DisplayPoint, DisplaySize, ScaleTransform};

/// Errors that can occur when editing the layout.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// A width, depth or thickness was zero, negative or not finite.
    #[error("invalid {field}: {value} (must be a positive number)")]
    InvalidDimension { field: &'static str, value: f64 },

    /// The scale factor was zero, negative or not finite.
    #[error("invalid scale: {0} pixels per metre (must be a positive number)")]
    InvalidScale(f64),

    /// No furniture piece or opening has this id.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// The item exists but is not a door.
    #[error("item is not a door: {0}")]
    NotADoor(ItemId),

    /// An opening name is already used by another item.
    #[error("name already in use: {0:?}")]
    NameCollision(String),
}

/// Parameters for a new furniture piece.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFurniture {
    /// Blank names are replaced by `"Item {n}"`.
    pub name: String,
    pub width_m: f64,
    pub depth_m: f64,
    pub colour: Colour,
    pub x_m: f64,
    pub y_m: f64,
    pub rotation: f64,
}

impl NewFurniture {
    /// A piece at the room origin with no rotation.
    pub fn new(name: impl Into<String>, width_m: f64, depth_m: f64, colour: Colour) -> Self {
        Self {
            name: name.into(),
            width_m,
            depth_m,
            colour,
            x_m: 0.0,
            y_m: 0.0,
            rotation: 0.0,
        }
    }

    pub fn at(mut self, x_m: f64, y_m: f64) -> Self {
        self.x_m = x_m;
        self.y_m = y_m;
        self
    }

    pub fn rotated(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Parameters for a new door or window.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOpening {
    pub kind: OpeningKind,
    /// `None`, blank, or already-taken names are replaced by the next free
    /// default name for the category.
    pub name: Option<String>,
    pub width_m: f64,
    pub thickness_m: f64,
}

impl NewOpening {
    /// An opening with the category's default dimensions and name.
    pub fn with_defaults(kind: OpeningKind) -> Self {
        let (width_m, thickness_m) = kind.default_dimensions();
        Self {
            kind,
            name: None,
            width_m,
            thickness_m,
        }
    }
}

/// An item removed from, or looked up in, the layout.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutItem {
    Furniture(FurniturePiece),
    Opening(Opening),
}

impl LayoutItem {
    pub fn id(&self) -> ItemId {
        match self {
            LayoutItem::Furniture(f) => f.id,
            LayoutItem::Opening(o) => o.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LayoutItem::Furniture(f) => &f.name,
            LayoutItem::Opening(o) => &o.name,
        }
    }
}

/// The room and everything placed in it.
#[derive(Debug, Clone)]
pub struct RoomLayout {
    room: Room,
    scale: ScaleTransform,
    boundary: BoundaryConstraint,
    names: NameAllocator,
    furniture: Vec<FurniturePiece>,
    openings: Vec<Opening>,
    /// Cached display geometry for every item, keyed by id.
    display: HashMap<ItemId, DisplayGeometry>,
}

impl RoomLayout {
    /// Creates an empty layout for `room`.
    pub fn new(room: Room, scale: ScaleTransform, snap_to_border: bool) -> Self {
        Self {
            room,
            scale,
            boundary: BoundaryConstraint::new(snap_to_border),
            names: NameAllocator::new(),
            furniture: Vec::new(),
            openings: Vec::new(),
            display: HashMap::new(),
        }
    }

    // ── Room ──────────────────────────────────────────────────────────────────

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn set_room_name(&mut self, name: impl Into<String>) {
        self.room.name = name.into();
    }

    /// Resizes the room.  Items keep their model positions.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] if either dimension is not > 0.
    pub fn resize_room(&mut self, width_m: f64, depth_m: f64) -> Result<(), LayoutError> {
        self.room.resize(width_m, depth_m)
    }

    pub fn set_floor_texture(&mut self, texture: FloorTexture) {
        self.room.floor_texture = texture;
    }

    pub fn set_show_border(&mut self, show: bool) {
        self.room.show_border = show;
    }

    /// The room rectangle in pixels at the current scale.
    pub fn room_display_size(&self) -> DisplaySize {
        self.scale
            .size_to_display(self.room.width_m(), self.room.depth_m())
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    pub fn scale(&self) -> &ScaleTransform {
        &self.scale
    }

    pub fn snap_to_border(&self) -> bool {
        self.boundary.is_enabled()
    }

    pub fn set_snap_to_border(&mut self, enabled: bool) {
        self.boundary.set_enabled(enabled);
    }

    /// Changes the shared scale and recomputes the display geometry of every
    /// furniture piece and opening.  Model-space values are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidScale`] if `pixels_per_metre` is not > 0;
    /// the layout is left unchanged.
    pub fn rescale(&mut self, pixels_per_metre: f64) -> Result<(), LayoutError> {
        self.scale = ScaleTransform::new(pixels_per_metre)?;
        self.display.clear();
        let scale = self.scale;
        for f in &self.furniture {
            self.display.insert(f.id, furniture_geometry(&scale, f));
        }
        for o in &self.openings {
            self.display.insert(o.id, opening_geometry(&scale, o));
        }
        debug!(
            pixels_per_metre,
            items = self.display.len(),
            "rescaled layout"
        );
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Furniture in insertion order.
    pub fn furniture(&self) -> &[FurniturePiece] {
        &self.furniture
    }

    /// Openings in insertion order.
    pub fn openings(&self) -> &[Opening] {
        &self.openings
    }

    pub fn furniture_piece(&self, id: ItemId) -> Option<&FurniturePiece> {
        self.furniture.iter().find(|f| f.id == id)
    }

    pub fn opening(&self, id: ItemId) -> Option<&Opening> {
        self.openings.iter().find(|o| o.id == id)
    }

    /// Number of furniture pieces plus openings.
    pub fn item_count(&self) -> usize {
        self.furniture.len() + self.openings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Returns `true` if any furniture piece or opening is called `name`.
    pub fn contains_name(&self, name: &str) -> bool {
        name_in_use(&self.furniture, &self.openings, name)
    }

    /// Current display geometry of an item.
    pub fn display_geometry(&self, id: ItemId) -> Option<DisplayGeometry> {
        self.display.get(&id).copied()
    }

    // ── Furniture ─────────────────────────────────────────────────────────────

    /// Adds a furniture piece and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] before anything is created if
    /// the width or depth is not > 0.
    pub fn add_furniture(&mut self, new: NewFurniture) -> Result<ItemId, LayoutError> {
        let width_m = validate_dimension("furniture width", new.width_m)?;
        let depth_m = validate_dimension("furniture depth", new.depth_m)?;
        let name = if new.name.trim().is_empty() {
            format!("Item {}", self.item_count() + 1)
        } else {
            new.name
        };
        let piece = FurniturePiece {
            id: Uuid::new_v4(),
            name,
            width_m,
            depth_m,
            colour: new.colour,
            x_m: new.x_m,
            y_m: new.y_m,
            rotation: normalize_rotation(new.rotation),
        };
        let id = piece.id;
        debug!(%id, name = %piece.name, "added furniture");
        self.track_furniture(piece);
        Ok(id)
    }

    // ── Openings ──────────────────────────────────────────────────────────────

    /// Returns the name [`RoomLayout::add_opening`] would assign by default,
    /// without reserving it.
    pub fn suggest_opening_name(&mut self, kind: OpeningKind) -> String {
        let (furniture, openings) = (&self.furniture, &self.openings);
        self.names
            .suggest(kind, |n| name_in_use(furniture, openings, n))
    }

    /// Adds a door (centred on the bottom wall) or window (centred on the top
    /// wall) and returns its id.
    ///
    /// A missing, blank or already-used name is replaced by the next free
    /// default name; this never fails on a name.  Either way the category's
    /// counter moves on, so a name once handed out is not suggested again.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] before anything is created if
    /// the width or thickness is not > 0.
    pub fn add_opening(&mut self, new: NewOpening) -> Result<ItemId, LayoutError> {
        let width_m = validate_dimension("opening width", new.width_m)?;
        let thickness_m = validate_dimension("opening thickness", new.thickness_m)?;

        let requested = new.name.filter(|n| !n.trim().is_empty());
        let name = match requested {
            Some(n) if !self.contains_name(&n) => {
                self.names.advance(new.kind);
                n
            }
            other => {
                if let Some(taken) = other {
                    debug!(name = %taken, "opening name in use, allocating default");
                }
                let (furniture, openings) = (&self.furniture, &self.openings);
                self.names
                    .next_name(new.kind, |n| name_in_use(furniture, openings, n))
            }
        };

        let (x_m, y_m) = Opening::wall_position(new.kind, &self.room, width_m, thickness_m);
        let opening = Opening {
            id: Uuid::new_v4(),
            name,
            kind: new.kind,
            width_m,
            thickness_m,
            x_m,
            y_m,
            rotation: 0.0,
        };
        let id = opening.id;
        debug!(%id, name = %opening.name, kind = ?opening.kind, "added opening");
        self.track_opening(opening);
        Ok(id)
    }

    // ── Item edits ────────────────────────────────────────────────────────────

    /// Moves an item to a proposed display position.
    ///
    /// When snap-to-border is on, the position is first clamped so the item's
    /// unrotated rectangle stays inside the room.  Returns the position that
    /// was actually applied.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] for an unknown id.
    pub fn move_to(&mut self, id: ItemId, proposed: DisplayPoint) -> Result<DisplayPoint, LayoutError> {
        let room_px = self.room_display_size();
        let scale = self.scale;
        let boundary = self.boundary;

        let applied = if let Some(f) = self.furniture.iter_mut().find(|f| f.id == id) {
            let applied = boundary.apply(proposed, scale.size_to_display(f.width_m, f.depth_m), room_px);
            (f.x_m, f.y_m) = scale.point_to_model(applied);
            self.display.insert(id, furniture_geometry(&scale, f));
            applied
        } else if let Some(o) = self.openings.iter_mut().find(|o| o.id == id) {
            let applied = boundary.apply(proposed, scale.size_to_display(o.width_m, o.thickness_m), room_px);
            (o.x_m, o.y_m) = scale.point_to_model(applied);
            self.display.insert(id, opening_geometry(&scale, o));
            applied
        } else {
            return Err(LayoutError::ItemNotFound(id));
        };

        if applied != proposed {
            debug!(%id, ?proposed, ?applied, "clamped move to room border");
        }
        Ok(applied)
    }

    /// Rotates an item by `degrees` and returns the normalised rotation.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] for an unknown id.
    pub fn rotate_by(&mut self, id: ItemId, degrees: f64) -> Result<f64, LayoutError> {
        let rotation = match self.rotation_mut(id) {
            Some(r) => {
                *r = normalize_rotation(*r + degrees);
                *r
            }
            None => return Err(LayoutError::ItemNotFound(id)),
        };
        if let Some(g) = self.display.get_mut(&id) {
            g.rotation = rotation;
        }
        Ok(rotation)
    }

    /// Rotates an item a quarter turn clockwise.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] for an unknown id.
    pub fn rotate_90(&mut self, id: ItemId) -> Result<f64, LayoutError> {
        self.rotate_by(id, 90.0)
    }

    /// Renames an item.
    ///
    /// Furniture names need not be unique.  Openings keep the shared
    /// namespace unique, so an opening cannot take a name used by any other
    /// item.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] for an unknown id and
    /// [`LayoutError::NameCollision`] when renaming an opening onto a used name.
    pub fn rename(&mut self, id: ItemId, name: impl Into<String>) -> Result<(), LayoutError> {
        let name = name.into();
        if let Some(f) = self.furniture.iter_mut().find(|f| f.id == id) {
            f.name = name;
            return Ok(());
        }
        let taken_elsewhere = self.furniture.iter().any(|f| f.name == name)
            || self.openings.iter().any(|o| o.id != id && o.name == name);
        match self.openings.iter_mut().find(|o| o.id == id) {
            Some(_) if taken_elsewhere => Err(LayoutError::NameCollision(name)),
            Some(o) => {
                o.name = name;
                Ok(())
            }
            None => Err(LayoutError::ItemNotFound(id)),
        }
    }

    /// Removes an item and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] for an unknown id.
    pub fn remove(&mut self, id: ItemId) -> Result<LayoutItem, LayoutError> {
        let removed = if let Some(i) = self.furniture.iter().position(|f| f.id == id) {
            LayoutItem::Furniture(self.furniture.remove(i))
        } else if let Some(i) = self.openings.iter().position(|o| o.id == id) {
            LayoutItem::Opening(self.openings.remove(i))
        } else {
            return Err(LayoutError::ItemNotFound(id));
        };
        self.display.remove(&id);
        debug!(%id, name = %removed.name(), "removed item");
        Ok(removed)
    }

    // ── Bulk operations ───────────────────────────────────────────────────────

    /// Discards every furniture piece and opening and rewinds the default-name
    /// counters.  The room itself is kept.
    pub fn clear_items(&mut self) {
        let count = self.item_count();
        self.furniture.clear();
        self.openings.clear();
        self.display.clear();
        self.names.reset();
        info!(removed = count, "cleared layout");
    }

    /// Replaces the room and all items in one step.
    ///
    /// Callers validate the incoming data first (see
    /// [`crate::document::schema::LayoutDocument::into_parts`]); this method
    /// cannot fail, so the layout is never left half-replaced.  Rotations are
    /// normalised on the way in.
    pub fn replace_contents(&mut self, room: Room, furniture: Vec<FurniturePiece>, openings: Vec<Opening>) {
        self.clear_items();
        self.room = room;
        for mut f in furniture {
            f.rotation = normalize_rotation(f.rotation);
            self.track_furniture(f);
        }
        for mut o in openings {
            o.rotation = normalize_rotation(o.rotation);
            self.track_opening(o);
        }
        info!(
            room = %self.room.display_name(),
            furniture = self.furniture.len(),
            openings = self.openings.len(),
            "replaced layout contents"
        );
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn track_furniture(&mut self, piece: FurniturePiece) {
        self.display
            .insert(piece.id, furniture_geometry(&self.scale, &piece));
        self.furniture.push(piece);
    }

    fn track_opening(&mut self, opening: Opening) {
        self.display
            .insert(opening.id, opening_geometry(&self.scale, &opening));
        self.openings.push(opening);
    }

    fn rotation_mut(&mut self, id: ItemId) -> Option<&mut f64> {
        if let Some(f) = self.furniture.iter_mut().find(|f| f.id == id) {
            return Some(&mut f.rotation);
        }
        self.openings
            .iter_mut()
            .find(|o| o.id == id)
            .map(|o| &mut o.rotation)
    }
}

impl Default for RoomLayout {
    fn default() -> Self {
        Self::new(Room::default(), ScaleTransform::default(), false)
    }
}

fn name_in_use(furniture: &[FurniturePiece], openings: &[Opening], name: &str) -> bool {
    furniture.iter().any(|f| f.name == name) || openings.iter().any(|o| o.name == name)
}

fn furniture_geometry(scale: &ScaleTransform, f: &FurniturePiece) -> DisplayGeometry {
    scale.geometry(f.x_m, f.y_m, f.width_m, f.depth_m, f.rotation)
}

fn opening_geometry(scale: &ScaleTransform, o: &Opening) -> DisplayGeometry {
    scale.geometry(o.x_m, o.y_m, o.width_m, o.thickness_m, o.rotation)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::units::LinearUnit;

    const EPS: f64 = 1e-9;

    fn make_layout() -> RoomLayout {
        RoomLayout::new(
            Room::new("Test Room", 5.0, 4.0).unwrap(),
            ScaleTransform::default(),
            false,
        )
    }

    fn add_table(layout: &mut RoomLayout) -> ItemId {
        layout
            .add_furniture(NewFurniture::new("Table", 1.0, 0.5, Colour::DEFAULT_FURNITURE))
            .unwrap()
    }

    fn assert_geometry_close(a: DisplayGeometry, b: DisplayGeometry) {
        assert!((a.position.x - b.position.x).abs() < EPS);
        assert!((a.position.y - b.position.y).abs() < EPS);
        assert!((a.size.width - b.size.width).abs() < EPS);
        assert!((a.size.height - b.size.height).abs() < EPS);
        assert_eq!(a.rotation, b.rotation);
    }

    // ── add_furniture ─────────────────────────────────────────────────────────

    #[test]
    fn test_add_furniture_tracks_display_geometry() {
        let mut layout = make_layout();
        let id = add_table(&mut layout);
        let g = layout.display_geometry(id).unwrap();
        assert_eq!(g.size, DisplaySize::new(60.0, 30.0));
        assert_eq!(g.position, DisplayPoint::new(0.0, 0.0));
    }

    #[test]
    fn test_add_furniture_rejects_zero_width_before_creation() {
        let mut layout = make_layout();
        let result = layout.add_furniture(NewFurniture::new("Bad", 0.0, 1.0, Colour::DEFAULT_FURNITURE));
        assert!(matches!(result, Err(LayoutError::InvalidDimension { .. })));
        assert!(layout.is_empty());
    }

    #[test]
    fn test_add_furniture_blank_name_gets_item_number() {
        let mut layout = make_layout();
        add_table(&mut layout);
        layout.add_opening(NewOpening::with_defaults(OpeningKind::Door)).unwrap();
        let id = layout
            .add_furniture(NewFurniture::new("  ", 1.0, 1.0, Colour::DEFAULT_FURNITURE))
            .unwrap();
        assert_eq!(layout.furniture_piece(id).unwrap().name, "Item 3");
    }

    #[test]
    fn test_add_furniture_allows_duplicate_names() {
        let mut layout = make_layout();
        let a = add_table(&mut layout);
        let b = add_table(&mut layout);
        assert_ne!(a, b);
        assert_eq!(layout.furniture().len(), 2);
    }

    #[test]
    fn test_add_furniture_normalises_rotation() {
        let mut layout = make_layout();
        let id = layout
            .add_furniture(NewFurniture::new("Rug", 1.0, 1.0, Colour::DEFAULT_FURNITURE).rotated(-90.0))
            .unwrap();
        assert_eq!(layout.furniture_piece(id).unwrap().rotation, 270.0);
    }

    #[test]
    fn test_scenario_feet_room_with_inch_furniture() {
        let room = Room::new(
            "Den",
            LinearUnit::Foot.to_canonical(16.0),
            LinearUnit::Foot.to_canonical(12.0),
        )
        .unwrap();
        let mut layout = RoomLayout::new(room, ScaleTransform::default(), false);
        assert!((layout.room().width_m() - 4.8768).abs() < EPS);
        assert!((layout.room().depth_m() - 3.6576).abs() < EPS);

        let id = layout
            .add_furniture(NewFurniture::new(
                "Sofa",
                LinearUnit::Inch.to_canonical(72.0),
                LinearUnit::Inch.to_canonical(36.0),
                Colour::DEFAULT_FURNITURE,
            ))
            .unwrap();
        let size = layout.display_geometry(id).unwrap().size;
        assert!((size.width - 109.728).abs() < 1e-6);
        assert!((size.height - 54.864).abs() < 1e-6);
    }

    // ── openings ──────────────────────────────────────────────────────────────

    #[test]
    fn test_add_door_centres_on_bottom_wall() {
        let mut layout = make_layout();
        let id = layout.add_opening(NewOpening::with_defaults(OpeningKind::Door)).unwrap();
        let door = layout.opening(id).unwrap();
        assert_eq!(door.name, "Door 1");
        assert!((door.x_m - 2.0).abs() < EPS);
        assert!((door.y_m - 3.9).abs() < EPS);
    }

    #[test]
    fn test_add_window_centres_on_top_wall() {
        let mut layout = make_layout();
        let id = layout.add_opening(NewOpening::with_defaults(OpeningKind::Window)).unwrap();
        let window = layout.opening(id).unwrap();
        assert_eq!(window.name, "Window 1");
        assert!((window.x_m - 1.75).abs() < EPS);
        assert_eq!(window.y_m, 0.0);
    }

    #[test]
    fn test_add_opening_skips_names_used_by_furniture() {
        let mut layout = make_layout();
        layout
            .add_furniture(NewFurniture::new("Door 1", 1.0, 1.0, Colour::DEFAULT_FURNITURE))
            .unwrap();
        let id = layout.add_opening(NewOpening::with_defaults(OpeningKind::Door)).unwrap();
        assert_eq!(layout.opening(id).unwrap().name, "Door 2");
    }

    #[test]
    fn test_add_opening_with_taken_name_falls_back_to_default() {
        let mut layout = make_layout();
        add_table(&mut layout);
        let mut new = NewOpening::with_defaults(OpeningKind::Window);
        new.name = Some("Table".to_string());
        let id = layout.add_opening(new).unwrap();
        assert_eq!(layout.opening(id).unwrap().name, "Window 1");
    }

    #[test]
    fn test_add_opening_keeps_free_custom_name() {
        let mut layout = make_layout();
        let mut new = NewOpening::with_defaults(OpeningKind::Door);
        new.name = Some("Front door".to_string());
        let id = layout.add_opening(new).unwrap();
        assert_eq!(layout.opening(id).unwrap().name, "Front door");
    }

    #[test]
    fn test_add_opening_rejects_zero_thickness() {
        let mut layout = make_layout();
        let mut new = NewOpening::with_defaults(OpeningKind::Door);
        new.thickness_m = 0.0;
        assert!(matches!(
            layout.add_opening(new),
            Err(LayoutError::InvalidDimension { field: "opening thickness", .. })
        ));
        assert!(layout.is_empty());
    }

    #[test]
    fn test_opening_counter_is_monotonic_across_deletes() {
        let mut layout = make_layout();
        let first = layout.add_opening(NewOpening::with_defaults(OpeningKind::Door)).unwrap();
        layout.remove(first).unwrap();
        let second = layout.add_opening(NewOpening::with_defaults(OpeningKind::Door)).unwrap();
        assert_eq!(layout.opening(second).unwrap().name, "Door 2");
    }

    #[test]
    fn test_accepted_suggestion_is_not_offered_after_delete() {
        // Arrange
        let mut layout = make_layout();
        let suggested = layout.suggest_opening_name(OpeningKind::Door);
        let mut new = NewOpening::with_defaults(OpeningKind::Door);
        new.name = Some(suggested.clone());

        // Act
        let id = layout.add_opening(new).unwrap();
        layout.remove(id).unwrap();
        let next = layout.add_opening(NewOpening::with_defaults(OpeningKind::Door)).unwrap();

        // Assert
        assert_eq!(suggested, "Door 1");
        assert_eq!(layout.opening(next).unwrap().name, "Door 2");
    }

    #[test]
    fn test_custom_opening_name_consumes_a_number() {
        let mut layout = make_layout();
        let mut new = NewOpening::with_defaults(OpeningKind::Window);
        new.name = Some("Bay".to_string());
        layout.add_opening(new).unwrap();
        let id = layout.add_opening(NewOpening::with_defaults(OpeningKind::Window)).unwrap();
        assert_eq!(layout.opening(id).unwrap().name, "Window 2");
    }

    #[test]
    fn test_suggest_opening_name_does_not_reserve() {
        let mut layout = make_layout();
        assert_eq!(layout.suggest_opening_name(OpeningKind::Door), "Door 1");
        let id = layout.add_opening(NewOpening::with_defaults(OpeningKind::Door)).unwrap();
        assert_eq!(layout.opening(id).unwrap().name, "Door 1");
        assert_eq!(layout.suggest_opening_name(OpeningKind::Door), "Door 2");
    }

    // ── move_to ───────────────────────────────────────────────────────────────

    #[test]
    fn test_move_without_snap_allows_outside_room() {
        let mut layout = make_layout();
        let id = add_table(&mut layout);
        let applied = layout.move_to(id, DisplayPoint::new(-50.0, 1000.0)).unwrap();
        assert_eq!(applied, DisplayPoint::new(-50.0, 1000.0));
        let piece = layout.furniture_piece(id).unwrap();
        assert!((piece.x_m + 50.0 / 60.0).abs() < EPS);
        assert!((piece.y_m - 1000.0 / 60.0).abs() < EPS);
    }

    #[test]
    fn test_move_with_snap_clamps_to_room() {
        let mut layout = make_layout();
        layout.set_snap_to_border(true);
        let id = add_table(&mut layout);
        // Room is 300 × 240 px, table 60 × 30 px.
        let applied = layout.move_to(id, DisplayPoint::new(500.0, -10.0)).unwrap();
        assert_eq!(applied, DisplayPoint::new(240.0, 0.0));
        assert!((layout.furniture_piece(id).unwrap().x_m - 4.0).abs() < EPS);
    }

    #[test]
    fn test_move_clamp_ignores_rotation() {
        let mut layout = make_layout();
        layout.set_snap_to_border(true);
        let id = add_table(&mut layout);
        layout.rotate_90(id).unwrap();
        let applied = layout.move_to(id, DisplayPoint::new(1000.0, 1000.0)).unwrap();
        assert_eq!(applied, DisplayPoint::new(240.0, 210.0));
    }

    #[test]
    fn test_disabling_snap_after_clamp_allows_free_move() {
        let mut layout = make_layout();
        layout.set_snap_to_border(true);
        let id = add_table(&mut layout);
        layout.move_to(id, DisplayPoint::new(-20.0, -20.0)).unwrap();
        layout.set_snap_to_border(false);
        let applied = layout.move_to(id, DisplayPoint::new(-20.0, 400.0)).unwrap();
        assert_eq!(applied, DisplayPoint::new(-20.0, 400.0));
    }

    #[test]
    fn test_move_opening_updates_model_and_display() {
        let mut layout = make_layout();
        let id = layout.add_opening(NewOpening::with_defaults(OpeningKind::Window)).unwrap();
        layout.move_to(id, DisplayPoint::new(30.0, 0.0)).unwrap();
        assert!((layout.opening(id).unwrap().x_m - 0.5).abs() < EPS);
        assert_eq!(layout.display_geometry(id).unwrap().position.x, 30.0);
    }

    #[test]
    fn test_move_unknown_item_is_an_error() {
        let mut layout = make_layout();
        let id = Uuid::new_v4();
        assert_eq!(
            layout.move_to(id, DisplayPoint::default()),
            Err(LayoutError::ItemNotFound(id))
        );
    }

    // ── rotate ────────────────────────────────────────────────────────────────

    #[test]
    fn test_rotate_90_four_times_returns_to_zero() {
        let mut layout = make_layout();
        let id = add_table(&mut layout);
        for expected in [90.0, 180.0, 270.0, 0.0] {
            assert_eq!(layout.rotate_90(id).unwrap(), expected);
        }
        assert_eq!(layout.display_geometry(id).unwrap().rotation, 0.0);
    }

    #[test]
    fn test_rotate_by_negative_wraps() {
        let mut layout = make_layout();
        let id = layout.add_opening(NewOpening::with_defaults(OpeningKind::Door)).unwrap();
        assert_eq!(layout.rotate_by(id, -45.0).unwrap(), 315.0);
    }

    // ── rename ────────────────────────────────────────────────────────────────

    #[test]
    fn test_rename_furniture_accepts_duplicate() {
        let mut layout = make_layout();
        let a = add_table(&mut layout);
        let b = layout
            .add_furniture(NewFurniture::new("Chair", 0.5, 0.5, Colour::DEFAULT_FURNITURE))
            .unwrap();
        layout.rename(b, "Table").unwrap();
        assert_eq!(layout.furniture_piece(a).unwrap().name, layout.furniture_piece(b).unwrap().name);
    }

    #[test]
    fn test_rename_opening_onto_used_name_is_rejected() {
        let mut layout = make_layout();
        add_table(&mut layout);
        let door = layout.add_opening(NewOpening::with_defaults(OpeningKind::Door)).unwrap();
        assert_eq!(
            layout.rename(door, "Table"),
            Err(LayoutError::NameCollision("Table".to_string()))
        );
        layout.rename(door, "Door 1").unwrap();
        layout.rename(door, "Back door").unwrap();
        assert_eq!(layout.opening(door).unwrap().name, "Back door");
    }

    // ── remove / clear ────────────────────────────────────────────────────────

    #[test]
    fn test_remove_drops_item_and_geometry() {
        let mut layout = make_layout();
        let id = add_table(&mut layout);
        let removed = layout.remove(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(layout.display_geometry(id).is_none());
        assert_eq!(layout.remove(id), Err(LayoutError::ItemNotFound(id)));
    }

    #[test]
    fn test_clear_items_resets_name_counters() {
        let mut layout = make_layout();
        add_table(&mut layout);
        layout.add_opening(NewOpening::with_defaults(OpeningKind::Door)).unwrap();
        layout.add_opening(NewOpening::with_defaults(OpeningKind::Door)).unwrap();
        layout.clear_items();
        assert!(layout.is_empty());
        let id = layout.add_opening(NewOpening::with_defaults(OpeningKind::Door)).unwrap();
        assert_eq!(layout.opening(id).unwrap().name, "Door 1");
    }

    #[test]
    fn test_replace_contents_swaps_everything() {
        let mut layout = make_layout();
        add_table(&mut layout);
        let room = Room::new("Other", 2.0, 2.0).unwrap();
        let piece = FurniturePiece {
            id: Uuid::new_v4(),
            name: "Bed".to_string(),
            width_m: 1.0,
            depth_m: 2.0,
            colour: Colour::rgb(1, 2, 3),
            x_m: 0.5,
            y_m: 0.0,
            rotation: 450.0,
        };
        let piece_id = piece.id;
        layout.replace_contents(room, vec![piece], Vec::new());

        assert_eq!(layout.room().name, "Other");
        assert_eq!(layout.furniture().len(), 1);
        assert_eq!(layout.furniture_piece(piece_id).unwrap().rotation, 90.0);
        assert_eq!(
            layout.display_geometry(piece_id).unwrap().position,
            DisplayPoint::new(30.0, 0.0)
        );
    }

    // ── rescale ───────────────────────────────────────────────────────────────

    #[test]
    fn test_rescale_updates_every_item() {
        let mut layout = make_layout();
        let table = add_table(&mut layout);
        let door = layout.add_opening(NewOpening::with_defaults(OpeningKind::Door)).unwrap();
        let window = layout.add_opening(NewOpening::with_defaults(OpeningKind::Window)).unwrap();
        layout.move_to(table, DisplayPoint::new(60.0, 60.0)).unwrap();
        layout.rotate_90(table).unwrap();

        layout.rescale(120.0).unwrap();

        for id in [table, door, window] {
            let g = layout.display_geometry(id).unwrap();
            let expected = match layout.furniture_piece(id) {
                Some(f) => layout.scale().geometry(f.x_m, f.y_m, f.width_m, f.depth_m, f.rotation),
                None => {
                    let o = layout.opening(id).unwrap();
                    layout.scale().geometry(o.x_m, o.y_m, o.width_m, o.thickness_m, o.rotation)
                }
            };
            assert_geometry_close(g, expected);
        }
        let t = layout.display_geometry(table).unwrap();
        assert_eq!(t.position, DisplayPoint::new(120.0, 120.0));
        assert_eq!(t.rotation, 90.0);
    }

    #[test]
    fn test_rescale_keeps_model_values() {
        let mut layout = make_layout();
        let id = add_table(&mut layout);
        layout.move_to(id, DisplayPoint::new(90.0, 45.0)).unwrap();
        let before = layout.furniture_piece(id).unwrap().clone();
        layout.rescale(33.0).unwrap();
        assert_eq!(layout.furniture_piece(id).unwrap(), &before);
        assert_eq!(layout.room().width_m(), 5.0);
    }

    #[test]
    fn test_rescale_round_trip_restores_geometry() {
        let mut layout = make_layout();
        let a = add_table(&mut layout);
        let b = layout.add_opening(NewOpening::with_defaults(OpeningKind::Window)).unwrap();
        layout.move_to(a, DisplayPoint::new(77.7, 12.3)).unwrap();
        let (ga, gb) = (layout.display_geometry(a).unwrap(), layout.display_geometry(b).unwrap());

        layout.rescale(45.0).unwrap();
        layout.rescale(110.0).unwrap();
        layout.rescale(60.0).unwrap();

        assert_geometry_close(layout.display_geometry(a).unwrap(), ga);
        assert_geometry_close(layout.display_geometry(b).unwrap(), gb);
    }

    #[test]
    fn test_rescale_changes_room_display_only() {
        let mut layout = make_layout();
        layout.rescale(100.0).unwrap();
        assert_eq!(layout.room_display_size(), DisplaySize::new(500.0, 400.0));
        assert_eq!(layout.room().depth_m(), 4.0);
    }

    #[test]
    fn test_rescale_rejects_invalid_scale_without_change() {
        let mut layout = make_layout();
        let id = add_table(&mut layout);
        assert_eq!(layout.rescale(0.0), Err(LayoutError::InvalidScale(0.0)));
        assert_eq!(layout.scale().pixels_per_metre(), 60.0);
        assert!(layout.display_geometry(id).is_some());
    }
}
