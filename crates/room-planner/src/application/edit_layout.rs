//! LayoutSession: the editing commands a planner UI issues.
//!
//! The [`RoomLayout`] in `room_core` owns the canonical model.  A session
//! wraps one layout and adds the state that belongs to the *editor* rather
//! than to the room:
//!
//! - **Clipboard** – the template captured by "Copy", consumed by "Paste".
//! - **Door state** – which doors are drawn swung open.  This is view-local
//!   and is never written to a layout file.
//! - **Display units** – the unit for room dimensions (default feet) and for
//!   furniture dimensions (default inches).  Units only affect how values are
//!   entered and shown; the model is always in metres.
//!
//! # Copy and paste (for beginners)
//!
//! ```text
//!   copy(sofa)         clipboard = { "Sofa", 2.0 × 0.9 m, #4a90e2, 90° }
//!   paste(Some(p))     new piece "Sofa (Copy)" at display point p
//!   paste(None)        new piece "Sofa (Copy)" at the room centre
//!   duplicate(sofa)    copy(sofa) + paste(None)
//! ```
//!
//! When snap-to-border is on, pasted pieces are clamped like any other move.

use std::collections::HashSet;

use room_core::{
    Colour, DisplayPoint, FloorTexture, FurniturePiece, ItemId, LayoutError, LayoutItem,
    LinearUnit, NewFurniture, NewOpening, Opening, OpeningKind, Room, RoomLayout,
};
use tracing::{debug, info};

/// What "Copy" remembers about a furniture piece.
#[derive(Debug, Clone, PartialEq)]
pub struct FurnitureTemplate {
    pub name: String,
    pub width_m: f64,
    pub depth_m: f64,
    pub colour: Colour,
    pub rotation: f64,
}

impl From<&FurniturePiece> for FurnitureTemplate {
    fn from(piece: &FurniturePiece) -> Self {
        Self {
            name: piece.name.clone(),
            width_m: piece.width_m,
            depth_m: piece.depth_m,
            colour: piece.colour,
            rotation: piece.rotation,
        }
    }
}

/// Values for the "Add Door" / "Add Window" dialog, in the furniture unit.
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningForm {
    pub kind: OpeningKind,
    pub name: String,
    pub width: f64,
    pub thickness: f64,
}

/// Category of a side-list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Furniture,
    Door { open: bool },
    Window,
}

/// One line of the item list shown beside the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: ItemId,
    pub kind: EntryKind,
    pub label: String,
}

/// An editing session over one room layout.
#[derive(Debug, Clone)]
pub struct LayoutSession {
    layout: RoomLayout,
    clipboard: Option<FurnitureTemplate>,
    open_doors: HashSet<ItemId>,
    room_unit: LinearUnit,
    furniture_unit: LinearUnit,
}

impl Default for LayoutSession {
    fn default() -> Self {
        Self::new(RoomLayout::default())
    }
}

impl LayoutSession {
    /// Wraps `layout` with an empty clipboard, all doors closed, and feet /
    /// inches as display units.
    pub fn new(layout: RoomLayout) -> Self {
        Self {
            layout,
            clipboard: None,
            open_doors: HashSet::new(),
            room_unit: LinearUnit::Foot,
            furniture_unit: LinearUnit::Inch,
        }
    }

    pub fn layout(&self) -> &RoomLayout {
        &self.layout
    }

    // ── Display units ─────────────────────────────────────────────────────────

    pub fn room_unit(&self) -> LinearUnit {
        self.room_unit
    }

    pub fn furniture_unit(&self) -> LinearUnit {
        self.furniture_unit
    }

    /// Changes the unit room dimensions are shown and entered in.  Canonical
    /// values are untouched.
    pub fn set_room_unit(&mut self, unit: LinearUnit) {
        self.room_unit = unit;
    }

    /// Changes the unit furniture dimensions are shown and entered in.
    pub fn set_furniture_unit(&mut self, unit: LinearUnit) {
        self.furniture_unit = unit;
    }

    // ── Room ──────────────────────────────────────────────────────────────────

    pub fn set_room_name(&mut self, name: impl Into<String>) {
        self.layout.set_room_name(name);
    }

    /// Room width and depth expressed in the room unit.
    pub fn room_dimensions(&self) -> (f64, f64) {
        let room = self.layout.room();
        (
            self.room_unit.from_canonical(room.width_m()),
            self.room_unit.from_canonical(room.depth_m()),
        )
    }

    /// Resizes the room from values given in the room unit.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] if either value is not > 0;
    /// the room is left unchanged.
    pub fn resize_room(&mut self, width: f64, depth: f64) -> Result<(), LayoutError> {
        self.layout.resize_room(
            self.room_unit.to_canonical(width),
            self.room_unit.to_canonical(depth),
        )
    }

    pub fn set_floor_texture(&mut self, texture: FloorTexture) {
        self.layout.set_floor_texture(texture);
    }

    pub fn set_show_border(&mut self, show: bool) {
        self.layout.set_show_border(show);
    }

    /// Starts a new room: every item is discarded, door state is forgotten
    /// and the default-name counters restart.  Room name, size and texture
    /// are kept.
    pub fn new_room(&mut self) {
        self.layout.clear_items();
        self.open_doors.clear();
    }

    /// Swaps in a complete room and item set, e.g. from a loaded document.
    /// All doors start closed.
    pub fn replace_contents(&mut self, room: Room, furniture: Vec<FurniturePiece>, openings: Vec<Opening>) {
        self.layout.replace_contents(room, furniture, openings);
        self.open_doors.clear();
    }

    // ── Canvas ────────────────────────────────────────────────────────────────

    /// Changes the zoom level.  Every item's display geometry is recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidScale`] if `pixels_per_metre` is not > 0.
    pub fn rescale(&mut self, pixels_per_metre: f64) -> Result<(), LayoutError> {
        self.layout.rescale(pixels_per_metre)
    }

    pub fn set_snap_to_border(&mut self, enabled: bool) {
        self.layout.set_snap_to_border(enabled);
    }

    // ── Furniture ─────────────────────────────────────────────────────────────

    /// Adds a furniture piece at the room origin.  `width` and `depth` are in
    /// the furniture unit; a blank name becomes `"Item {n}"`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] if either value is not > 0.
    pub fn add_furniture(
        &mut self,
        name: impl Into<String>,
        width: f64,
        depth: f64,
        colour: Colour,
    ) -> Result<ItemId, LayoutError> {
        let unit = self.furniture_unit;
        self.layout.add_furniture(NewFurniture::new(
            name,
            unit.to_canonical(width),
            unit.to_canonical(depth),
            colour,
        ))
    }

    /// Remembers `id` as the paste template.  Returns `false`, leaving the
    /// clipboard as it was, when `id` is not a furniture piece.
    pub fn copy(&mut self, id: ItemId) -> bool {
        match self.layout.furniture_piece(id) {
            Some(piece) => {
                debug!(%id, name = %piece.name, "copied furniture");
                self.clipboard = Some(FurnitureTemplate::from(piece));
                true
            }
            None => false,
        }
    }

    pub fn clipboard(&self) -> Option<&FurnitureTemplate> {
        self.clipboard.as_ref()
    }

    /// Creates `"{name} (Copy)"` from the clipboard at display point `at`, or
    /// at the room centre when `at` is `None`.  Returns `Ok(None)` when the
    /// clipboard is empty.
    ///
    /// # Errors
    ///
    /// Propagates [`LayoutError`] from creating or placing the piece.
    pub fn paste(&mut self, at: Option<DisplayPoint>) -> Result<Option<ItemId>, LayoutError> {
        let Some(template) = self.clipboard.clone() else {
            return Ok(None);
        };
        let target = match at {
            Some(point) => point,
            None => {
                let room = self.layout.room();
                self.layout
                    .scale()
                    .point_to_display(room.width_m() / 2.0, room.depth_m() / 2.0)
            }
        };

        let id = self.layout.add_furniture(
            NewFurniture::new(
                format!("{} (Copy)", template.name),
                template.width_m,
                template.depth_m,
                template.colour,
            )
            .rotated(template.rotation),
        )?;
        self.layout.move_to(id, target)?;
        Ok(Some(id))
    }

    /// Copy followed by paste at the room centre.  Returns `Ok(None)` when
    /// `id` is not a furniture piece.
    ///
    /// # Errors
    ///
    /// Propagates [`LayoutError`] from the paste.
    pub fn duplicate(&mut self, id: ItemId) -> Result<Option<ItemId>, LayoutError> {
        if !self.copy(id) {
            return Ok(None);
        }
        self.paste(None)
    }

    // ── Doors and windows ─────────────────────────────────────────────────────

    /// Prefilled dialog values for a new opening: the next free default name
    /// and the category's default size, in the furniture unit.
    pub fn opening_form(&mut self, kind: OpeningKind) -> OpeningForm {
        let (width_m, thickness_m) = kind.default_dimensions();
        OpeningForm {
            kind,
            name: self.layout.suggest_opening_name(kind),
            width: self.furniture_unit.from_canonical(width_m),
            thickness: self.furniture_unit.from_canonical(thickness_m),
        }
    }

    /// Adds an opening from dialog values given in the furniture unit.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimension`] if the width or thickness is
    /// not > 0.
    pub fn add_opening(&mut self, form: OpeningForm) -> Result<ItemId, LayoutError> {
        let unit = self.furniture_unit;
        self.layout.add_opening(NewOpening {
            kind: form.kind,
            name: Some(form.name),
            width_m: unit.to_canonical(form.width),
            thickness_m: unit.to_canonical(form.thickness),
        })
    }

    /// Adds a default door centred on the bottom wall.
    ///
    /// # Errors
    ///
    /// Never fails for the default dimensions; see [`LayoutSession::add_opening`].
    pub fn add_door(&mut self) -> Result<ItemId, LayoutError> {
        self.layout.add_opening(NewOpening::with_defaults(OpeningKind::Door))
    }

    /// Adds a default window centred on the top wall.
    ///
    /// # Errors
    ///
    /// Never fails for the default dimensions; see [`LayoutSession::add_opening`].
    pub fn add_window(&mut self) -> Result<ItemId, LayoutError> {
        self.layout.add_opening(NewOpening::with_defaults(OpeningKind::Window))
    }

    /// Swings a door open or closed and returns the new state (`true` = open).
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] for an unknown id and
    /// [`LayoutError::NotADoor`] for furniture or windows.
    pub fn toggle_door(&mut self, id: ItemId) -> Result<bool, LayoutError> {
        match self.layout.opening(id) {
            Some(o) if o.kind.is_door() => {}
            Some(_) => return Err(LayoutError::NotADoor(id)),
            None if self.layout.furniture_piece(id).is_some() => {
                return Err(LayoutError::NotADoor(id))
            }
            None => return Err(LayoutError::ItemNotFound(id)),
        }
        let open = if self.open_doors.remove(&id) {
            false
        } else {
            self.open_doors.insert(id);
            true
        };
        debug!(%id, open, "toggled door");
        Ok(open)
    }

    pub fn is_door_open(&self, id: ItemId) -> bool {
        self.open_doors.contains(&id)
    }

    // ── Any item ──────────────────────────────────────────────────────────────

    /// Moves an item to a display position, clamped when snap-to-border is
    /// on.  Returns the position actually applied.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] for an unknown id.
    pub fn move_to(&mut self, id: ItemId, point: DisplayPoint) -> Result<DisplayPoint, LayoutError> {
        self.layout.move_to(id, point)
    }

    /// Rotates an item a quarter turn and returns the new rotation.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] for an unknown id.
    pub fn rotate_90(&mut self, id: ItemId) -> Result<f64, LayoutError> {
        self.layout.rotate_90(id)
    }

    /// # Errors
    ///
    /// See [`RoomLayout::rename`].
    pub fn rename(&mut self, id: ItemId, name: impl Into<String>) -> Result<(), LayoutError> {
        self.layout.rename(id, name)
    }

    /// Deletes an item.  A deleted door's open state is forgotten.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ItemNotFound`] for an unknown id.
    pub fn delete(&mut self, id: ItemId) -> Result<LayoutItem, LayoutError> {
        let removed = self.layout.remove(id)?;
        self.open_doors.remove(&id);
        info!(%id, name = %removed.name(), "deleted item");
        Ok(removed)
    }

    // ── Item list ─────────────────────────────────────────────────────────────

    /// Furniture, then doors and windows, each labelled
    /// `"{name} – {width} × {depth}"` in the furniture unit, with
    /// `" ({rotation:.1}°)"` appended for rotated furniture.  Opening labels
    /// never carry a rotation.
    pub fn list_entries(&self) -> Vec<ListEntry> {
        let furniture = self.layout.furniture().iter().map(|f| ListEntry {
            id: f.id,
            kind: EntryKind::Furniture,
            label: self.label(&f.name, f.width_m, f.depth_m, Some(f.rotation)),
        });
        let openings = self.layout.openings().iter().map(|o| ListEntry {
            id: o.id,
            kind: match o.kind {
                OpeningKind::Door => EntryKind::Door {
                    open: self.is_door_open(o.id),
                },
                OpeningKind::Window => EntryKind::Window,
            },
            label: self.label(&o.name, o.width_m, o.thickness_m, None),
        });
        furniture.chain(openings).collect()
    }

    fn label(&self, name: &str, width_m: f64, depth_m: f64, rotation: Option<f64>) -> String {
        let unit = self.furniture_unit;
        let mut label = format!("{name} – {} × {}", unit.format(width_m), unit.format(depth_m));
        if let Some(rotation) = rotation.filter(|r| *r != 0.0) {
            label.push_str(&format!(" ({rotation:.1}°)"));
        }
        label
    }
}
