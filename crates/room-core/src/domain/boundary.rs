//! Snap-to-border constraint.
//!
//! While enabled, a proposed item position is clamped so the item's
//! unrotated bounding box stays inside the room.  The clamp saturates: an
//! item larger than the room along an axis is pinned to 0 on that axis, and
//! no error is ever reported.  While disabled, positions pass through
//! untouched, including positions outside the room.

use crate::domain::scale::{DisplayPoint, DisplaySize};

/// Clamps `proposed` so that `0 <= x <= room.width - item.width` and
/// `0 <= y <= room.height - item.height`, independently per axis.
pub fn clamp(proposed: DisplayPoint, item: DisplaySize, room: DisplaySize) -> DisplayPoint {
    DisplayPoint {
        x: clamp_axis(proposed.x, item.width, room.width),
        y: clamp_axis(proposed.y, item.height, room.height),
    }
}

fn clamp_axis(pos: f64, item_len: f64, room_len: f64) -> f64 {
    // max() is applied last so an oversized item lands on 0.
    pos.min(room_len - item_len).max(0.0)
}

/// The process-wide snap flag plus the clamp it gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundaryConstraint {
    enabled: bool,
}

impl BoundaryConstraint {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Applies [`clamp`] when enabled; otherwise returns `proposed` unchanged.
    pub fn apply(&self, proposed: DisplayPoint, item: DisplaySize, room: DisplaySize) -> DisplayPoint {
        if self.enabled {
            clamp(proposed, item, room)
        } else {
            proposed
        }
    }
}
