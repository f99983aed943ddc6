//! Model ↔ display coordinate transform.
//!
//! A single scale factor (pixels per metre) is shared by the room and every
//! placed item.  Model-space values are the source of truth; display values
//! are always derived from them and are recomputed, never edited, when the
//! scale changes.

use crate::domain::layout::LayoutError;

/// Scale used when nothing else is configured, in pixels per metre.
pub const DEFAULT_PIXELS_PER_METRE: f64 = 60.0;

/// A point in display space (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayPoint {
    pub x: f64,
    pub y: f64,
}

impl DisplayPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in display space (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

impl DisplaySize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Everything a renderer needs to draw one item: its unrotated rectangle in
/// pixels plus its rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayGeometry {
    pub position: DisplayPoint,
    pub size: DisplaySize,
    pub rotation: f64,
}

/// Bidirectional mapping between metres and pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTransform {
    pixels_per_metre: f64,
}

impl ScaleTransform {
    /// Creates a transform with the given scale.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidScale`] unless the scale is finite and > 0.
    pub fn new(pixels_per_metre: f64) -> Result<Self, LayoutError> {
        if pixels_per_metre.is_finite() && pixels_per_metre > 0.0 {
            Ok(Self { pixels_per_metre })
        } else {
            Err(LayoutError::InvalidScale(pixels_per_metre))
        }
    }

    pub fn pixels_per_metre(&self) -> f64 {
        self.pixels_per_metre
    }

    /// Metres → pixels.
    pub fn to_display(&self, value_m: f64) -> f64 {
        value_m * self.pixels_per_metre
    }

    /// Pixels → metres.
    pub fn to_model(&self, value_px: f64) -> f64 {
        value_px / self.pixels_per_metre
    }

    pub fn point_to_display(&self, x_m: f64, y_m: f64) -> DisplayPoint {
        DisplayPoint::new(self.to_display(x_m), self.to_display(y_m))
    }

    /// Returns `(x_m, y_m)`.
    pub fn point_to_model(&self, point: DisplayPoint) -> (f64, f64) {
        (self.to_model(point.x), self.to_model(point.y))
    }

    pub fn size_to_display(&self, width_m: f64, depth_m: f64) -> DisplaySize {
        DisplaySize::new(self.to_display(width_m), self.to_display(depth_m))
    }

    /// Builds the display geometry of an item from its model-space values.
    pub fn geometry(
        &self,
        x_m: f64,
        y_m: f64,
        width_m: f64,
        depth_m: f64,
        rotation: f64,
    ) -> DisplayGeometry {
        DisplayGeometry {
            position: self.point_to_display(x_m, y_m),
            size: self.size_to_display(width_m, depth_m),
            rotation,
        }
    }
}

impl Default for ScaleTransform {
    fn default() -> Self {
        Self {
            pixels_per_metre: DEFAULT_PIXELS_PER_METRE,
        }
    }
}
