use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in complex-plane coordinates: origin at the
/// lower-left corner, extents growing right and up.
///
/// The same shape is reused for normalized texture sub-rectangles, where
/// origin and extent are fractions of a tile buffer in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlaneRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Non-strict containment: a rectangle contains itself.
    pub fn contains(&self, inner: &PlaneRect) -> bool {
        self.x <= inner.x
            && self.y <= inner.y
            && self.x + self.width >= inner.x + inner.width
            && self.y + self.height >= inner.y + inner.height
    }
}
