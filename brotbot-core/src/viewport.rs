use crate::complex::ComplexPoint;
use crate::plane_rect::PlaneRect;
use serde::{Deserialize, Serialize};

/// Zoom change per scroll notch, in zoom units.
pub const ZOOM_STEP: f64 = 0.0625;

/// A view onto the complex plane: the point mapped to the center of a
/// pixel grid, a logarithmic zoom level, and the grid dimensions.
///
/// The same descriptor serves two roles: the live focus viewport (what
/// the user currently wants to see) and the geometry of a backing tile
/// buffer. `zoom` is the negative base-2 logarithm of the square root of
/// the covered plane area, so area scales as `4^(-zoom)` and larger
/// values mean deeper zoom.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: ComplexPoint,
    pub zoom: f64,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(center: ComplexPoint, zoom: f64, width: u32, height: u32) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
        }
    }

    /// Plane distance represented by one pixel.
    ///
    /// Derived as `2^(-zoom) · sqrt(height/width) / height` so that the
    /// viewport's plane area equals `4^(-zoom)` regardless of aspect
    /// ratio.
    pub fn pixel_spacing(&self) -> f64 {
        let sqrt_aspect = (self.height as f64 / self.width as f64).sqrt();
        2.0_f64.powf(-self.zoom) * sqrt_aspect / self.height as f64
    }

    /// Rectangle of plane space this viewport covers.
    pub fn plane_rect(&self) -> PlaneRect {
        let spacing = self.pixel_spacing();
        let width = spacing * self.width as f64;
        let height = spacing * self.height as f64;
        PlaneRect::new(
            self.center.re - width / 2.0,
            self.center.im - height / 2.0,
            width,
            height,
        )
    }

    /// Plane coordinate of the lower-left pixel's center, where a
    /// row-major sample scan starts.
    pub fn origin_sample(&self) -> ComplexPoint {
        let spacing = self.pixel_spacing();
        ComplexPoint::new(
            self.center.re + spacing / 2.0 * (1.0 - self.width as f64),
            self.center.im + spacing / 2.0 * (1.0 - self.height as f64),
        )
    }

    /// Plane point under a window pixel. Window coordinates have their
    /// origin at the top-left corner with y growing downward.
    pub fn point_at_pixel(&self, px: f64, py: f64) -> ComplexPoint {
        let spacing = self.pixel_spacing();
        ComplexPoint::new(
            (2.0 * px - self.width as f64) * spacing / 2.0 + self.center.re,
            (self.height as f64 - 2.0 * py) * spacing / 2.0 + self.center.im,
        )
    }

    /// Viewport after a drag of `(delta_x, delta_y)` window pixels.
    /// Dragging the image right moves the view left; dragging down moves
    /// it up (window y is inverted relative to the imaginary axis).
    pub fn panned_by_pixels(&self, delta_x: f64, delta_y: f64) -> Viewport {
        let spacing = self.pixel_spacing();
        Viewport {
            center: ComplexPoint::new(
                self.center.re - delta_x * spacing,
                self.center.im + delta_y * spacing,
            ),
            ..*self
        }
    }

    /// Viewport after `steps` scroll notches (positive zooms in), with
    /// the plane point under the cursor at `(px, py)` held fixed:
    /// `center' = anchor - factor · (anchor - center)` where
    /// `factor = 2^(-ZOOM_STEP · steps)`.
    pub fn zoomed_at(&self, steps: i32, px: f64, py: f64) -> Viewport {
        let anchor = self.point_at_pixel(px, py);
        let delta = ZOOM_STEP * steps as f64;
        let factor = 2.0_f64.powf(-delta);
        Viewport {
            center: ComplexPoint::new(
                anchor.re - factor * (anchor.re - self.center.re),
                anchor.im - factor * (anchor.im - self.center.im),
            ),
            zoom: self.zoom + delta,
            ..*self
        }
    }

    /// Viewport after a window reshape. Center and zoom are unchanged;
    /// only the pixel grid changes.
    pub fn resized(&self, width: u32, height: u32) -> Viewport {
        Viewport {
            width,
            height,
            ..*self
        }
    }

    /// Test whether this viewport, as a backing buffer, can serve
    /// `focus` without recomputation.
    ///
    /// Requires (a) the buffer's plane rectangle to contain the focus's,
    /// and (b) the focus span to be at least `min_span_ratio` of the
    /// buffer span in both dimensions, so that a buffer built at higher
    /// pixel density is not stretched over a much smaller view. On
    /// success, yields the normalized sub-rectangle of the buffer that
    /// the focus occupies.
    pub fn covers(&self, focus: &Viewport, min_span_ratio: f64) -> Option<PlaneRect> {
        let buffer_rect = self.plane_rect();
        let focus_rect = focus.plane_rect();

        if !buffer_rect.contains(&focus_rect) {
            return None;
        }
        if focus_rect.width < buffer_rect.width * min_span_ratio
            || focus_rect.height < buffer_rect.height * min_span_ratio
        {
            return None;
        }

        Some(PlaneRect::new(
            (focus_rect.x - buffer_rect.x) / buffer_rect.width,
            (focus_rect.y - buffer_rect.y) / buffer_rect.height,
            focus_rect.width / buffer_rect.width,
            focus_rect.height / buffer_rect.height,
        ))
    }
}
