use crate::cache::{FractalCache, FrameView};
use crate::error::CacheError;
use crate::render_config::RenderConfig;
use brotbot_core::Viewport;
use std::sync::Mutex;

/// An interactive exploration session: the focus viewport driven by
/// input events, plus the tile cache that serves it.
///
/// Input handlers mutate only the focus; the cache catches up on the
/// next render pass. The two live behind separate locks so an event
/// handler never waits on a population in progress.
pub struct Explorer {
    focus: Mutex<Viewport>,
    cache: Mutex<FractalCache>,
}

impl Explorer {
    pub fn new(initial_focus: Viewport, config: RenderConfig) -> Self {
        Self {
            focus: Mutex::new(initial_focus),
            cache: Mutex::new(FractalCache::new(config)),
        }
    }

    pub fn focus(&self) -> Viewport {
        *self.focus.lock().unwrap()
    }

    /// Translate the focus by a drag of (`dx`, `dy`) window pixels.
    pub fn pan_by(&self, dx: i32, dy: i32) {
        let mut focus = self.focus.lock().unwrap();
        *focus = focus.panned_by_pixels(dx as f64, dy as f64);
    }

    /// Step the zoom by `steps` increments, keeping the plane point
    /// under the window pixel (`px`, `py`) fixed. Positive steps zoom
    /// in.
    pub fn zoom_at(&self, steps: i32, px: u32, py: u32) {
        let mut focus = self.focus.lock().unwrap();
        *focus = focus.zoomed_at(steps, px as f64, py as f64);
    }

    /// Adopt new window dimensions, preserving the focus center and
    /// zoom.
    pub fn resize(&self, width: u32, height: u32) {
        let mut focus = self.focus.lock().unwrap();
        *focus = focus.resized(width, height);
    }

    /// Run one render pass: snapshot the focus, bring the cache up to
    /// date for it, and hand the resulting frame view to `draw`.
    ///
    /// The focus is read exactly once, so input arriving mid-pass is
    /// picked up by the next pass rather than tearing this one.
    pub fn with_frame<T>(
        &self,
        draw: impl FnOnce(&FrameView<'_>) -> T,
    ) -> Result<T, CacheError> {
        let focus = self.focus();
        let mut cache = self.cache.lock().unwrap();
        let view = cache.ensure_current(&focus)?;
        Ok(draw(&view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brotbot_core::{ComplexPoint, PlaneRect, ZOOM_STEP};

    fn explorer() -> Explorer {
        let focus = Viewport::new(ComplexPoint::new(-0.5, 0.0), -1.0, 32, 32);
        let config = RenderConfig {
            max_iterations: 32,
            ..RenderConfig::default()
        };
        Explorer::new(focus, config)
    }

    #[test]
    fn pan_moves_the_focus_against_the_drag() {
        let session = explorer();
        let before = session.focus();
        session.pan_by(4, -3);
        let after = session.focus();

        let spacing = before.pixel_spacing();
        assert_eq!(after.center.re, before.center.re - 4.0 * spacing);
        assert_eq!(after.center.im, before.center.im - 3.0 * spacing);
        assert_eq!(after.zoom, before.zoom);
    }

    #[test]
    fn zoom_keeps_the_anchor_point_fixed() {
        let session = explorer();
        let anchor = session.focus().point_at_pixel(20.0, 7.0);
        session.zoom_at(3, 20, 7);

        let after = session.focus();
        assert_eq!(after.zoom, -1.0 + 3.0 * ZOOM_STEP);
        let moved = after.point_at_pixel(20.0, 7.0);
        assert!((moved.re - anchor.re).abs() < 1e-12);
        assert!((moved.im - anchor.im).abs() < 1e-12);
    }

    #[test]
    fn resize_preserves_center_and_zoom() {
        let session = explorer();
        let before = session.focus();
        session.resize(64, 48);
        let after = session.focus();
        assert_eq!(after.center, before.center);
        assert_eq!(after.zoom, before.zoom);
        assert_eq!((after.width, after.height), (64, 48));
    }

    #[test]
    fn first_frame_serves_the_initial_focus_fully() {
        let session = explorer();
        let rect = session
            .with_frame(|view| {
                assert_eq!(view.samples.len(), (view.width * view.height) as usize);
                view.texture_rect
            })
            .unwrap();
        assert_eq!(rect, PlaneRect::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn zooming_in_shrinks_the_served_rectangle() {
        let session = explorer();
        session.with_frame(|_| ()).unwrap();

        session.zoom_at(2, 16, 16);
        let rect = session.with_frame(|view| view.texture_rect).unwrap();
        assert!(rect.width < 1.0);
        assert!(rect.height < 1.0);
        assert!(rect.x >= 0.0 && rect.x + rect.width <= 1.0);
    }

    #[test]
    fn input_between_frames_is_picked_up_by_the_next_pass() {
        let session = explorer();
        session.with_frame(|_| ()).unwrap();

        session.pan_by(10, 0);
        let panned = session.focus();
        session
            .with_frame(|view| {
                // Still served by a cached buffer; only the rectangle moved.
                assert!(view.texture_rect.x != 0.0 || view.texture_rect.y != 0.0);
            })
            .unwrap();
        assert_eq!(session.focus(), panned);
    }
}
