use crate::error::CacheError;
use crate::mandelbrot::escape_time;
use brotbot_core::{ComplexPoint, SampleResult, Viewport};

/// The cache's unit of storage: a pixel grid of escape-time samples
/// covering the plane rectangle of its viewport.
///
/// Samples are row-major starting at the lower-left pixel. Storage is
/// lazily (re)allocated by [`populate`](Self::populate); after it
/// returns, the grid holds exactly `width · height` samples and none of
/// them is [`SampleResult::Unknown`].
pub struct TileBuffer {
    viewport: Viewport,
    samples: Vec<SampleResult>,
}

impl TileBuffer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            samples: Vec::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn samples(&self) -> &[SampleResult] {
        &self.samples
    }

    /// Retarget the buffer at a new viewport. Existing samples become
    /// meaningless and the buffer must be repopulated before use; the
    /// allocation is kept for reuse.
    pub fn retarget(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.samples.clear();
    }

    /// Fill every sample by scanning row-major from the lower-left
    /// pixel's center, stepping by the pixel spacing.
    ///
    /// Deterministic: the grid depends only on the viewport and the
    /// iteration budget. Allocation failure is surfaced as
    /// [`CacheError::Allocation`] and leaves the buffer empty.
    pub fn populate(&mut self, max_iterations: u32) -> Result<(), CacheError> {
        let len = self.viewport.width as usize * self.viewport.height as usize;
        self.samples.clear();
        self.samples
            .try_reserve_exact(len)
            .map_err(|source| CacheError::Allocation {
                width: self.viewport.width,
                height: self.viewport.height,
                source,
            })?;

        let spacing = self.viewport.pixel_spacing();
        let origin = self.viewport.origin_sample();

        let mut im = origin.im;
        for _y in 0..self.viewport.height {
            let mut re = origin.re;
            for _x in 0..self.viewport.width {
                self.samples
                    .push(escape_time(ComplexPoint::new(re, im), max_iterations));
                re += spacing;
            }
            im += spacing;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brotbot_core::PlaneRect;

    fn populated(center: ComplexPoint, zoom: f64, size: u32, max_iterations: u32) -> TileBuffer {
        let mut tile = TileBuffer::new(Viewport::new(center, zoom, size, size));
        tile.populate(max_iterations).expect("population succeeds");
        tile
    }

    #[test]
    fn populate_fills_the_whole_grid() {
        let tile = populated(ComplexPoint::ORIGIN, -1.0, 8, 64);
        assert_eq!(tile.samples().len(), 64);
        assert!(tile.samples().iter().all(|s| *s != SampleResult::Unknown));
    }

    #[test]
    fn far_exterior_region_diverges_immediately() {
        // A viewport around c = (10, 0) covers only points with |c| ≥ 2.
        let tile = populated(ComplexPoint::new(10.0, 0.0), 2.0, 8, 64);
        assert!(tile
            .samples()
            .iter()
            .all(|s| *s == SampleResult::Diverged(0)));
    }

    #[test]
    fn deep_interior_region_never_escapes() {
        // A tight viewport around the origin stays in the main cardioid.
        let tile = populated(ComplexPoint::ORIGIN, 4.0, 8, 64);
        assert!(tile
            .samples()
            .iter()
            .all(|s| *s == SampleResult::BoundedInside));
    }

    #[test]
    fn default_view_mixes_interior_and_exterior() {
        let tile = populated(ComplexPoint::new(-0.5, 0.0), -1.0, 32, 64);
        assert!(tile.samples().iter().any(|s| s.is_inside()));
        assert!(tile.samples().iter().any(|s| s.escape_index().is_some()));
    }

    #[test]
    fn populate_is_idempotent() {
        let mut tile = TileBuffer::new(Viewport::new(ComplexPoint::new(-0.5, 0.0), -1.0, 16, 16));
        tile.populate(64).unwrap();
        let first: Vec<_> = tile.samples().to_vec();
        tile.populate(64).unwrap();
        assert_eq!(tile.samples(), first.as_slice());
    }

    #[test]
    fn scan_order_is_row_major_from_the_lower_left() {
        // Size 8 at zoom -1 gives an exactly representable spacing of
        // 0.25, so sample coordinates can be recomputed without rounding
        // drift and compared one-to-one.
        let tile = populated(ComplexPoint::new(-0.5, 0.0), -1.0, 8, 64);
        let spacing = tile.viewport().pixel_spacing();
        let origin = tile.viewport().origin_sample();
        assert_eq!(spacing, 0.25);

        // Sample (x=2, y=0) sits at origin + (2·spacing, 0).
        let c = ComplexPoint::new(origin.re + 2.0 * spacing, origin.im);
        assert_eq!(tile.samples()[2], escape_time(c, 64));

        // Sample (x=2, y=5) sits five rows up.
        let upper = ComplexPoint::new(c.re, origin.im + 5.0 * spacing);
        assert_eq!(tile.samples()[5 * 8 + 2], escape_time(upper, 64));
    }

    #[test]
    fn populate_surfaces_allocation_failure() {
        // A grid this large overflows any reservation request; the error
        // carries the requested dimensions and the buffer stays empty.
        let huge = Viewport::new(ComplexPoint::ORIGIN, 0.0, u32::MAX, u32::MAX);
        let mut tile = TileBuffer::new(huge);
        let err = tile.populate(8).unwrap_err();
        assert!(matches!(
            err,
            CacheError::Allocation {
                width: u32::MAX,
                height: u32::MAX,
                ..
            }
        ));
        assert!(tile.samples().is_empty());
    }

    #[test]
    fn retarget_clears_samples_and_updates_viewport() {
        let mut tile = populated(ComplexPoint::ORIGIN, -1.0, 8, 64);
        let next = Viewport::new(ComplexPoint::new(-0.5, 0.0), 0.0, 16, 16);
        tile.retarget(next);
        assert!(tile.samples().is_empty());
        assert_eq!(tile.viewport(), &next);

        tile.populate(64).unwrap();
        assert_eq!(tile.samples().len(), 256);
    }

    #[test]
    fn populated_tile_covers_a_matching_focus_exactly() {
        let tile = populated(ComplexPoint::ORIGIN, -1.0, 8, 64);
        let focus = Viewport::new(ComplexPoint::ORIGIN, -1.0, 8, 8);
        let rect = tile.viewport().covers(&focus, 0.5).expect("focus matches");
        assert_eq!(rect, PlaneRect::new(0.0, 0.0, 1.0, 1.0));
    }
}
