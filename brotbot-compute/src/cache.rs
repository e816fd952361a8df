use crate::error::CacheError;
use crate::render_config::RenderConfig;
use crate::tile::TileBuffer;
use brotbot_core::{ComplexPoint, PlaneRect, SampleResult, Viewport};
use log::debug;

/// Borrowed view of the current buffer, valid for one render pass.
///
/// The rendering collaborator color-maps `samples` and draws them
/// through `texture_rect`, the normalized sub-rectangle of the buffer
/// that the focus occupies.
pub struct FrameView<'a> {
    pub samples: &'a [SampleResult],
    pub width: u32,
    pub height: u32,
    /// Iteration budget the samples were computed with, for colorizer
    /// normalization.
    pub max_iterations: u32,
    pub texture_rect: PlaneRect,
}

/// Dual-buffer cache of populated tiles.
///
/// Holds exactly two buffers: on a fresh start, one at the focus's
/// integer zoom level and one a level coarser, so that continuous
/// zooming across an integer boundary lands on a buffer that is already
/// populated instead of stalling on a recompute. When neither buffer can
/// serve the focus, the one whose zoom level is farther from the focus
/// is evicted and refilled.
pub struct FractalCache {
    buffers: [TileBuffer; 2],
    current: Option<usize>,
    config: RenderConfig,
}

impl FractalCache {
    pub fn new(config: RenderConfig) -> Self {
        // Placeholder viewports; both buffers are retargeted before
        // first use.
        let unset = Viewport::new(ComplexPoint::ORIGIN, 0.0, 0, 0);
        Self {
            buffers: [TileBuffer::new(unset), TileBuffer::new(unset)],
            current: None,
            config,
        }
    }

    /// Index of the buffer last selected to serve a focus, `None` until
    /// the first [`ensure_current`](Self::ensure_current) call.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn buffers(&self) -> &[TileBuffer; 2] {
        &self.buffers
    }

    /// Evaluate both buffers against `focus`, refilling one if neither
    /// can serve it, and return a view of the chosen buffer.
    ///
    /// A buffer that fails its own coverage check immediately after
    /// being populated for `focus` is a contract violation and surfaces
    /// as [`CacheError::CoverageViolation`]; callers treat any error
    /// from here as fatal.
    pub fn ensure_current(&mut self, focus: &Viewport) -> Result<FrameView<'_>, CacheError> {
        let min_span = self.config.min_span_ratio;
        let (index, texture_rect) = match self.current {
            None => self.initialize(focus)?,
            Some(current) => {
                let other = 1 - current;
                // Keep the current buffer whenever it still qualifies,
                // so the render collaborator is not forced to rebind its
                // texture.
                if let Some(rect) = self.buffers[current].viewport().covers(focus, min_span) {
                    (current, rect)
                } else if let Some(rect) = self.buffers[other].viewport().covers(focus, min_span) {
                    debug!("switching current buffer {current} -> {other}");
                    self.current = Some(other);
                    (other, rect)
                } else {
                    self.refill(focus)?
                }
            }
        };

        let buffer = &self.buffers[index];
        Ok(FrameView {
            samples: buffer.samples(),
            width: buffer.viewport().width,
            height: buffer.viewport().height,
            max_iterations: self.config.max_iterations,
            texture_rect,
        })
    }

    /// First-focus transition: populate one buffer at the focus's
    /// integer zoom level and the other a level coarser, both centered
    /// on the focus.
    fn initialize(&mut self, focus: &Viewport) -> Result<(usize, PlaneRect), CacheError> {
        let base_zoom = focus.zoom.floor();
        let fine = self.backing_viewport(focus, base_zoom);
        let coarse = self.backing_viewport(focus, base_zoom - 1.0);
        debug!(
            "initializing cache: {}x{} buffers at zooms {} and {}",
            fine.width, fine.height, fine.zoom, coarse.zoom
        );

        self.buffers[0].retarget(fine);
        self.buffers[1].retarget(coarse);
        self.buffers[0].populate(self.config.max_iterations)?;
        self.buffers[1].populate(self.config.max_iterations)?;
        self.current = Some(0);

        self.buffers[0]
            .viewport()
            .covers(focus, self.config.min_span_ratio)
            .map(|rect| (0, rect))
            .ok_or(CacheError::CoverageViolation {
                buffer: fine,
                focus: *focus,
            })
    }

    /// Neither buffer applies: evict and refill the one whose zoom level
    /// is farther from the focus (the one less likely to become relevant
    /// again), and make it current.
    fn refill(&mut self, focus: &Viewport) -> Result<(usize, PlaneRect), CacheError> {
        let distance_a = (focus.zoom - self.buffers[0].viewport().zoom).abs();
        let distance_b = (focus.zoom - self.buffers[1].viewport().zoom).abs();
        let victim = if distance_a > distance_b { 0 } else { 1 };

        let target = self.backing_viewport(focus, focus.zoom.floor());
        debug!(
            "refilling buffer {victim} (zoom {} -> {}, {}x{})",
            self.buffers[victim].viewport().zoom,
            target.zoom,
            target.width,
            target.height
        );

        self.buffers[victim].retarget(target);
        self.buffers[victim].populate(self.config.max_iterations)?;
        self.current = Some(victim);

        self.buffers[victim]
            .viewport()
            .covers(focus, self.config.min_span_ratio)
            .map(|rect| (victim, rect))
            .ok_or(CacheError::CoverageViolation {
                buffer: target,
                focus: *focus,
            })
    }

    /// Viewport for a backing buffer serving `focus` at `zoom`: same
    /// center, focus dimensions scaled by the density factor and clamped
    /// per-axis to the platform limit.
    fn backing_viewport(&self, focus: &Viewport, zoom: f64) -> Viewport {
        let scaled_width = (focus.width as f64 * self.config.density_factor) as u32;
        let scaled_height = (focus.height as f64 * self.config.density_factor) as u32;
        let width = scaled_width.min(self.config.max_buffer_dim);
        let height = scaled_height.min(self.config.max_buffer_dim);
        if width < scaled_width || height < scaled_height {
            debug!(
                "clamped backing buffer to {width}x{height} (wanted {scaled_width}x{scaled_height})"
            );
        }
        Viewport::new(focus.center, zoom, width, height)
    }
}
