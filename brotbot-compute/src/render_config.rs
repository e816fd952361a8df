use serde::{Deserialize, Serialize};

/// Policy constants for tile population and cache management.
///
/// The density factor and the span-ratio threshold are empirically chosen
/// companions: buffers are built at `density_factor` times the focus pixel
/// density, and stop serving a focus once its plane span drops below
/// `min_span_ratio` of the buffer's. They are configuration, not
/// semantics; keep them in sync when tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Iteration budget per sample.
    pub max_iterations: u32,
    /// Backing buffers are built at this multiple of the focus's pixel
    /// dimensions.
    pub density_factor: f64,
    /// A buffer stops serving a focus whose plane span, in either
    /// dimension, falls below this fraction of the buffer's.
    pub min_span_ratio: f64,
    /// Hard per-axis cap on buffer dimensions (platform texture limit).
    /// Clamping against it is normal policy, not an error.
    pub max_buffer_dim: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_iterations: 256,
            density_factor: 2.0,
            min_span_ratio: 0.5,
            max_buffer_dim: 4096,
        }
    }
}
