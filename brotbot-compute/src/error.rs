use brotbot_core::Viewport;
use std::collections::TryReserveError;
use thiserror::Error;

/// Failures of the tile cache. There is no retryable class here: every
/// variant signals either resource exhaustion or a broken invariant, and
/// the caller is expected to shut down rather than degrade.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Sample storage for a tile buffer could not be obtained.
    #[error("could not allocate sample storage for a {width}x{height} tile buffer")]
    Allocation {
        width: u32,
        height: u32,
        #[source]
        source: TryReserveError,
    },

    /// A freshly populated buffer failed the coverage check against the
    /// very focus that forced its refill. This is a geometry/population
    /// contract violation, never a runtime condition to retry.
    #[error(
        "freshly populated buffer at zoom {} does not cover the focus at zoom {}",
        buffer.zoom,
        focus.zoom
    )]
    CoverageViolation { buffer: Viewport, focus: Viewport },
}
