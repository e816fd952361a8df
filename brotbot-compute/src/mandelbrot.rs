use brotbot_core::{ComplexPoint, SampleResult};

/// Escape-time iteration for a single point `c`, seeded at `z = 0`.
///
/// Applies `z ← z² + c` up to `max_iterations` times, recording the
/// 0-based index of the first iterate with `|z| ≥ 2`. Output depends only
/// on the arguments; there is no hidden state.
pub fn escape_time(c: ComplexPoint, max_iterations: u32) -> SampleResult {
    let mut z = ComplexPoint::ORIGIN;
    for index in 0..max_iterations {
        z = z.iterate(&c);
        if z.has_diverged() {
            return SampleResult::Diverged(index);
        }
    }
    SampleResult::BoundedInside
}
