use serde::{Deserialize, Serialize};

/// A point on the complex plane.
///
/// Immutable value type; no identity beyond its coordinates. All
/// operations return new values rather than mutating in place.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComplexPoint {
    pub re: f64,
    pub im: f64,
}

impl ComplexPoint {
    pub const ORIGIN: ComplexPoint = ComplexPoint { re: 0.0, im: 0.0 };

    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Distance from the origin, `|z|`.
    pub fn magnitude(&self) -> f64 {
        (self.re * self.re + self.im * self.im).sqrt()
    }

    /// One application of the quadratic map `z' = z² + c`, with the
    /// complex multiplication expanded into real/imaginary components.
    pub fn iterate(&self, c: &ComplexPoint) -> ComplexPoint {
        ComplexPoint {
            re: self.re * self.re - self.im * self.im + c.re,
            im: 2.0 * self.re * self.im + c.im,
        }
    }

    /// True once `|z| ≥ 2`, the standard Mandelbrot escape radius.
    /// An iterate past this radius can never return to the set.
    pub fn has_diverged(&self) -> bool {
        self.re * self.re + self.im * self.im >= 4.0
    }
}
