use serde::{Deserialize, Serialize};

/// Escape-time result for one sample of a tile buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleResult {
    /// Not yet computed. Only seen transiently while a buffer is filling.
    #[default]
    Unknown,
    /// The orbit reached `|z| ≥ 2`; the payload is the 0-based iteration
    /// index at which that first held.
    Diverged(u32),
    /// The orbit stayed bounded for the whole iteration budget; the
    /// sample is treated as inside the set.
    BoundedInside,
}

impl SampleResult {
    pub fn is_inside(&self) -> bool {
        matches!(self, SampleResult::BoundedInside)
    }

    /// Iteration index at which the orbit escaped, if it did.
    pub fn escape_index(&self) -> Option<u32> {
        match self {
            SampleResult::Diverged(index) => Some(*index),
            _ => None,
        }
    }

    /// Signed encoding used at the boundary with rendering collaborators:
    /// the iteration budget for bounded samples, `-(index + 1)` for
    /// diverged ones, and `0` for unknown.
    pub fn to_signed(&self, max_iterations: u32) -> i32 {
        match self {
            SampleResult::Unknown => 0,
            SampleResult::Diverged(index) => -(*index as i32) - 1,
            SampleResult::BoundedInside => max_iterations as i32,
        }
    }

    /// Inverse of [`to_signed`](Self::to_signed). Any positive value maps
    /// to [`SampleResult::BoundedInside`]; the budget itself is not
    /// recoverable from the encoding.
    pub fn from_signed(raw: i32) -> Self {
        match raw {
            0 => SampleResult::Unknown,
            n if n < 0 => SampleResult::Diverged((-n - 1) as u32),
            _ => SampleResult::BoundedInside,
        }
    }
}
