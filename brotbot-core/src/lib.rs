pub mod complex;
pub mod plane_rect;
pub mod sample;
pub mod viewport;

pub use complex::ComplexPoint;
pub use plane_rect::PlaneRect;
pub use sample::SampleResult;
pub use viewport::{Viewport, ZOOM_STEP};
