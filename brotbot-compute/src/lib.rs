pub mod cache;
pub mod error;
pub mod explorer;
pub mod mandelbrot;
pub mod render_config;
pub mod tile;

pub use cache::{FractalCache, FrameView};
pub use error::CacheError;
pub use explorer::Explorer;
pub use mandelbrot::escape_time;
pub use render_config::RenderConfig;
pub use tile::TileBuffer;

// Re-export core types for convenience
pub use brotbot_core::*;
