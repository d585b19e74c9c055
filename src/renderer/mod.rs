//! Rendering module
//!
//! `scene` projects simulation state into shapes; `canvas` draws them with the
//! browser's 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod palette;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
pub use scene::{ObstacleDraw, Rect, Scene};
