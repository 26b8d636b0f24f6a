//! Platform abstraction layer
//!
//! Browser side of the editor:
//! - `CanvasSurface`: `DrawSurface` over a Canvas2D context
//! - Scene download through a Blob object URL
//! - Monotonic clock
//!
//! Native builds draw into a `CommandList` and write exports with
//! `persistence::write_export`, so nothing lives here for them.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{CanvasSurface, download_json, now_ms};
