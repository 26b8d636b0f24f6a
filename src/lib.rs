//! Spin Canvas - a minimal 2D scene editor core
//!
//! Rectangles live on an infinite, center-origin canvas and spin over a
//! user-controlled timeline.
//!
//! Core modules:
//! - `timeline`: Play/pause/stop state machine (pure transitions)
//! - `scene`: Entities, surface dimensions and scene mutations
//! - `transform`: Scene space to surface space projection
//! - `hit`: Click-to-select hit testing of rotated rectangles
//! - `driver`: Per-frame animation driver and cancellable frame queue
//! - `renderer`: Draw surface contract and frame composition
//! - `persistence`: JSON import/export
//! - `editor`: Session controller wiring it all together
//! - `platform`: Browser bindings (wasm32 only)

pub mod driver;
pub mod easing;
pub mod editor;
pub mod error;
pub mod hit;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod timeline;
pub mod transform;

pub use editor::Editor;
pub use error::{ConfigError, EditorError, ExportError, ImportError, SceneError};
pub use scene::{Entity, EntityId, Rectangle, Scene};
pub use settings::{EditorSettings, Theme};
pub use timeline::{PlayState, Timeline};
pub use transform::Dimensions;

/// Editor configuration constants
pub mod consts {
    /// Shortest allowed play-through (seconds)
    pub const MIN_DURATION: f64 = 1.0;
    /// Degrees every entity turns over one full play-through
    pub const ROTATE_BY_DEFAULT: f64 = 360.0;
    /// Timestamps are milliseconds, durations are seconds
    pub const MS_PER_SECOND: f64 = 1000.0;

    /// Random rectangle sides are sampled from [0, SIDE_SAMPLE_RANGE) ...
    pub const SIDE_SAMPLE_RANGE: f64 = 500.0;
    /// ... then clamped to [MIN_SIDE, MAX_SIDE]
    pub const MIN_SIDE: f64 = 100.0;
    pub const MAX_SIDE: f64 = 800.0;

    /// Largest opaque RGB value
    pub const MAX_RGB: u32 = 0xFF_FFFF;
}

/// Degrees to radians (canvas rotation is clockwise-positive in y-down space)
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

