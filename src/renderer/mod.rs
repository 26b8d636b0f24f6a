//! Frame composition
//!
//! The core never talks to a graphics API. It issues a handful of primitives
//! to a `DrawSurface`; the browser implements them over Canvas2D, tests and
//! the headless demo record them.
//!
//! Every frame is a full redraw: background, axis guides, then entities in
//! scene order.

pub mod commands;

pub use commands::{CommandList, DrawCommand};

use glam::DVec2;

use crate::scene::{Entity, Shape};
use crate::settings::Theme;
use crate::transform::{Dimensions, RenderTransform};

/// Drawing primitives in surface CSS pixels
pub trait DrawSurface {
    type Error: std::fmt::Debug;

    /// Size the backing store to `dims.backing_size()` and scale subsequent
    /// drawing by `dims.ratio`
    fn begin_frame(&mut self, dims: &Dimensions) -> Result<(), Self::Error>;

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: &str) -> Result<(), Self::Error>;

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: &str) -> Result<(), Self::Error>;

    /// Fill a rectangle rotated about its own center
    fn fill_rotated_rect(
        &mut self,
        transform: &RenderTransform,
        color: &str,
    ) -> Result<(), Self::Error>;
}

/// Draw one complete frame
pub fn draw_frame<S: DrawSurface + ?Sized>(
    surface: &mut S,
    dims: &Dimensions,
    entities: &[Entity],
    theme: &Theme,
) -> Result<(), S::Error> {
    surface.begin_frame(dims)?;

    let size = DVec2::new(dims.width, dims.height);
    surface.fill_rect(DVec2::ZERO, size, &theme.background)?;
    draw_axis_lines(surface, dims, &theme.axis)?;

    for entity in entities {
        let transform = RenderTransform::for_entity(entity, dims);
        surface.fill_rotated_rect(&transform, entity.color())?;
    }

    Ok(())
}

fn draw_axis_lines<S: DrawSurface + ?Sized>(
    surface: &mut S,
    dims: &Dimensions,
    color: &str,
) -> Result<(), S::Error> {
    let center = dims.center();
    // X axis
    surface.stroke_line(DVec2::new(0.0, center.y), DVec2::new(dims.width, center.y), color)?;
    // Y axis
    surface.stroke_line(DVec2::new(center.x, 0.0), DVec2::new(center.x, dims.height), color)
}
