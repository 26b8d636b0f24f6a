//! Recording draw surface
//!
//! Keeps the primitives of the most recent frame. Used by the headless demo
//! and by tests that need to see what would have been drawn.

use std::convert::Infallible;

use glam::DVec2;

use super::DrawSurface;
use crate::transform::{Dimensions, RenderTransform};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginFrame { backing: (u32, u32), ratio: f64 },
    FillRect { origin: DVec2, size: DVec2, color: String },
    StrokeLine { from: DVec2, to: DVec2, color: String },
    FillRotatedRect { transform: RenderTransform, color: String },
}

#[derive(Debug, Clone, Default)]
pub struct CommandList {
    /// Primitives of the latest frame
    pub commands: Vec<DrawCommand>,
    /// Frames begun so far
    pub frames: usize,
}

impl CommandList {
    /// Entity placements of the latest frame, bottom first
    pub fn entity_transforms(&self) -> impl Iterator<Item = &RenderTransform> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::FillRotatedRect { transform, .. } => Some(transform),
            _ => None,
        })
    }
}

impl DrawSurface for CommandList {
    type Error = Infallible;

    fn begin_frame(&mut self, dims: &Dimensions) -> Result<(), Self::Error> {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::BeginFrame {
            backing: dims.backing_size(),
            ratio: dims.ratio,
        });
        Ok(())
    }

    fn fill_rect(&mut self, origin: DVec2, size: DVec2, color: &str) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::FillRect {
            origin,
            size,
            color: color.to_owned(),
        });
        Ok(())
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, color: &str) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            color: color.to_owned(),
        });
        Ok(())
    }

    fn fill_rotated_rect(
        &mut self,
        transform: &RenderTransform,
        color: &str,
    ) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::FillRotatedRect {
            transform: *transform,
            color: color.to_owned(),
        });
        Ok(())
    }
}
