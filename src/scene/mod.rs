//! Scene model
//!
//! An ordered list of entities (later entries draw on top and are hit first)
//! plus the surface dimensions once the host has reported them.
//! Mutations return a new `Scene`; the old value is never touched.

pub mod bounds;
pub mod entity;
pub mod ops;

pub use bounds::rotated_bounds;
pub use entity::{Entity, EntityId, Rectangle, Shape};
pub use ops::{add_random_rectangle, example_scene, random_hex_color, recolor_entity};

use crate::transform::Dimensions;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Draw order, bottom first
    pub entities: Vec<Entity>,
    /// Unknown until the first resize
    pub dimensions: Option<Dimensions>,
}

impl Scene {
    /// Empty scene, no dimensions yet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entities(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            dimensions: None,
        }
    }

    /// Same entities on a resized surface
    pub fn with_dimensions(&self, dimensions: Dimensions) -> Self {
        Self {
            dimensions: Some(dimensions),
            ..self.clone()
        }
    }

    /// Replace the entities, keeping the known dimensions
    pub fn with_entities(&self, entities: Vec<Entity>) -> Self {
        Self {
            entities,
            dimensions: self.dimensions,
        }
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
