//! Drawable entities
//!
//! `Entity` is a closed sum type. Rectangles are the only variant today; a new
//! shape is a new variant plus a `Shape` impl.

use std::fmt;

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque entity identifier, stable for the entity's lifetime
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// A random (v4-shaped) UUID drawn from the given source
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Uuid> for EntityId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capabilities every drawable entity has
pub trait Shape {
    fn id(&self) -> &EntityId;
    /// Center in scene space
    fn center(&self) -> DVec2;
    /// Unrotated extents
    fn size(&self) -> DVec2;
    /// Degrees, clockwise, not normalized
    fn rotation(&self) -> f64;
    fn color(&self) -> &str;
    /// Is `local` (relative to the center, in the unrotated frame) inside?
    fn contains_local(&self, local: DVec2) -> bool;
}

/// An axis-aligned rectangle before rotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub id: EntityId,
    /// Center, scene space
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub rotation: f64,
}

impl Shape for Rectangle {
    fn id(&self) -> &EntityId {
        &self.id
    }

    fn center(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn color(&self) -> &str {
        &self.color
    }

    fn contains_local(&self, local: DVec2) -> bool {
        local.x.abs() <= self.width / 2.0 && local.y.abs() <= self.height / 2.0
    }
}

/// Anything that can live in a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity {
    Rectangle(Rectangle),
}

impl Entity {
    fn shape(&self) -> &dyn Shape {
        match self {
            Entity::Rectangle(rect) => rect,
        }
    }

    /// Copy with `delta` degrees added to the rotation
    pub fn rotated_by(&self, delta: f64) -> Self {
        match self {
            Entity::Rectangle(rect) => Entity::Rectangle(Rectangle {
                rotation: rect.rotation + delta,
                ..rect.clone()
            }),
        }
    }

    /// Copy with a different color
    pub fn with_color(&self, color: String) -> Self {
        match self {
            Entity::Rectangle(rect) => Entity::Rectangle(Rectangle {
                color,
                ..rect.clone()
            }),
        }
    }
}

impl Shape for Entity {
    fn id(&self) -> &EntityId {
        self.shape().id()
    }

    fn center(&self) -> DVec2 {
        self.shape().center()
    }

    fn size(&self) -> DVec2 {
        self.shape().size()
    }

    fn rotation(&self) -> f64 {
        self.shape().rotation()
    }

    fn color(&self) -> &str {
        self.shape().color()
    }

    fn contains_local(&self, local: DVec2) -> bool {
        self.shape().contains_local(local)
    }
}

impl From<Rectangle> for Entity {
    fn from(rect: Rectangle) -> Self {
        Entity::Rectangle(rect)
    }
}
