//! Scene mutations
//!
//! Randomness always comes from the caller's generator so runs can be
//! replayed from a seed.

use rand::Rng;

use super::bounds::rotated_bounds;
use super::entity::{Entity, EntityId, Rectangle, Shape};
use super::Scene;
use crate::consts::{MAX_RGB, MAX_SIDE, MIN_SIDE, SIDE_SAMPLE_RANGE};
use crate::error::SceneError;

/// Append one random rectangle.
///
/// Needs known dimensions: the spawn region is the surface size extended by
/// half the rectangle's rotated footprint, mirrored around the origin, so new
/// rectangles may start partly or fully off screen but never far away.
pub fn add_random_rectangle<R: Rng + ?Sized>(
    scene: &Scene,
    rng: &mut R,
) -> Result<Scene, SceneError> {
    let rect = random_rectangle(scene, rng)?;
    log::debug!(
        "Adding rectangle {} ({:.0}x{:.0} at {:.0},{:.0}, {:.1}°)",
        rect.id,
        rect.width,
        rect.height,
        rect.x,
        rect.y,
        rect.rotation
    );

    let mut entities = scene.entities.clone();
    entities.push(rect.into());
    Ok(scene.with_entities(entities))
}

fn random_rectangle<R: Rng + ?Sized>(scene: &Scene, rng: &mut R) -> Result<Rectangle, SceneError> {
    let dims = scene.dimensions.ok_or(SceneError::MissingDimensions)?;

    let width = random_side(rng);
    let height = random_side(rng);
    let rotation = rng.random_range(0.0..360.0);
    let footprint = rotated_bounds(width, height, rotation);

    let x = rng.random::<f64>() * (dims.width + footprint.x / 2.0) * random_sign(rng);
    let y = rng.random::<f64>() * (dims.height + footprint.y / 2.0) * random_sign(rng);

    Ok(Rectangle {
        id: fresh_id(scene, rng),
        x,
        y,
        width,
        height,
        color: random_hex_color(rng),
        rotation,
    })
}

/// Give the entity `id` a new random color. Unknown ids are a no-op.
pub fn recolor_entity<R: Rng + ?Sized>(id: &EntityId, scene: &Scene, rng: &mut R) -> Scene {
    let entities = scene
        .entities
        .iter()
        .map(|entity| {
            if entity.id() == id {
                entity.with_color(random_hex_color(rng))
            } else {
                entity.clone()
            }
        })
        .collect();
    scene.with_entities(entities)
}

/// Opaque `#rrggbb`
pub fn random_hex_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{:06x}", rng.random_range(0..=MAX_RGB))
}

/// A small hand-made scene for first launch
pub fn example_scene<R: Rng + ?Sized>(rng: &mut R) -> Scene {
    let layout = [
        (100.0, 0.0, 200.0, 100.0, 0.0, "red"),
        (500.0, 100.0, 50.0, 200.0, 0.0, "red"),
        (500.0, 100.0, 50.0, 200.0, 90.0, "blue"),
        (0.0, 0.0, 70.0, 40.0, 80.0, "blue"),
    ];

    let mut scene = Scene::new();
    for (x, y, width, height, rotation, color) in layout {
        let rect = Rectangle {
            id: fresh_id(&scene, rng),
            x,
            y,
            width,
            height,
            color: color.to_owned(),
            rotation,
        };
        scene.entities.push(Entity::Rectangle(rect));
    }
    scene
}

fn random_side<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    (rng.random::<f64>() * SIDE_SAMPLE_RANGE).clamp(MIN_SIDE, MAX_SIDE)
}

fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

fn fresh_id<R: Rng + ?Sized>(scene: &Scene, rng: &mut R) -> EntityId {
    loop {
        let id = EntityId::generate(rng);
        if !scene.contains(&id) {
            return id;
        }
    }
}
