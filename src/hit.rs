//! Click-to-select hit testing
//!
//! The click is mapped into each entity's unrotated frame (inverse rotation
//! about the entity center) and tested against its half-extents, so rotated
//! rectangles are hit exactly, not by their axis-aligned box.

use glam::DVec2;

use crate::scene::{Entity, EntityId, Scene, Shape};
use crate::transform::{Dimensions, rotate_about};

/// Does `entity` cover the scene-space `point`?
pub fn entity_contains(entity: &Entity, point: DVec2) -> bool {
    let center = entity.center();
    let local = rotate_about(point, center, -entity.rotation()) - center;
    entity.contains_local(local)
}

/// Topmost entity under a scene-space point
pub fn hit_test(entities: &[Entity], point: DVec2) -> Option<&Entity> {
    entities.iter().rev().find(|entity| entity_contains(entity, point))
}

/// Topmost entity under a surface point (CSS pixels from the top-left corner)
pub fn hit_test_surface<'a>(
    entities: &'a [Entity],
    dims: &Dimensions,
    surface_point: DVec2,
) -> Option<&'a Entity> {
    hit_test(entities, dims.surface_to_scene(surface_point))
}

/// Resolve a pointer click to an entity id. Without dimensions nothing can be
/// hit.
pub fn pick(scene: &Scene, surface_point: DVec2) -> Option<EntityId> {
    let dims = scene.dimensions.as_ref()?;
    hit_test_surface(&scene.entities, dims, surface_point).map(|e| e.id().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Rectangle;
    use proptest::prelude::*;

    fn rect(id: &str, x: f64, y: f64, width: f64, height: f64, rotation: f64) -> Entity {
        Entity::Rectangle(Rectangle {
            id: EntityId::from(id),
            x,
            y,
            width,
            height,
            color: "red".into(),
            rotation,
        })
    }

    #[test]
    fn test_hit_axis_aligned() {
        let entities = [rect("a", 0.0, 0.0, 100.0, 50.0, 0.0)];
        assert!(hit_test(&entities, DVec2::new(49.0, 24.0)).is_some());
        assert!(hit_test(&entities, DVec2::new(51.0, 0.0)).is_none());
        assert!(hit_test(&entities, DVec2::new(0.0, 26.0)).is_none());
    }

    #[test]
    fn test_rotation_changes_footprint() {
        // 100x10 bar turned upright: tall and thin
        let entities = [rect("bar", 0.0, 0.0, 100.0, 10.0, 90.0)];
        assert!(hit_test(&entities, DVec2::new(0.0, 45.0)).is_some());
        assert!(hit_test(&entities, DVec2::new(45.0, 0.0)).is_none());
    }

    #[test]
    fn test_rotated_corner_outside_even_inside_aabb() {
        // Square at 45°: its axis-aligned box corner is empty
        let entities = [rect("diamond", 0.0, 0.0, 100.0, 100.0, 45.0)];
        assert!(hit_test(&entities, DVec2::new(65.0, 65.0)).is_none());
        assert!(hit_test(&entities, DVec2::new(0.0, 65.0)).is_some());
    }

    #[test]
    fn test_topmost_wins_in_overlap() {
        let entities = [
            rect("bottom", 0.0, 0.0, 100.0, 100.0, 0.0),
            rect("top", 40.0, 40.0, 100.0, 100.0, 30.0),
        ];
        let hit = hit_test(&entities, DVec2::new(30.0, 30.0)).unwrap();
        assert_eq!(hit.id(), &EntityId::from("top"));

        let hit = hit_test(&entities, DVec2::new(-40.0, -40.0)).unwrap();
        assert_eq!(hit.id(), &EntityId::from("bottom"));
    }

    #[test]
    fn test_pick_converts_surface_points() {
        let scene = Scene::from_entities(vec![rect("a", 200.0, 0.0, 100.0, 100.0, 0.0)])
            .with_dimensions(Dimensions::new(800.0, 600.0, 2.0));
        // Scene (200, 0) sits at surface (400 + 100, 300)
        assert_eq!(pick(&scene, DVec2::new(500.0, 300.0)), Some(EntityId::from("a")));
        // Scene (0, 0) is empty
        assert_eq!(pick(&scene, DVec2::new(400.0, 300.0)), None);
    }

    #[test]
    fn test_pick_without_dimensions_misses() {
        let scene = Scene::from_entities(vec![rect("a", 0.0, 0.0, 100.0, 100.0, 0.0)]);
        assert_eq!(pick(&scene, DVec2::ZERO), None);
    }

    proptest! {
        #[test]
        fn prop_center_always_hits(
            x in -5000.0f64..5000.0,
            y in -5000.0f64..5000.0,
            width in 0.001f64..1000.0,
            height in 0.001f64..1000.0,
            rotation in -10_000.0f64..10_000.0,
        ) {
            let entities = [rect("e", x, y, width, height, rotation)];
            prop_assert!(hit_test(&entities, DVec2::new(x, y)).is_some());
        }

        #[test]
        fn prop_later_entity_wins_at_shared_center(
            x in -500.0f64..500.0,
            y in -500.0f64..500.0,
            r1 in 0.0f64..360.0,
            r2 in 0.0f64..360.0,
        ) {
            let entities = [
                rect("first", x, y, 120.0, 80.0, r1),
                rect("second", x, y, 60.0, 30.0, r2),
            ];
            let hit = hit_test(&entities, DVec2::new(x, y)).unwrap();
            prop_assert_eq!(hit.id(), &EntityId::from("second"));
        }
    }
}
