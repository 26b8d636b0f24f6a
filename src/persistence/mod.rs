//! Scene import/export
//!
//! Features:
//! - `{ "entities": [...] }` JSON document, one tagged object per entity
//! - All-or-nothing import: parse, then validate, then hand back entities
//! - Deterministic export filename from a BLAKE3 digest of the JSON

pub mod validation;

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ImportError};
use crate::scene::{Entity, Scene};

pub use validation::validate_entities;

/// Hex digits of the digest kept in export filenames
pub const FILENAME_HASH_LEN: usize = 16;

/// The exchanged document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    pub entities: Vec<Entity>,
}

/// A serialized scene ready to hand to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedScene {
    pub filename: String,
    pub json: String,
}

/// Parse and validate a scene document
pub fn import_scene(json: &str) -> Result<Vec<Entity>, ImportError> {
    let document: SceneDocument = serde_json::from_str(json)?;
    validate_entities(&document.entities)?;
    log::debug!("Parsed scene with {} entities", document.entities.len());
    Ok(document.entities)
}

/// Serialize the scene's entities
pub fn export_scene(scene: &Scene) -> Result<ExportedScene, ExportError> {
    let document = SceneDocument {
        entities: scene.entities.clone(),
    };
    let json = serde_json::to_string_pretty(&document)?;
    Ok(ExportedScene {
        filename: export_filename(&json),
        json,
    })
}

/// `scene-<digest>.json`; identical content gives an identical name
pub fn export_filename(json: &str) -> String {
    let digest = blake3::hash(json.as_bytes()).to_hex();
    format!("scene-{}.json", &digest.as_str()[..FILENAME_HASH_LEN])
}

/// Write an export into `dir` under its content-hash filename
#[cfg(not(target_arch = "wasm32"))]
pub fn write_export(
    dir: &std::path::Path,
    export: &ExportedScene,
) -> Result<std::path::PathBuf, ExportError> {
    let path = dir.join(&export.filename);
    std::fs::write(&path, &export.json)?;
    log::info!("Scene exported to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{EntityId, Rectangle, add_random_rectangle, example_scene};
    use crate::transform::Dimensions;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VALID: &str = r##"{
        "entities": [
            {"type": "rectangle", "id": "1", "x": 500, "y": 100, "width": 50, "height": 200, "color": "red", "rotation": 0},
            {"type": "rectangle", "id": "2", "x": -3.5, "y": 0, "width": 70, "height": 40, "color": "#0000ff", "rotation": 80}
        ]
    }"##;

    #[test]
    fn test_import_valid_document() {
        let entities = import_scene(VALID).unwrap();
        assert_eq!(entities.len(), 2);
        let Entity::Rectangle(second) = &entities[1];
        assert_eq!(second.id, EntityId::from("2"));
        assert_eq!(second.x, -3.5);
        assert_eq!(second.rotation, 80.0);
    }

    #[test]
    fn test_import_rejects_malformed_shapes() {
        for bad in [
            "",
            "[]",
            r#"{"entities": {}}"#,
            r#"{"entities": [{"type": "rectangle", "id": "a"}]}"#,
            r#"{"entities": [{"type": "triangle", "id": "a", "x": 0, "y": 0, "width": 1, "height": 1, "color": "red", "rotation": 0}]}"#,
            r#"{"entities": [{"id": "a", "x": 0, "y": 0, "width": 1, "height": 1, "color": "red", "rotation": 0}]}"#,
            r#"{"entities": [{"type": "rectangle", "id": "a", "x": "0", "y": 0, "width": 1, "height": 1, "color": "red", "rotation": 0}]}"#,
        ] {
            assert!(matches!(import_scene(bad), Err(ImportError::Json(_))), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_import_rejects_invalid_values() {
        let zero_width = r#"{"entities": [{"type": "rectangle", "id": "a", "x": 0, "y": 0, "width": 0, "height": 1, "color": "red", "rotation": 0}]}"#;
        assert!(matches!(import_scene(zero_width), Err(ImportError::NonPositiveSize { .. })));

        let dupes = r#"{"entities": [
            {"type": "rectangle", "id": "a", "x": 0, "y": 0, "width": 1, "height": 1, "color": "red", "rotation": 0},
            {"type": "rectangle", "id": "a", "x": 5, "y": 5, "width": 1, "height": 1, "color": "red", "rotation": 0}
        ]}"#;
        assert!(matches!(import_scene(dupes), Err(ImportError::DuplicateId(_))));
    }

    #[test]
    fn test_export_filename_is_content_addressed() {
        let mut rng = Pcg32::seed_from_u64(11);
        let scene = example_scene(&mut rng);
        let a = export_scene(&scene).unwrap();
        let b = export_scene(&scene.with_dimensions(Dimensions::new(1.0, 1.0, 1.0))).unwrap();
        assert_eq!(a, b);
        assert!(a.filename.starts_with("scene-"));
        assert!(a.filename.ends_with(".json"));
        assert_eq!(a.filename.len(), "scene-".len() + FILENAME_HASH_LEN + ".json".len());

        let other = export_scene(&example_scene(&mut rng)).unwrap();
        assert_ne!(a.filename, other.filename);
    }

    #[test]
    fn test_export_shape() {
        let scene = Scene::from_entities(vec![
            Rectangle {
                id: EntityId::from("r1"),
                x: 1.0,
                y: 2.0,
                width: 3.0,
                height: 4.0,
                color: "red".into(),
                rotation: 5.0,
            }
            .into(),
        ]);
        let export = export_scene(&scene).unwrap();
        let value: serde_json::Value = serde_json::from_str(&export.json).unwrap();
        let entity = &value["entities"][0];
        assert_eq!(entity["type"], "rectangle");
        assert_eq!(entity["id"], "r1");
        assert_eq!(entity["height"], 4.0);
        assert_eq!(entity["color"], "red");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("spin-canvas-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let scene = example_scene(&mut Pcg32::seed_from_u64(12));
        let export = export_scene(&scene).unwrap();
        let path = write_export(&dir, &export).unwrap();
        let json = std::fs::read_to_string(&path).unwrap();
        assert_eq!(import_scene(&json).unwrap(), scene.entities);
        let _ = std::fs::remove_dir_all(&dir);
    }

    proptest! {
        #[test]
        fn prop_import_export_round_trip(seed in any::<u64>(), count in 1usize..12) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut scene = Scene::new().with_dimensions(Dimensions::new(1920.0, 1080.0, 1.5));
            for _ in 0..count {
                scene = add_random_rectangle(&scene, &mut rng).unwrap();
            }
            let export = export_scene(&scene).unwrap();
            prop_assert_eq!(import_scene(&export.json).unwrap(), scene.entities);
        }
    }
}
