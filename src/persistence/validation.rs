//! Imported entity validation
//!
//! Checks the invariants serde cannot: positive sizes, finite numbers,
//! non-empty and unique ids, non-empty colors.

use std::collections::HashSet;

use crate::error::ImportError;
use crate::scene::{Entity, Rectangle, Shape};

/// Validate a whole entity list. The first problem found is reported.
pub fn validate_entities(entities: &[Entity]) -> Result<(), ImportError> {
    let mut seen = HashSet::with_capacity(entities.len());
    for entity in entities {
        match entity {
            Entity::Rectangle(rect) => validate_rectangle(rect)?,
        }
        let id = entity.id();
        if !seen.insert(id) {
            return Err(ImportError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}

fn validate_rectangle(rect: &Rectangle) -> Result<(), ImportError> {
    let id = rect.id.as_str();
    if id.trim().is_empty() {
        return Err(ImportError::EmptyId);
    }

    let fields = [
        ("x", rect.x),
        ("y", rect.y),
        ("width", rect.width),
        ("height", rect.height),
        ("rotation", rect.rotation),
    ];
    if let Some((field, _)) = fields.into_iter().find(|(_, value)| !value.is_finite()) {
        return Err(ImportError::NonFinite {
            id: id.to_owned(),
            field,
        });
    }

    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Err(ImportError::NonPositiveSize {
            id: id.to_owned(),
            width: rect.width,
            height: rect.height,
        });
    }

    if rect.color.trim().is_empty() {
        return Err(ImportError::EmptyColor { id: id.to_owned() });
    }

    Ok(())
}
