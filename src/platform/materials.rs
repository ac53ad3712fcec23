use serde_json::Number;

use super::limits::ROBLOX_MAX_METALLIC;
use crate::document::Document;
use crate::validation::autofix::{clean_material_name, is_clean_material_name, truncate_chars};
use crate::validation::report::{ChangeCategory, ChangeCode, ChangeItem, ChangeLog};

/// Clean every material name, then clamp it to `max_len` characters.
///
/// Unnamed materials are named `Material`.
pub fn clean_material_names(document: &mut Document, max_len: Option<usize>) -> ChangeLog {
    let mut log = ChangeLog::new();

    for (i, material) in document.materials.iter_mut().enumerate() {
        let original = material.name.clone().unwrap_or_default();
        let mut cleaned = clean_material_name(&original);
        if let Some(max) = max_len {
            // Cutting can expose an underscore at the end
            cleaned = truncate_chars(&cleaned, max).trim_end_matches('_').to_string();
        }
        debug_assert!(is_clean_material_name(&cleaned), "{cleaned:?}");

        if material.name.as_deref() != Some(cleaned.as_str()) {
            log.add(ChangeItem::info(
                ChangeCode::MaterialRenamed,
                ChangeCategory::Material,
                format!("Material {i}: renamed {original:?} to {cleaned:?}"),
            ));
            material.name = Some(cleaned);
        }
    }

    log
}

/// Remove `metallicFactor`, recording a clamp first for values above the
/// Roblox ceiling.
pub fn strip_metallic(document: &mut Document) -> ChangeLog {
    let mut log = ChangeLog::new();

    for (i, material) in document.materials.iter_mut().enumerate() {
        let Some(pbr) = material.pbr_metallic_roughness.as_mut() else {
            continue;
        };
        let Some(value) = pbr.metallic_factor.as_ref().and_then(Number::as_f64) else {
            continue;
        };

        if value > ROBLOX_MAX_METALLIC {
            log.add(ChangeItem::info(
                ChangeCode::MetallicClamped,
                ChangeCategory::Material,
                format!("Material {i}: metallicFactor {value} clamped to {ROBLOX_MAX_METALLIC}"),
            ));
        }

        pbr.metallic_factor = None;
        log.add(ChangeItem::info(
            ChangeCode::MetallicRemoved,
            ChangeCategory::Material,
            format!("Material {i}: removed metallicFactor"),
        ));
    }

    log
}

/// Remove the `extensions` object from every material.
pub fn strip_material_extensions(document: &mut Document) -> ChangeLog {
    let mut log = ChangeLog::new();

    for (i, material) in document.materials.iter_mut().enumerate() {
        if let Some(extensions) = material.extensions.take() {
            let names: Vec<&str> = extensions.keys().map(String::as_str).collect();
            log.add(ChangeItem::info(
                ChangeCode::MaterialExtensionsRemoved,
                ChangeCategory::Material,
                format!("Material {i}: removed extensions [{}]", names.join(", ")),
            ));
        }
    }

    log
}
