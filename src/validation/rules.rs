use super::report::*;

/// Unity needs tangents for normal mapping; it will generate them on import,
/// but the asset is flagged so the artist knows.
pub fn validate_tangents(
    mesh: usize,
    primitive: usize,
    has_normal: bool,
    has_tangent: bool,
) -> Option<ChangeItem> {
    if has_normal && !has_tangent {
        Some(ChangeItem::warning(
            ChangeCode::MissingTangent,
            ChangeCategory::Mesh,
            format!("Mesh {mesh}, Primitive {primitive}: has NORMAL but no TANGENT, Unity will generate tangents on import"),
        ))
    } else {
        None
    }
}

/// Check for missing texture coordinates.
pub fn validate_texcoords(
    mesh: usize,
    primitive: usize,
    has_texcoords: bool,
) -> Option<ChangeItem> {
    if !has_texcoords {
        Some(ChangeItem::warning(
            ChangeCode::MissingTexcoord,
            ChangeCategory::Mesh,
            format!("Mesh {mesh}, Primitive {primitive}: missing TEXCOORD_0, textures will not display in Roblox"),
        ))
    } else {
        None
    }
}

/// Validate a primitive's vertex count against a platform threshold.
pub fn validate_vertex_count(
    mesh: usize,
    primitive: usize,
    vertex_count: u64,
    limit: u64,
) -> Option<ChangeItem> {
    if vertex_count > limit {
        Some(ChangeItem::warning(
            ChangeCode::HighVertexCount,
            ChangeCategory::Mesh,
            format!(
                "Mesh {mesh}, Primitive {primitive}: vertex count ({vertex_count}) exceeds the recommended limit ({limit})"
            ),
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_without_tangent_warns() {
        let item = validate_tangents(0, 1, true, false).unwrap();
        assert_eq!(item.code, ChangeCode::MissingTangent);
        assert_eq!(item.severity, ChangeSeverity::Warning);
        assert!(item.message.contains("Mesh 0, Primitive 1"));
    }

    #[test]
    fn tangent_rule_needs_normals() {
        assert!(validate_tangents(0, 0, false, false).is_none());
        assert!(validate_tangents(0, 0, true, true).is_none());
    }

    #[test]
    fn missing_texcoords_warns() {
        let item = validate_texcoords(2, 0, false).unwrap();
        assert_eq!(item.code, ChangeCode::MissingTexcoord);
        assert!(validate_texcoords(2, 0, true).is_none());
    }

    #[test]
    fn vertex_count_at_limit_is_fine() {
        assert!(validate_vertex_count(0, 0, 10_000, 10_000).is_none());
    }

    #[test]
    fn vertex_count_above_limit_warns() {
        let item = validate_vertex_count(0, 0, 10_001, 10_000).unwrap();
        assert_eq!(item.code, ChangeCode::HighVertexCount);
        assert_eq!(item.category, ChangeCategory::Mesh);
    }
}
