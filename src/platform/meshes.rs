use super::PlatformConstraints;
use crate::document::Document;
use crate::validation::autofix::truncate_chars;
use crate::validation::report::{ChangeCategory, ChangeCode, ChangeItem, ChangeLog};
use crate::validation::rules;

/// Truncate every node name to `max` characters.
pub fn truncate_node_names(document: &mut Document, max: usize) -> ChangeLog {
    let mut log = ChangeLog::new();
    for (i, node) in document.nodes.iter_mut().enumerate() {
        let Some(name) = node.name.as_mut() else {
            continue;
        };
        let truncated = truncate_chars(name, max);
        if truncated.len() < name.len() {
            let truncated = truncated.to_string();
            log.add(ChangeItem::info(
                ChangeCode::NodeRenamed,
                ChangeCategory::Node,
                format!("Node {i}: name {name:?} truncated to {truncated:?}"),
            ));
            *name = truncated;
        }
    }
    log
}

/// Run the attribute and vertex-count rules over every primitive.
///
/// Only warnings are produced; geometry is never changed.
pub fn validate_meshes(document: &Document, constraints: &PlatformConstraints) -> ChangeLog {
    let graph = document.graph();
    let mut log = ChangeLog::new();

    for (m, mesh) in document.meshes.iter().enumerate() {
        for (p, primitive) in mesh.primitives.iter().enumerate() {
            let has = |name: &str| primitive.attributes.contains_key(name);

            if constraints.require_tangents {
                log.extend(rules::validate_tangents(m, p, has("NORMAL"), has("TANGENT")));
            }
            if constraints.require_texcoords {
                log.extend(rules::validate_texcoords(m, p, has("TEXCOORD_0")));
            }

            let vertices = primitive
                .attributes
                .get("POSITION")
                .and_then(|&i| graph.accessor(i))
                .map(|accessor| accessor.count);
            if let Some(count) = vertices {
                log.extend(rules::validate_vertex_count(m, p, count, constraints.vertex_warning));
            }
        }
    }
    log
}
