use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{ConvertError, Result};

/// Summary of a written asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputStats {
    pub material_count: usize,
    /// Number of images referenced by the document.
    pub texture_count: usize,
    pub mesh_count: usize,
    pub node_count: usize,
    /// Size of the JSON file in bytes.
    pub file_size: u64,
}

/// Re-read a written `.gltf` (or `.glb`) and count its contents.
///
/// The `gltf` crate loads the file without semantic validation; when it
/// rejects the JSON the crate's own document model is used instead.
pub fn validate_output(path: &Path) -> Result<OutputStats> {
    let bytes = std::fs::read(path).map_err(|e| ConvertError::io(path, e))?;
    let file_size = bytes.len() as u64;

    match gltf::Gltf::from_slice_without_validation(&bytes) {
        Ok(gltf) => Ok(OutputStats {
            material_count: gltf.materials().count(),
            texture_count: gltf.images().count(),
            mesh_count: gltf.meshes().count(),
            node_count: gltf.nodes().count(),
            file_size,
        }),
        Err(err) => {
            tracing::debug!("gltf crate rejected {}: {err}, using fallback parser", path.display());
            let document = if crate::container::is_container(&bytes) {
                crate::container::read_container(&bytes)?.document
            } else {
                Document::from_slice(&bytes)?
            };
            Ok(OutputStats {
                material_count: document.materials.len(),
                texture_count: document.images.len(),
                mesh_count: document.meshes.len(),
                node_count: document.nodes.len(),
                file_size,
            })
        }
    }
}
