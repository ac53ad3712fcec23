use super::components::{self, known_component_count, ComponentType};
use super::{Accessor, Buffer, BufferView, Document, Image, Material, Mesh, Node, Texture};
use crate::validation::report::{ChangeCategory, ChangeCode, ChangeItem, ChangeLog};

/// Read-only, bounds-checked view over a [`Document`].
///
/// Every lookup returns `Option`, so no stage ever indexes a document array
/// directly. [`DocumentGraph::integrity_report`] sweeps all cross-references
/// and reports dangling ones as `ReferentialIntegrityWarning`s.
#[derive(Debug, Clone, Copy)]
pub struct DocumentGraph<'a> {
    doc: &'a Document,
}

impl<'a> DocumentGraph<'a> {
    pub fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    pub fn buffer(&self, index: usize) -> Option<&'a Buffer> {
        self.doc.buffers.get(index)
    }

    pub fn buffer_view(&self, index: usize) -> Option<&'a BufferView> {
        self.doc.buffer_views.get(index)
    }

    pub fn accessor(&self, index: usize) -> Option<&'a Accessor> {
        self.doc.accessors.get(index)
    }

    pub fn material(&self, index: usize) -> Option<&'a Material> {
        self.doc.materials.get(index)
    }

    pub fn image(&self, index: usize) -> Option<&'a Image> {
        self.doc.images.get(index)
    }

    pub fn texture(&self, index: usize) -> Option<&'a Texture> {
        self.doc.textures.get(index)
    }

    pub fn mesh(&self, index: usize) -> Option<&'a Mesh> {
        self.doc.meshes.get(index)
    }

    pub fn node(&self, index: usize) -> Option<&'a Node> {
        self.doc.nodes.get(index)
    }

    /// The buffer view an accessor is bound to, if it has one and it exists.
    pub fn accessor_view(&self, accessor: &Accessor) -> Option<&'a BufferView> {
        accessor.buffer_view.and_then(|i| self.buffer_view(i))
    }

    /// `count × componentCount(type) × componentSize(componentType)`.
    pub fn byte_requirement(accessor: &Accessor) -> u64 {
        accessor
            .count
            .saturating_mul(Self::bytes_per_element(accessor))
    }

    pub fn bytes_per_element(accessor: &Accessor) -> u64 {
        components::bytes_per_element(&accessor.accessor_type, accessor.component_type)
    }

    /// Check every cross-reference and buffer-view range in the document.
    pub fn integrity_report(&self) -> ChangeLog {
        let mut log = ChangeLog::new();
        let doc = self.doc;

        for (i, view) in doc.buffer_views.iter().enumerate() {
            match self.buffer(view.buffer) {
                None => dangling(
                    &mut log,
                    format!("bufferView {i}"),
                    "buffer",
                    view.buffer,
                    doc.buffers.len(),
                ),
                Some(buffer) if view.end() > buffer.byte_length => {
                    log.add(ChangeItem::warning(
                        ChangeCode::ViewOutOfBuffer,
                        ChangeCategory::Layout,
                        format!(
                            "bufferView {i} spans bytes {}..{} but buffer {} is only {} bytes",
                            view.byte_offset,
                            view.end(),
                            view.buffer,
                            buffer.byte_length
                        ),
                    ));
                }
                Some(_) => {}
            }
        }

        for (i, accessor) in doc.accessors.iter().enumerate() {
            if let Some(view) = accessor.buffer_view {
                if self.buffer_view(view).is_none() {
                    dangling(
                        &mut log,
                        format!("accessor {i}"),
                        "bufferView",
                        view,
                        doc.buffer_views.len(),
                    );
                }
            }
            if known_component_count(&accessor.accessor_type).is_none() {
                log.add(ChangeItem::warning(
                    ChangeCode::ReferentialIntegrityWarning,
                    ChangeCategory::Accessor,
                    format!(
                        "accessor {i} has unknown type '{}', assuming 1 component",
                        accessor.accessor_type
                    ),
                ));
            }
            if ComponentType::from_code(accessor.component_type).is_none() {
                log.add(ChangeItem::warning(
                    ChangeCode::ReferentialIntegrityWarning,
                    ChangeCategory::Accessor,
                    format!(
                        "accessor {i} has unknown componentType {}, assuming 4 bytes",
                        accessor.component_type
                    ),
                ));
            }
        }

        for (i, image) in doc.images.iter().enumerate() {
            if let Some(view) = image.buffer_view {
                if self.buffer_view(view).is_none() {
                    dangling(
                        &mut log,
                        format!("image {i}"),
                        "bufferView",
                        view,
                        doc.buffer_views.len(),
                    );
                }
            }
        }

        for (i, texture) in doc.textures.iter().enumerate() {
            if let Some(source) = texture.source {
                if self.image(source).is_none() {
                    dangling(&mut log, format!("texture {i}"), "image", source, doc.images.len());
                }
            }
        }

        for (i, material) in doc.materials.iter().enumerate() {
            for (slot, index) in material.texture_refs() {
                if self.texture(index).is_none() {
                    dangling(
                        &mut log,
                        format!("material {i} {slot}"),
                        "texture",
                        index,
                        doc.textures.len(),
                    );
                }
            }
        }

        for (m, mesh) in doc.meshes.iter().enumerate() {
            for (p, primitive) in mesh.primitives.iter().enumerate() {
                for (semantic, &index) in &primitive.attributes {
                    if self.accessor(index).is_none() {
                        dangling(
                            &mut log,
                            format!("mesh {m} primitive {p} {semantic}"),
                            "accessor",
                            index,
                            doc.accessors.len(),
                        );
                    }
                }
                if let Some(index) = primitive.indices {
                    if self.accessor(index).is_none() {
                        dangling(
                            &mut log,
                            format!("mesh {m} primitive {p} indices"),
                            "accessor",
                            index,
                            doc.accessors.len(),
                        );
                    }
                }
                if let Some(index) = primitive.material {
                    if self.material(index).is_none() {
                        dangling(
                            &mut log,
                            format!("mesh {m} primitive {p}"),
                            "material",
                            index,
                            doc.materials.len(),
                        );
                    }
                }
            }
        }

        for (i, node) in doc.nodes.iter().enumerate() {
            if let Some(mesh) = node.mesh {
                if self.mesh(mesh).is_none() {
                    dangling(&mut log, format!("node {i}"), "mesh", mesh, doc.meshes.len());
                }
            }
            for &child in &node.children {
                if self.node(child).is_none() {
                    dangling(&mut log, format!("node {i} child"), "node", child, doc.nodes.len());
                }
            }
        }

        log
    }
}

fn dangling(log: &mut ChangeLog, owner: String, target: &str, index: usize, len: usize) {
    log.add(ChangeItem::warning(
        ChangeCode::ReferentialIntegrityWarning,
        ChangeCategory::Reference,
        format!("{owner} references {target} {index}, but only {len} exist"),
    ));
}
