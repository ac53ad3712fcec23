//! Platform optimization.
//!
//! [`optimize`] is the single entry point. It runs the shared rules (material
//! name and image path cleaning) and then the rules of the chosen
//! [`PlatformProfile`], in a fixed order. All profile differences are data in
//! [`PlatformConstraints`], never a second copy of a pass.

pub mod extensions;
pub mod limits;
pub mod materials;
pub mod meshes;
pub mod textures;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::texture_pipeline::TextureConstraints;
use crate::validation::report::ChangeLog;

use self::limits::*;

/// Downstream consumer an asset is optimized for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformProfile {
    #[default]
    Unity,
    Roblox,
}

impl PlatformProfile {
    /// Resolve a profile by name, case-insensitively. Unknown names fall back
    /// to Unity.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "roblox" => Self::Roblox,
            "unity" => Self::Unity,
            other => {
                tracing::debug!("Unknown platform profile {other:?}, using unity");
                Self::Unity
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Unity => "unity",
            Self::Roblox => "roblox",
        }
    }

    pub fn constraints(&self) -> PlatformConstraints {
        match self {
            Self::Unity => PlatformConstraints {
                max_material_name: None,
                max_node_name: None,
                strip_metallic: false,
                strip_material_extensions: false,
                allowed_extensions: None,
                textures: TextureConstraints {
                    ensure_alpha: true,
                    max_dimension: None,
                },
                require_tangents: true,
                require_texcoords: false,
                vertex_warning: UNITY_VERTEX_WARNING,
            },
            Self::Roblox => PlatformConstraints {
                max_material_name: Some(ROBLOX_MAX_MATERIAL_NAME),
                max_node_name: Some(ROBLOX_MAX_NODE_NAME),
                strip_metallic: true,
                strip_material_extensions: true,
                allowed_extensions: Some(ROBLOX_ALLOWED_EXTENSIONS),
                textures: TextureConstraints {
                    ensure_alpha: false,
                    max_dimension: Some(ROBLOX_MAX_TEXTURE_DIMENSION),
                },
                require_tangents: false,
                require_texcoords: true,
                vertex_warning: ROBLOX_VERTEX_WARNING,
            },
        }
    }
}

impl std::fmt::Display for PlatformProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Constraint constants carried by a profile.
#[derive(Debug, Clone)]
pub struct PlatformConstraints {
    pub max_material_name: Option<usize>,
    pub max_node_name: Option<usize>,
    /// Clamp and then remove `metallicFactor`.
    pub strip_metallic: bool,
    pub strip_material_extensions: bool,
    /// Document-level extensions kept. `None` leaves both lists untouched.
    pub allowed_extensions: Option<&'static [&'static str]>,
    pub textures: TextureConstraints,
    /// Warn on primitives with `NORMAL` but no `TANGENT`.
    pub require_tangents: bool,
    /// Warn on primitives without `TEXCOORD_0`.
    pub require_texcoords: bool,
    /// `POSITION` count above which a primitive is flagged.
    pub vertex_warning: u64,
}

/// Where textures are read from and written to.
#[derive(Debug, Clone, Default)]
pub struct TextureContext {
    /// Directory relative image URIs are resolved against.
    pub source_dir: Option<PathBuf>,
    /// Directory transformed textures are written to.
    pub output_dir: Option<PathBuf>,
    /// When false, texture constraints are not applied at all.
    pub enabled: bool,
}

/// Apply the shared rules and then the rules of `profile`.
pub fn optimize(
    mut document: Document,
    profile: PlatformProfile,
    texture_context: &TextureContext,
) -> (Document, ChangeLog) {
    let constraints = profile.constraints();
    let mut log = ChangeLog::new();

    log.merge(materials::clean_material_names(
        &mut document,
        constraints.max_material_name,
    ));
    log.merge(textures::clean_image_paths(&mut document));

    if constraints.strip_metallic {
        log.merge(materials::strip_metallic(&mut document));
    }
    if constraints.strip_material_extensions {
        log.merge(materials::strip_material_extensions(&mut document));
    }

    if let Some(allowed) = constraints.allowed_extensions {
        log.merge(extensions::restrict_extensions(&mut document, allowed));
    }

    if let Some(max) = constraints.max_node_name {
        log.merge(meshes::truncate_node_names(&mut document, max));
    }

    if texture_context.enabled && !constraints.textures.is_noop() {
        log.merge(textures::constrain_textures(
            &mut document,
            &constraints.textures,
            texture_context,
        ));
    }

    log.merge(meshes::validate_meshes(&document, &constraints));

    tracing::debug!(
        profile = profile.name(),
        changes = log.len(),
        "Platform optimization finished"
    );
    (document, log)
}
