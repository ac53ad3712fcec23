use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::output::ValidatorCommand;

/// Options for a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Directory relative image URIs are resolved against.
    pub texture_dir: Option<PathBuf>,
    /// Whether to apply the profile's texture constraints.
    pub process_textures: bool,
    /// Pretty-print the output JSON.
    pub pretty: bool,
    /// External validator to run on the written file.
    pub validator: Option<ValidatorCommand>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            texture_dir: None,
            process_textures: true,
            pretty: true,
            validator: None,
        }
    }
}
