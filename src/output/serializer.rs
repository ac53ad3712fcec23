use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::{ConvertError, Result};

/// The path the document is written to: `path` with a `.gltf` extension.
pub fn gltf_output_path(path: &Path) -> PathBuf {
    path.with_extension("gltf")
}

/// Sidecar file name for an output path: `<stem>.bin`.
pub fn sidecar_name(output_path: &Path) -> String {
    let stem = output_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "model".to_string());
    format!("{stem}.bin")
}

/// Serialize `document` as UTF-8 JSON to `path`. Returns the byte count.
pub fn write_document(document: &Document, path: &Path, pretty: bool) -> Result<u64> {
    let json = if pretty {
        serde_json::to_vec_pretty(document)?
    } else {
        serde_json::to_vec(document)?
    };
    write_bytes(path, &json)?;
    tracing::debug!("Wrote {} ({} bytes)", path.display(), json.len());
    Ok(json.len() as u64)
}

/// Write the reallocated binary payload.
pub fn write_sidecar(bytes: &[u8], path: &Path) -> Result<()> {
    write_bytes(path, bytes)?;
    tracing::debug!("Wrote sidecar {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConvertError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
    let mut w = BufWriter::new(file);
    w.write_all(bytes).map_err(|e| ConvertError::io(path, e))?;
    w.flush().map_err(|e| ConvertError::io(path, e))?;
    Ok(())
}
