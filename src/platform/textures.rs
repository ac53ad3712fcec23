use std::path::{Path, PathBuf};

use image::ImageFormat;

use super::TextureContext;
use crate::document::Document;
use crate::texture_pipeline::{self, ConvertedTexture, TextureConstraints};
use crate::validation::autofix::clean_image_uri;
use crate::validation::report::{ChangeCategory, ChangeCode, ChangeItem, ChangeLog};

/// Reduce absolute or nested image URIs to bare file names.
pub fn clean_image_paths(document: &mut Document) -> ChangeLog {
    let mut log = ChangeLog::new();
    for (i, image) in document.images.iter_mut().enumerate() {
        let Some(uri) = image.uri.as_mut() else {
            continue;
        };
        if let Some(cleaned) = clean_image_uri(uri) {
            log.add(ChangeItem::info(
                ChangeCode::ImagePathCleaned,
                ChangeCategory::Texture,
                format!("Image {i}: path {uri:?} cleaned to {cleaned:?}"),
            ));
            *uri = cleaned;
        }
    }
    log
}

/// Apply texture constraints to every reachable image.
///
/// File textures are read from `context.source_dir` and the result is
/// written under the same name into `context.output_dir`. `data:` images are
/// re-encoded in place as PNG. Images stored in buffer views are skipped.
pub fn constrain_textures(
    document: &mut Document,
    constraints: &TextureConstraints,
    context: &TextureContext,
) -> ChangeLog {
    let mut log = ChangeLog::new();

    for (i, image) in document.images.iter_mut().enumerate() {
        let Some(uri) = image.uri.as_mut() else {
            continue;
        };

        if uri.starts_with("data:") {
            match constrain_data_uri(uri, constraints) {
                Ok(Some((converted, encoded))) => {
                    report_conversion(&mut log, i, "embedded image", &converted);
                    *uri = encoded;
                    image.mime_type = Some("image/png".to_string());
                }
                Ok(None) => {}
                Err(err) => skipped(&mut log, i, &err),
            }
            continue;
        }

        let Some(source_dir) = context.source_dir.as_deref() else {
            tracing::debug!("Image {i}: no texture directory configured, skipping {uri}");
            continue;
        };
        let source = source_dir.join(uri.as_str());
        if !source.is_file() {
            log.add(ChangeItem::warning(
                ChangeCode::ImageMissing,
                ChangeCategory::Texture,
                format!("Image {i}: texture file not found: {}", source.display()),
            ));
            continue;
        }

        match constrain_file(&source, uri, constraints, context.output_dir.as_deref()) {
            Ok(Some(converted)) => report_conversion(&mut log, i, uri, &converted),
            Ok(None) => {}
            Err(err) => skipped(&mut log, i, &err),
        }
    }

    log
}

fn constrain_data_uri(
    uri: &str,
    constraints: &TextureConstraints,
) -> anyhow::Result<Option<(ConvertedTexture, String)>> {
    let loaded = texture_pipeline::load_texture_data_uri(uri)?;
    let converted = texture_pipeline::apply_constraints(&loaded, constraints)?;
    if !converted.changed() {
        return Ok(None);
    }
    let encoded = texture_pipeline::encode_png_data_uri(&converted.image)?;
    Ok(Some((converted, encoded)))
}

fn constrain_file(
    source: &Path,
    file_name: &str,
    constraints: &TextureConstraints,
    output_dir: Option<&Path>,
) -> anyhow::Result<Option<ConvertedTexture>> {
    let loaded = texture_pipeline::load_texture_file(source)?;
    let converted = texture_pipeline::apply_constraints(&loaded, constraints)?;
    if !converted.changed() {
        return Ok(None);
    }

    let target = output_target(source, file_name, output_dir)?;
    let format = ImageFormat::from_path(&target).unwrap_or(loaded.format);
    texture_pipeline::save_texture(&converted.image, &target, format)?;
    Ok(Some(converted))
}

/// Where a transformed texture goes. Never the source file itself.
fn output_target(
    source: &Path,
    file_name: &str,
    output_dir: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let output_dir = output_dir.ok_or_else(|| anyhow::anyhow!("no output directory for textures"))?;
    let target = output_dir.join(file_name);
    let same_file = match (source.canonicalize(), target.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if same_file {
        anyhow::bail!(
            "output would overwrite the source texture {}",
            source.display()
        );
    }
    Ok(target)
}

fn report_conversion(log: &mut ChangeLog, index: usize, label: &str, converted: &ConvertedTexture) {
    if converted.alpha_added {
        log.add(ChangeItem::info(
            ChangeCode::TextureAlphaAdded,
            ChangeCategory::Texture,
            format!("Image {index}: added alpha channel to {label}"),
        ));
    }
    if converted.was_resized {
        log.add(ChangeItem::info(
            ChangeCode::TextureResized,
            ChangeCategory::Texture,
            format!(
                "Image {index}: resized {label} from {}x{} to {}x{}",
                converted.original_width,
                converted.original_height,
                converted.final_width,
                converted.final_height
            ),
        ));
    }
}

fn skipped(log: &mut ChangeLog, index: usize, err: &anyhow::Error) {
    log.add(ChangeItem::warning(
        ChangeCode::OptionalToolUnavailable,
        ChangeCategory::Tooling,
        format!("Image {index}: texture step skipped: {err:#}"),
    ));
}
