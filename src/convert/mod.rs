//! Conversion entry points.
//!
//! One call converts one asset: parse, check references, re-home the
//! embedded payload, repair accessors, optimize for the profile, write, and
//! inspect the result. Everything a stage changes or notices is threaded
//! through a [`ConversionContext`] owned by that call.

pub mod batch;
pub mod options;

use std::path::{Path, PathBuf};

use serde::Serialize;

pub use batch::{convert_batch, BatchEntry};
pub use options::ConvertOptions;

use crate::container;
use crate::document::Document;
use crate::error::{ConvertError, Result};
use crate::layout;
use crate::output::{self, OutputStats, ValidatorOutcome};
use crate::platform::{self, PlatformProfile, TextureContext};
use crate::validation::report::ChangeLog;

/// Per-call state threaded through the pipeline stages.
#[derive(Debug)]
pub struct ConversionContext<'a> {
    pub profile: PlatformProfile,
    pub options: &'a ConvertOptions,
    /// Where the `.gltf` is written.
    pub output_path: PathBuf,
    pub changes: ChangeLog,
}

impl<'a> ConversionContext<'a> {
    pub fn new(output_path: &Path, profile: PlatformProfile, options: &'a ConvertOptions) -> Self {
        Self {
            profile,
            options,
            output_path: output::gltf_output_path(output_path),
            changes: ChangeLog::new(),
        }
    }

    /// Merge a stage's change log.
    pub fn record(&mut self, stage: &str, log: ChangeLog) {
        tracing::debug!(
            stage,
            warnings = log.warning_count,
            infos = log.info_count,
            "Stage finished"
        );
        self.changes.merge(log);
    }

    fn output_dir(&self) -> PathBuf {
        match self.output_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn texture_context(&self) -> TextureContext {
        TextureContext {
            source_dir: self.options.texture_dir.clone(),
            output_dir: Some(self.output_dir()),
            enabled: self.options.process_textures,
        }
    }
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionStats {
    pub output_path: PathBuf,
    /// Sidecar written next to the output, if the asset had binary data.
    pub sidecar_path: Option<PathBuf>,
    pub profile: PlatformProfile,
    #[serde(flatten)]
    pub output: OutputStats,
    pub changes: ChangeLog,
    /// Outcome of the external validator, when one is configured.
    pub validation: Option<ValidatorOutcome>,
}

/// Convert one GLB or glTF JSON asset and write it as `.gltf` + `.bin`.
///
/// `output_path` gets its extension forced to `.gltf`. Unknown profile names
/// use Unity. Only malformed input and I/O failures are errors; everything
/// else is repaired and recorded in [`ConversionStats::changes`].
#[tracing::instrument(skip_all, fields(output = %output_path.display(), profile = profile_name))]
pub fn convert_one(
    input: &[u8],
    output_path: &Path,
    profile_name: &str,
    options: &ConvertOptions,
) -> Result<ConversionStats> {
    let profile = PlatformProfile::from_name(profile_name);
    let mut ctx = ConversionContext::new(output_path, profile, options);

    let (mut document, binary) = if container::is_container(input) {
        let parsed = container::read_container(input)?;
        (parsed.document, parsed.binary)
    } else {
        (Document::from_slice(input)?, None)
    };
    tracing::info!(
        buffer_views = document.buffer_views.len(),
        accessors = document.accessors.len(),
        has_binary = binary.is_some(),
        "Parsed input"
    );

    let integrity = document.graph().integrity_report();
    ctx.record("integrity", integrity);

    let payload = layout::embedded_payload(&document, binary)?;
    let blob = match payload {
        Some(blob) => Some(blob),
        // Buffer 0 declared embedded but nothing backs it
        None if document.buffers.first().map_or(true, |b| b.uri.is_none()) => Some(Vec::new()),
        None => {
            tracing::debug!("Buffers are external, keeping their layout");
            None
        }
    };

    let mut sidecar = None;
    let mut skipped_views = Vec::new();
    if let Some(blob) = blob {
        let name = output::sidecar_name(&ctx.output_path);
        let reallocation = layout::reallocate(&mut document, &blob, &name);
        ctx.record("reallocate", reallocation.changes);
        skipped_views = reallocation.skipped_views;
        if !document.buffers.is_empty() {
            sidecar = Some((ctx.output_dir().join(name), reallocation.sidecar));
        }
    }

    let repair = layout::repair_accessors(&mut document, &skipped_views);
    ctx.record("repair", repair);

    let (document, optimized) = platform::optimize(document, profile, &ctx.texture_context());
    ctx.record("optimize", optimized);

    let sidecar_path = match sidecar {
        Some((path, bytes)) => {
            output::write_sidecar(&bytes, &path)?;
            Some(path)
        }
        None => None,
    };
    output::write_document(&document, &ctx.output_path, options.pretty)?;

    let validation = options
        .validator
        .as_ref()
        .map(|command| output::run_validator(command, &ctx.output_path, &mut ctx.changes));

    let stats = output::validate_output(&ctx.output_path)?;
    tracing::info!(
        warnings = ctx.changes.warning_count,
        infos = ctx.changes.info_count,
        "Converted to {}",
        ctx.output_path.display()
    );

    Ok(ConversionStats {
        output_path: ctx.output_path,
        sidecar_path,
        profile,
        output: stats,
        changes: ctx.changes,
        validation,
    })
}

/// Read `input_path` and convert it to `<output_dir>/<stem>.gltf`.
///
/// Relative textures resolve against the input's directory unless
/// `options.texture_dir` says otherwise.
pub fn convert_file(
    input_path: &Path,
    output_dir: &Path,
    profile_name: &str,
    options: &ConvertOptions,
) -> Result<ConversionStats> {
    let input = std::fs::read(input_path).map_err(|e| ConvertError::io(input_path, e))?;
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());
    let output_path = output_dir.join(format!("{stem}.gltf"));

    let mut options = options.clone();
    if options.texture_dir.is_none() {
        options.texture_dir = input_path.parent().map(Path::to_path_buf);
    }
    convert_one(&input, &output_path, profile_name, &options)
}
