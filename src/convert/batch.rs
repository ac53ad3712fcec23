use std::path::{Path, PathBuf};

use super::{convert_file, ConversionStats, ConvertOptions};
use crate::error::Result;

/// Result of converting one file of a batch.
#[derive(Debug)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub result: Result<ConversionStats>,
}

impl BatchEntry {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Convert every input into `output_dir`.
///
/// A failing file is logged and recorded in its entry; the remaining files
/// are still converted.
pub fn convert_batch<P: AsRef<Path>>(
    inputs: &[P],
    output_dir: &Path,
    profile_name: &str,
    options: &ConvertOptions,
) -> Vec<BatchEntry> {
    let mut entries = Vec::with_capacity(inputs.len());
    for input in inputs {
        let input = input.as_ref();
        let result = convert_file(input, output_dir, profile_name, options);
        if let Err(err) = &result {
            tracing::error!("Failed to convert {}: {err}", input.display());
        }
        entries.push(BatchEntry {
            input: input.to_path_buf(),
            result,
        });
    }

    let failed = entries.iter().filter(|e| !e.is_ok()).count();
    tracing::info!(
        total = entries.len(),
        failed,
        "Batch conversion finished"
    );
    entries
}
