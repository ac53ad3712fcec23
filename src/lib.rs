//! Normalizes glTF 2.0 / GLB assets so they load cleanly in strict importers,
//! then applies Unity or Roblox specific transforms and writes a `.gltf`
//! with an external `.bin` sidecar.

pub mod container;
pub mod convert;
pub mod document;
pub mod error;
pub mod layout;
pub mod output;
pub mod platform;
pub mod texture_pipeline;
pub mod validation;

pub use convert::{
    convert_batch, convert_file, convert_one, BatchEntry, ConversionContext, ConversionStats,
    ConvertOptions,
};
pub use document::{Document, DocumentGraph};
pub use error::{ConvertError, Result};
pub use output::{validate_output, OutputStats, ValidatorCommand, ValidatorOutcome};
pub use platform::{optimize, PlatformProfile};
pub use validation::report::{ChangeCategory, ChangeCode, ChangeItem, ChangeLog, ChangeSeverity};
