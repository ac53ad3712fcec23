//! Writing the normalized asset and checking what was written.

pub mod inspect;
pub mod serializer;
pub mod validator;

pub use inspect::{validate_output, OutputStats};
pub use serializer::{gltf_output_path, sidecar_name, write_document, write_sidecar};
pub use validator::{run_validator, ValidatorCommand, ValidatorOutcome};
