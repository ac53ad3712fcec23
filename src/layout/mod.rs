//! Byte-layout normalization: buffer view re-homing and accessor repair.

pub mod reallocator;
pub mod repair;

pub use reallocator::{embedded_payload, reallocate, Reallocation};
pub use repair::{is_consistent, repair_accessors};
