//! Platform-enforced and recommended limits for exported assets.

/// Maximum material name length accepted by Roblox Studio.
pub const ROBLOX_MAX_MATERIAL_NAME: usize = 50;

/// Maximum node (instance) name length kept for Roblox.
pub const ROBLOX_MAX_NODE_NAME: usize = 32;

/// Longest texture side Roblox accepts without downscaling.
pub const ROBLOX_MAX_TEXTURE_DIMENSION: u32 = 1024;

/// Highest metallic factor kept before the factor is dropped for Roblox.
pub const ROBLOX_MAX_METALLIC: f64 = 0.5;

/// Vertex count above which a Roblox mesh gets a performance warning.
pub const ROBLOX_VERTEX_WARNING: u64 = 10_000;

/// Vertex count above which a Unity mesh gets a performance warning.
pub const UNITY_VERTEX_WARNING: u64 = 50_000;

/// Roblox accepts no glTF extensions.
pub const ROBLOX_ALLOWED_EXTENSIONS: &[&str] = &[];
