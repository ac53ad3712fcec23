// Common test utilities and helpers
#![allow(dead_code)]

use std::path::Path;

use serde_json::{json, Value};

pub const GLB_MAGIC: u32 = 0x46546C67;
pub const CHUNK_TYPE_JSON: u32 = 0x4E4F534A;
pub const CHUNK_TYPE_BIN: u32 = 0x004E4942;

/// Assemble a GLB in memory from a JSON document and an optional BIN chunk.
pub fn build_glb(json: &Value, bin: Option<&[u8]>) -> Vec<u8> {
    let mut json_bytes = serde_json::to_vec(json).unwrap();
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }

    let mut out = Vec::new();
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_TYPE_JSON.to_le_bytes());
    out.extend_from_slice(&json_bytes);
    if let Some(bin) = bin {
        let mut bin = bin.to_vec();
        while bin.len() % 4 != 0 {
            bin.push(0);
        }
        out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        out.extend_from_slice(&CHUNK_TYPE_BIN.to_le_bytes());
        out.extend_from_slice(&bin);
    }
    let total = out.len() as u32;
    out[8..12].copy_from_slice(&total.to_le_bytes());
    out
}

/// Binary payload of the triangle fixture: positions, normals, indices.
pub fn triangle_bin() -> Vec<u8> {
    let mut bin = Vec::new();
    for v in [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0] {
        bin.extend_from_slice(&v.to_le_bytes());
    }
    for v in [0.0f32, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0] {
        bin.extend_from_slice(&v.to_le_bytes());
    }
    for i in [0u16, 1, 2] {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    bin.extend_from_slice(&[0, 0]);
    bin
}

/// A well-formed single-triangle asset with fields the pipeline does not
/// model (scenes, samplers, extras) so round trips can be checked.
pub fn triangle_json() -> Value {
    json!({
        "asset": {"version": "2.0", "generator": "VoxEdit 1.0"},
        "scene": 0,
        "scenes": [{"name": "Scene", "nodes": [0]}],
        "nodes": [{
            "name": "Voxel_Root",
            "mesh": 0,
            "translation": [0.1, -2.5, 3.0],
            "extras": {"voxel_size": 0.125}
        }],
        "meshes": [{
            "name": "Triangle",
            "primitives": [{
                "attributes": {"POSITION": 0, "NORMAL": 1},
                "indices": 2,
                "material": 0,
                "mode": 4
            }]
        }],
        "materials": [{
            "name": "Palette",
            "doubleSided": true,
            "pbrMetallicRoughness": {
                "baseColorFactor": [1, 0.5, 0.25, 1],
                "metallicFactor": 0.123456789012345,
                "roughnessFactor": 0.87654321
            }
        }],
        "accessors": [
            {"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
             "min": [0, 0, 0], "max": [1, 1, 0]},
            {"bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3"},
            {"bufferView": 2, "componentType": 5123, "count": 3, "type": "SCALAR"}
        ],
        "bufferViews": [
            {"buffer": 0, "byteOffset": 0, "byteLength": 36, "target": 34962},
            {"buffer": 0, "byteOffset": 36, "byteLength": 36, "target": 34962},
            {"buffer": 0, "byteOffset": 72, "byteLength": 6, "target": 34963}
        ],
        "buffers": [{"byteLength": 80}],
        "samplers": [{"magFilter": 9728, "minFilter": 9728}]
    })
}

pub fn triangle_glb() -> Vec<u8> {
    build_glb(&triangle_json(), Some(&triangle_bin()))
}

/// An asset that breaks every Roblox rule at once.
pub fn messy_json() -> Value {
    json!({
        "asset": {"version": "2.0"},
        "extensionsUsed": ["KHR_materials_unlit", "KHR_texture_transform", "VOX_palette"],
        "extensionsRequired": ["VOX_palette"],
        "nodes": [
            {"name": "this_node_name_is_far_too_long_for_roblox_studio", "mesh": 0},
            {"name": "short"}
        ],
        "meshes": [{"primitives": [{"attributes": {"POSITION": 0}, "material": 0}]}],
        "materials": [
            {
                "name": "Material #1 (Special!)",
                "pbrMetallicRoughness": {"metallicFactor": 0.9, "roughnessFactor": 0.3},
                "extensions": {"KHR_materials_unlit": {}}
            },
            {"name": "", "pbrMetallicRoughness": {"metallicFactor": 0.1}},
            {"name": "GoodName"},
            {"name": "Another-Bad*Name"}
        ],
        "accessors": [{"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3"}],
        "bufferViews": [{"buffer": 0, "byteLength": 36}],
        "buffers": [{"byteLength": 36}]
    })
}

pub fn messy_glb() -> Vec<u8> {
    build_glb(&messy_json(), Some(&[0u8; 36]))
}

/// Read a written `.gltf` back as JSON.
pub fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

/// Route library logs to the test harness output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
