// Platform profile guarantees, checked on written output

use serde_json::Value;
use tempfile::TempDir;
use voxbridge::{convert_one, ChangeCode, ConvertOptions};

mod common;

fn convert(profile: &str) -> (Value, voxbridge::ConversionStats) {
    let tmp = TempDir::new().unwrap();
    let stats = convert_one(
        &common::messy_glb(),
        &tmp.path().join("messy.gltf"),
        profile,
        &ConvertOptions::default(),
    )
    .unwrap();
    (common::read_json(&stats.output_path), stats)
}

fn material_names(out: &Value) -> Vec<String> {
    out["materials"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn roblox_output_obeys_platform_rules() {
    let (out, stats) = convert("roblox");

    assert_eq!(out["extensionsUsed"], serde_json::json!([]));
    assert!(out.get("extensionsRequired").is_none());

    for node in out["nodes"].as_array().unwrap() {
        assert!(node["name"].as_str().unwrap().chars().count() <= 32);
    }
    for material in out["materials"].as_array().unwrap() {
        assert!(material.get("extensions").is_none());
        if let Some(pbr) = material.get("pbrMetallicRoughness") {
            assert!(pbr.get("metallicFactor").is_none());
        }
        assert!(material["name"].as_str().unwrap().chars().count() <= 50);
    }

    assert_eq!(stats.changes.count(ChangeCode::MetallicClamped), 1);
    assert_eq!(stats.changes.count(ChangeCode::MetallicRemoved), 2);
    assert_eq!(stats.changes.count(ChangeCode::MissingTexcoord), 1);
}

#[test]
fn roblox_keeps_roughness() {
    let (out, _) = convert("roblox");
    assert_eq!(
        out["materials"][0]["pbrMetallicRoughness"]["roughnessFactor"].as_f64(),
        Some(0.3)
    );
}

#[test]
fn material_names_are_cleaned_for_every_profile() {
    let (roblox, _) = convert("roblox");
    let (unity, _) = convert("unity");
    assert_eq!(material_names(&roblox), material_names(&unity));

    insta::assert_yaml_snapshot!(material_names(&roblox), @r###"
    ---
    - Material_1_Special
    - Material
    - GoodName
    - Another_Bad_Name
    "###);
}

#[test]
fn unity_keeps_material_extensions_and_node_names() {
    let (out, stats) = convert("unity");
    assert!(out["materials"][0].get("extensions").is_some());
    assert_eq!(
        out["nodes"][0]["name"],
        "this_node_name_is_far_too_long_for_roblox_studio"
    );
    assert_eq!(out["materials"][1]["pbrMetallicRoughness"]["metallicFactor"], 0.1);
    assert!(!stats.changes.contains(ChangeCode::MissingTexcoord));
}

#[test]
fn vertex_count_thresholds_differ_by_profile() {
    let mut doc = common::messy_json();
    doc["accessors"][0]["count"] = serde_json::json!(20_000);
    doc["bufferViews"][0]["byteLength"] = serde_json::json!(240_000);
    doc["buffers"][0]["byteLength"] = serde_json::json!(240_000);
    let glb = common::build_glb(&doc, Some(&vec![0u8; 240_000]));

    let tmp = TempDir::new().unwrap();
    let roblox = convert_one(&glb, &tmp.path().join("r.gltf"), "roblox", &ConvertOptions::default())
        .unwrap();
    let unity = convert_one(&glb, &tmp.path().join("u.gltf"), "unity", &ConvertOptions::default())
        .unwrap();

    assert_eq!(roblox.changes.count(ChangeCode::HighVertexCount), 1);
    assert_eq!(unity.changes.count(ChangeCode::HighVertexCount), 0);
}
