//! Integration tests: load glTF files from disk and report on them

use gltf_inspect::lib::document::Entity;
use gltf_inspect::lib::loader;
use gltf_inspect::lib::output::{CaptureSink, Channel};
use gltf_inspect::lib::report::{
    inspect, list_animations, list_materials, list_meshes, list_scenes, list_textures,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCENE_JSON: &str = r#"{
    "asset": { "version": "2.0", "generator": "gltf-inspect tests" },
    "scene": 0,
    "scenes": [{ "name": "Scene", "nodes": [0, 1] }],
    "nodes": [
        { "name": "Root", "mesh": 0 },
        { "name": "Copy", "mesh": 0, "translation": [2.0, 0.0, 0.0] }
    ],
    "meshes": [{
        "name": "Triangle",
        "primitives": [
            { "attributes": { "POSITION": 0 }, "indices": 1, "material": 0 },
            { "attributes": { "POSITION": 0 }, "indices": 1, "material": 0 }
        ]
    }],
    "materials": [{
        "name": "Painted",
        "alphaMode": "BLEND",
        "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } },
        "emissiveTexture": { "index": 0 }
    }],
    "textures": [{ "source": 0 }],
    "images": [{ "name": "albedo", "uri": "albedo.png" }],
    "animations": [{
        "name": "Slide",
        "channels": [{ "sampler": 0, "target": { "node": 0, "path": "translation" } }],
        "samplers": [{ "input": 2, "output": 3, "interpolation": "LINEAR" }]
    }],
    "buffers": [{ "uri": "triangle.bin", "byteLength": 76 }],
    "bufferViews": [
        { "buffer": 0, "byteOffset": 0, "byteLength": 36, "target": 34962 },
        { "buffer": 0, "byteOffset": 36, "byteLength": 6, "target": 34963 },
        { "buffer": 0, "byteOffset": 44, "byteLength": 8 },
        { "buffer": 0, "byteOffset": 52, "byteLength": 24 }
    ],
    "accessors": [
        { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
          "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
        { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" },
        { "bufferView": 2, "componentType": 5126, "count": 2, "type": "SCALAR",
          "min": [0.0], "max": [2.5] },
        { "bufferView": 3, "componentType": 5126, "count": 2, "type": "VEC3" }
    ]
}"#;

fn buffer_bytes() -> Vec<u8> {
    let mut bytes = Vec::with_capacity(76);
    for v in [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    for i in [0u16, 1, 2] {
        bytes.extend_from_slice(&i.to_le_bytes());
    }
    bytes.extend_from_slice(&[0, 0]);
    for t in [0.0f32, 2.5] {
        bytes.extend_from_slice(&t.to_le_bytes());
    }
    for v in [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

fn write_scene(dir: &TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("triangle.gltf");
    fs::write(&path, json).unwrap();
    fs::write(dir.path().join("triangle.bin"), buffer_bytes()).unwrap();
    fs::write(dir.path().join("albedo.png"), vec![0u8; 300]).unwrap();
    path
}

fn load_scene() -> (TempDir, gltf_inspect::Document) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scene(&dir, SCENE_JSON);
    let doc = loader::load(&path).expect("Failed to load test scene");
    (dir, doc)
}

#[test]
fn test_load_populates_document() {
    let (_dir, doc) = load_scene();

    assert_eq!(doc.asset.version, "2.0");
    assert_eq!(doc.asset.generator.as_deref(), Some("gltf-inspect tests"));
    assert!(doc.extensions_used.is_empty());
    assert_eq!(doc.scenes.len(), 1);
    assert_eq!(doc.meshes[0].primitives.len(), 2);
    assert_eq!(doc.accessors[0].byte_length, 36);
    assert_eq!(doc.accessors[1].byte_length, 6);
    assert_eq!(doc.textures[0].byte_length, 300);
    assert_eq!(doc.textures[0].mime_type.as_deref(), Some("image/png"));
    assert_eq!(doc.animations[0].channels[0].path, "translation");
}

#[test]
fn test_links_record_usage() {
    let (_dir, doc) = load_scene();

    assert_eq!(doc.links.instance_count(Entity::Mesh(0)), 2);
    assert_eq!(doc.links.instance_count(Entity::Material(0)), 2);
    assert_eq!(doc.links.instance_count(Entity::Texture(0)), 1);
    assert!(doc.links.parents_of(Entity::Texture(0)).contains(&Entity::Root));
}

#[test]
fn test_reports_for_loaded_scene() {
    let (_dir, doc) = load_scene();

    assert_eq!(list_scenes(&doc).rows[0], vec!["0", "Scene", "Root"]);
    // Both primitives share the same position and index accessors
    assert_eq!(list_meshes(&doc).rows[0], vec!["0", "Triangle", "2", "84 B"]);
    assert_eq!(
        list_materials(&doc).rows[0],
        vec!["0", "Painted", "2", "baseColorTexture, emissiveTexture", "BLEND"]
    );
    assert_eq!(
        list_textures(&doc).rows[0],
        vec![
            "0",
            "albedo",
            "albedo.png",
            "baseColorTexture, emissiveTexture",
            "1",
            "image/png",
            "300 B"
        ]
    );
    assert_eq!(
        list_animations(&doc).rows[0],
        vec!["0", "Slide", "1", "1", "2.500s", "32 B"]
    );
}

#[test]
fn test_inspect_output() {
    let (_dir, doc) = load_scene();
    let mut sink = CaptureSink::new();
    inspect(&doc, &mut sink);

    let out = sink.stdout();
    assert!(out.contains("│ generator          │ gltf-inspect tests │"));
    assert!(out.contains("│ extensionsUsed     │ none               │"));
    assert!(out.contains("│ extensionsRequired │ none               │"));
    for header in [" SCENES", " MESHES", " MATERIALS", " TEXTURES", " ANIMATIONS"] {
        assert!(out.contains(header), "missing section {header}");
    }
    assert!(!out.contains("found."));

    let warnings = sink.on(Channel::Warn);
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].starts_with("Estimated mesh sizes"));
    assert!(warnings[1].starts_with("Estimated animation sizes"));
}

#[test]
fn test_inspect_is_deterministic() {
    let (_dir, doc) = load_scene();
    let mut first = CaptureSink::new();
    let mut second = CaptureSink::new();
    inspect(&doc, &mut first);
    inspect(&doc, &mut second);
    assert_eq!(first.entries, second.entries);
}

#[test]
fn test_missing_animation_bounds_are_computed() {
    let json = SCENE_JSON.replace(
        r#""count": 2, "type": "SCALAR",
          "min": [0.0], "max": [2.5] }"#,
        r#""count": 2, "type": "SCALAR" }"#,
    );
    assert_ne!(json, SCENE_JSON);

    let dir = tempfile::tempdir().unwrap();
    let path = write_scene(&dir, &json);
    let doc = loader::load(&path).unwrap();

    assert_eq!(doc.accessors[2].min, Some(vec![0.0]));
    assert_eq!(doc.accessors[2].max, Some(vec![2.5]));
    assert_eq!(list_animations(&doc).rows[0][4], "2.500s");
}

#[test]
fn test_scene_without_content_reports_every_category() {
    let doc = loader::load_from_slice(br#"{"asset": {"version": "2.0"}}"#, None).unwrap();
    let mut sink = CaptureSink::new();
    inspect(&doc, &mut sink);

    let out = sink.stdout();
    for category in ["scenes", "meshes", "materials", "textures", "animations"] {
        assert!(out.contains(&format!("No {category} found.")));
    }
    assert!(sink.on(Channel::Warn).is_empty());
}

#[test]
fn test_missing_file_is_error() {
    let result = loader::load(Path::new("/nonexistent/scene.gltf"));
    assert!(result.is_err());
}

#[test]
fn test_texture_outside_core_slots_is_unlinked() {
    let json = r#"{
        "asset": { "version": "2.0" },
        "materials": [{ "name": "Bare" }],
        "textures": [{ "source": 0 }],
        "images": [{ "uri": "detail.png" }]
    }"#;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bare.gltf");
    fs::write(&path, json).unwrap();
    fs::write(dir.path().join("detail.png"), vec![0u8; 12]).unwrap();

    let doc = loader::load(&path).unwrap();
    assert_eq!(doc.links.instance_count(Entity::Texture(0)), 0);
    assert_eq!(list_materials(&doc).rows[0][3], "");
    assert_eq!(list_textures(&doc).rows[0][3], "");
    assert_eq!(list_textures(&doc).rows[0][4], "0");
}
