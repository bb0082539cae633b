//! Builds a [`Document`] view from a `.gltf` or `.glb` file
//!
//! Parsing and buffer resolution are delegated to the `gltf` crate. This
//! module only copies out what the reports need and records the links
//! between entities.
//!
//! Material-to-texture links cover the five core slots only. Textures
//! referenced solely from material extensions (clearcoat, sheen,
//! transmission, ...) get no slot name and an instance count of zero.

use crate::lib::document::{
    Accessor, Animation, Asset, Channel, Document, Entity, LinkGraph, Material, Mesh, Node,
    Primitive, Sampler, Scene, Texture,
};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading a document
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("Failed to open glTF at {path}: {source}")]
    Open { path: PathBuf, source: gltf::Error },
    #[error("Failed to parse glTF: {0}")]
    Parse(#[source] gltf::Error),
    #[error("Failed to load buffers: {0}")]
    Buffers(#[source] gltf::Error),
}

/// Load a document from disk, resolving external buffers next to the file
pub fn load(path: &Path) -> Result<Document, InspectError> {
    let gltf = gltf::Gltf::open(path).map_err(|e| InspectError::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    debug!("Opened {:?}, resolving resources from {:?}", path, base);
    from_gltf(gltf, Some(base))
}

/// Load a document from an in-memory `.gltf` or `.glb` payload
pub fn load_from_slice(bytes: &[u8], base: Option<&Path>) -> Result<Document, InspectError> {
    let gltf = gltf::Gltf::from_slice(bytes).map_err(InspectError::Parse)?;
    from_gltf(gltf, base)
}

fn from_gltf(gltf: gltf::Gltf, base: Option<&Path>) -> Result<Document, InspectError> {
    let gltf::Gltf { document, blob } = gltf;
    let buffers =
        gltf::import_buffers(&document, base, blob).map_err(InspectError::Buffers)?;

    let mut links = LinkGraph::new();
    let json = document.as_json();

    let asset = Asset {
        generator: json.asset.generator.clone(),
        version: json.asset.version.clone(),
    };

    let nodes: Vec<Node> = document
        .nodes()
        .map(|node| {
            links.add(Entity::Root, Entity::Node(node.index()), "node");
            if let Some(mesh) = node.mesh() {
                links.add(Entity::Node(node.index()), Entity::Mesh(mesh.index()), "mesh");
            }
            Node {
                name: node.name().unwrap_or_default().to_string(),
            }
        })
        .collect();

    let scenes: Vec<Scene> = document
        .scenes()
        .map(|scene| {
            links.add(Entity::Root, Entity::Scene(scene.index()), "scene");
            let roots: Vec<usize> = scene.nodes().map(|n| n.index()).collect();
            for &root in &roots {
                links.add(Entity::Scene(scene.index()), Entity::Node(root), "child");
            }
            Scene {
                name: scene.name().unwrap_or_default().to_string(),
                nodes: roots,
            }
        })
        .collect();

    let mut accessors: Vec<Accessor> = document
        .accessors()
        .map(|accessor| {
            links.add(Entity::Root, Entity::Accessor(accessor.index()), "accessor");
            Accessor {
                name: accessor.name().unwrap_or_default().to_string(),
                byte_length: accessor.count() * accessor.size(),
                min: accessor.min().as_ref().and_then(json_numbers),
                max: accessor.max().as_ref().and_then(json_numbers),
            }
        })
        .collect();

    let meshes: Vec<Mesh> = document
        .meshes()
        .map(|mesh| {
            links.add(Entity::Root, Entity::Mesh(mesh.index()), "mesh");
            let primitives = mesh
                .primitives()
                .map(|prim| {
                    let owner = Entity::Primitive(mesh.index(), prim.index());
                    links.add(Entity::Mesh(mesh.index()), owner, "primitive");
                    if let Some(material) = prim.material().index() {
                        links.add(owner, Entity::Material(material), "material");
                    }
                    let attributes: Vec<(String, usize)> = prim
                        .attributes()
                        .map(|(semantic, accessor)| {
                            let semantic = semantic.to_string();
                            links.add(owner, Entity::Accessor(accessor.index()), semantic.clone());
                            (semantic, accessor.index())
                        })
                        .collect();
                    let indices = prim.indices().map(|accessor| {
                        links.add(owner, Entity::Accessor(accessor.index()), "indices");
                        accessor.index()
                    });
                    Primitive {
                        attributes,
                        indices,
                    }
                })
                .collect();
            Mesh {
                name: mesh.name().unwrap_or_default().to_string(),
                primitives,
            }
        })
        .collect();

    let materials: Vec<Material> = document
        .materials()
        .filter_map(|material| {
            let index = material.index()?;
            links.add(Entity::Root, Entity::Material(index), "material");
            let owner = Entity::Material(index);
            let pbr = material.pbr_metallic_roughness();
            let slots = [
                ("baseColorTexture", pbr.base_color_texture().map(|t| t.texture())),
                (
                    "metallicRoughnessTexture",
                    pbr.metallic_roughness_texture().map(|t| t.texture()),
                ),
                ("normalTexture", material.normal_texture().map(|t| t.texture())),
                ("occlusionTexture", material.occlusion_texture().map(|t| t.texture())),
                ("emissiveTexture", material.emissive_texture().map(|t| t.texture())),
            ];
            for (slot, texture) in slots {
                if let Some(texture) = texture {
                    links.add(owner, Entity::Texture(texture.source().index()), slot);
                }
            }
            Some(Material {
                name: material.name().unwrap_or_default().to_string(),
                alpha_mode: material.alpha_mode().into(),
            })
        })
        .collect();

    let textures: Vec<Texture> = document
        .images()
        .map(|image| {
            links.add(Entity::Root, Entity::Texture(image.index()), "texture");
            let name = image.name().unwrap_or_default().to_string();
            match image.source() {
                gltf::image::Source::View { view, mime_type } => Texture {
                    name,
                    uri: None,
                    mime_type: Some(mime_type.to_string()),
                    byte_length: view.length(),
                },
                gltf::image::Source::Uri { uri, mime_type } => Texture {
                    name,
                    uri: Some(uri.to_string()),
                    mime_type: mime_type
                        .map(str::to_string)
                        .or_else(|| infer_mime_type(uri)),
                    byte_length: uri_byte_length(uri, base),
                },
            }
        })
        .collect();

    let animations: Vec<Animation> = json
        .animations
        .iter()
        .enumerate()
        .map(|(index, animation)| {
            links.add(Entity::Root, Entity::Animation(index), "animation");
            let samplers: Vec<Sampler> = animation
                .samplers
                .iter()
                .map(|sampler| {
                    let input = sampler.input.value();
                    let output = sampler.output.value();
                    links.add(Entity::Animation(index), Entity::Accessor(input), "input");
                    links.add(Entity::Animation(index), Entity::Accessor(output), "output");
                    Sampler { input, output }
                })
                .collect();
            let channels = animation
                .channels
                .iter()
                .map(|channel| Channel {
                    path: target_path(&channel.target.path),
                })
                .collect();
            Animation {
                name: animation.name.clone().unwrap_or_default(),
                channels,
                samplers,
            }
        })
        .collect();

    // Inputs are required to declare bounds, but not every exporter does.
    for sampler in animations.iter().flat_map(|a| a.samplers.iter()) {
        let Some(accessor) = accessors.get_mut(sampler.input) else {
            continue;
        };
        if accessor.min.is_some() && accessor.max.is_some() {
            continue;
        }
        let Some(source) = document.accessors().nth(sampler.input) else {
            continue;
        };
        if let Some((min, max)) = read_scalar_bounds(source, &buffers) {
            debug!(
                "Computed bounds [{}, {}] for accessor {}",
                min, max, sampler.input
            );
            accessor.min = Some(vec![min]);
            accessor.max = Some(vec![max]);
        }
    }

    Ok(Document {
        asset,
        extensions_used: document.extensions_used().map(str::to_string).collect(),
        extensions_required: document.extensions_required().map(str::to_string).collect(),
        scenes,
        nodes,
        meshes,
        materials,
        textures,
        animations,
        accessors,
        links,
    })
}

fn json_numbers(value: &serde_json::Value) -> Option<Vec<f64>> {
    let values = value.as_array()?;
    Some(values.iter().filter_map(|v| v.as_f64()).collect())
}

fn read_scalar_bounds(
    accessor: gltf::Accessor<'_>,
    buffers: &[gltf::buffer::Data],
) -> Option<(f64, f64)> {
    let iter = gltf::accessor::Iter::<f32>::new(accessor, |buffer| {
        buffers.get(buffer.index()).map(|data| &data.0[..])
    })?;
    iter.fold(None, |bounds, value| {
        let value = f64::from(value);
        Some(match bounds {
            None => (value, value),
            Some((min, max)) => (f64::min(min, value), f64::max(max, value)),
        })
    })
}

fn target_path(path: &gltf::json::validation::Checked<gltf::json::animation::Property>) -> String {
    use gltf::json::animation::Property;
    use gltf::json::validation::Checked;

    match path {
        Checked::Valid(Property::Translation) => "translation",
        Checked::Valid(Property::Rotation) => "rotation",
        Checked::Valid(Property::Scale) => "scale",
        Checked::Valid(Property::MorphTargetWeights) => "weights",
        Checked::Invalid => "invalid",
    }
    .to_string()
}

/// Guess a MIME type from the extension of an image URI
pub fn infer_mime_type(uri: &str) -> Option<String> {
    if let Some(header) = uri.strip_prefix("data:") {
        let mime = header.split([';', ',']).next().unwrap_or_default();
        return (!mime.is_empty()).then(|| mime.to_string());
    }

    let extension = Path::new(uri)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())?;
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "ktx2" => "image/ktx2",
        _ => return None,
    };
    Some(mime.to_string())
}

/// Size of the image payload an image URI refers to
///
/// `data:` URIs are measured from their encoded payload without decoding.
/// Relative file URIs are resolved against `base`.
pub fn uri_byte_length(uri: &str, base: Option<&Path>) -> usize {
    if let Some(data) = uri.strip_prefix("data:") {
        let Some((header, payload)) = data.split_once(',') else {
            return 0;
        };
        if header.ends_with(";base64") {
            return base64_decoded_len(payload);
        }
        return payload.len();
    }

    let path = match base {
        Some(base) => base.join(uri),
        None => PathBuf::from(uri),
    };
    match fs::metadata(&path) {
        Ok(metadata) => metadata.len() as usize,
        Err(e) => {
            warn!("Unable to read image {:?}: {}", path, e);
            0
        }
    }
}

fn base64_decoded_len(payload: &str) -> usize {
    let payload = payload.trim_end();
    let padding = payload.bytes().rev().take_while(|&b| b == b'=').count();
    ((payload.len() / 4) * 3).saturating_sub(padding.min(2))
}
