//! Read-only view of a loaded glTF document
//!
//! The reporter only ever queries this view. Entities are stored in flat
//! vectors addressed by index, and the relationships between them live in a
//! [`LinkGraph`] so that usage counts and texture slots can be recovered
//! without walking the source asset again.

use std::fmt;

/// Asset metadata from the top-level `asset` object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Asset {
    pub generator: Option<String>,
    pub version: String,
}

/// A scene and its ordered root nodes
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub name: String,
    /// Indices into [`Document::nodes`]
    pub nodes: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct Node {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub name: String,
    pub primitives: Vec<Primitive>,
}

/// A single draw of a mesh
#[derive(Debug, Clone, Default)]
pub struct Primitive {
    /// Vertex attribute semantic paired with an accessor index
    pub attributes: Vec<(String, usize)>,
    pub indices: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlphaMode {
    #[default]
    Opaque,
    Mask,
    Blend,
}

impl fmt::Display for AlphaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlphaMode::Opaque => "OPAQUE",
            AlphaMode::Mask => "MASK",
            AlphaMode::Blend => "BLEND",
        };
        f.write_str(name)
    }
}

impl From<gltf::material::AlphaMode> for AlphaMode {
    fn from(mode: gltf::material::AlphaMode) -> Self {
        match mode {
            gltf::material::AlphaMode::Opaque => AlphaMode::Opaque,
            gltf::material::AlphaMode::Mask => AlphaMode::Mask,
            gltf::material::AlphaMode::Blend => AlphaMode::Blend,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Material {
    pub name: String,
    pub alpha_mode: AlphaMode,
}

/// An image payload referenced by one or more materials
#[derive(Debug, Clone, Default)]
pub struct Texture {
    pub name: String,
    pub uri: Option<String>,
    pub mime_type: Option<String>,
    /// Size of the encoded image in bytes
    pub byte_length: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Animation {
    pub name: String,
    pub channels: Vec<Channel>,
    pub samplers: Vec<Sampler>,
}

#[derive(Debug, Clone, Default)]
pub struct Channel {
    /// Animated property: `translation`, `rotation`, `scale` or `weights`
    pub path: String,
}

/// Keyframe times (`input`) and values (`output`), both accessor indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    pub input: usize,
    pub output: usize,
}

/// A typed array over buffer data
#[derive(Debug, Clone, Default)]
pub struct Accessor {
    pub name: String,
    /// Tightly packed length: element count times element size
    pub byte_length: usize,
    pub min: Option<Vec<f64>>,
    pub max: Option<Vec<f64>>,
}

impl Accessor {
    /// First component of the declared minimum, if any
    pub fn min_scalar(&self) -> Option<f64> {
        self.min.as_ref().and_then(|m| m.first().copied())
    }

    /// First component of the declared maximum, if any
    pub fn max_scalar(&self) -> Option<f64> {
        self.max.as_ref().and_then(|m| m.first().copied())
    }
}

/// Typed reference to an entity in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Root,
    Scene(usize),
    Node(usize),
    Mesh(usize),
    /// Mesh index and primitive index within that mesh
    Primitive(usize, usize),
    Material(usize),
    Texture(usize),
    Animation(usize),
    Accessor(usize),
}

/// Directed, named edge from a parent entity to a child entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub parent: Entity,
    pub child: Entity,
    pub name: String,
}

/// Every edge in the document, in insertion order
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    links: Vec<Link>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, parent: Entity, child: Entity, name: impl Into<String>) {
        self.links.push(Link {
            parent,
            child,
            name: name.into(),
        });
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn links_from(&self, parent: Entity) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |link| link.parent == parent)
    }

    pub fn links_to(&self, child: Entity) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(move |link| link.child == child)
    }

    /// Distinct parents of `child`, in the order they were first linked
    pub fn parents_of(&self, child: Entity) -> Vec<Entity> {
        let mut parents: Vec<Entity> = Vec::new();
        for link in self.links_to(child) {
            if !parents.contains(&link.parent) {
                parents.push(link.parent);
            }
        }
        parents
    }

    /// Number of distinct non-root parents referencing `child`
    pub fn instance_count(&self, child: Entity) -> usize {
        self.parents_of(child)
            .into_iter()
            .filter(|parent| *parent != Entity::Root)
            .count()
    }
}

/// A fully loaded glTF document
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub asset: Asset,
    pub extensions_used: Vec<String>,
    pub extensions_required: Vec<String>,
    pub scenes: Vec<Scene>,
    pub nodes: Vec<Node>,
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
    pub textures: Vec<Texture>,
    pub animations: Vec<Animation>,
    pub accessors: Vec<Accessor>,
    pub links: LinkGraph,
}

impl Document {
    pub fn accessor(&self, index: usize) -> Option<&Accessor> {
        self.accessors.get(index)
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }
}
