//! Summary reports over a loaded [`Document`]
//!
//! Each category has its own listing function returning a [`Report`]. The
//! [`inspect`] entry point renders them in a fixed order.

use crate::lib::document::{Document, Entity};
use crate::lib::format::{format_bytes, format_header, format_paragraph};
use crate::lib::output::OutputSink;
use crate::lib::table::Table;
use std::collections::BTreeSet;
use std::fmt;

const MESH_SIZE_WARNING: &str = "Estimated mesh sizes do not include morph targets, and may \
     overestimate total sizes if multiple meshes are sharing the same accessors.";

const ANIMATION_SIZE_WARNING: &str = "Estimated animation sizes may overestimate total sizes \
     if multiple animations are sharing the same accessors.";

/// Link name used for the root's reference to each texture
const ROOT_TEXTURE_LINK: &str = "texture";

/// Report categories, in the order they are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Scenes,
    Meshes,
    Materials,
    Textures,
    Animations,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::Scenes,
        ReportKind::Meshes,
        ReportKind::Materials,
        ReportKind::Textures,
        ReportKind::Animations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Scenes => "scenes",
            ReportKind::Meshes => "meshes",
            ReportKind::Materials => "materials",
            ReportKind::Textures => "textures",
            ReportKind::Animations => "animations",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tabular result for one category
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub kind: ReportKind,
    pub head: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    pub warnings: Vec<&'static str>,
}

impl Report {
    pub fn table(&self) -> Table {
        let mut table = Table::with_head(self.head.iter().copied());
        for row in &self.rows {
            table.push(row.iter().cloned());
        }
        table
    }
}

/// Build the report for a single category
pub fn report(doc: &Document, kind: ReportKind) -> Report {
    match kind {
        ReportKind::Scenes => list_scenes(doc),
        ReportKind::Meshes => list_meshes(doc),
        ReportKind::Materials => list_materials(doc),
        ReportKind::Textures => list_textures(doc),
        ReportKind::Animations => list_animations(doc),
    }
}

/// Print the info table followed by every category report
///
/// A category with no entries prints a "No … found." line and the
/// remaining categories are still reported.
pub fn inspect(doc: &Document, sink: &mut dyn OutputSink) {
    write_lines(sink, &format_header("info"));
    write_table(sink, &info_table(doc));
    sink.line("");

    for kind in ReportKind::ALL {
        let result = report(doc, kind);

        write_lines(sink, &format_header(kind.as_str()));
        if result.rows.is_empty() {
            sink.line(&format!("No {kind} found."));
            sink.line("");
            continue;
        }

        write_table(sink, &result.table());
        for warning in &result.warnings {
            sink.warn(&format_paragraph(warning));
        }
        sink.line("");
    }
}

/// Send multi-line text to the sink one line per call
fn write_lines(sink: &mut dyn OutputSink, text: &str) {
    for line in text.lines() {
        sink.line(line);
    }
}

fn write_table(sink: &mut dyn OutputSink, table: &Table) {
    write_lines(sink, &table.to_string());
}

/// Asset metadata as key/value rows
pub fn info_table(doc: &Document) -> Table {
    let mut table = Table::new();
    table.push([
        "generator".to_string(),
        doc.asset.generator.clone().unwrap_or_default(),
    ]);
    table.push(["version".to_string(), doc.asset.version.clone()]);
    table.push(["extensionsUsed".to_string(), join_or_none(&doc.extensions_used)]);
    table.push([
        "extensionsRequired".to_string(),
        join_or_none(&doc.extensions_required),
    ]);
    table
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}

/// Append `name` unless it is already present
fn push_distinct(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

pub fn list_scenes(doc: &Document) -> Report {
    let rows = doc
        .scenes
        .iter()
        .enumerate()
        .map(|(index, scene)| {
            let root_name = scene
                .nodes
                .first()
                .and_then(|&node| doc.node(node))
                .map(|node| node.name.clone())
                .unwrap_or_default();
            vec![index.to_string(), scene.name.clone(), root_name]
        })
        .collect();

    Report {
        kind: ReportKind::Scenes,
        head: vec!["index", "name", "rootName"],
        rows,
        warnings: Vec::new(),
    }
}

/// Accessor byte length, zero for a dangling index
fn accessor_bytes(doc: &Document, index: usize) -> usize {
    doc.accessor(index).map_or(0, |a| a.byte_length)
}

/// Sum of every attribute and index accessor across all primitives
///
/// Accessors shared between primitives are counted once per use.
pub fn mesh_byte_size(doc: &Document, mesh: usize) -> usize {
    let Some(mesh) = doc.meshes.get(mesh) else {
        return 0;
    };
    mesh.primitives
        .iter()
        .map(|prim| {
            let attributes: usize = prim
                .attributes
                .iter()
                .map(|(_, accessor)| accessor_bytes(doc, *accessor))
                .sum();
            let indices = prim.indices.map_or(0, |i| accessor_bytes(doc, i));
            attributes + indices
        })
        .sum()
}

pub fn list_meshes(doc: &Document) -> Report {
    let rows = doc
        .meshes
        .iter()
        .enumerate()
        .map(|(index, mesh)| {
            vec![
                index.to_string(),
                mesh.name.clone(),
                doc.links.instance_count(Entity::Mesh(index)).to_string(),
                format_bytes(mesh_byte_size(doc, index)),
            ]
        })
        .collect();

    Report {
        kind: ReportKind::Meshes,
        head: vec!["index", "name", "instances", "size"],
        rows,
        warnings: vec![MESH_SIZE_WARNING],
    }
}

/// Slot names of a material's outgoing links to textures
pub fn material_texture_slots(doc: &Document, material: usize) -> Vec<String> {
    let mut slots = Vec::new();
    for link in doc.links.links_from(Entity::Material(material)) {
        if matches!(link.child, Entity::Texture(_)) {
            push_distinct(&mut slots, &link.name);
        }
    }
    slots
}

pub fn list_materials(doc: &Document) -> Report {
    let rows = doc
        .materials
        .iter()
        .enumerate()
        .map(|(index, material)| {
            vec![
                index.to_string(),
                material.name.clone(),
                doc.links.instance_count(Entity::Material(index)).to_string(),
                material_texture_slots(doc, index).join(", "),
                material.alpha_mode.to_string(),
            ]
        })
        .collect();

    Report {
        kind: ReportKind::Materials,
        head: vec!["index", "name", "instances", "textures", "alphaMode"],
        rows,
        warnings: Vec::new(),
    }
}

/// Distinct slot names a texture is bound to, in first-seen order
pub fn texture_slots(doc: &Document, texture: usize) -> Vec<String> {
    let mut slots = Vec::new();
    for link in doc.links.links_to(Entity::Texture(texture)) {
        if link.name != ROOT_TEXTURE_LINK {
            push_distinct(&mut slots, &link.name);
        }
    }
    slots
}

pub fn list_textures(doc: &Document) -> Report {
    let rows = doc
        .textures
        .iter()
        .enumerate()
        .map(|(index, texture)| {
            vec![
                index.to_string(),
                texture.name.clone(),
                texture.uri.clone().unwrap_or_default(),
                texture_slots(doc, index).join(", "),
                doc.links.instance_count(Entity::Texture(index)).to_string(),
                texture.mime_type.clone().unwrap_or_default(),
                format_bytes(texture.byte_length),
            ]
        })
        .collect();

    Report {
        kind: ReportKind::Textures,
        head: vec!["index", "name", "uri", "slots", "instances", "mimeType", "size"],
        rows,
        warnings: Vec::new(),
    }
}

/// Time span covered by an animation's samplers, in seconds
///
/// Animations without samplers, or whose inputs carry no bounds, last
/// zero seconds.
pub fn animation_duration(doc: &Document, animation: usize) -> f64 {
    let Some(animation) = doc.animations.get(animation) else {
        return 0.0;
    };

    let mut min_time = f64::INFINITY;
    let mut max_time = f64::NEG_INFINITY;
    for sampler in &animation.samplers {
        let Some(input) = doc.accessor(sampler.input) else {
            continue;
        };
        if let Some(min) = input.min_scalar() {
            min_time = min_time.min(min);
        }
        if let Some(max) = input.max_scalar() {
            max_time = max_time.max(max);
        }
    }

    let duration = max_time - min_time;
    if duration.is_finite() {
        duration
    } else {
        0.0
    }
}

/// Bytes of every distinct accessor used as a sampler input or output
pub fn animation_byte_size(doc: &Document, animation: usize) -> usize {
    let Some(animation) = doc.animations.get(animation) else {
        return 0;
    };
    let accessors: BTreeSet<usize> = animation
        .samplers
        .iter()
        .flat_map(|sampler| [sampler.input, sampler.output])
        .collect();
    accessors.into_iter().map(|a| accessor_bytes(doc, a)).sum()
}

pub fn list_animations(doc: &Document) -> Report {
    let rows = doc
        .animations
        .iter()
        .enumerate()
        .map(|(index, animation)| {
            vec![
                index.to_string(),
                animation.name.clone(),
                animation.channels.len().to_string(),
                animation.samplers.len().to_string(),
                format!("{:.3}s", animation_duration(doc, index)),
                format_bytes(animation_byte_size(doc, index)),
            ]
        })
        .collect();

    Report {
        kind: ReportKind::Animations,
        head: vec!["index", "name", "channels", "samplers", "duration", "size"],
        rows,
        warnings: vec![ANIMATION_SIZE_WARNING],
    }
}
