//! Round-trip harness over a corpus of sample assets
//!
//! Every selected (asset, variant) file is passed through a [`Transformer`]
//! one at a time, in manifest order. A failed transform is reported and the
//! run moves on to the next file.

use crate::lib::manifest::{AssetEntry, Manifest};
use crate::lib::output::OutputSink;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Program used when no transform command is configured
pub const DEFAULT_PROGRAM: &str = "gltf-transform";

/// Arguments placed before the source and destination paths
pub const DEFAULT_ARGS: [&str; 1] = ["copy"];

/// Errors from a single transform invocation
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} exited with {status}{}", stderr_suffix(.stderr))]
    Failed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("failed to create {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0}")]
    Other(String),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Something that copies `src` to `dst`, rewriting it on the way
pub trait Transformer {
    fn transform(&self, src: &Path, dst: &Path) -> Result<(), TransformError>;
}

/// Runs an external command as `program args... src dst`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTransformer {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for CommandTransformer {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            args: DEFAULT_ARGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CommandTransformer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from a command line split into words: program first
    pub fn from_words(words: &[String]) -> Option<Self> {
        let (program, args) = words.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }
}

impl Transformer for CommandTransformer {
    fn transform(&self, src: &Path, dst: &Path) -> Result<(), TransformError> {
        debug!("Running {} {:?} {:?} {:?}", self.program, self.args, src, dst);
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(src)
            .arg(dst)
            .output()
            .map_err(|e| TransformError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(TransformError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Outcome counts for a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundtripSummary {
    pub passed: usize,
    pub failed: usize,
    /// Variants present in the manifest but excluded by the filter
    pub skipped: usize,
}

impl RoundtripSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Replace a trailing `.gltf` or `.glb` with `.transformed.glb`
pub fn transformed_filename(filename: &str) -> String {
    for extension in [".gltf", ".glb"] {
        if let Some(stem) = filename.strip_suffix(extension) {
            return format!("{stem}.transformed.glb");
        }
    }
    filename.to_string()
}

/// Source and destination for one (asset, variant) file
pub fn asset_paths(
    source_dir: &Path,
    target_dir: &Path,
    asset: &AssetEntry,
    variant: &str,
    filename: &str,
) -> (PathBuf, PathBuf) {
    let src = source_dir.join(&asset.name).join(variant).join(filename);
    let dst = target_dir
        .join(&asset.name)
        .join(variant)
        .join(transformed_filename(filename));
    (src, dst)
}

/// Transform every selected variant of every asset in `manifest`
pub fn run(
    manifest: &Manifest,
    source_dir: &Path,
    target_dir: &Path,
    variants: &[String],
    transformer: &dyn Transformer,
    sink: &mut dyn OutputSink,
) -> RoundtripSummary {
    let mut summary = RoundtripSummary::default();
    let total = manifest.len();

    for (index, asset) in manifest.assets.iter().enumerate() {
        sink.line(&format!("📦 {} ({} / {})", asset.name, index + 1, total));

        for (variant, filename) in &asset.variants {
            if !variants.iter().any(|v| v == variant) {
                summary.skipped += 1;
                continue;
            }

            let (src, dst) = asset_paths(source_dir, target_dir, asset, variant, filename);
            match transform_one(transformer, &src, &dst) {
                Ok(()) => {
                    summary.passed += 1;
                    sink.line(&format!("    - ✅ {variant}/{filename}"));
                }
                Err(e) => {
                    summary.failed += 1;
                    sink.error(&format!("    - ⛔️ {variant}/{filename}: {e}"));
                }
            }
        }

        sink.line("");
    }

    info!(
        "Round trip finished: {} passed, {} failed, {} skipped",
        summary.passed, summary.failed, summary.skipped
    );
    sink.line("🍻  Done.");
    summary
}

fn transform_one(
    transformer: &dyn Transformer,
    src: &Path,
    dst: &Path,
) -> Result<(), TransformError> {
    if let Some(parent) = dst.parent() {
        std::fs::create_dir_all(parent).map_err(|e| TransformError::OutputDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    transformer.transform(src, dst)
}
