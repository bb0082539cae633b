use crate::lib::manifest::MANIFEST_FILENAME;
use crate::lib::roundtrip::CommandTransformer;
use crate::lib::settings::RoundtripSettings;
use clap::Parser;
use std::path::PathBuf;

/// `roundtrip` exit status when at least one transform failed
pub const EXIT_TRANSFORM_FAILED: i32 = 1;

/// `roundtrip` exit status for bad settings, flags, or manifest
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Variants included when neither the flags nor the settings name any
pub const DEFAULT_VARIANTS: [&str; 3] = ["glTF", "glTF-Binary", "glTF-Embedded"];

#[derive(Parser, Debug)]
#[command(name = "gltf-inspect")]
#[command(version, about = "Print summary tables for a glTF or GLB file", long_about = None)]
pub struct InspectArgs {
    /// Path to a .gltf or .glb file
    pub path: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(name = "roundtrip")]
#[command(
    version,
    about = "Copy every sample model through a transform command and report failures",
    long_about = None
)]
pub struct RoundtripArgs {
    /// Directory containing <asset>/<variant>/<file> sources
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Directory transformed files are written to
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Manifest file (defaults to <target>/model-index.json)
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Comma-separated variant names to include
    #[arg(long, value_delimiter = ',')]
    pub variants: Option<Vec<String>>,

    /// Transform command, program first (e.g. --command npx,gltf-transform,copy)
    #[arg(long, value_delimiter = ',')]
    pub command: Option<Vec<String>>,

    /// Settings file (defaults to ./roundtrip.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Fully resolved round-trip run
#[derive(Debug, Clone, PartialEq)]
pub struct RoundtripConfig {
    pub source: PathBuf,
    pub target: PathBuf,
    pub manifest: PathBuf,
    pub variants: Vec<String>,
    pub transformer: CommandTransformer,
}

impl RoundtripArgs {
    /// Merge flags over file settings; flags win
    pub fn resolve(self, settings: RoundtripSettings) -> Result<RoundtripConfig, String> {
        let source = self
            .source
            .or(settings.source)
            .ok_or_else(|| "No source directory given (--source)".to_string())?;
        let target = self
            .target
            .or(settings.target)
            .ok_or_else(|| "No target directory given (--target)".to_string())?;
        let manifest = self
            .manifest
            .or(settings.manifest)
            .unwrap_or_else(|| target.join(MANIFEST_FILENAME));
        let variants = self
            .variants
            .or(settings.variants)
            .unwrap_or_else(|| DEFAULT_VARIANTS.iter().map(|s| s.to_string()).collect());
        let transformer = match self.command.or(settings.command) {
            Some(words) => CommandTransformer::from_words(&words)
                .ok_or_else(|| "Transform command must not be empty".to_string())?,
            None => CommandTransformer::default(),
        };

        Ok(RoundtripConfig {
            source,
            target,
            manifest,
            variants,
            transformer,
        })
    }
}

/// Initialize `env_logger`, showing warnings by default and debug with `-v`
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
