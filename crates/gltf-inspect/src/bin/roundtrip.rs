use clap::Parser;
use log::{debug, error, info, warn};
use std::path::Path;

use gltf_inspect::app::cli::{
    init_logging, RoundtripArgs, RoundtripConfig, EXIT_CONFIG_ERROR, EXIT_TRANSFORM_FAILED,
};
use gltf_inspect::lib::manifest::Manifest;
use gltf_inspect::lib::output::ConsoleSink;
use gltf_inspect::lib::roundtrip;
use gltf_inspect::lib::settings::{RoundtripSettings, SETTINGS_FILENAME};

fn main() {
    let args = RoundtripArgs::parse();
    init_logging(args.verbose);

    let (config, manifest) = match prepare(args) {
        Ok(prepared) => prepared,
        Err(e) => {
            error!("{}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let summary = roundtrip::run(
        &manifest,
        &config.source,
        &config.target,
        &config.variants,
        &config.transformer,
        &mut ConsoleSink,
    );

    if !summary.all_passed() {
        error!(
            "{} of {} transforms failed",
            summary.failed,
            summary.passed + summary.failed
        );
        std::process::exit(EXIT_TRANSFORM_FAILED);
    }
}

/// Settings, flags and manifest: everything that has to be valid before
/// the first transform runs
fn prepare(args: RoundtripArgs) -> Result<(RoundtripConfig, Manifest), Box<dyn std::error::Error>> {
    let settings = match &args.config {
        Some(path) => RoundtripSettings::load(path)?
            .ok_or_else(|| format!("Settings file {:?} does not exist", path))?,
        None => RoundtripSettings::load(Path::new(SETTINGS_FILENAME))?.unwrap_or_default(),
    };

    let config = args.resolve(settings)?;
    debug!("Resolved configuration: {:?}", config);

    if !config.source.is_dir() {
        return Err(format!("Source directory {:?} does not exist", config.source).into());
    }

    let manifest = Manifest::load(&config.manifest)?;
    if manifest.is_empty() {
        warn!("Manifest {:?} lists no assets", config.manifest);
    }
    info!(
        "Loaded {} assets from {:?}",
        manifest.len(),
        config.manifest
    );

    Ok((config, manifest))
}
