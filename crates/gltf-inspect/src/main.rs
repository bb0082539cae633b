use clap::Parser;
use log::{debug, error};

use gltf_inspect::app::cli::{init_logging, InspectArgs};
use gltf_inspect::lib::loader;
use gltf_inspect::lib::output::ConsoleSink;
use gltf_inspect::lib::report::inspect;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = InspectArgs::parse();
    init_logging(args.verbose);

    if !args.path.is_file() {
        error!("File {:?} does not exist", args.path);
        std::process::exit(1);
    }

    debug!("Inspecting {:?}", args.path);
    let document = loader::load(&args.path)?;
    inspect(&document, &mut ConsoleSink);

    Ok(())
}
