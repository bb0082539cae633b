//! glTF inspection library
//!
//! This library provides summary reports over glTF documents and a harness
//! for round-tripping a corpus of sample assets through a transform command.

pub mod lib {
    pub mod document;
    pub mod format;
    pub mod loader;
    pub mod manifest;
    pub mod output;
    pub mod report;
    pub mod roundtrip;
    pub mod settings;
    pub mod table;
}

pub mod app {
    pub mod cli;
}

// Re-export commonly used types from lib modules
pub use lib::document::{Document, Entity, Link, LinkGraph};
pub use lib::loader::{load, InspectError};
pub use lib::manifest::{AssetEntry, Manifest, ManifestError};
pub use lib::output::{CaptureSink, ConsoleSink, OutputSink};
pub use lib::report::{inspect, Report, ReportKind};
pub use lib::roundtrip::{CommandTransformer, RoundtripSummary, TransformError, Transformer};
