//! Output sinks for report and harness text
//!
//! Reports never print directly; they write through an [`OutputSink`] so the
//! binaries can target the console while tests capture every line.

use log::warn;

/// Destination for user-facing lines
pub trait OutputSink {
    /// Regular output line
    fn line(&mut self, text: &str);

    /// Advisory message about the output just written
    fn warn(&mut self, text: &str);

    /// A failure that did not stop the run
    fn error(&mut self, text: &str);
}

/// Writes lines to stdout, errors to stderr and warnings through `log`
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }

    fn warn(&mut self, text: &str) {
        warn!("{text}");
    }

    fn error(&mut self, text: &str) {
        eprintln!("{text}");
    }
}

/// Which channel a captured line was written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Line,
    Warn,
    Error,
}

/// In-memory sink that records every line in order
#[derive(Debug, Default, Clone)]
pub struct CaptureSink {
    pub entries: Vec<(Channel, String)>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text written to a single channel, one entry per call
    pub fn on(&self, channel: Channel) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, text)| text.as_str())
            .collect()
    }

    /// Everything written to the line channel, joined with newlines
    pub fn stdout(&self) -> String {
        self.on(Channel::Line).join("\n")
    }
}

impl OutputSink for CaptureSink {
    fn line(&mut self, text: &str) {
        self.entries.push((Channel::Line, text.to_string()));
    }

    fn warn(&mut self, text: &str) {
        self.entries.push((Channel::Warn, text.to_string()));
    }

    fn error(&mut self, text: &str) {
        self.entries.push((Channel::Error, text.to_string()));
    }
}
