pub mod extract;
pub mod json;
pub mod text;

pub use extract::{dialogue_lines, extract_dialogue, extract_from_file, read_subtitle};

use crate::config::OutputFormat;
use crate::error::Result;
use std::path::PathBuf;

/// Dialogue extracted from one subtitle file, ready to be consolidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedEntry {
    pub title: String,
    pub source: PathBuf,
    pub dialogue: String,
}

pub trait DialogueFormatter {
    fn format(&self, entries: &[ConsolidatedEntry]) -> Result<String>;
}

pub fn create_formatter(
    format: OutputFormat,
    source_dir: Option<String>,
) -> Box<dyn DialogueFormatter> {
    match format {
        OutputFormat::Text => Box::new(text::TextFormatter),
        OutputFormat::Json => Box::new(json::JsonFormatter { source_dir }),
    }
}
