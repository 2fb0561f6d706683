// JSON consolidated output
use super::{ConsolidatedEntry, DialogueFormatter};
use crate::error::Result;
use serde::Serialize;

#[derive(Default)]
pub struct JsonFormatter {
    pub source_dir: Option<String>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    metadata: JsonMetadata,
    files: Vec<JsonFile<'a>>,
}

#[derive(Serialize)]
struct JsonMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    source_dir: Option<String>,
    file_count: usize,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    title: &'a str,
    source: String,
    dialogue: &'a str,
}

impl DialogueFormatter for JsonFormatter {
    fn format(&self, entries: &[ConsolidatedEntry]) -> Result<String> {
        let output = JsonOutput {
            metadata: JsonMetadata {
                source_dir: self.source_dir.clone(),
                file_count: entries.len(),
            },
            files: entries
                .iter()
                .map(|e| JsonFile {
                    title: &e.title,
                    source: e.source.display().to_string(),
                    dialogue: &e.dialogue,
                })
                .collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}
