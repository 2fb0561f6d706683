// Plain text consolidated output: a title line, the dialogue, a blank line
use super::{ConsolidatedEntry, DialogueFormatter};
use crate::error::Result;

pub struct TextFormatter;

impl DialogueFormatter for TextFormatter {
    fn format(&self, entries: &[ConsolidatedEntry]) -> Result<String> {
        Ok(entries
            .iter()
            .map(|entry| format!("{}\n{}\n\n", entry.title, entry.dialogue))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(title: &str, dialogue: &str) -> ConsolidatedEntry {
        ConsolidatedEntry {
            title: title.to_string(),
            source: PathBuf::from(format!("{}.srt", title.to_lowercase())),
            dialogue: dialogue.to_string(),
        }
    }

    #[test]
    fn test_text_format() {
        let entries = vec![
            entry("PILOT", "Hello there."),
            entry("FINALE", "Goodbye then."),
        ];

        let output = TextFormatter.format(&entries).unwrap();

        assert_eq!(output, "PILOT\nHello there.\n\nFINALE\nGoodbye then.\n\n");
    }

    #[test]
    fn test_text_format_empty() {
        assert_eq!(TextFormatter.format(&[]).unwrap(), "");
    }
}
