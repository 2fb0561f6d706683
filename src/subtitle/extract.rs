// Dialogue extraction from numbered-cue subtitle text
use crate::error::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Bracketed annotations such as `[Music]`, possibly spanning several lines.
static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*?\]").expect("Invalid regex"));

/// Cue numbers: any Unicode decimal digits, plus superscript and subscript
/// digits.
static CUE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d¹²³⁰⁴-⁹₀-₉]+$").expect("Invalid regex"));

const TIMESTAMP_MARKER: &str = "-->";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Extract the spoken dialogue from raw subtitle text as one flat string.
///
/// Bracketed annotations are removed first, then cue numbers, timestamp
/// ranges and blank lines are dropped. The surviving lines are joined with
/// a single space in their original order. Returns an empty string when no
/// dialogue is left.
pub fn extract_dialogue(raw: &str) -> String {
    dialogue_lines(raw).join(" ")
}

/// The trimmed dialogue lines of `raw`, in order of appearance.
pub fn dialogue_lines(raw: &str) -> Vec<String> {
    let without_annotations = BRACKETED.replace_all(raw, "");

    without_annotations
        .split(is_line_boundary)
        .map(trim_line)
        .filter(|line| is_dialogue(line))
        .map(str::to_string)
        .collect()
}

/// Whether an already trimmed line is dialogue.
///
/// A line made only of digits is taken as a cue number, so a spoken number
/// that fills a whole line is dropped as well.
fn is_dialogue(line: &str) -> bool {
    !line.is_empty() && !is_cue_number(line) && !line.contains(TIMESTAMP_MARKER)
}

fn is_cue_number(line: &str) -> bool {
    CUE_NUMBER.is_match(line)
}

// Unicode whitespace plus the information separators U+001C..U+001F, which
// Python's str.strip also removes.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
}

// Same boundaries as Python's str.splitlines; the empty piece between
// "\r\n" is discarded as a blank line.
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Read a subtitle file as UTF-8, dropping a leading byte-order mark.
pub fn read_subtitle(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path)?;
    Ok(match contents.strip_prefix(BYTE_ORDER_MARK) {
        Some(stripped) => stripped.to_string(),
        None => contents,
    })
}

/// Read `path` and extract its dialogue.
///
/// Read and decoding failures are logged and reported as an empty string,
/// which callers treat as "nothing to write for this file".
pub fn extract_from_file(path: &Path) -> String {
    match read_subtitle(path) {
        Ok(contents) => {
            let dialogue = extract_dialogue(&contents);
            debug!(
                "Extracted {} chars of dialogue from {:?}",
                dialogue.len(),
                path
            );
            dialogue
        }
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            String::new()
        }
    }
}
