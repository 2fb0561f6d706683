use crate::config::Config;
use crate::pipeline::find_subtitle_files;
use console::style;
use dialoguer::{Confirm, Input};
use std::path::PathBuf;

/// Ask for the directory to process.
///
/// Returns `Ok(None)` when the user cancels, either by leaving the answer
/// empty or by declining the confirmation.
pub fn select_directory(config: &Config) -> anyhow::Result<Option<PathBuf>> {
    print_header();

    let answer: String = Input::new()
        .with_prompt("Directory containing subtitle files (empty to cancel)")
        .allow_empty(true)
        .interact_text()?;

    let Some(dir) = parse_directory_answer(&answer) else {
        return Ok(None);
    };

    if !dir.is_dir() {
        anyhow::bail!("Directory not found: {}", dir.display());
    }

    let count = find_subtitle_files(&dir, config.normalized_extension())?.len();
    println!(
        "  {} .{} files found in {}",
        style(count).cyan(),
        config.normalized_extension(),
        style(dir.display()).cyan()
    );
    println!(
        "  Output:    {}",
        style(dir.join(config.output_file_name()).display()).cyan()
    );
    println!();

    if !Confirm::new()
        .with_prompt("Proceed?")
        .default(true)
        .interact()?
    {
        return Ok(None);
    }

    Ok(Some(dir))
}

fn print_header() {
    println!();
    println!(
        "{}",
        style("╔═══════════════════════════════════════════════════╗").cyan()
    );
    println!(
        "{}",
        style("║       srtext - Subtitle Dialogue Extractor        ║").cyan()
    );
    println!(
        "{}",
        style("╚═══════════════════════════════════════════════════╝").cyan()
    );
    println!();
}

fn parse_directory_answer(answer: &str) -> Option<PathBuf> {
    let trimmed = answer.trim().trim_matches(|c| c == '"' || c == '\'');
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}
