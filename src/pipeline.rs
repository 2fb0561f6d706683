use crate::config::Config;
use crate::error::{Result, SrtextError};
use crate::subtitle::{create_formatter, extract_from_file, ConsolidatedEntry};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Progress events emitted while consolidating files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    Processing { path: PathBuf },
    Extracted { path: PathBuf, title: String, chars: usize },
    Skipped { path: PathBuf },
}

type Observer = Box<dyn FnMut(&FileEvent)>;

/// Runs dialogue extraction over a list of subtitle files, in order.
pub struct Consolidator {
    show_progress: bool,
    observer: Option<Observer>,
}

impl Default for Consolidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Consolidator {
    pub fn new() -> Self {
        Self {
            show_progress: false,
            observer: None,
        }
    }

    /// Enable or disable progress bar display.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Register a callback invoked for every [`FileEvent`].
    pub fn with_observer(mut self, observer: impl FnMut(&FileEvent) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    fn emit(&mut self, event: FileEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&event);
        }
    }

    /// Extract every file in `files`. Files without dialogue, including ones
    /// that could not be read, produce no entry.
    pub fn consolidate(&mut self, files: &[PathBuf]) -> Vec<ConsolidatedEntry> {
        let progress_bar = if self.show_progress && !files.is_empty() {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut entries = Vec::with_capacity(files.len());

        for path in files {
            debug!("Processing {:?}", path);
            if let Some(ref pb) = progress_bar {
                pb.set_message(file_name_of(path));
            }
            self.emit(FileEvent::Processing { path: path.clone() });

            let dialogue = extract_from_file(path);

            if dialogue.is_empty() {
                warn!("No dialogue found in {:?}, skipping", path);
                self.emit(FileEvent::Skipped { path: path.clone() });
            } else {
                let title = derive_title(path);
                self.emit(FileEvent::Extracted {
                    path: path.clone(),
                    title: title.clone(),
                    chars: dialogue.chars().count(),
                });
                entries.push(ConsolidatedEntry {
                    title,
                    source: path.clone(),
                    dialogue,
                });
            }

            if let Some(ref pb) = progress_bar {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress_bar {
            pb.finish_and_clear();
        }

        entries
    }
}

/// Statistics from a consolidation run.
#[derive(Debug, Clone)]
pub struct ConsolidationStats {
    pub files_found: usize,
    pub files_written: usize,
    pub files_skipped: usize,
    /// Characters of dialogue written, summed over all files.
    pub dialogue_chars: usize,
    pub total_time: Duration,
}

/// Result of a consolidation run.
#[derive(Debug)]
pub struct ConsolidationResult {
    pub output_path: PathBuf,
    pub entries: Vec<ConsolidatedEntry>,
    pub stats: ConsolidationStats,
}

/// List the files in `dir` (not recursing) whose name ends with
/// `.{extension}` case-insensitively, sorted by file name.
///
/// A file named just `.srt` counts as a subtitle file.
pub fn find_subtitle_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(SrtextError::DirectoryNotFound(dir.display().to_string()));
    }

    let suffix = format!(".{}", extension.trim_start_matches('.').to_lowercase());
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && file_name_of(&path).to_lowercase().ends_with(&suffix) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Title for a file: its name without the final extension, uppercased.
pub fn derive_title(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_uppercase()
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

/// Scan `dir`, extract the dialogue of every subtitle file and write the
/// consolidated output inside `dir`.
pub fn run(
    dir: &Path,
    config: &Config,
    mut consolidator: Consolidator,
) -> Result<ConsolidationResult> {
    let start_time = Instant::now();

    config.validate()?;

    info!(
        "Scanning {:?} for .{} files",
        dir,
        config.normalized_extension()
    );
    let output_name = config.output_file_name();
    let mut files = find_subtitle_files(dir, config.normalized_extension())?;
    // A previous run's output must not be read back as input.
    files.retain(|p| p.file_name().and_then(|n| n.to_str()) != Some(output_name.as_str()));
    info!("Found {} subtitle files", files.len());

    let entries = consolidator.consolidate(&files);

    let formatter = create_formatter(config.format, Some(dir.display().to_string()));
    let content = formatter.format(&entries)?;

    let output_path = dir.join(&output_name);
    fs::write(&output_path, &content).map_err(|source| SrtextError::OutputWrite {
        path: output_path.clone(),
        source,
    })?;

    info!(
        "Wrote {} {} entries to {:?}",
        entries.len(),
        config.format,
        output_path
    );

    let stats = ConsolidationStats {
        files_found: files.len(),
        files_written: entries.len(),
        files_skipped: files.len() - entries.len(),
        dialogue_chars: entries.iter().map(|e| e.dialogue.chars().count()).sum(),
        total_time: start_time.elapsed(),
    };

    Ok(ConsolidationResult {
        output_path,
        entries,
        stats,
    })
}

/// Print a summary of the consolidation results.
pub fn print_summary(result: &ConsolidationResult) {
    println!();
    println!("{}", style("═══ Dialogue Extraction Complete ═══").bold());
    println!();
    println!("  Output:    {}", style(result.output_path.display()).cyan());
    println!("  Found:     {} files", result.stats.files_found);
    println!("  Written:   {} files", result.stats.files_written);
    if result.stats.files_skipped > 0 {
        println!(
            "  Skipped:   {} files {}",
            result.stats.files_skipped,
            style("(no dialogue or unreadable)").yellow()
        );
    }
    println!("  Dialogue:  {} chars", result.stats.dialogue_chars);
    println!(
        "  Time:      {:.2}s",
        result.stats.total_time.as_secs_f64()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tempfile::TempDir;

    #[test]
    fn test_derive_title() {
        assert_eq!(derive_title(Path::new("/a/episode 01.srt")), "EPISODE 01");
        assert_eq!(derive_title(Path::new("show.s01e02.SRT")), "SHOW.S01E02");
        assert_eq!(derive_title(Path::new("über.srt")), "ÜBER");
    }

    #[test]
    fn test_find_subtitle_files_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.srt"), "").unwrap();
        fs::write(dir.path().join("a.SRT"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.srt")).unwrap();

        let files = find_subtitle_files(dir.path(), ".srt").unwrap();
        let names: Vec<String> = files.iter().map(|p| file_name_of(p)).collect();

        assert_eq!(names, vec!["a.SRT", "b.srt"]);
    }

    #[test]
    fn test_find_subtitle_files_bare_extension_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".srt"), "1\n00:00:01,000 --> 00:00:02,000\nHi\n").unwrap();
        fs::write(dir.path().join("srt"), "").unwrap();
        fs::write(dir.path().join("notsrt"), "").unwrap();

        let files = find_subtitle_files(dir.path(), "srt").unwrap();

        assert_eq!(files, vec![dir.path().join(".srt")]);
        assert_eq!(derive_title(&files[0]), ".SRT");
    }

    #[test]
    fn test_find_subtitle_files_missing_dir() {
        let result = find_subtitle_files(Path::new("/nonexistent/srtext"), "srt");
        assert!(matches!(result, Err(SrtextError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_consolidate_emits_events() {
        let dir = TempDir::new().unwrap();
        let spoken = dir.path().join("a.srt");
        let silent = dir.path().join("b.srt");
        fs::write(&spoken, "1\n00:00:01,000 --> 00:00:02,000\nHi\n").unwrap();
        fs::write(&silent, "1\n00:00:01,000 --> 00:00:02,000\n[Music]\n").unwrap();

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let mut consolidator =
            Consolidator::new().with_observer(move |e| sink.borrow_mut().push(e.clone()));

        let entries = consolidator.consolidate(&[spoken.clone(), silent.clone()]);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "A");
        assert_eq!(entries[0].dialogue, "Hi");
        assert_eq!(
            *events.borrow(),
            vec![
                FileEvent::Processing { path: spoken.clone() },
                FileEvent::Extracted {
                    path: spoken,
                    title: "A".to_string(),
                    chars: 2,
                },
                FileEvent::Processing { path: silent.clone() },
                FileEvent::Skipped { path: silent },
            ]
        );
    }

    #[test]
    fn test_run_counts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.srt"), "1\n00:00:01,000 --> 00:00:02,000\nÉté\n").unwrap();
        fs::write(dir.path().join("two.srt"), "2\n").unwrap();

        let result = run(dir.path(), &Config::default(), Consolidator::new()).unwrap();

        assert_eq!(result.stats.files_found, 2);
        assert_eq!(result.stats.files_written, 1);
        assert_eq!(result.stats.files_skipped, 1);
        assert_eq!(result.stats.dialogue_chars, 3);
        assert_eq!(result.output_path, dir.path().join("todos.txt"));
    }

    #[test]
    fn test_run_ignores_previous_output() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ep.srt"), "1\n00:00:01,000 --> 00:00:02,000\nHi\n").unwrap();
        fs::write(dir.path().join("all.srt"), "OLD\nstale\n\n").unwrap();

        let mut config = Config::default();
        config.output_name = "all.srt".to_string();
        let result = run(dir.path(), &config, Consolidator::new()).unwrap();

        assert_eq!(result.stats.files_found, 1);
        assert_eq!(fs::read_to_string(&result.output_path).unwrap(), "EP\nHi\n\n");
    }
}
