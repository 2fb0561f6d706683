use anyhow::{Context, Result};
use clap::Parser;
use srtext::config::{Config, OutputFormat};
use srtext::interactive::select_directory;
use srtext::pipeline::{print_summary, run, Consolidator};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "srtext")]
#[command(version, about = "Extract the dialogue of subtitle files into one text file")]
#[command(long_about = "Strips cue numbers, timestamps and [bracketed] annotations from every \
subtitle file in a directory and writes the remaining dialogue, one titled paragraph per file, \
to a single consolidated file in that directory.")]
struct Cli {
    /// Directory containing the subtitle files (prompts when omitted)
    dir: Option<PathBuf>,

    /// Name of the consolidated output file, created inside DIR
    #[arg(short, long)]
    output: Option<String>,

    /// Extension of the subtitle files to collect
    #[arg(short, long)]
    extension: Option<String>,

    /// Output format: text, json
    #[arg(short, long)]
    format: Option<String>,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(ref output) = cli.output {
        config.output_name = output.clone();
    }
    if let Some(ref extension) = cli.extension {
        config.extension = extension.clone();
    }
    if let Some(ref format) = cli.format {
        config.format = format
            .parse::<OutputFormat>()
            .map_err(|e: String| anyhow::anyhow!(e))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = Config::load().context("Failed to load configuration")?;
    apply_cli_overrides(&mut config, &cli)?;
    config.validate().context("Configuration validation failed")?;

    let dir = match cli.dir.clone() {
        Some(dir) => dir,
        None => match select_directory(&config)? {
            Some(dir) => dir,
            None => {
                info!("Selection cancelled");
                return Ok(());
            }
        },
    };

    info!("Directory: {}", dir.display());
    info!("Format:    {}", config.format);

    let consolidator = Consolidator::new()
        .with_progress(!cli.quiet)
        .with_observer(|event| tracing::trace!(?event, "file event"));

    let result = run(&dir, &config, consolidator)
        .with_context(|| format!("Failed to consolidate dialogue in {}", dir.display()))?;

    print_summary(&result);

    Ok(())
}
