pub mod config;
pub mod error;
pub mod interactive;
pub mod pipeline;
pub mod subtitle;

pub use config::Config;
pub use error::{Result, SrtextError};
pub use pipeline::{
    find_subtitle_files, print_summary, run, ConsolidationResult, ConsolidationStats,
    Consolidator, FileEvent,
};
pub use subtitle::{extract_dialogue, extract_from_file};
