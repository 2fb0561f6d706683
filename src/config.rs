use crate::error::{Result, SrtextError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_OUTPUT_NAME: &str = "todos.txt";
pub const DEFAULT_EXTENSION: &str = "srt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use 'text' or 'json'", s)),
        }
    }
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File name of the consolidated output, created inside the scanned directory.
    pub output_name: String,
    /// Extension of the subtitle files to collect, without the dot.
    pub extension: String,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            format: OutputFormat::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                match Self::from_file(&config_path) {
                    Ok(file_config) => config = file_config,
                    Err(e) => warn!("Ignoring config file {:?}: {}", config_path, e),
                }
            }
        }

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str::<Config>(&contents)?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("SRTEXT_OUTPUT_NAME") {
            self.output_name = name;
        }
        if let Ok(extension) = std::env::var("SRTEXT_EXTENSION") {
            self.extension = extension;
        }
        if let Ok(format) = std::env::var("SRTEXT_FORMAT") {
            if let Ok(f) = format.parse() {
                self.format = f;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_name.trim().is_empty() {
            return Err(SrtextError::Config(
                "Output file name must not be empty".to_string(),
            ));
        }

        if self.output_name.contains(['/', '\\']) {
            return Err(SrtextError::Config(format!(
                "Output file name must not contain a path separator: {}",
                self.output_name
            )));
        }

        if self.normalized_extension().is_empty() {
            return Err(SrtextError::Config(
                "Subtitle extension must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Extension to scan for, without a leading dot.
    pub fn normalized_extension(&self) -> &str {
        self.extension.trim().trim_start_matches('.')
    }

    /// Output file name, switched to `.json` when JSON is requested and the
    /// name was left at its default.
    pub fn output_file_name(&self) -> String {
        if self.format == OutputFormat::Json && self.output_name == DEFAULT_OUTPUT_NAME {
            Path::new(DEFAULT_OUTPUT_NAME)
                .with_extension(self.format.extension())
                .display()
                .to_string()
        } else {
            self.output_name.clone()
        }
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("srtext").join("config.toml"))
    }
}
