use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SrtextError {
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Failed to write output file {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SrtextError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_count(raw: &str) -> Result<u32> {
        Ok(serde_json::from_str(raw)?)
    }

    #[test]
    fn test_json_error_converts() {
        let err = parse_count("not json").unwrap_err();
        assert!(matches!(err, SrtextError::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
