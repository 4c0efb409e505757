use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssgenError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported subtitle format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to parse subtitle file '{file}': {reason}")]
    Parse { file: String, reason: String },

    #[error("No valid subtitle events found in {0}")]
    EmptyResult(String),

    #[error("{0}")]
    Conversion(String),

    #[error("Video probe failed: {0}")]
    Probe(String),

    #[error("Preview rendering failed: {0}")]
    Render(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AssgenError>;
