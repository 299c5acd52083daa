use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Could not encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration '{0}' is not a key/value mapping")]
    NotAMapping(String),

    #[error("Unsupported storage file '{0}' — use .json, .yaml or .yml")]
    UnsupportedFormat(String),

    #[error("Configuration cancelled by user")]
    Cancelled,

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}
