use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    /// A decision was requested over an empty option list
    #[error("Decision requested with an empty option set")]
    EmptyOptionSet,

    #[error("Capability error: {0}")]
    Capability(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AgentError>;
