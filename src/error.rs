use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosepilotError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("Sender error: {0}")]
    Sender(#[from] SenderError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("System error: {message}")]
    System { message: String },
}

impl PosepilotError {
    pub fn system<S: Into<String>>(message: S) -> Self {
        Self::System {
            message: message.into(),
        }
    }
}

/// Errors on the control link to the actuator.
#[derive(Error, Debug)]
pub enum SenderError {
    #[error("Not connected to the actuator endpoint")]
    NotConnected,

    #[error("Failed to write control record: {0}")]
    Write(#[from] std::io::Error),
}

/// Errors on the skeleton frame stream.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read skeleton stream: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to open skeleton stream {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PosepilotError>;
