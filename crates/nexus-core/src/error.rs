use thiserror::Error;

#[derive(Debug, Error)]
pub enum NexusError {
    #[error("Configuration error: {0}")]
    Config(String),
}

impl NexusError {
    /// Short error code string for log fields.
    pub fn code(&self) -> &'static str {
        match self {
            NexusError::Config(_) => "CONFIG_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, NexusError>;
