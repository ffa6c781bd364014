use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("invalid key combination: {0}")]
    InvalidCombination(String),

    #[error("external command failed: {0}")]
    ExternalCommand(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Failures reported by the hotkey backend and the binding coordinator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("Binding with id '{0}' not found")]
    NotFound(String),

    #[error("binding '{0}' is reserved and cannot be removed")]
    Reserved(String),

    #[error("invalid shortcut '{combination}': {reason}")]
    Invalid { combination: String, reason: String },

    #[error("Shortcut '{0}' is already in use")]
    AlreadyInUse(String),

    #[error("failed to persist settings: {0}")]
    Persistence(String),

    #[error("external shortcut error: {0}")]
    External(String),
}

impl BindingError {
    pub fn invalid(combination: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            combination: combination.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeycapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
