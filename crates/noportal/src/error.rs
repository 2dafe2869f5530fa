//! Error types for the NoPortal adapter

use thiserror::Error;

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, PluginError>;

/// Errors that can occur while wiring the gate into a host
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Configuration error: {0}")]
    Config(#[from] noportal_config::ConfigError),

    #[error("Invalid event: {0}")]
    EventParse(#[from] serde_json::Error),

    #[error("Unknown permission '{0}', expected one of: noportal.netherportal.create, noportal.netherportal.enter, noportal.endportal.enter")]
    UnknownPermission(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audit log error: {0}")]
    AuditLog(String),
}
