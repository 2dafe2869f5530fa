//! NoPortal message configuration
//!
//! Loads the player-facing messages from a HOCON document. A bundled default
//! document is written to the configured path on first start; load failures
//! fall back to an empty [`MessageTable`] so the plugin always starts.

pub mod bootstrap;
pub mod error;
pub mod loader;
pub mod messages;
pub mod text;

pub use bootstrap::{ensure_config, DEFAULT_CONFIG};
pub use error::{ConfigError, Result};
pub use loader::MessageConfigLoader;
pub use messages::MessageTable;
pub use text::{FormattedText, TextColor, TextSpan, TextStyle};
