//! HOCON message configuration loader

use std::{
    fs,
    path::{Path, PathBuf},
};

use hocon::{Hocon, HoconLoader};
use tracing::{debug, warn};

use crate::{
    bootstrap::ensure_config,
    error::{ConfigError, Result},
    messages::MessageTable,
};

/// Loads the message table from a HOCON document
///
/// Every top-level string value becomes a message; other values are ignored.
/// A document that does not parse completely is rejected as a whole, so a
/// broken file never yields a partial table.
///
/// ```hocon
/// NoPortalNetherPortalCreationPermissionError = "&cYou may not create portals"
/// ```
pub struct MessageConfigLoader;

impl MessageConfigLoader {
    /// Load messages from the file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid HOCON.
    pub fn load(path: &Path) -> Result<MessageTable> {
        let content = fs::read_to_string(path)?;
        Self::parse_document(&content, path)
    }

    /// Parse messages from an in-memory HOCON document
    pub fn parse_str(content: &str) -> Result<MessageTable> {
        Self::parse_document(content, Path::new("<string>"))
    }

    /// Bootstrap the default file if needed, then load it
    ///
    /// Never fails: any error is logged and an empty table is returned, so
    /// denial messages are delivered blank instead of aborting startup.
    pub fn load_or_empty(path: &Path) -> MessageTable {
        if let Err(e) = ensure_config(path) {
            warn!(
                path = %path.display(),
                error = %e,
                "Failed to write default configuration"
            );
        }

        match Self::load(path) {
            Ok(table) => {
                debug!(
                    path = %path.display(),
                    message_count = table.len(),
                    "Loaded message configuration"
                );
                table
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load message configuration, messages will be empty"
                );
                MessageTable::empty()
            }
        }
    }

    fn parse_document(content: &str, path: &Path) -> Result<MessageTable> {
        let parse_error = |message: String| ConfigError::Parse {
            path: PathBuf::from(path),
            message,
        };

        // Strict mode rejects the whole document on any unparsable value
        let document = HoconLoader::new()
            .strict()
            .load_str(content.trim())
            .and_then(|loader| loader.hocon())
            .map_err(|e| parse_error(e.to_string()))?;

        let entries = match document {
            Hocon::Hash(entries) => entries,
            other => {
                return Err(parse_error(format!(
                    "root must be an object, found {}",
                    Self::describe(&other)
                )))
            }
        };

        let messages = entries.into_iter().filter_map(|(key, value)| match value {
            Hocon::String(text) => Some((key, text)),
            other => {
                debug!(
                    key = %key,
                    kind = Self::describe(&other),
                    "Skipping non-string configuration value"
                );
                None
            }
        });

        Ok(MessageTable::from_raw(messages))
    }

    fn describe(value: &Hocon) -> &'static str {
        match value {
            Hocon::Real(_) => "real",
            Hocon::Integer(_) => "integer",
            Hocon::String(_) => "string",
            Hocon::Boolean(_) => "boolean",
            Hocon::Array(_) => "array",
            Hocon::Hash(_) => "object",
            Hocon::Null => "null",
            _ => "bad value",
        }
    }
}
