//! Plugin lifecycle

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use noportal_config::MessageConfigLoader;
use noportal_gate::PermissionOracle;
use tracing::info;

use crate::listener::{MessageSink, PortalListener};

/// File name of the message configuration inside the host's config directory
pub const CONFIG_FILE_NAME: &str = "noportal.conf";

/// Identity the plugin reports to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMetadata {
    pub id: String,
    pub name: String,
    pub version: Option<String>,
}

impl Default for PluginMetadata {
    fn default() -> Self {
        Self {
            id: "noportal".to_string(),
            name: "NoPortal".to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }
    }
}

/// NoPortal plugin before it has been enabled
pub struct NoPortalPlugin {
    metadata: PluginMetadata,
    config_path: PathBuf,
}

impl NoPortalPlugin {
    /// Create the plugin with its configuration at `config_path`
    pub fn new(metadata: PluginMetadata, config_path: impl Into<PathBuf>) -> Self {
        Self {
            metadata,
            config_path: config_path.into(),
        }
    }

    /// Create the plugin with its configuration in the host's config directory
    pub fn in_config_dir(config_dir: &Path) -> Self {
        Self::new(PluginMetadata::default(), config_dir.join(CONFIG_FILE_NAME))
    }

    pub fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Start the plugin on server start
    ///
    /// Logs the plugin version, writes the default configuration if it is
    /// missing and loads the messages. Configuration problems are logged and
    /// leave the messages empty; enabling itself never fails.
    pub fn enable<O, S>(self, oracle: O, sink: S) -> PortalListener<O, S>
    where
        O: PermissionOracle,
        S: MessageSink,
    {
        info!(
            "{} version {} enabled!",
            self.metadata.name,
            self.metadata.version.as_deref().unwrap_or("unknown")
        );

        let messages = MessageConfigLoader::load_or_empty(&self.config_path);
        PortalListener::new(oracle, sink, Arc::new(messages))
    }
}
