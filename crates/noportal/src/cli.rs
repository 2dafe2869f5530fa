//! Command-line harness operations
//!
//! Backs the `noportal evaluate` command: a host event written as JSON is run
//! through the same listener the plugin registers, and the outcome is
//! reported as JSON.

use std::path::Path;

use noportal_gate::{ActorId, InMemoryPermissionOracle, PortalPermission, Verdict};
use serde::{Deserialize, Serialize};

use crate::{
    error::{PluginError, Result},
    events::HostEvent,
    listener::RecordingMessageSink,
    plugin::{NoPortalPlugin, PluginMetadata},
};

/// Message delivered while evaluating an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub actor: ActorId,
    /// Text without formatting codes
    pub plain: String,
    /// Text with `§` formatting codes, as sent to clients
    pub formatted: String,
}

/// Outcome of `noportal evaluate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// False when the event was not gated (collision without a player)
    pub evaluated: bool,
    pub verdict: Option<Verdict>,
    pub cancelled: bool,
    pub messages: Vec<SentMessage>,
}

/// Oracle granting every listed permission node to every player
///
/// # Errors
///
/// Returns [`PluginError::UnknownPermission`] for a node NoPortal does not check.
pub fn oracle_from_grants<S: AsRef<str>>(grants: &[S]) -> Result<InMemoryPermissionOracle> {
    let mut oracle = InMemoryPermissionOracle::new();
    for node in grants {
        let node = node.as_ref();
        let permission = PortalPermission::from_node(node)
            .ok_or_else(|| PluginError::UnknownPermission(node.to_string()))?;
        oracle.grant_all(permission);
    }
    Ok(oracle)
}

/// Run one JSON host event through a freshly enabled plugin
///
/// # Arguments
/// * `config_path` - Message configuration; written with defaults if missing
/// * `event_json` - A `place` or `collide` event
/// * `grants` - Permission nodes held by every player
pub fn evaluate_event<S: AsRef<str>>(
    config_path: &Path,
    event_json: &str,
    grants: &[S],
) -> Result<EvaluationReport> {
    let oracle = oracle_from_grants(grants)?;
    let mut event = HostEvent::from_json(event_json)?;

    let sink = RecordingMessageSink::new();
    let listener = NoPortalPlugin::new(PluginMetadata::default(), config_path)
        .enable(oracle, sink.clone());

    let verdict = match &mut event {
        HostEvent::Place(place) => Some(listener.on_block_place(place)),
        HostEvent::Collide(collide) => listener.on_block_collide(collide),
    };

    let messages = sink
        .sent()
        .into_iter()
        .map(|(actor, text)| SentMessage {
            actor,
            plain: text.plain(),
            formatted: text.to_legacy('§'),
        })
        .collect();

    Ok(EvaluationReport {
        evaluated: verdict.is_some(),
        verdict,
        cancelled: event.is_cancelled(),
        messages,
    })
}
