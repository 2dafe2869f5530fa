//! In-memory record of blocked portal interactions

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use noportal_gate::{ActorId, BlockType, InteractionKind, PortalInteraction, Verdict};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PluginError, Result};

/// One blocked interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub kind: InteractionKind,
    pub block_type: BlockType,
    /// Absent when the host could not attribute the placement
    pub actor: Option<ActorId>,
    /// Whether a message was sent to the actor
    pub notified: bool,
}

impl AuditEntry {
    fn new(interaction: &PortalInteraction, verdict: &Verdict) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind: interaction.kind,
            block_type: interaction.block_type,
            actor: interaction.actor,
            notified: verdict.notify.is_some() && interaction.actor.is_some(),
        }
    }
}

/// Append-only log of denials, shared between listeners
#[derive(Debug, Clone, Default)]
pub struct GateAuditLog {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
}

impl GateAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a verdict; allowed interactions are not recorded
    ///
    /// # Returns
    /// Whether an entry was added
    pub fn record(&self, interaction: &PortalInteraction, verdict: &Verdict) -> Result<bool> {
        if !verdict.deny {
            return Ok(false);
        }

        let mut entries = self
            .entries
            .write()
            .map_err(|e| PluginError::AuditLog(format!("Failed to acquire write lock: {}", e)))?;
        entries.push(AuditEntry::new(interaction, verdict));
        Ok(true)
    }

    pub fn entries(&self) -> Result<Vec<AuditEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| PluginError::AuditLog(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entries.clone())
    }

    /// Entries for a single actor
    pub fn entries_for(&self, actor: &ActorId) -> Result<Vec<AuditEntry>> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|entry| entry.actor.as_ref() == Some(actor))
            .collect())
    }

    pub fn len(&self) -> Result<usize> {
        let entries = self
            .entries
            .read()
            .map_err(|e| PluginError::AuditLog(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
