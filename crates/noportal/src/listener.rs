//! Event listener applying gate verdicts to host events

use std::sync::{Arc, Mutex};

use noportal_config::{FormattedText, MessageTable};
use noportal_gate::{ActorId, PermissionOracle, PortalGate, PortalInteraction, Verdict};
use tracing::{debug, info, warn};

use crate::{
    audit::GateAuditLog,
    events::{BlockPlaceEvent, Cancellable, CollideBlockEvent},
};

/// Delivers chat messages to players
pub trait MessageSink {
    fn send_message(&self, actor: &ActorId, message: &FormattedText);
}

impl<S: MessageSink + ?Sized> MessageSink for Arc<S> {
    fn send_message(&self, actor: &ActorId, message: &FormattedText) {
        (**self).send_message(actor, message)
    }
}

/// Message sink that keeps every message it is given
#[derive(Debug, Clone, Default)]
pub struct RecordingMessageSink {
    sent: Arc<Mutex<Vec<(ActorId, FormattedText)>>>,
}

impl RecordingMessageSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first
    pub fn sent(&self) -> Vec<(ActorId, FormattedText)> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

impl MessageSink for RecordingMessageSink {
    fn send_message(&self, actor: &ActorId, message: &FormattedText) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((*actor, message.clone()));
        }
    }
}

/// Listener for the two host events NoPortal gates
pub struct PortalListener<O, S> {
    oracle: O,
    sink: S,
    messages: Arc<MessageTable>,
    audit: GateAuditLog,
}

impl<O, S> PortalListener<O, S>
where
    O: PermissionOracle,
    S: MessageSink,
{
    /// Create a listener
    ///
    /// # Arguments
    /// * `oracle` - Host permission lookups
    /// * `sink` - Host chat delivery
    /// * `messages` - Message table loaded at startup
    pub fn new(oracle: O, sink: S, messages: Arc<MessageTable>) -> Self {
        Self {
            oracle,
            sink,
            messages,
            audit: GateAuditLog::new(),
        }
    }

    /// Record denials into an existing audit log instead of a private one
    pub fn with_audit_log(mut self, audit: GateAuditLog) -> Self {
        self.audit = audit;
        self
    }

    pub fn audit_log(&self) -> &GateAuditLog {
        &self.audit
    }

    pub fn messages(&self) -> &MessageTable {
        &self.messages
    }

    /// Handle a block placement event
    pub fn on_block_place(&self, event: &mut BlockPlaceEvent) -> Verdict {
        let interaction = event.to_interaction();
        debug!(
            transaction_count = event.transactions.len(),
            block_type = %interaction.block_type,
            "Evaluating block placement"
        );
        self.apply(&interaction, event)
    }

    /// Handle an entity collision event
    ///
    /// Collisions not caused by a player are ignored and yield `None`.
    pub fn on_block_collide(&self, event: &mut CollideBlockEvent) -> Option<Verdict> {
        let Some(interaction) = event.to_interaction() else {
            debug!(target_block = %event.target_block, "Ignoring collision without a player");
            return None;
        };
        Some(self.apply(&interaction, event))
    }

    fn apply<E: Cancellable>(&self, interaction: &PortalInteraction, event: &mut E) -> Verdict {
        let verdict = PortalGate::evaluate(interaction, &self.oracle);
        if !verdict.deny {
            return verdict;
        }

        event.set_cancelled(true);

        let actor = interaction
            .actor
            .map_or_else(|| "unknown".to_string(), |actor| actor.to_string());
        info!(
            kind = %interaction.kind,
            block_type = %interaction.block_type,
            actor = %actor,
            "Blocked portal interaction"
        );

        if let (Some(key), Some(actor)) = (verdict.notify, interaction.actor.as_ref()) {
            self.sink.send_message(actor, &self.messages.message(key));
        }

        if let Err(e) = self.audit.record(interaction, &verdict) {
            warn!(error = %e, "Failed to record portal denial");
        }

        verdict
    }
}

#[cfg(test)]
mod tests {
    use noportal_gate::{InMemoryPermissionOracle, MessageKey, PortalPermission};

    use super::*;
    use crate::events::BlockTransaction;

    fn messages() -> Arc<MessageTable> {
        Arc::new(MessageTable::from_raw([(
            "NoPortalNetherPortalCreationPermissionError",
            "&cNo portals!",
        )]))
    }

    fn portal_placement(cause: Option<ActorId>) -> BlockPlaceEvent {
        BlockPlaceEvent::new(
            vec![BlockTransaction::new("minecraft:fire", "minecraft:nether_portal")],
            cause,
        )
    }

    #[test]
    fn test_denied_placement_is_cancelled_and_messaged() {
        let actor = ActorId::random();
        let sink = RecordingMessageSink::new();
        let listener = PortalListener::new(InMemoryPermissionOracle::new(), sink.clone(), messages());

        let mut event = portal_placement(Some(actor));
        let verdict = listener.on_block_place(&mut event);

        assert!(verdict.deny);
        assert!(event.is_cancelled());

        let sent = sink.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, actor);
        assert_eq!(sent[0].1.plain(), "No portals!");
        assert_eq!(listener.audit_log().len().unwrap(), 1);
    }

    #[test]
    fn test_permitted_placement_is_untouched() {
        let actor = ActorId::random();
        let oracle = InMemoryPermissionOracle::new()
            .with_grant(actor, PortalPermission::NetherPortalCreate);
        let sink = RecordingMessageSink::new();
        let listener = PortalListener::new(oracle, sink.clone(), messages());

        let mut event = portal_placement(Some(actor));
        assert_eq!(listener.on_block_place(&mut event), Verdict::allow());
        assert!(!event.is_cancelled());
        assert!(sink.sent().is_empty());
        assert!(listener.audit_log().is_empty().unwrap());
    }

    #[test]
    fn test_unattributed_placement_is_cancelled_silently() {
        let sink = RecordingMessageSink::new();
        let listener = PortalListener::new(InMemoryPermissionOracle::new(), sink.clone(), messages());

        let mut event = portal_placement(None);
        assert_eq!(listener.on_block_place(&mut event), Verdict::deny());
        assert!(event.is_cancelled());
        assert!(sink.sent().is_empty());
    }

    #[test]
    fn test_allow_does_not_uncancel() {
        let actor = ActorId::random();
        let oracle = InMemoryPermissionOracle::new()
            .with_grant(actor, PortalPermission::NetherPortalEnter);
        let listener = PortalListener::new(oracle, RecordingMessageSink::new(), messages());

        let mut event = CollideBlockEvent::new("minecraft:nether_portal", Some(actor));
        event.set_cancelled(true);

        assert_eq!(listener.on_block_collide(&mut event), Some(Verdict::allow()));
        assert!(event.is_cancelled());
    }

    #[test]
    fn test_denied_collision_sends_nothing() {
        let actor = ActorId::random();
        let sink = RecordingMessageSink::new();
        let listener = PortalListener::new(InMemoryPermissionOracle::new(), sink.clone(), messages());

        let mut event = CollideBlockEvent::new("minecraft:end_portal", Some(actor));
        assert_eq!(listener.on_block_collide(&mut event), Some(Verdict::deny()));
        assert!(event.is_cancelled());
        assert!(sink.sent().is_empty());
    }

    #[test]
    fn test_collision_without_player_is_ignored() {
        let listener = PortalListener::new(
            InMemoryPermissionOracle::new(),
            RecordingMessageSink::new(),
            messages(),
        );

        let mut event = CollideBlockEvent::new("minecraft:nether_portal", None);
        assert_eq!(listener.on_block_collide(&mut event), None);
        assert!(!event.is_cancelled());
    }

    #[test]
    fn test_missing_message_is_sent_empty() {
        let actor = ActorId::random();
        let sink = RecordingMessageSink::new();
        let listener = PortalListener::new(
            InMemoryPermissionOracle::new(),
            sink.clone(),
            Arc::new(MessageTable::empty()),
        );

        let mut event = portal_placement(Some(actor));
        let verdict = listener.on_block_place(&mut event);

        assert_eq!(
            verdict.notify,
            Some(MessageKey::NoPortalNetherPortalCreationPermissionError)
        );
        let sent = sink.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.is_empty());
    }
}
