//! Portal gating decision

use crate::{
    models::{BlockType, InteractionKind, MessageKey, PortalInteraction, Verdict},
    permission::{PermissionOracle, PortalPermission},
};

/// Decides whether a portal interaction should be blocked
///
/// The gate is stateless: every call is evaluated independently and makes at
/// most one oracle query.
pub struct PortalGate;

impl PortalGate {
    /// Evaluate an interaction against the actor's permissions
    ///
    /// # Arguments
    /// * `interaction` - Normalized event description
    /// * `oracle` - Permission lookups for the interaction's actor
    ///
    /// # Returns
    /// Whether to deny the interaction and which message to send, if any
    pub fn evaluate<O>(interaction: &PortalInteraction, oracle: &O) -> Verdict
    where
        O: PermissionOracle + ?Sized,
    {
        match interaction.kind {
            InteractionKind::BlockPlacement => Self::evaluate_placement(interaction, oracle),
            InteractionKind::EntityCollision => Self::evaluate_collision(interaction, oracle),
        }
    }

    fn evaluate_placement<O>(interaction: &PortalInteraction, oracle: &O) -> Verdict
    where
        O: PermissionOracle + ?Sized,
    {
        // Only Nether portal creation is gated
        if interaction.block_type != BlockType::NetherPortal {
            return Verdict::allow();
        }

        // Nobody to attribute the portal to: fail closed
        let Some(actor) = interaction.actor.as_ref() else {
            return Verdict::deny();
        };

        if oracle.has_permission(actor, PortalPermission::NetherPortalCreate) {
            Verdict::allow()
        } else {
            Verdict::deny_with(MessageKey::NoPortalNetherPortalCreationPermissionError)
        }
    }

    fn evaluate_collision<O>(interaction: &PortalInteraction, oracle: &O) -> Verdict
    where
        O: PermissionOracle + ?Sized,
    {
        let permission = match interaction.block_type {
            BlockType::NetherPortal => PortalPermission::NetherPortalEnter,
            BlockType::EndPortal => PortalPermission::EndPortalEnter,
            BlockType::Other => return Verdict::allow(),
        };

        match interaction.actor.as_ref() {
            Some(actor) if !oracle.has_permission(actor, permission) => Verdict::deny(),
            _ => Verdict::allow(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{models::ActorId, permission::InMemoryPermissionOracle};

    /// Oracle that records every query it answers
    struct RecordingOracle {
        allow: bool,
        queries: RefCell<Vec<(ActorId, PortalPermission)>>,
    }

    impl RecordingOracle {
        fn new(allow: bool) -> Self {
            Self {
                allow,
                queries: RefCell::new(Vec::new()),
            }
        }

        fn queries(&self) -> Vec<(ActorId, PortalPermission)> {
            self.queries.borrow().clone()
        }
    }

    impl PermissionOracle for RecordingOracle {
        fn has_permission(&self, actor: &ActorId, permission: PortalPermission) -> bool {
            self.queries.borrow_mut().push((*actor, permission));
            self.allow
        }
    }

    #[test]
    fn test_placement_of_other_block_is_allowed() {
        let oracle = RecordingOracle::new(false);
        let interaction = PortalInteraction::placement(BlockType::Other, Some(ActorId::random()));

        assert_eq!(PortalGate::evaluate(&interaction, &oracle), Verdict::allow());
        assert!(oracle.queries().is_empty());
    }

    #[test]
    fn test_placement_of_end_portal_is_allowed() {
        let oracle = RecordingOracle::new(false);
        let interaction = PortalInteraction::placement(BlockType::EndPortal, None);

        assert_eq!(PortalGate::evaluate(&interaction, &oracle), Verdict::allow());
    }

    #[test]
    fn test_placement_without_actor_fails_closed() {
        let oracle = RecordingOracle::new(true);
        let interaction = PortalInteraction::placement(BlockType::NetherPortal, None);

        let verdict = PortalGate::evaluate(&interaction, &oracle);
        assert!(verdict.deny);
        assert_eq!(verdict.notify, None);
        assert!(oracle.queries().is_empty());
    }

    #[test]
    fn test_placement_with_permission_is_allowed() {
        let actor = ActorId::random();
        let oracle = RecordingOracle::new(true);
        let interaction = PortalInteraction::placement(BlockType::NetherPortal, Some(actor));

        assert_eq!(PortalGate::evaluate(&interaction, &oracle), Verdict::allow());
        assert_eq!(
            oracle.queries(),
            vec![(actor, PortalPermission::NetherPortalCreate)]
        );
    }

    #[test]
    fn test_placement_without_permission_denies_with_message() {
        let oracle = RecordingOracle::new(false);
        let interaction =
            PortalInteraction::placement(BlockType::NetherPortal, Some(ActorId::random()));

        let verdict = PortalGate::evaluate(&interaction, &oracle);
        assert_eq!(
            verdict,
            Verdict::deny_with(MessageKey::NoPortalNetherPortalCreationPermissionError)
        );
    }

    #[test]
    fn test_collision_with_nether_portal_checks_enter_permission() {
        let actor = ActorId::random();
        let oracle = RecordingOracle::new(false);
        let interaction = PortalInteraction::collision(BlockType::NetherPortal, actor);

        assert_eq!(PortalGate::evaluate(&interaction, &oracle), Verdict::deny());
        assert_eq!(
            oracle.queries(),
            vec![(actor, PortalPermission::NetherPortalEnter)]
        );
    }

    #[test]
    fn test_collision_with_end_portal_checks_end_permission() {
        let actor = ActorId::random();
        let denied = RecordingOracle::new(false);
        let interaction = PortalInteraction::collision(BlockType::EndPortal, actor);

        let verdict = PortalGate::evaluate(&interaction, &denied);
        assert!(verdict.deny);
        assert_eq!(verdict.notify, None);
        assert_eq!(denied.queries(), vec![(actor, PortalPermission::EndPortalEnter)]);

        let allowed = RecordingOracle::new(true);
        assert_eq!(PortalGate::evaluate(&interaction, &allowed), Verdict::allow());
    }

    #[test]
    fn test_collision_with_other_block_never_queries() {
        let oracle = RecordingOracle::new(false);
        let interaction = PortalInteraction::collision(BlockType::Other, ActorId::random());

        assert_eq!(PortalGate::evaluate(&interaction, &oracle), Verdict::allow());
        assert!(oracle.queries().is_empty());
    }

    #[test]
    fn test_permissions_are_independent() {
        let actor = ActorId::random();
        let oracle = InMemoryPermissionOracle::new()
            .with_grant(actor, PortalPermission::NetherPortalEnter);

        let enter_nether = PortalInteraction::collision(BlockType::NetherPortal, actor);
        let enter_end = PortalInteraction::collision(BlockType::EndPortal, actor);
        let create = PortalInteraction::placement(BlockType::NetherPortal, Some(actor));

        assert!(!PortalGate::evaluate(&enter_nether, &oracle).deny);
        assert!(PortalGate::evaluate(&enter_end, &oracle).deny);
        assert!(PortalGate::evaluate(&create, &oracle).deny);
    }
}
