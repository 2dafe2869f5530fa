//! Portal gate for NoPortal
//!
//! Decides whether a portal interaction (creating a Nether portal, or walking
//! into a Nether/End portal) should be blocked, and which message, if any,
//! should be shown to the player responsible.
//!
//! The gate is a pure function over a normalized [`PortalInteraction`] and a
//! [`PermissionOracle`]. Host integration (event extraction, cancellation,
//! messaging) lives in the `noportal` crate.

pub mod gate;
pub mod models;
pub mod permission;

pub use gate::PortalGate;
pub use models::{
    ActorId, BlockType, InteractionKind, MessageKey, ParseActorIdError, PortalInteraction,
    Verdict,
};
pub use permission::{InMemoryPermissionOracle, PermissionOracle, PortalPermission};
