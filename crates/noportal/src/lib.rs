//! NoPortal
//!
//! Stops players from creating Nether portals, and from entering Nether or
//! End portals, unless they hold the matching permission:
//!
//! - `noportal.netherportal.create`
//! - `noportal.netherportal.enter`
//! - `noportal.endportal.enter`
//!
//! The host adapter is deliberately thin. [`events`] normalizes the host's
//! block-placement and block-collision events, [`PortalListener`] runs them
//! through [`noportal_gate::PortalGate`] and cancels or messages accordingly,
//! and [`NoPortalPlugin`] handles startup and configuration.

pub mod audit;
pub mod cli;
pub mod error;
pub mod events;
pub mod listener;
pub mod plugin;

pub use audit::{AuditEntry, GateAuditLog};
pub use cli::{evaluate_event, oracle_from_grants, EvaluationReport, SentMessage};
pub use error::{PluginError, Result};
pub use events::{BlockPlaceEvent, BlockTransaction, Cancellable, CollideBlockEvent, HostEvent};
pub use listener::{MessageSink, PortalListener, RecordingMessageSink};
pub use plugin::{NoPortalPlugin, PluginMetadata, CONFIG_FILE_NAME};
