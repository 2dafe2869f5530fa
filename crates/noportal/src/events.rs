//! Host event records and their normalization
//!
//! These mirror the two host events NoPortal listens to: a block placement
//! carrying one transaction per changed block, and an entity colliding with a
//! block. Normalization turns them into a [`PortalInteraction`] for the gate.

use noportal_gate::{ActorId, BlockType, PortalInteraction};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Host event that can be cancelled by a listener
pub trait Cancellable {
    fn is_cancelled(&self) -> bool;

    fn set_cancelled(&mut self, cancelled: bool);
}

/// One block change inside a placement event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTransaction {
    /// Block id before the change
    pub original: String,
    /// Block id after the change
    pub replacement: String,
}

impl BlockTransaction {
    pub fn new(original: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            replacement: replacement.into(),
        }
    }

    /// Resolved type of the block this transaction produces
    pub fn resulting_type(&self) -> BlockType {
        BlockType::from_block_id(&self.replacement)
    }
}

/// Blocks were placed in the world
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPlaceEvent {
    pub transactions: Vec<BlockTransaction>,
    /// Player the host attributes the placement to, if any
    #[serde(default)]
    pub cause: Option<ActorId>,
    #[serde(default)]
    pub cancelled: bool,
}

impl BlockPlaceEvent {
    pub fn new(transactions: Vec<BlockTransaction>, cause: Option<ActorId>) -> Self {
        Self {
            transactions,
            cause,
            cancelled: false,
        }
    }

    /// Index and type of the transaction that decides this event
    ///
    /// Scanning stops at the first transaction producing a Nether portal. If
    /// there is none, the first End portal transaction is returned instead.
    pub fn deciding_transaction(&self) -> Option<(usize, BlockType)> {
        let mut end_portal = None;
        for (index, transaction) in self.transactions.iter().enumerate() {
            match transaction.resulting_type() {
                BlockType::NetherPortal => return Some((index, BlockType::NetherPortal)),
                BlockType::EndPortal if end_portal.is_none() => {
                    end_portal = Some((index, BlockType::EndPortal))
                }
                _ => {}
            }
        }
        end_portal
    }

    /// Normalize into a placement interaction
    pub fn to_interaction(&self) -> PortalInteraction {
        let block_type = self
            .deciding_transaction()
            .map_or(BlockType::Other, |(_, block_type)| block_type);
        PortalInteraction::placement(block_type, self.cause)
    }
}

impl Cancellable for BlockPlaceEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// An entity collided with a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollideBlockEvent {
    /// Id of the block collided with
    pub target_block: String,
    /// Player at the root of the event cause; absent for non-player entities
    #[serde(default)]
    pub root_player: Option<ActorId>,
    #[serde(default)]
    pub cancelled: bool,
}

impl CollideBlockEvent {
    pub fn new(target_block: impl Into<String>, root_player: Option<ActorId>) -> Self {
        Self {
            target_block: target_block.into(),
            root_player,
            cancelled: false,
        }
    }

    /// Normalize into a collision interaction
    ///
    /// Returns `None` when no player caused the collision; such events are
    /// not gated.
    pub fn to_interaction(&self) -> Option<PortalInteraction> {
        let actor = self.root_player?;
        Some(PortalInteraction::collision(
            BlockType::from_block_id(&self.target_block),
            actor,
        ))
    }
}

impl Cancellable for CollideBlockEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

/// Either host event, as read from JSON
///
/// ```json
/// {"type": "collide", "target_block": "minecraft:end_portal",
///  "root_player": "069a79f4-44e9-4726-a5be-fca90e38aaf5"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    Place(BlockPlaceEvent),
    Collide(CollideBlockEvent),
}

impl HostEvent {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn is_cancelled(&self) -> bool {
        match self {
            HostEvent::Place(event) => event.is_cancelled(),
            HostEvent::Collide(event) => event.is_cancelled(),
        }
    }
}
