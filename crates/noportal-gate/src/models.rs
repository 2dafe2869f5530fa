//! Portal interaction data models

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identifier of the player responsible for an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Wrap an existing player UUID
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Create a random identifier (for tests and tooling)
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ActorId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Error returned when an actor id string is not a UUID
#[derive(Debug, Error)]
#[error("Invalid actor id '{input}': {source}")]
pub struct ParseActorIdError {
    input: String,
    #[source]
    source: uuid::Error,
}

impl FromStr for ActorId {
    type Err = ParseActorIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|source| ParseActorIdError {
                input: s.to_string(),
                source,
            })
    }
}

/// Category of host event the interaction came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Blocks were placed, possibly forming a portal
    BlockPlacement,
    /// An entity touched an existing block
    EntityCollision,
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionKind::BlockPlacement => write!(f, "block_placement"),
            InteractionKind::EntityCollision => write!(f, "entity_collision"),
        }
    }
}

/// Resolved type of the block an interaction concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    NetherPortal,
    EndPortal,
    Other,
}

impl BlockType {
    const DEFAULT_NAMESPACE: &'static str = "minecraft";

    /// Resolve a namespaced block id such as `minecraft:nether_portal`
    ///
    /// Ids without a namespace are treated as `minecraft:` ids. The legacy
    /// `portal` id resolves to a Nether portal. Block state suffixes
    /// (`minecraft:nether_portal[axis=x]`) are ignored.
    pub fn from_block_id(id: &str) -> Self {
        let id = id.trim();
        let id = id.split_once('[').map_or(id, |(base, _)| base);
        let (namespace, path) = id
            .split_once(':')
            .unwrap_or((Self::DEFAULT_NAMESPACE, id));

        if !namespace.eq_ignore_ascii_case(Self::DEFAULT_NAMESPACE) {
            return BlockType::Other;
        }

        match path.to_ascii_lowercase().as_str() {
            "nether_portal" | "portal" => BlockType::NetherPortal,
            "end_portal" => BlockType::EndPortal,
            _ => BlockType::Other,
        }
    }

    /// Whether this block is one of the gated portal blocks
    pub fn is_portal(&self) -> bool {
        !matches!(self, BlockType::Other)
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockType::NetherPortal => write!(f, "nether_portal"),
            BlockType::EndPortal => write!(f, "end_portal"),
            BlockType::Other => write!(f, "other"),
        }
    }
}

/// Normalized description of one host event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalInteraction {
    pub kind: InteractionKind,
    pub block_type: BlockType,
    /// Player responsible, if the host could attribute one
    pub actor: Option<ActorId>,
}

impl PortalInteraction {
    /// Placement of `block_type`, optionally caused by `actor`
    pub fn placement(block_type: BlockType, actor: Option<ActorId>) -> Self {
        Self {
            kind: InteractionKind::BlockPlacement,
            block_type,
            actor,
        }
    }

    /// Collision of `actor` with a block of `block_type`
    pub fn collision(block_type: BlockType, actor: ActorId) -> Self {
        Self {
            kind: InteractionKind::EntityCollision,
            block_type,
            actor: Some(actor),
        }
    }
}

/// Key of a player-facing message in the message configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKey {
    /// Shown when a player may not create a Nether portal
    NoPortalNetherPortalCreationPermissionError,
    /// Older name of the creation message, still honoured in config files
    NoPortalCreationPermissionError,
}

impl MessageKey {
    /// Key as it appears in the configuration file
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKey::NoPortalNetherPortalCreationPermissionError => {
                "NoPortalNetherPortalCreationPermissionError"
            }
            MessageKey::NoPortalCreationPermissionError => "NoPortalCreationPermissionError",
        }
    }

    /// Historical key consulted when this key is missing from the config
    pub fn legacy_alias(&self) -> Option<MessageKey> {
        match self {
            MessageKey::NoPortalNetherPortalCreationPermissionError => {
                Some(MessageKey::NoPortalCreationPermissionError)
            }
            MessageKey::NoPortalCreationPermissionError => None,
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating an interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the host event must be cancelled
    pub deny: bool,
    /// Message to deliver to the actor
    pub notify: Option<MessageKey>,
}

impl Verdict {
    pub fn allow() -> Self {
        Self {
            deny: false,
            notify: None,
        }
    }

    /// Deny silently
    pub fn deny() -> Self {
        Self {
            deny: true,
            notify: None,
        }
    }

    /// Deny and tell the actor why
    pub fn deny_with(key: MessageKey) -> Self {
        Self {
            deny: true,
            notify: Some(key),
        }
    }
}
