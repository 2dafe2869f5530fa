//! Portal permissions and the oracle that answers them

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use serde::{Deserialize, Serialize};

use crate::models::ActorId;

/// Permission nodes checked by the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortalPermission {
    #[serde(rename = "noportal.netherportal.create")]
    NetherPortalCreate,
    #[serde(rename = "noportal.netherportal.enter")]
    NetherPortalEnter,
    #[serde(rename = "noportal.endportal.enter")]
    EndPortalEnter,
}

impl PortalPermission {
    pub const ALL: [PortalPermission; 3] = [
        PortalPermission::NetherPortalCreate,
        PortalPermission::NetherPortalEnter,
        PortalPermission::EndPortalEnter,
    ];

    /// Permission node string as understood by the host
    pub fn as_str(&self) -> &'static str {
        match self {
            PortalPermission::NetherPortalCreate => "noportal.netherportal.create",
            PortalPermission::NetherPortalEnter => "noportal.netherportal.enter",
            PortalPermission::EndPortalEnter => "noportal.endportal.enter",
        }
    }

    /// Look up a permission by its node string
    pub fn from_node(node: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == node)
    }
}

impl fmt::Display for PortalPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answers whether an actor holds a permission
///
/// Implemented by the host adapter on top of the server's permission API.
/// Queries are synchronous and cannot fail.
pub trait PermissionOracle {
    fn has_permission(&self, actor: &ActorId, permission: PortalPermission) -> bool;
}

impl<O: PermissionOracle + ?Sized> PermissionOracle for &O {
    fn has_permission(&self, actor: &ActorId, permission: PortalPermission) -> bool {
        (**self).has_permission(actor, permission)
    }
}

impl<O: PermissionOracle + ?Sized> PermissionOracle for std::sync::Arc<O> {
    fn has_permission(&self, actor: &ActorId, permission: PortalPermission) -> bool {
        (**self).has_permission(actor, permission)
    }
}

/// Fixed set of grants, held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryPermissionOracle {
    grants: HashMap<ActorId, HashSet<PortalPermission>>,
    global: HashSet<PortalPermission>,
}

impl InMemoryPermissionOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `permission` to a single actor
    pub fn grant(&mut self, actor: ActorId, permission: PortalPermission) {
        self.grants.entry(actor).or_default().insert(permission);
    }

    /// Grant `permission` to every actor
    pub fn grant_all(&mut self, permission: PortalPermission) {
        self.global.insert(permission);
    }

    /// Builder form of [`grant`](Self::grant)
    pub fn with_grant(mut self, actor: ActorId, permission: PortalPermission) -> Self {
        self.grant(actor, permission);
        self
    }
}

impl PermissionOracle for InMemoryPermissionOracle {
    fn has_permission(&self, actor: &ActorId, permission: PortalPermission) -> bool {
        self.global.contains(&permission)
            || self
                .grants
                .get(actor)
                .is_some_and(|granted| granted.contains(&permission))
    }
}
