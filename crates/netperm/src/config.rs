//! Permission configuration and per-peer lookup.
//!
//! A [`PermissionConfig`] holds the raw entry strings as an operator wrote
//! them. Loading it parses every entry into a [`PermissionTable`], which
//! answers "what may this peer do" for inbound and outbound connections.

use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

use netperm_core::PermissionFlags;

use crate::bound::BoundPermission;
use crate::direction::ConnectionDirection;
use crate::error::ConfigError;
use crate::subnet::SubnetPermission;

/// Permissions applied to entries that carry no explicit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImplicitGrantPolicy {
    /// Grant `relay` to implicit entries.
    pub relay: bool,
    /// Grant `forcerelay` to implicit entries.
    pub force_relay: bool,
}

impl Default for ImplicitGrantPolicy {
    fn default() -> Self {
        Self {
            relay: true,
            force_relay: false,
        }
    }
}

impl ImplicitGrantPolicy {
    /// Replace the implicit-grant sentinel with the default permissions.
    ///
    /// Implicit entries always get `mempool` and `noban`; `relay` and
    /// `forcerelay` follow the policy. Explicit flags are returned unchanged.
    pub fn resolve(&self, flags: PermissionFlags) -> PermissionFlags {
        if !flags.is_implicit() {
            return flags;
        }

        let mut resolved = flags;
        resolved.clear_flag(PermissionFlags::IMPLICIT);
        if self.force_relay {
            resolved.add_flag(PermissionFlags::FORCE_RELAY);
        }
        if self.relay {
            resolved.add_flag(PermissionFlags::RELAY);
        }
        resolved.add_flag(PermissionFlags::MEMPOOL);
        resolved.add_flag(PermissionFlags::NO_BAN);
        resolved
    }
}

/// Operator-supplied permission entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionConfig {
    /// Bound-address entries, `[perms@]ip:port`.
    pub whitebind: Vec<String>,
    /// Subnet entries, `[<|>][perms@]subnet`.
    pub whitelist: Vec<String>,
    /// Defaults for entries without a permission list.
    pub implicit: ImplicitGrantPolicy,
}

impl PermissionConfig {
    /// Parse every entry. The first bad entry fails the whole load.
    pub fn load(&self) -> Result<PermissionTable, ConfigError> {
        let binds = self
            .whitebind
            .iter()
            .map(|entry| {
                BoundPermission::try_parse(entry).map_err(|source| {
                    tracing::warn!(entry = %entry, error = %source, "rejected whitebind entry");
                    ConfigError::Whitebind {
                        entry: entry.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let subnets = self
            .whitelist
            .iter()
            .map(|entry| {
                SubnetPermission::try_parse(entry).map_err(|source| {
                    tracing::warn!(entry = %entry, error = %source, "rejected whitelist entry");
                    ConfigError::Whitelist {
                        entry: entry.clone(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            binds = binds.len(),
            subnets = subnets.len(),
            "loaded permission configuration"
        );

        Ok(PermissionTable::new(binds, subnets, self.implicit))
    }
}

/// Parsed permission entries, ready for per-connection lookups.
#[derive(Debug, Clone, Default)]
pub struct PermissionTable {
    binds: Vec<BoundPermission>,
    subnets: Vec<SubnetPermission>,
    implicit: ImplicitGrantPolicy,
}

impl PermissionTable {
    /// Build a table from already-parsed entries.
    pub fn new(
        binds: Vec<BoundPermission>,
        subnets: Vec<SubnetPermission>,
        implicit: ImplicitGrantPolicy,
    ) -> Self {
        Self {
            binds,
            subnets,
            implicit,
        }
    }

    pub fn binds(&self) -> &[BoundPermission] {
        &self.binds
    }

    pub fn subnets(&self) -> &[SubnetPermission] {
        &self.subnets
    }

    /// Permissions for a peer that connected to us.
    ///
    /// `local` is the address of the listener that accepted the connection.
    /// Its bound permission (if any) is combined with every inbound-capable
    /// subnet entry containing `peer`, then the implicit policy is applied.
    pub fn inbound_flags(&self, local: Option<&SocketAddr>, peer: &IpAddr) -> PermissionFlags {
        let mut flags = local
            .and_then(|local| self.binds.iter().find(|bind| &bind.service == local))
            .map(|bind| bind.flags)
            .unwrap_or_default();

        self.add_subnet_flags(&mut flags, peer, ConnectionDirection::Inbound);
        self.implicit.resolve(flags)
    }

    /// Permissions for a peer we connected to.
    pub fn outbound_flags(&self, peer: &IpAddr) -> PermissionFlags {
        let mut flags = PermissionFlags::NONE;
        self.add_subnet_flags(&mut flags, peer, ConnectionDirection::Outbound);
        self.implicit.resolve(flags)
    }

    fn add_subnet_flags(
        &self,
        flags: &mut PermissionFlags,
        peer: &IpAddr,
        direction: ConnectionDirection,
    ) {
        for subnet in &self.subnets {
            if subnet.applies_to(peer, direction) {
                flags.add_flag(subnet.flags);
            }
        }
    }
}
