//! Permissions attached to a bound listening address.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use netperm_core::{PermissionFlags, PermissionSet};

use crate::error::{ParseError, Result};
use crate::parser::parse_entry;

/// Permissions granted to every peer that connects through one listener.
///
/// Parsed from `[<perm>,<perm>,...@]<ip:port>`, e.g. `noban,relay@127.0.0.1:8333`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundPermission {
    /// Granted permissions. Exactly `IMPLICIT` when the entry had no list.
    pub flags: PermissionFlags,
    /// The listening address.
    pub service: SocketAddr,
}

impl BoundPermission {
    /// Create a bound permission directly.
    pub fn new(service: SocketAddr, flags: PermissionFlags) -> Self {
        Self { flags, service }
    }

    /// Parse a whitebind-style entry.
    ///
    /// The address must be numeric and carry a non-zero port. Direction
    /// markers are not accepted.
    pub fn try_parse(input: &str) -> Result<Self> {
        let entry = parse_entry(input, false)?;
        let service = parse_service(entry.target)?;

        tracing::debug!(
            entry = input,
            service = %service,
            permissions = %PermissionSet::new(entry.flags),
            implicit = entry.flags.is_implicit(),
            "parsed bound permission"
        );

        Ok(Self {
            flags: entry.flags,
            service,
        })
    }

    /// The granted permissions as a renderable set.
    pub fn permissions(&self) -> PermissionSet {
        PermissionSet::new(self.flags)
    }
}

impl FromStr for BoundPermission {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}

fn parse_service(text: &str) -> Result<SocketAddr> {
    match text.parse::<SocketAddr>() {
        Ok(addr) if addr.port() == 0 => Err(ParseError::MissingPort(text.to_string())),
        Ok(addr) => Ok(addr),
        Err(_) if is_bare_ip(text) => Err(ParseError::MissingPort(text.to_string())),
        Err(_) => Err(ParseError::MalformedAddress(text.to_string())),
    }
}

fn is_bare_ip(text: &str) -> bool {
    let unbracketed = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(text);
    unbracketed.parse::<IpAddr>().is_ok()
}
