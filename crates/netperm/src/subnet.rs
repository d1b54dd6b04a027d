//! Permissions attached to a range of peer addresses.

use std::net::IpAddr;
use std::str::FromStr;

use ipnet::IpNet;
use netperm_core::{PermissionFlags, PermissionSet};

use crate::direction::ConnectionDirection;
use crate::error::{ParseError, Result};
use crate::parser::parse_entry;

/// Permissions granted to peers whose address falls inside a subnet.
///
/// Parsed from `[<|>][<perm>,<perm>,...@]<subnet>`, e.g. `<noban@10.0.0.0/8`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubnetPermission {
    /// Granted permissions. Exactly `IMPLICIT` when the entry had no list.
    pub flags: PermissionFlags,
    /// Matching peer addresses, host bits truncated.
    pub subnet: IpNet,
    /// Connections the grant applies to.
    pub direction: ConnectionDirection,
}

impl SubnetPermission {
    /// Create a subnet permission directly.
    pub fn new(subnet: IpNet, flags: PermissionFlags, direction: ConnectionDirection) -> Self {
        Self {
            flags,
            subnet: subnet.trunc(),
            direction,
        }
    }

    /// Parse a whitelist-style entry, keeping its direction restriction.
    ///
    /// The subnet may be a plain address (`/32` or `/128`), a CIDR prefix,
    /// or an address with a dotted netmask.
    pub fn try_parse(input: &str) -> Result<Self> {
        let entry = parse_entry(input, true)?;
        let subnet = parse_subnet(entry.target)?;
        let direction = entry.direction.unwrap_or_default();

        tracing::debug!(
            entry = input,
            subnet = %subnet,
            direction = %direction,
            permissions = %PermissionSet::new(entry.flags),
            implicit = entry.flags.is_implicit(),
            "parsed subnet permission"
        );

        Ok(Self {
            flags: entry.flags,
            subnet,
            direction,
        })
    }

    /// Parse an entry for a caller that does not restrict by direction.
    ///
    /// A marker is still validated, then dropped: the result always has
    /// [`ConnectionDirection::Both`].
    pub fn try_parse_any_direction(input: &str) -> Result<Self> {
        let mut permission = Self::try_parse(input)?;
        permission.direction = ConnectionDirection::Both;
        Ok(permission)
    }

    /// Whether this grant covers `peer` on a connection going `direction`.
    pub fn applies_to(&self, peer: &IpAddr, direction: ConnectionDirection) -> bool {
        self.direction.permits(direction) && self.subnet.contains(peer)
    }

    /// The granted permissions as a renderable set.
    pub fn permissions(&self) -> PermissionSet {
        PermissionSet::new(self.flags)
    }
}

impl FromStr for SubnetPermission {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}

fn parse_subnet(text: &str) -> Result<IpNet> {
    let malformed = || ParseError::MalformedSubnet(text.to_string());

    let (addr, prefix) = match text.split_once('/') {
        None => {
            let addr: IpAddr = text.parse().map_err(|_| malformed())?;
            (addr, max_prefix(addr))
        }
        Some((addr, mask)) => {
            let addr: IpAddr = addr.parse().map_err(|_| malformed())?;
            let prefix = match mask.parse::<u8>() {
                Ok(len) if mask.bytes().all(|b| b.is_ascii_digit()) => len,
                _ => netmask_prefix(addr, mask).ok_or_else(malformed)?,
            };
            (addr, prefix)
        }
    };

    let net = IpNet::new(addr, prefix).map_err(|_| malformed())?;
    Ok(net.trunc())
}

fn max_prefix(addr: IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

/// Prefix length of a contiguous netmask in the same family as `addr`.
fn netmask_prefix(addr: IpAddr, mask: &str) -> Option<u8> {
    match (addr, mask.parse::<IpAddr>().ok()?) {
        (IpAddr::V4(_), IpAddr::V4(mask)) => ipnet::ipv4_mask_to_prefix(mask).ok(),
        (IpAddr::V6(_), IpAddr::V6(mask)) => ipnet::ipv6_mask_to_prefix(mask).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> IpNet {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_cidr_with_permissions() {
        let perm = SubnetPermission::try_parse("relay,noban@10.0.0.0/8").unwrap();
        assert_eq!(perm.subnet, net("10.0.0.0/8"));
        assert_eq!(perm.direction, ConnectionDirection::Both);
        assert!(perm.flags.has_flag(PermissionFlags::RELAY));
        assert!(perm.flags.has_flag(PermissionFlags::NO_BAN));
        assert!(perm.flags.has_flag(PermissionFlags::DOWNLOAD));
    }

    #[test]
    fn test_parse_all() {
        let perm = SubnetPermission::try_parse("all@5.6.7.8/24").unwrap();
        assert_eq!(perm.flags, PermissionFlags::ALL);
        assert_eq!(perm.subnet, net("5.6.7.0/24"));
    }

    #[test]
    fn test_plain_address_is_host_subnet() {
        let v4 = SubnetPermission::try_parse("1.2.3.4").unwrap();
        assert_eq!(v4.subnet, net("1.2.3.4/32"));
        assert_eq!(v4.flags, PermissionFlags::IMPLICIT);

        let v6 = SubnetPermission::try_parse("mempool@2001:db8::1").unwrap();
        assert_eq!(v6.subnet, net("2001:db8::1/128"));
    }

    #[test]
    fn test_dotted_netmask() {
        let perm = SubnetPermission::try_parse("192.168.1.77/255.255.255.0").unwrap();
        assert_eq!(perm.subnet, net("192.168.1.0/24"));

        let v6 = SubnetPermission::try_parse("2001:db8::/ffff:ffff::").unwrap();
        assert_eq!(v6.subnet, net("2001:db8::/32"));
    }

    #[test]
    fn test_malformed_subnet() {
        for bad in [
            "relay@1.2.3.4/33",
            "relay@1.2.3.4/255.0.255.0",
            "relay@1.2.3.4/ffff::",
            "relay@1.2.3.4/+8",
            "relay@example.com",
            "relay@",
            "1.2.3.4:8333",
        ] {
            assert!(
                matches!(SubnetPermission::try_parse(bad), Err(ParseError::MalformedSubnet(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_unknown_permission() {
        assert_eq!(
            SubnetPermission::try_parse("bogus@1.2.3.4"),
            Err(ParseError::UnknownPermission("bogus".into()))
        );
    }

    #[test]
    fn test_direction_markers() {
        let inbound = SubnetPermission::try_parse("<noban@10.0.0.0/8").unwrap();
        assert_eq!(inbound.direction, ConnectionDirection::Inbound);

        let outbound = SubnetPermission::try_parse(">10.0.0.0/8").unwrap();
        assert_eq!(outbound.direction, ConnectionDirection::Outbound);
        assert_eq!(outbound.flags, PermissionFlags::IMPLICIT);
    }

    #[test]
    fn test_any_direction_discards_marker() {
        let perm = SubnetPermission::try_parse_any_direction(">relay@10.0.0.0/8").unwrap();
        assert_eq!(perm.direction, ConnectionDirection::Both);
        assert_eq!(perm.flags, PermissionFlags::RELAY);

        assert!(matches!(
            SubnetPermission::try_parse_any_direction("<<relay@10.0.0.0/8"),
            Err(ParseError::MalformedDirection(_))
        ));
    }

    #[test]
    fn test_applies_to() {
        let perm = SubnetPermission::try_parse("<relay@10.0.0.0/8").unwrap();
        let inside: IpAddr = "10.1.2.3".parse().unwrap();
        let outside: IpAddr = "11.0.0.1".parse().unwrap();

        assert!(perm.applies_to(&inside, ConnectionDirection::Inbound));
        assert!(!perm.applies_to(&inside, ConnectionDirection::Outbound));
        assert!(!perm.applies_to(&outside, ConnectionDirection::Inbound));
    }

    #[test]
    fn test_new_truncates_host_bits() {
        let perm = SubnetPermission::new(
            net("10.9.8.7/16"),
            PermissionFlags::MEMPOOL,
            ConnectionDirection::Both,
        );
        assert_eq!(perm.subnet, net("10.9.0.0/16"));
    }
}
