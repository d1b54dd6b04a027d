//! Proptest generators for property-based testing.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnet::IpNet;
use proptest::prelude::*;

use netperm::ConnectionDirection;
use netperm_core::{PermissionFlags, PERMISSION_NAMES};

/// Generate any bit pattern, including undefined bits.
pub fn raw_flags() -> impl Strategy<Value = PermissionFlags> {
    any::<u32>().prop_map(PermissionFlags::from_bits_retain)
}

/// Generate one named permission (elementary or composite).
pub fn named_permission() -> impl Strategy<Value = PermissionFlags> {
    prop::sample::select(PERMISSION_NAMES.iter().map(|n| n.flags).collect::<Vec<_>>())
}

/// Generate a requestable token, in random ASCII case.
pub fn permission_token() -> impl Strategy<Value = String> {
    let tokens: Vec<&'static str> = PERMISSION_NAMES
        .iter()
        .map(|n| n.token)
        .chain(["all", "bloom"])
        .collect();
    (prop::sample::select(tokens), any::<u64>()).prop_map(|(token, mask)| {
        token
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if (mask >> (i % 64)) & 1 == 1 {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect()
    })
}

/// Generate a comma-separated permission list.
pub fn permission_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(permission_token(), 0..6)
}

/// Generate an IPv4 or IPv6 address.
pub fn ip_addr() -> impl Strategy<Value = IpAddr> {
    prop_oneof![
        any::<[u8; 4]>().prop_map(|b| IpAddr::V4(Ipv4Addr::from(b))),
        any::<[u8; 16]>().prop_map(|b| IpAddr::V6(Ipv6Addr::from(b))),
    ]
}

/// Generate a subnet with a valid prefix for its family.
pub fn subnet() -> impl Strategy<Value = IpNet> {
    prop_oneof![
        (any::<[u8; 4]>(), 0u8..=32).prop_filter_map("prefix out of range", |(b, len)| {
            IpNet::new(IpAddr::V4(Ipv4Addr::from(b)), len).ok()
        }),
        (any::<[u8; 16]>(), 0u8..=128).prop_filter_map("prefix out of range", |(b, len)| {
            IpNet::new(IpAddr::V6(Ipv6Addr::from(b)), len).ok()
        }),
    ]
}

/// Generate a direction restriction.
pub fn direction() -> impl Strategy<Value = ConnectionDirection> {
    prop_oneof![
        Just(ConnectionDirection::Inbound),
        Just(ConnectionDirection::Outbound),
        Just(ConnectionDirection::Both),
    ]
}

/// Parts of a well-formed subnet entry.
#[derive(Debug, Clone)]
pub struct SubnetEntryParams {
    pub direction: ConnectionDirection,
    pub tokens: Option<Vec<String>>,
    pub subnet: IpNet,
}

impl SubnetEntryParams {
    /// Render as configuration text.
    pub fn to_entry(&self) -> String {
        let mut entry = String::new();
        if let Some(marker) = self.direction.marker() {
            entry.push(marker);
        }
        if let Some(tokens) = &self.tokens {
            entry.push_str(&tokens.join(","));
            entry.push('@');
        }
        entry.push_str(&self.subnet.to_string());
        entry
    }

    /// Flags the entry should parse to.
    pub fn expected_flags(&self) -> PermissionFlags {
        match &self.tokens {
            None => PermissionFlags::IMPLICIT,
            Some(tokens) => tokens
                .iter()
                .filter_map(|t| PermissionFlags::from_token(t))
                .fold(PermissionFlags::NONE, |acc, f| acc | f),
        }
    }
}

impl Arbitrary for SubnetEntryParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (direction(), prop::option::of(permission_list()), subnet())
            .prop_map(|(direction, tokens, subnet)| SubnetEntryParams {
                direction,
                tokens,
                subnet,
            })
            .boxed()
    }
}
