//! Parse vectors: entries with their expected outcome.
//!
//! Shared by the crates' tests so every parser change is checked against
//! the same table of operator-facing examples.

use netperm::{BoundPermission, ConnectionDirection, ParseError, SubnetPermission};
use netperm_core::PermissionFlags;

/// Which parser an entry is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Bound,
    Subnet,
}

/// What parsing an entry should produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// Success with these flags, target text, and direction.
    Parses {
        flags: PermissionFlags,
        target: &'static str,
        direction: ConnectionDirection,
    },
    /// Failure of this kind.
    Fails(ErrorKind),
}

/// Parse failure category, without the offending text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownPermission,
    MalformedAddress,
    MissingPort,
    MalformedSubnet,
    MalformedDirection,
}

impl From<&ParseError> for ErrorKind {
    fn from(err: &ParseError) -> Self {
        match err {
            ParseError::UnknownPermission(_) => ErrorKind::UnknownPermission,
            ParseError::MalformedAddress(_) => ErrorKind::MalformedAddress,
            ParseError::MissingPort(_) => ErrorKind::MissingPort,
            ParseError::MalformedSubnet(_) => ErrorKind::MalformedSubnet,
            ParseError::MalformedDirection(_) => ErrorKind::MalformedDirection,
        }
    }
}

/// A parse vector.
#[derive(Debug, Clone)]
pub struct ParseVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Which parser to run.
    pub kind: EntryKind,
    /// Entry text.
    pub input: &'static str,
    /// Expected outcome.
    pub expected: Expected,
}

fn ok(flags: PermissionFlags, target: &'static str) -> Expected {
    Expected::Parses {
        flags,
        target,
        direction: ConnectionDirection::Both,
    }
}

fn ok_dir(
    flags: PermissionFlags,
    target: &'static str,
    direction: ConnectionDirection,
) -> Expected {
    Expected::Parses {
        flags,
        target,
        direction,
    }
}

/// Get all parse vectors.
pub fn all_vectors() -> Vec<ParseVector> {
    use EntryKind::*;
    use ErrorKind::*;

    vec![
        ParseVector {
            name: "bound without permissions",
            kind: Bound,
            input: "1.2.3.4:8333",
            expected: ok(PermissionFlags::IMPLICIT, "1.2.3.4:8333"),
        },
        ParseVector {
            name: "bound with composite",
            kind: Bound,
            input: "noban,bloomfilter@127.0.0.1:8334",
            expected: ok(
                PermissionFlags::NO_BAN | PermissionFlags::BLOOM_FILTER,
                "127.0.0.1:8334",
            ),
        },
        ParseVector {
            name: "bound ipv6",
            kind: Bound,
            input: "ADDR@[2001:db8::7]:18333",
            expected: ok(PermissionFlags::ADDR, "[2001:db8::7]:18333"),
        },
        ParseVector {
            name: "bound missing port",
            kind: Bound,
            input: "relay@1.2.3.4",
            expected: Expected::Fails(MissingPort),
        },
        ParseVector {
            name: "bound hostname",
            kind: Bound,
            input: "relay@seed.example.org:8333",
            expected: Expected::Fails(MalformedAddress),
        },
        ParseVector {
            name: "bound with direction",
            kind: Bound,
            input: ">relay@1.2.3.4:8333",
            expected: Expected::Fails(MalformedDirection),
        },
        ParseVector {
            name: "subnet relay noban",
            kind: Subnet,
            input: "relay,noban@10.0.0.0/8",
            expected: ok(PermissionFlags::RELAY | PermissionFlags::NO_BAN, "10.0.0.0/8"),
        },
        ParseVector {
            name: "subnet all",
            kind: Subnet,
            input: "all@5.6.7.8/24",
            expected: ok(PermissionFlags::ALL, "5.6.7.0/24"),
        },
        ParseVector {
            name: "subnet explicit block filters",
            kind: Subnet,
            input: "blockfilters@192.0.2.0/24",
            expected: ok(PermissionFlags::BLOCK_FILTERS_EXPLICIT, "192.0.2.0/24"),
        },
        ParseVector {
            name: "subnet plain address",
            kind: Subnet,
            input: "192.0.2.9",
            expected: ok(PermissionFlags::IMPLICIT, "192.0.2.9/32"),
        },
        ParseVector {
            name: "subnet netmask",
            kind: Subnet,
            input: "mempool@172.16.5.4/255.240.0.0",
            expected: ok(PermissionFlags::MEMPOOL, "172.16.0.0/12"),
        },
        ParseVector {
            name: "subnet inbound only",
            kind: Subnet,
            input: "<forcerelay@10.0.0.0/8",
            expected: ok_dir(
                PermissionFlags::FORCE_RELAY,
                "10.0.0.0/8",
                ConnectionDirection::Inbound,
            ),
        },
        ParseVector {
            name: "subnet outbound only without list",
            kind: Subnet,
            input: ">2001:db8::/32",
            expected: ok_dir(
                PermissionFlags::IMPLICIT,
                "2001:db8::/32",
                ConnectionDirection::Outbound,
            ),
        },
        ParseVector {
            name: "subnet unknown token",
            kind: Subnet,
            input: "bogus@1.2.3.4",
            expected: Expected::Fails(UnknownPermission),
        },
        ParseVector {
            name: "subnet bad prefix",
            kind: Subnet,
            input: "relay@10.0.0.0/40",
            expected: Expected::Fails(MalformedSubnet),
        },
        ParseVector {
            name: "subnet double direction",
            kind: Subnet,
            input: "<>relay@10.0.0.0/8",
            expected: Expected::Fails(MalformedDirection),
        },
    ]
}

/// Run one vector through its parser.
pub fn run_vector(
    vector: &ParseVector,
) -> Result<(PermissionFlags, String, ConnectionDirection), ErrorKind> {
    match vector.kind {
        EntryKind::Bound => BoundPermission::try_parse(vector.input)
            .map(|p| (p.flags, p.service.to_string(), ConnectionDirection::Both))
            .map_err(|e| ErrorKind::from(&e)),
        EntryKind::Subnet => SubnetPermission::try_parse(vector.input)
            .map(|p| (p.flags, p.subnet.to_string(), p.direction))
            .map_err(|e| ErrorKind::from(&e)),
    }
}

/// Check every vector against its expected outcome.
///
/// Returns `(name, matches)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    all_vectors()
        .iter()
        .map(|v| {
            let matches = match (&v.expected, run_vector(v)) {
                (
                    Expected::Parses {
                        flags,
                        target,
                        direction,
                    },
                    Ok((got_flags, got_target, got_direction)),
                ) => *flags == got_flags && *target == got_target && *direction == got_direction,
                (Expected::Fails(kind), Err(got)) => *kind == got,
                _ => false,
            };
            (v.name.to_string(), matches)
        })
        .collect()
}
