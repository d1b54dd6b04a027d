//! Connection direction restriction for subnet permissions.

use std::fmt;

/// Which connections a subnet permission applies to.
///
/// Written as an optional single leading marker on a subnet entry:
/// `<` for inbound-only, `>` for outbound-only, nothing for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionDirection {
    /// Only connections the peer opened to us.
    Inbound,
    /// Only connections we opened to the peer.
    Outbound,
    /// Either direction.
    #[default]
    Both,
}

impl ConnectionDirection {
    /// Marker for inbound-only entries.
    pub const INBOUND_MARKER: char = '<';
    /// Marker for outbound-only entries.
    pub const OUTBOUND_MARKER: char = '>';

    /// Map a marker character to a direction.
    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            Self::INBOUND_MARKER => Some(Self::Inbound),
            Self::OUTBOUND_MARKER => Some(Self::Outbound),
            _ => None,
        }
    }

    /// The marker that selects this direction, if any.
    pub fn marker(self) -> Option<char> {
        match self {
            Self::Inbound => Some(Self::INBOUND_MARKER),
            Self::Outbound => Some(Self::OUTBOUND_MARKER),
            Self::Both => None,
        }
    }

    pub fn allows_inbound(self) -> bool {
        matches!(self, Self::Inbound | Self::Both)
    }

    pub fn allows_outbound(self) -> bool {
        matches!(self, Self::Outbound | Self::Both)
    }

    /// Whether a restriction of `self` covers a connection going `connection`.
    ///
    /// A connection reported as `Both` is only covered by an unrestricted entry.
    pub fn permits(self, connection: ConnectionDirection) -> bool {
        match connection {
            Self::Inbound => self.allows_inbound(),
            Self::Outbound => self.allows_outbound(),
            Self::Both => self == Self::Both,
        }
    }
}

impl fmt::Display for ConnectionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inbound => write!(f, "inbound"),
            Self::Outbound => write!(f, "outbound"),
            Self::Both => write!(f, "both"),
        }
    }
}
