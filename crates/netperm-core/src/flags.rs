//! Permission flag bitmask.
//!
//! Every capability a peer can be granted occupies one bit. Some named
//! permissions are composites: their constant already carries the bit of
//! the weaker permission they imply, so granting the composite grants the
//! dependent permission too, and checking the composite only succeeds when
//! every constituent bit is present.

use bitflags::bitflags;

bitflags! {
    /// Capabilities granted to a peer, plus the implicit-grant sentinel.
    ///
    /// | Flag | Bits | Meaning |
    /// |------|------|---------|
    /// | [`BLOOM_FILTER`](Self::BLOOM_FILTER) | `1 << 1` | bloom filter queries even if disabled |
    /// | [`RELAY`](Self::RELAY) | `1 << 3` | relay transactions even in blocks-only mode, no INV tracking limit |
    /// | [`FORCE_RELAY`](Self::FORCE_RELAY) | `1 << 2` + relay | relay transactions already in the mempool |
    /// | [`NO_BAN`](Self::NO_BAN) | `1 << 4` + download | never banned or discouraged for misbehavior |
    /// | [`MEMPOOL`](Self::MEMPOOL) | `1 << 5` | mempool queries |
    /// | [`DOWNLOAD`](Self::DOWNLOAD) | `1 << 6` | headers during initial sync, no upload-target disconnect |
    /// | [`ADDR`](Self::ADDR) | `1 << 7` | address requests bypass the privacy cache |
    /// | [`BLOCK_FILTERS`](Self::BLOCK_FILTERS) | `1 << 8` | compact block filter queries even if disabled |
    /// | [`BLOCK_FILTERS_EXPLICIT`](Self::BLOCK_FILTERS_EXPLICIT) | `1 << 9` + block filters | operator named block filters explicitly |
    /// | [`IMPLICIT`](Self::IMPLICIT) | `1 << 31` | no fine-grained permissions given |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PermissionFlags: u32 {
        /// Can query bloom filters even if serving them is disabled.
        const BLOOM_FILTER = 1 << 1;
        /// Relay and accept transactions from this peer, even in blocks-only
        /// mode. Not subject to limits on tracked transaction INVs.
        const RELAY = 1 << 3;
        /// Always relay transactions from this peer, even if already in the
        /// mempool. Implies [`RELAY`](Self::RELAY).
        const FORCE_RELAY = (1 << 2) | Self::RELAY.bits();
        /// Allow header requests during initial sync and block download past
        /// the upload target.
        const DOWNLOAD = 1 << 6;
        /// Can't be banned, disconnected or discouraged for misbehavior.
        /// Implies [`DOWNLOAD`](Self::DOWNLOAD).
        const NO_BAN = (1 << 4) | Self::DOWNLOAD.bits();
        /// Can query the mempool.
        const MEMPOOL = 1 << 5;
        /// Can request addresses without hitting the privacy-preserving cache.
        const ADDR = 1 << 7;
        /// Can query compact block filters even if serving them is disabled.
        const BLOCK_FILTERS = 1 << 8;
        /// Block filters granted by name rather than through [`ALL`](Self::ALL).
        const BLOCK_FILTERS_EXPLICIT = (1 << 9) | Self::BLOCK_FILTERS.bits();
        /// The operator did not set fine-grained permissions; the default
        /// policy applies.
        const IMPLICIT = 1 << 31;
    }
}

impl PermissionFlags {
    /// No permissions.
    pub const NONE: Self = Self::empty();

    /// Everything granted by the `all` shortcut.
    ///
    /// Includes block filters but not the explicit-request marker.
    pub const ALL: Self = Self::BLOOM_FILTER
        .union(Self::FORCE_RELAY)
        .union(Self::RELAY)
        .union(Self::NO_BAN)
        .union(Self::MEMPOOL)
        .union(Self::DOWNLOAD)
        .union(Self::ADDR)
        .union(Self::BLOCK_FILTERS);

    /// True iff every bit of `flag` is set.
    #[must_use]
    pub const fn has_flag(self, flag: Self) -> bool {
        self.bits() & flag.bits() == flag.bits()
    }

    /// Grant `flag`, including every bit a composite carries.
    pub fn add_flag(&mut self, flag: Self) {
        *self = self.union(flag);
    }

    /// Clear exactly the bits of `flag`.
    ///
    /// Clearing a composite also clears its base bit; clearing only the base
    /// leaves the composite's extra bit behind, which [`has_flag`](Self::has_flag)
    /// then reports as absent.
    pub fn clear_flag(&mut self, flag: Self) {
        *self = self.difference(flag);
    }

    /// Whether the implicit-grant sentinel is set.
    #[must_use]
    pub const fn is_implicit(self) -> bool {
        self.has_flag(Self::IMPLICIT)
    }

    /// The capability bits with the sentinel cleared.
    #[must_use]
    pub const fn capabilities(self) -> Self {
        self.difference(Self::IMPLICIT)
    }

    /// Tagged view of the grant state.
    ///
    /// Any capability bits set alongside the sentinel are not carried by
    /// [`Grant::Default`]; use [`capabilities`](Self::capabilities) first if
    /// they matter. The parsers only ever produce the bare sentinel.
    #[must_use]
    pub const fn grant(self) -> Grant {
        if self.is_implicit() {
            Grant::Default
        } else {
            Grant::Explicit(self)
        }
    }
}

impl Default for PermissionFlags {
    fn default() -> Self {
        Self::NONE
    }
}

/// Whether an entry carried explicit permissions or deferred to policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grant {
    /// No permission list was given; the default policy decides.
    ///
    /// Converts back to the bare sentinel.
    Default,
    /// An explicit (possibly empty) set of capabilities.
    Explicit(PermissionFlags),
}

impl From<Grant> for PermissionFlags {
    fn from(grant: Grant) -> Self {
        match grant {
            Grant::Default => PermissionFlags::IMPLICIT,
            Grant::Explicit(flags) => flags.capabilities(),
        }
    }
}
