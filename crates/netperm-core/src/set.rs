//! Rendering permission flags as tokens.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::flags::PermissionFlags;
use crate::names::PERMISSION_NAMES;

/// A flags value viewed as a list of permission names.
///
/// The implicit-grant sentinel is ignored when rendering but kept by serde.
/// Serde preserves every named permission; a composite's extra bit left
/// without its base is not a named permission and is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PermissionSet(PermissionFlags);

impl PermissionSet {
    /// Wrap a flags value.
    pub const fn new(flags: PermissionFlags) -> Self {
        Self(flags)
    }

    /// The wrapped flags, sentinel included.
    pub const fn flags(&self) -> PermissionFlags {
        self.0
    }

    /// Check a permission.
    pub const fn has(&self, flag: PermissionFlags) -> bool {
        self.0.has_flag(flag)
    }

    /// Whether no capability is granted.
    pub fn is_empty(&self) -> bool {
        self.0.capabilities().is_empty()
    }

    /// Every satisfied permission name, in stable order.
    ///
    /// A composite is listed in addition to its base permission, so
    /// `FORCE_RELAY` renders as `["relay", "forcerelay"]`.
    pub fn to_strings(&self) -> Vec<&'static str> {
        let caps = self.0.capabilities();
        PERMISSION_NAMES
            .iter()
            .filter(|name| caps.has_flag(name.flags))
            .map(|name| name.token)
            .collect()
    }
}

impl From<PermissionFlags> for PermissionSet {
    fn from(flags: PermissionFlags) -> Self {
        Self(flags)
    }
}

impl From<PermissionSet> for PermissionFlags {
    fn from(set: PermissionSet) -> Self {
        set.0
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_strings().join(", "))
    }
}

/// Serialized form: the sentinel as a flag, capabilities as rendered tokens.
#[derive(Serialize)]
struct SetRepr {
    implicit: bool,
    permissions: Vec<&'static str>,
}

#[derive(Deserialize)]
struct OwnedSetRepr {
    #[serde(default)]
    implicit: bool,
    #[serde(default)]
    permissions: Vec<String>,
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SetRepr {
            implicit: self.0.is_implicit(),
            permissions: self.to_strings(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    /// Tokens resolve through the rendering table rather than
    /// [`PermissionFlags::from_token`], so `blockfilters` without
    /// `blockfilters-explicit` reads back as plain block filters.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = OwnedSetRepr::deserialize(deserializer)?;
        let mut flags = if repr.implicit {
            PermissionFlags::IMPLICIT
        } else {
            PermissionFlags::NONE
        };
        for token in &repr.permissions {
            let name = PERMISSION_NAMES
                .iter()
                .find(|name| name.token.eq_ignore_ascii_case(token))
                .ok_or_else(|| de::Error::custom(format!("invalid P2P permission: '{token}'")))?;
            flags.add_flag(name.flags);
        }
        Ok(Self(flags))
    }
}
