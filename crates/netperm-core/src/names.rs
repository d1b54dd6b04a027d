//! Permission tokens as written in configuration and shown to operators.

use crate::flags::PermissionFlags;

/// A named permission and the flags it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionName {
    /// Token as rendered.
    pub token: &'static str,
    /// Flags that must all be present for the token to be rendered.
    pub flags: PermissionFlags,
}

impl PermissionName {
    const fn new(token: &'static str, flags: PermissionFlags) -> Self {
        Self { token, flags }
    }
}

/// Rendering order: elementary capabilities, then composites, then the
/// explicit block filter marker.
pub const PERMISSION_NAMES: [PermissionName; 9] = [
    PermissionName::new("bloomfilter", PermissionFlags::BLOOM_FILTER),
    PermissionName::new("relay", PermissionFlags::RELAY),
    PermissionName::new("mempool", PermissionFlags::MEMPOOL),
    PermissionName::new("addr", PermissionFlags::ADDR),
    PermissionName::new("download", PermissionFlags::DOWNLOAD),
    PermissionName::new("blockfilters", PermissionFlags::BLOCK_FILTERS),
    PermissionName::new("forcerelay", PermissionFlags::FORCE_RELAY),
    PermissionName::new("noban", PermissionFlags::NO_BAN),
    PermissionName::new("blockfilters-explicit", PermissionFlags::BLOCK_FILTERS_EXPLICIT),
];

/// Help text for each permission an operator can request.
pub const PERMISSION_DOCS: [(&str, &str); 8] = [
    ("bloomfilter", "allow requesting filtered blocks and transactions"),
    ("noban", "do not ban for misbehavior; implies download"),
    ("forcerelay", "relay transactions that are already in the mempool; implies relay"),
    ("relay", "relay even in blocks-only mode, and unlimited transaction announcements"),
    ("mempool", "allow requesting mempool contents"),
    ("download", "allow getheaders during initial sync, no disconnect after the upload target"),
    ("addr", "address requests bypass the cache and return random up-to-date records"),
    ("blockfilters", "allow requesting compact block filters"),
];

/// Help lines in the form `name (description)`.
pub fn permission_docs() -> Vec<String> {
    PERMISSION_DOCS
        .iter()
        .map(|(name, doc)| format!("{name} ({doc})"))
        .collect()
}

impl PermissionFlags {
    /// Resolve a configuration token, ignoring ASCII case.
    ///
    /// `all` maps to [`ALL`](Self::ALL). Naming `blockfilters` is an explicit
    /// request, so it yields [`BLOCK_FILTERS_EXPLICIT`](Self::BLOCK_FILTERS_EXPLICIT).
    pub fn from_token(token: &str) -> Option<Self> {
        let flags = match token.to_ascii_lowercase().as_str() {
            "bloomfilter" | "bloom" => Self::BLOOM_FILTER,
            "noban" => Self::NO_BAN,
            "forcerelay" => Self::FORCE_RELAY,
            "mempool" => Self::MEMPOOL,
            "download" => Self::DOWNLOAD,
            "all" => Self::ALL,
            "relay" => Self::RELAY,
            "addr" => Self::ADDR,
            "blockfilters" | "blockfilters-explicit" => Self::BLOCK_FILTERS_EXPLICIT,
            _ => return None,
        };
        Some(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_case_insensitive() {
        assert_eq!(PermissionFlags::from_token("NoBan"), Some(PermissionFlags::NO_BAN));
        assert_eq!(PermissionFlags::from_token("ALL"), Some(PermissionFlags::ALL));
        assert_eq!(PermissionFlags::from_token("bloom"), Some(PermissionFlags::BLOOM_FILTER));
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(PermissionFlags::from_token("bogus"), None);
        assert_eq!(PermissionFlags::from_token(""), None);
        assert_eq!(PermissionFlags::from_token("relay "), None);
    }

    #[test]
    fn test_blockfilters_token_is_explicit() {
        let flags = PermissionFlags::from_token("blockfilters").unwrap();
        assert!(flags.has_flag(PermissionFlags::BLOCK_FILTERS_EXPLICIT));
    }

    #[test]
    fn test_every_rendered_token_resolves() {
        for name in PERMISSION_NAMES {
            let flags = PermissionFlags::from_token(name.token).unwrap();
            assert!(flags.has_flag(name.flags), "{}", name.token);
        }
    }

    #[test]
    fn test_docs_cover_every_requestable_token() {
        let docs = permission_docs();
        assert_eq!(docs.len(), PERMISSION_DOCS.len());
        assert!(docs.contains(&"noban (do not ban for misbehavior; implies download)".to_string()));
        for (name, _) in PERMISSION_DOCS {
            assert!(PermissionFlags::from_token(name).is_some(), "{name}");
        }
    }
}
