//! Entry grammar shared by bound and subnet permissions.
//!
//! ```text
//! entry     = [direction] [perm-list "@"] target
//! direction = "<" | ">"
//! perm-list = [token] *("," [token])
//! ```
//!
//! The permission list ends at the last `@`. An entry without `@` carries no
//! explicit permissions and gets the implicit-grant sentinel instead. Empty
//! tokens are skipped, so `relay,,mempool@...` and `@...` are accepted.

use netperm_core::PermissionFlags;

use crate::direction::ConnectionDirection;
use crate::error::{ParseError, Result};

/// An entry split into its parts, with the target left for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry<'a> {
    pub direction: Option<ConnectionDirection>,
    pub flags: PermissionFlags,
    pub target: &'a str,
}

/// Split an entry into direction, permission flags, and target text.
pub(crate) fn parse_entry(input: &str, accept_direction: bool) -> Result<Entry<'_>> {
    let (direction, rest) = split_direction(input)?;
    if direction.is_some() && !accept_direction {
        return Err(ParseError::MalformedDirection(input.to_string()));
    }

    let (flags, target) = match rest.rfind('@') {
        None => (PermissionFlags::IMPLICIT, rest),
        Some(at) => (parse_permission_list(&rest[..at], input)?, &rest[at + 1..]),
    };

    Ok(Entry {
        direction,
        flags,
        target,
    })
}

fn split_direction(input: &str) -> Result<(Option<ConnectionDirection>, &str)> {
    let mut chars = input.chars();
    let Some(direction) = chars.next().and_then(ConnectionDirection::from_marker) else {
        return Ok((None, input));
    };

    let rest = chars.as_str();
    if rest.starts_with(is_marker) {
        return Err(ParseError::MalformedDirection(input.to_string()));
    }
    Ok((Some(direction), rest))
}

fn parse_permission_list(list: &str, input: &str) -> Result<PermissionFlags> {
    let mut flags = PermissionFlags::NONE;
    for token in list.split(',').filter(|token| !token.is_empty()) {
        if token.starts_with(is_marker) {
            return Err(ParseError::MalformedDirection(input.to_string()));
        }
        let flag = PermissionFlags::from_token(token)
            .ok_or_else(|| ParseError::UnknownPermission(token.to_string()))?;
        flags.add_flag(flag);
    }
    Ok(flags)
}

fn is_marker(c: char) -> bool {
    ConnectionDirection::from_marker(c).is_some()
}
