//! # Netperm Core
//!
//! Pure primitives for peer permission grants: the flag bitmask, the
//! permission name table, and rendering flags back into tokens.
//!
//! This crate contains no I/O and no parsing of addresses. It is pure
//! computation over a `u32` bitmask.
//!
//! ## Key Types
//!
//! - [`PermissionFlags`] - Capability bits, composites, and the implicit-grant sentinel
//! - [`PermissionSet`] - A flags value rendered as ordered permission tokens
//! - [`Grant`] - Tagged view of the sentinel: default policy vs. explicit flags
//!
//! ## Composites
//!
//! `FORCE_RELAY` carries the `RELAY` bit and `NO_BAN` carries the `DOWNLOAD`
//! bit, so granting either composite grants its base as well:
//!
//! ```
//! use netperm_core::PermissionFlags;
//!
//! let mut flags = PermissionFlags::NONE;
//! flags.add_flag(PermissionFlags::NO_BAN);
//! assert!(flags.has_flag(PermissionFlags::DOWNLOAD));
//! ```

pub mod flags;
pub mod names;
pub mod set;

pub use flags::{Grant, PermissionFlags};
pub use names::{permission_docs, PermissionName, PERMISSION_DOCS, PERMISSION_NAMES};
pub use set::PermissionSet;
