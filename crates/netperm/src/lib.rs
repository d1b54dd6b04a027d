//! # Netperm
//!
//! Peer permission grants for a P2P node.
//!
//! ## Overview
//!
//! Operators grant extra capabilities to trusted peers in two ways:
//!
//! - **Bound permissions**: every peer accepted on a given listener
//!   (`noban@127.0.0.1:8334`)
//! - **Subnet permissions**: every peer whose address is inside a range,
//!   optionally restricted to one connection direction (`<relay@10.0.0.0/8`)
//!
//! Both parse into a [`PermissionFlags`] bitmask. An entry without a
//! permission list carries the implicit-grant sentinel, which the
//! [`ImplicitGrantPolicy`] later replaces with the default permissions.
//!
//! ## Entry Grammar
//!
//! ```text
//! [<direction>][<perm>,<perm>,...@]<address-or-subnet>
//! ```
//!
//! Direction markers (`<` inbound-only, `>` outbound-only) are only valid
//! on subnet entries.
//!
//! ## Usage
//!
//! ```rust
//! use netperm::{ConnectionDirection, PermissionFlags, SubnetPermission};
//!
//! let perm = SubnetPermission::try_parse("relay,noban@10.0.0.0/8").unwrap();
//! assert_eq!(perm.direction, ConnectionDirection::Both);
//! assert!(perm.flags.has_flag(PermissionFlags::DOWNLOAD));
//! assert_eq!(perm.permissions().to_strings(), ["relay", "download", "noban"]);
//! ```
//!
//! ## Re-exports
//!
//! - `netperm::core` - Flags, rendering, and the permission name table

pub mod bound;
pub mod config;
pub mod direction;
pub mod error;
mod parser;
pub mod subnet;

pub use netperm_core as core;

pub use bound::BoundPermission;
pub use config::{ImplicitGrantPolicy, PermissionConfig, PermissionTable};
pub use direction::ConnectionDirection;
pub use error::{ConfigError, ParseError, Result};
pub use subnet::SubnetPermission;

pub use netperm_core::{permission_docs, Grant, PermissionFlags, PermissionSet};
