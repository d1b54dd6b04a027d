//! Error types for permission parsing and configuration.

use thiserror::Error;

/// Errors that can occur while parsing a permission entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A permission token is not in the name table.
    #[error("invalid P2P permission: '{0}'")]
    UnknownPermission(String),

    /// The bind address is not a numeric socket address.
    #[error("cannot resolve bind address: '{0}'")]
    MalformedAddress(String),

    /// The bind address has no port, or port 0.
    #[error("need to specify a port with a bind address: '{0}'")]
    MissingPort(String),

    /// The subnet is neither an address, a CIDR prefix, nor an address with netmask.
    #[error("invalid netmask specified in subnet permission: '{0}'")]
    MalformedSubnet(String),

    /// A direction marker is repeated, misplaced, or not accepted here.
    #[error("invalid connection direction in '{0}'")]
    MalformedDirection(String),
}

/// Errors that can occur while loading a permission configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A `whitebind` entry failed to parse.
    #[error("invalid whitebind entry '{entry}': {source}")]
    Whitebind {
        entry: String,
        #[source]
        source: ParseError,
    },

    /// A `whitelist` entry failed to parse.
    #[error("invalid whitelist entry '{entry}': {source}")]
    Whitelist {
        entry: String,
        #[source]
        source: ParseError,
    },
}

/// Result type for parse operations.
pub type Result<T> = std::result::Result<T, ParseError>;
