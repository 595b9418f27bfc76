//! Error types for cidrex.

use std::io;
use thiserror::Error;

/// Failures local to a single input token.
///
/// Every variant is non-fatal: the offending line is skipped, a diagnostic
/// is emitted, and processing continues with the next line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Prefix text after the `/` is negative or not an integer
    #[error("invalid prefix length: {token}")]
    InvalidPrefix { token: String },

    /// Prefix exceeds 32 bits on an IPv4 address
    #[error("invalid prefix length for IPv4: {prefix}")]
    InvalidPrefixV4 { prefix: u32 },

    /// Prefix exceeds 128 bits on an IPv6 address
    #[error("invalid prefix length for IPv6: {prefix}")]
    InvalidPrefixV6 { prefix: u32 },

    /// Token matches neither a bare address nor a CIDR for either family
    #[error("invalid IP or CIDR: {token}")]
    InvalidToken { token: String },
}

/// Errors from processing one input line.
///
/// [`LineError::Token`] is skip-and-continue; [`LineError::Io`] means the
/// output sink failed and the run cannot usefully continue.
#[derive(Error, Debug)]
pub enum LineError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("output error: {0}")]
    Io(#[from] io::Error),
}
