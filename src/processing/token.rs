//! Input token classification.
//!
//! A trimmed token is either a bare address or an `address/prefix` CIDR,
//! in either family. Parsing tries IPv4 before IPv6, like the address
//! parsing everywhere else in this crate; a family mismatch is a signal to
//! try the next family, not an error by itself.

use crate::error::TokenError;
use crate::models::{ipv4, ipv6, Ipv4Cidr, Ipv6Cidr};
use std::net::{Ipv4Addr, Ipv6Addr};

/// A classified input token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Bare IPv4 address, printed as-is (canonical form), never expanded.
    V4(Ipv4Addr),
    /// Bare IPv6 address, printed as-is (canonical form), never expanded.
    V6(Ipv6Addr),
    /// IPv4 network to expand.
    V4Cidr(Ipv4Cidr),
    /// IPv6 network to expand.
    V6Cidr(Ipv6Cidr),
}

/// Classify one trimmed input token.
///
/// The prefix text is validated before family detection, so a CIDR with a
/// garbage prefix fails as "invalid prefix length" rather than falling
/// through to "invalid IP or CIDR".
pub fn parse_token(token: &str) -> Result<Token, TokenError> {
    let Some((addr_text, prefix_text)) = token.split_once('/') else {
        // Bare address path: IPv4 first, then IPv6.
        if let Ok(addr) = token.parse::<Ipv4Addr>() {
            return Ok(Token::V4(addr));
        }
        if let Ok(addr) = token.parse::<Ipv6Addr>() {
            return Ok(Token::V6(addr));
        }
        return Err(TokenError::InvalidToken {
            token: token.to_string(),
        });
    };

    let prefix: u32 = prefix_text
        .parse()
        .map_err(|_| TokenError::InvalidPrefix {
            token: token.to_string(),
        })?;

    if let Ok(addr) = addr_text.parse::<Ipv4Addr>() {
        if prefix > u32::from(ipv4::MAX_LENGTH) {
            return Err(TokenError::InvalidPrefixV4 { prefix });
        }
        return Ok(Token::V4Cidr(Ipv4Cidr::new(addr, prefix as u8)?));
    }

    if let Ok(addr) = addr_text.parse::<Ipv6Addr>() {
        if prefix > u32::from(ipv6::MAX_LENGTH) {
            return Err(TokenError::InvalidPrefixV6 { prefix });
        }
        return Ok(Token::V6Cidr(Ipv6Cidr::new(addr, prefix as u8)?));
    }

    Err(TokenError::InvalidToken {
        token: token.to_string(),
    })
}
