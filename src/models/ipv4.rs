//! IPv4 address and CIDR notation utilities.
//!
//! Provides [`Ipv4Cidr`] for representing an IPv4 network in CIDR notation,
//! along with the mask arithmetic used by the range expander.

use crate::error::TokenError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum prefix length for IPv4 (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use cidrex::models::ipv4::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, TokenError> {
    if len > MAX_LENGTH {
        Err(TokenError::InvalidPrefixV4 {
            prefix: u32::from(len),
        })
    } else {
        Ok(mask_bits(len))
    }
}

// Widen to u64 so the len == 0 case needs no branch (a 32-bit shift by 32
// would be undefined).
fn mask_bits(len: u8) -> u32 {
    let right_len = u32::from(MAX_LENGTH - len);
    let all_bits = u64::from(u32::MAX);

    let mask = (all_bits >> right_len) << right_len;

    mask as u32
}

/// Get the network address (all host bits zero) for an IP and prefix length.
pub fn network_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, TokenError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Get the broadcast address (all host bits one) for an IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, TokenError> {
    let mask = get_cidr_mask(len)?;
    let network_bits = u32::from(addr) & mask;
    let broadcast_bits = network_bits | !mask;
    Ok(Ipv4Addr::from(broadcast_bits))
}

/// Number of addresses covered by a prefix, network and broadcast included.
///
/// Returned as u64 since a /0 covers the full 2^32 range.
pub fn range_size(len: u8) -> Result<u64, TokenError> {
    if len > MAX_LENGTH {
        Err(TokenError::InvalidPrefixV4 {
            prefix: u32::from(len),
        })
    } else {
        Ok(1u64 << (MAX_LENGTH - len))
    }
}

/// An IPv4 network in CIDR notation.
///
/// The mask is validated at construction, so derived values (network and
/// broadcast address) never fail.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4Cidr {
    /// The IPv4 address as written in the token (host bits preserved).
    pub addr: Ipv4Addr,
    /// The prefix length (0-32).
    pub mask: u8,
}

impl Ipv4Cidr {
    /// Create a new [`Ipv4Cidr`], validating the prefix length.
    pub fn new(addr: Ipv4Addr, mask: u8) -> Result<Ipv4Cidr, TokenError> {
        if mask > MAX_LENGTH {
            return Err(TokenError::InvalidPrefixV4 {
                prefix: u32::from(mask),
            });
        }
        Ok(Ipv4Cidr { addr, mask })
    }

    /// First address of the range (all host bits zero).
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & mask_bits(self.mask))
    }

    /// Last address of the range (all host bits one).
    pub fn broadcast(&self) -> Ipv4Addr {
        let mask = mask_bits(self.mask);
        Ipv4Addr::from((u32::from(self.addr) & mask) | !mask)
    }

    /// Check if an IP address is contained within this range.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        ip >= self.network() && ip <= self.broadcast()
    }
}

impl FromStr for Ipv4Cidr {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Ipv4Cidr, TokenError> {
        let (addr_text, mask_text) = s.split_once('/').ok_or(TokenError::InvalidToken {
            token: s.to_string(),
        })?;
        let addr = Ipv4Addr::from_str(addr_text).map_err(|_| TokenError::InvalidToken {
            token: s.to_string(),
        })?;
        let mask = u8::from_str(mask_text).map_err(|_| TokenError::InvalidPrefix {
            token: s.to_string(),
        })?;
        Ipv4Cidr::new(addr, mask)
    }
}

impl std::fmt::Display for Ipv4Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl Serialize for Ipv4Cidr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let cidr = format!("{}/{}", self.addr, self.mask);
        serializer.serialize_str(&cidr)
    }
}

impl<'de> Deserialize<'de> for Ipv4Cidr {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4Cidr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4Cidr::from_str(&s).map_err(|e| de::Error::custom(format!("{e}")))
    }
}
