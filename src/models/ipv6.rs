//! IPv6 address and CIDR notation utilities.
//!
//! Same shape as [`crate::models::ipv4`], widened to 128 bits. All mask
//! arithmetic runs on `u128::from(addr)`, which is byte-for-byte identical
//! to masking the 16-byte big-endian representation.

use crate::error::TokenError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv6Addr;
use std::str::FromStr;

/// Maximum prefix length for IPv6 (128 bits).
pub const MAX_LENGTH: u8 = 128;

/// Convert a CIDR prefix length to a subnet mask as u128.
pub fn get_cidr_mask(len: u8) -> Result<u128, TokenError> {
    if len > MAX_LENGTH {
        Err(TokenError::InvalidPrefixV6 {
            prefix: u32::from(len),
        })
    } else {
        Ok(mask_bits(len))
    }
}

// No wider integer to borrow for the len == 0 case, so branch on it.
fn mask_bits(len: u8) -> u128 {
    if len == 0 {
        return 0;
    }
    let right_len = u32::from(MAX_LENGTH - len);
    (u128::MAX >> right_len) << right_len
}

/// Get the network address (all host bits zero) for an IP and prefix length.
pub fn network_addr(addr: Ipv6Addr, len: u8) -> Result<Ipv6Addr, TokenError> {
    let mask = get_cidr_mask(len)?;
    Ok(Ipv6Addr::from(u128::from(addr) & mask))
}

/// Number of addresses covered by a prefix.
///
/// Returns `None` for prefix 0: the full 2^128 range does not fit a u128.
pub fn range_size(len: u8) -> Result<Option<u128>, TokenError> {
    if len > MAX_LENGTH {
        Err(TokenError::InvalidPrefixV6 {
            prefix: u32::from(len),
        })
    } else {
        Ok(1u128.checked_shl(u32::from(MAX_LENGTH - len)))
    }
}

/// An IPv6 network in CIDR notation.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv6Cidr {
    /// The IPv6 address as written in the token (host bits preserved).
    pub addr: Ipv6Addr,
    /// The prefix length (0-128).
    pub mask: u8,
}

impl Ipv6Cidr {
    /// Create a new [`Ipv6Cidr`], validating the prefix length.
    pub fn new(addr: Ipv6Addr, mask: u8) -> Result<Ipv6Cidr, TokenError> {
        if mask > MAX_LENGTH {
            return Err(TokenError::InvalidPrefixV6 {
                prefix: u32::from(mask),
            });
        }
        Ok(Ipv6Cidr { addr, mask })
    }

    /// First address of the range (all host bits zero).
    pub fn network(&self) -> Ipv6Addr {
        Ipv6Addr::from(u128::from(self.addr) & mask_bits(self.mask))
    }

    /// Last address of the range (all host bits one).
    pub fn last(&self) -> Ipv6Addr {
        let mask = mask_bits(self.mask);
        Ipv6Addr::from((u128::from(self.addr) & mask) | !mask)
    }

    /// Check if an IP address is contained within this range.
    pub fn contains(&self, ip: Ipv6Addr) -> bool {
        ip >= self.network() && ip <= self.last()
    }
}

impl FromStr for Ipv6Cidr {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Ipv6Cidr, TokenError> {
        let (addr_text, mask_text) = s.split_once('/').ok_or(TokenError::InvalidToken {
            token: s.to_string(),
        })?;
        let addr = Ipv6Addr::from_str(addr_text).map_err(|_| TokenError::InvalidToken {
            token: s.to_string(),
        })?;
        let mask = u8::from_str(mask_text).map_err(|_| TokenError::InvalidPrefix {
            token: s.to_string(),
        })?;
        Ipv6Cidr::new(addr, mask)
    }
}

impl std::fmt::Display for Ipv6Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl Serialize for Ipv6Cidr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        let cidr = format!("{}/{}", self.addr, self.mask);
        serializer.serialize_str(&cidr)
    }
}

impl<'de> Deserialize<'de> for Ipv6Cidr {
    fn deserialize<D>(deserializer: D) -> Result<Ipv6Cidr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv6Cidr::from_str(&s).map_err(|e| de::Error::custom(format!("{e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0);
        assert_eq!(get_cidr_mask(1).unwrap(), 1u128 << 127);
        assert_eq!(
            get_cidr_mask(64).unwrap(),
            0xFFFF_FFFF_FFFF_FFFF_0000_0000_0000_0000
        );
        assert_eq!(get_cidr_mask(127).unwrap(), u128::MAX - 1);
        assert_eq!(get_cidr_mask(128).unwrap(), u128::MAX);

        assert!(get_cidr_mask(129).is_err());
    }

    #[test]
    fn test_network_addr_byte_aligned() {
        let ip: Ipv6Addr = "2001:db8::ff".parse().unwrap();
        assert_eq!(
            network_addr(ip, 120).unwrap(),
            "2001:db8::".parse::<Ipv6Addr>().unwrap()
        );
        assert_eq!(
            network_addr(ip, 32).unwrap(),
            "2001:db8::".parse::<Ipv6Addr>().unwrap()
        );
        assert_eq!(network_addr(ip, 0).unwrap(), Ipv6Addr::UNSPECIFIED);
        assert_eq!(network_addr(ip, 128).unwrap(), ip);
    }

    #[test]
    fn test_network_addr_mid_byte() {
        // 44 bits: five full bytes plus the top nibble of byte 5.
        let ip: Ipv6Addr = "2001:db8:abcd::1".parse().unwrap();
        assert_eq!(
            network_addr(ip, 44).unwrap(),
            "2001:db8:abc0::".parse::<Ipv6Addr>().unwrap()
        );

        let ip: Ipv6Addr = "ffff:ffff::".parse().unwrap();
        assert_eq!(
            network_addr(ip, 12).unwrap(),
            "fff0::".parse::<Ipv6Addr>().unwrap()
        );
    }

    #[test]
    fn test_range_size() {
        assert_eq!(range_size(128).unwrap(), Some(1));
        assert_eq!(range_size(126).unwrap(), Some(4));
        assert_eq!(range_size(108).unwrap(), Some(1u128 << 20));
        assert_eq!(range_size(1).unwrap(), Some(1u128 << 127));
        assert_eq!(range_size(0).unwrap(), None);

        assert!(range_size(129).is_err());
    }

    #[test]
    fn test_cidr_new_validates_mask() {
        let addr: Ipv6Addr = "2001:db8::".parse().unwrap();
        assert!(Ipv6Cidr::new(addr, 128).is_ok());
        assert_eq!(
            Ipv6Cidr::new(addr, 129).unwrap_err(),
            TokenError::InvalidPrefixV6 { prefix: 129 }
        );
    }

    #[test]
    fn test_cidr_network_last() {
        let cidr: Ipv6Cidr = "2001:db8::5/126".parse().unwrap();
        assert_eq!(cidr.network(), "2001:db8::4".parse::<Ipv6Addr>().unwrap());
        assert_eq!(cidr.last(), "2001:db8::7".parse::<Ipv6Addr>().unwrap());

        let full: Ipv6Cidr = "2001:db8::/0".parse().unwrap();
        assert_eq!(full.network(), Ipv6Addr::UNSPECIFIED);
        assert_eq!(full.last(), Ipv6Addr::from(u128::MAX));
    }

    #[test]
    fn test_cidr_contains() {
        let cidr: Ipv6Cidr = "2001:db8::/64".parse().unwrap();
        assert!(cidr.contains("2001:db8::".parse().unwrap()));
        assert!(cidr.contains("2001:db8::ffff:ffff:ffff:ffff".parse().unwrap()));
        assert!(!cidr.contains("2001:db8:0:1::".parse().unwrap()));
    }

    #[test]
    fn test_cidr_display_canonical() {
        let cidr: Ipv6Cidr = "2001:0DB8:0000:0000:0000:0000:0000:0001/126".parse().unwrap();
        assert_eq!(cidr.to_string(), "2001:db8::1/126");
    }

    #[test]
    fn test_cidr_serde_round_trip() {
        let cidr: Ipv6Cidr = "fe80::/10".parse().unwrap();
        let json = serde_json::to_string(&cidr).unwrap();
        assert_eq!(json, "\"fe80::/10\"");
        let back: Ipv6Cidr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cidr);

        assert!(serde_json::from_str::<Ipv6Cidr>("\"2001:db8::/129\"").is_err());
    }
}
