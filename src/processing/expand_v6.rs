//! IPv6 range expansion.
//!
//! A prefix can cover astronomically many addresses, so enumeration is
//! capped. The iteration itself runs on a u128 counter; incrementing it is
//! byte-for-byte the same as a carry-propagating increment of the 16-byte
//! big-endian representation.

use crate::models::ipv6::range_size;
use crate::models::Ipv6Cidr;
use crate::output::OutputBatcher;
use std::io;
use std::io::Write;
use std::net::Ipv6Addr;

/// Hard bound on addresses enumerated for a single IPv6 token.
pub const ENUMERATION_CAP: u64 = 1_000_000;

/// Result of one IPv6 expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct V6Expansion {
    /// Addresses actually emitted.
    pub emitted: u64,
    /// True when the range was truncated at [`ENUMERATION_CAP`].
    pub clamped: bool,
}

/// Emit up to `min(2^(128-mask), ENUMERATION_CAP)` addresses in ascending
/// order, starting at the masked network address.
///
/// Enumeration also stops if the 128-bit counter wraps to zero, the sole
/// natural termination besides reaching the bound.
pub fn expand<W: Write>(
    cidr: &Ipv6Cidr,
    enabled: bool,
    out: &mut OutputBatcher<W>,
) -> io::Result<V6Expansion> {
    if !enabled {
        // Nothing was emitted, so nothing was truncated.
        return Ok(V6Expansion {
            emitted: 0,
            clamped: false,
        });
    }

    let (bound, clamped) = enumeration_bound(cidr.mask);

    let mut current = u128::from(cidr.network());
    let mut emitted: u64 = 0;
    while emitted < bound {
        out.emit(&Ipv6Addr::from(current))?;
        emitted += 1;
        current = match current.checked_add(1) {
            Some(next) => next,
            None => break, // wrapped: the whole address space is done
        };
    }

    Ok(V6Expansion { emitted, clamped })
}

/// Number of addresses to enumerate for a prefix, and whether that is a
/// truncation of the true range size.
///
/// A /0 covers 2^128 addresses, which does not even fit the wide counter;
/// it clamps like any other oversized range.
fn enumeration_bound(mask: u8) -> (u64, bool) {
    match range_size(mask).expect("mask validated at construction") {
        Some(total) if total <= u128::from(ENUMERATION_CAP) => (total as u64, false),
        _ => (ENUMERATION_CAP, true),
    }
}
