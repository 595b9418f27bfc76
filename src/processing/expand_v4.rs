//! IPv4 range expansion.

use crate::models::Ipv4Cidr;
use crate::output::OutputBatcher;
use std::io;
use std::io::Write;
use std::net::Ipv4Addr;

/// Emit every address in the range, network and broadcast included, in
/// ascending order. Returns the number of addresses emitted.
///
/// With `enabled == false` nothing is emitted; the token was still parsed
/// and validated by the caller.
pub fn expand<W: Write>(
    cidr: &Ipv4Cidr,
    enabled: bool,
    out: &mut OutputBatcher<W>,
) -> io::Result<u64> {
    if !enabled {
        return Ok(0);
    }

    let network = u64::from(u32::from(cidr.network()));
    let broadcast = u64::from(u32::from(cidr.broadcast()));

    // The u64 bound keeps a /0 (the full 2^32 range) from overflowing the
    // loop counter.
    for value in network..=broadcast {
        out.emit(&Ipv4Addr::from(value as u32))?;
    }

    Ok(broadcast - network + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_to_lines(token: &str, enabled: bool) -> (u64, Vec<String>) {
        let cidr: Ipv4Cidr = token.parse().unwrap();
        let mut out = OutputBatcher::new(Vec::new());
        let count = expand(&cidr, enabled, &mut out).unwrap();
        let text = String::from_utf8(out.into_inner().unwrap()).unwrap();
        (count, text.lines().map(str::to_string).collect())
    }

    #[test]
    fn test_expand_slash_30() {
        let (count, lines) = expand_to_lines("192.168.1.0/30", true);
        assert_eq!(count, 4);
        assert_eq!(
            lines,
            vec!["192.168.1.0", "192.168.1.1", "192.168.1.2", "192.168.1.3"]
        );
    }

    #[test]
    fn test_expand_masks_host_bits() {
        // Host bits in the token are ignored; expansion starts at the
        // network address.
        let (count, lines) = expand_to_lines("192.168.1.37/30", true);
        assert_eq!(count, 4);
        assert_eq!(lines[0], "192.168.1.36");
        assert_eq!(lines[3], "192.168.1.39");
    }

    #[test]
    fn test_expand_slash_32_single() {
        let (count, lines) = expand_to_lines("10.1.2.3/32", true);
        assert_eq!(count, 1);
        assert_eq!(lines, vec!["10.1.2.3"]);
    }

    #[test]
    fn test_expand_slash_31_pair() {
        let (count, lines) = expand_to_lines("10.0.0.0/31", true);
        assert_eq!(count, 2);
        assert_eq!(lines, vec!["10.0.0.0", "10.0.0.1"]);
    }

    #[test]
    fn test_expand_slash_24_ascending() {
        let (count, lines) = expand_to_lines("172.16.5.0/24", true);
        assert_eq!(count, 256);
        assert_eq!(lines.len(), 256);
        assert_eq!(lines[0], "172.16.5.0");
        assert_eq!(lines[255], "172.16.5.255");

        let mut parsed: Vec<Ipv4Addr> = lines.iter().map(|l| l.parse().unwrap()).collect();
        let sorted = parsed.clone();
        parsed.sort();
        assert_eq!(parsed, sorted, "output must be strictly ascending");
    }

    #[test]
    fn test_expand_top_of_address_space() {
        // The inclusive bound must terminate at 255.255.255.255 without
        // wrapping.
        let (count, lines) = expand_to_lines("255.255.255.252/30", true);
        assert_eq!(count, 4);
        assert_eq!(lines[3], "255.255.255.255");
    }

    #[test]
    fn test_expand_disabled_emits_nothing() {
        let (count, lines) = expand_to_lines("192.168.1.0/24", false);
        assert_eq!(count, 0);
        assert!(lines.is_empty());
    }
}
