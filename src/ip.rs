//! Textual recognizers for IP address forms in host components.

use crate::encoding::{HEXDIG, IPV_FUTURE};
use std::net::{Ipv4Addr, Ipv6Addr};

// dec-octet = DIGIT             ; 0-9
//           / %x31-39 DIGIT     ; 10-99
//           / "1" 2DIGIT        ; 100-199
//           / "2" %x30-34 DIGIT ; 200-249
//           / "25" %x30-35      ; 250-255
fn parse_dec_octet(s: &str) -> Option<u8> {
    if s.is_empty() || s.len() > 3 || !s.bytes().all(|x| x.is_ascii_digit()) {
        return None;
    }
    // No leading zeros; "0" itself is fine.
    if s.len() > 1 && s.starts_with('0') {
        return None;
    }
    s.parse::<u16>().ok().filter(|&x| x <= 255).map(|x| x as u8)
}

/// Parses a strict dotted-quad IPv4 address.
pub(crate) fn parse_v4(s: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = s.split('.');
    for octet in &mut octets {
        *octet = parse_dec_octet(parts.next()?)?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(Ipv4Addr::from(octets))
}

fn parse_hextet(s: &str) -> Option<u16> {
    if s.is_empty() || s.len() > 4 || !s.bytes().all(|x| HEXDIG.allows(x)) {
        return None;
    }
    u16::from_str_radix(s, 16).ok()
}

// Parses one colon-separated half of an IPv6 address into 16-bit groups.
// A trailing dotted-quad is accepted only when `v4_tail` is set.
fn parse_groups(s: &str, v4_tail: bool) -> Option<Vec<u16>> {
    let mut groups = Vec::with_capacity(8);
    if s.is_empty() {
        return Some(groups);
    }
    let mut parts = s.split(':').peekable();
    while let Some(part) = parts.next() {
        let last = parts.peek().is_none();
        if last && v4_tail && part.contains('.') {
            let v4 = parse_v4(part)?.octets();
            groups.push(u16::from_be_bytes([v4[0], v4[1]]));
            groups.push(u16::from_be_bytes([v4[2], v4[3]]));
        } else {
            groups.push(parse_hextet(part)?);
        }
    }
    Some(groups)
}

/// Parses a strict textual IPv6 address, without brackets or zone.
pub(crate) fn parse_v6(s: &str) -> Option<Ipv6Addr> {
    let mut segs = [0u16; 8];

    match s.find("::") {
        Some(i) => {
            let (head, tail) = (&s[..i], &s[i + 2..]);
            if tail.contains("::") {
                return None;
            }
            let head = parse_groups(head, false)?;
            let tail = parse_groups(tail, true)?;
            // The ellipsis must elide at least one group.
            if head.len() + tail.len() > 7 {
                return None;
            }
            segs[..head.len()].copy_from_slice(&head);
            segs[8 - tail.len()..].copy_from_slice(&tail);
        }
        None => {
            let groups = parse_groups(s, true)?;
            if groups.len() != 8 {
                return None;
            }
            segs.copy_from_slice(&groups);
        }
    }
    Some(Ipv6Addr::from(segs))
}

/// Returns `true` if the address is link-local, i.e., in `fe80::/10`.
pub(crate) fn is_link_local(addr: &Ipv6Addr) -> bool {
    addr.segments()[0] & 0xffc0 == 0xfe80
}

// IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
pub(crate) fn is_ipv_future(s: &str) -> bool {
    let rest = match s.strip_prefix('v').or_else(|| s.strip_prefix('V')) {
        Some(rest) => rest,
        None => return false,
    };
    match rest.split_once('.') {
        Some((ver, addr)) => {
            !ver.is_empty()
                && ver.bytes().all(|x| HEXDIG.allows(x))
                && !addr.is_empty()
                && IPV_FUTURE.validate(addr.as_bytes())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_v4() {
        assert_eq!(parse_v4("127.0.0.1"), Some(Ipv4Addr::new(127, 0, 0, 1)));
        assert_eq!(
            parse_v4("255.255.255.255"),
            Some(Ipv4Addr::new(255, 255, 255, 255))
        );
        assert_eq!(parse_v4("0.0.0.0"), Some(Ipv4Addr::new(0, 0, 0, 0)));

        // out of range
        assert!(parse_v4("256.0.0.1").is_none());
        // too short
        assert!(parse_v4("255.0.0").is_none());
        // too long
        assert!(parse_v4("255.0.0.1.2").is_none());
        // no number between dots
        assert!(parse_v4("255.0..1").is_none());
        // octal
        assert!(parse_v4("255.0.0.01").is_none());
        assert!(parse_v4("255.0.0.00").is_none());
        // preceding dot
        assert!(parse_v4(".0.0.0.0").is_none());
        // trailing dot
        assert!(parse_v4("0.0.0.0.").is_none());
    }

    #[test]
    fn parses_v6() {
        assert_eq!(
            parse_v6("0:0:0:0:0:0:0:0"),
            Some(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0))
        );
        assert_eq!(
            parse_v6("1:02:003:0004:0005:006:07:8"),
            Some(Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 8))
        );
        assert_eq!(parse_v6("::1"), Some(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1)));
        assert_eq!(parse_v6("1::"), Some(Ipv6Addr::new(1, 0, 0, 0, 0, 0, 0, 0)));
        assert_eq!(parse_v6("::"), Some(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0)));
        assert_eq!(
            parse_v6("2a02:6b8::11:11"),
            Some(Ipv6Addr::new(0x2a02, 0x6b8, 0, 0, 0, 0, 0x11, 0x11))
        );
        assert_eq!(
            parse_v6("1:2:3:4:5:6:7::"),
            Some(Ipv6Addr::new(1, 2, 3, 4, 5, 6, 7, 0))
        );

        // only a colon
        assert!(parse_v6(":").is_none());
        // too long group
        assert!(parse_v6("::00000").is_none());
        // too short
        assert!(parse_v6("1:2:3:4:5:6:7").is_none());
        // too long
        assert!(parse_v6("1:2:3:4:5:6:7:8:9").is_none());
        // triple colon
        assert!(parse_v6("1:2:::6:7:8").is_none());
        assert!(parse_v6(":::").is_none());
        // two double colons
        assert!(parse_v6("1:2::6::8").is_none());
        // `::` indicating zero groups of zeros
        assert!(parse_v6("1:2:3:4::5:6:7:8").is_none());
        // preceding or trailing colon
        assert!(parse_v6(":1:2:3:4:5:6:7:8").is_none());
        assert!(parse_v6("1:2:3:4:5:6:7:8:").is_none());
    }

    #[test]
    fn parses_v4_in_v6() {
        assert_eq!(
            parse_v6("::192.0.2.33"),
            Some(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0xc000, 0x221))
        );
        assert_eq!(
            parse_v6("::ffff:192.0.2.33"),
            Some(Ipv6Addr::new(0, 0, 0, 0, 0, 0xffff, 0xc000, 0x221))
        );
        assert_eq!(
            parse_v6("64:ff9b::192.0.2.33"),
            Some(Ipv6Addr::new(0x64, 0xff9b, 0, 0, 0, 0, 0xc000, 0x221))
        );

        // colon after v4
        assert!(parse_v6("::127.0.0.1:").is_none());
        // v4 not in the last position
        assert!(parse_v6("::127.0.0.1:1").is_none());
        // not enough groups
        assert!(parse_v6("1:2:3:4:5:127.0.0.1").is_none());
        // too many groups
        assert!(parse_v6("1:2:3:4:5:6:7:127.0.0.1").is_none());
    }

    #[test]
    fn recognizes_link_local() {
        assert!(is_link_local(&parse_v6("fe80::1").unwrap()));
        assert!(is_link_local(&parse_v6("febf::").unwrap()));
        assert!(!is_link_local(&parse_v6("fec0::").unwrap()));
        assert!(!is_link_local(&parse_v6("::1").unwrap()));
    }

    #[test]
    fn recognizes_ipv_future() {
        assert!(is_ipv_future("v1.addr"));
        assert!(is_ipv_future("vF.a:b!"));
        assert!(!is_ipv_future("v.addr"));
        assert!(!is_ipv_future("v1."));
        assert!(!is_ipv_future("1.addr"));
        assert!(!is_ipv_future("v1addr"));
    }
}
