//! IP literal predicates
//!
//! Rules use these to recognise backends that are addressed by IP and
//! therefore never go through DNS.

use std::net::{Ipv4Addr, Ipv6Addr};

/// Check whether `host` is an IPv4 literal
///
/// With `strip_port`, a single trailing `:port` is removed first, so
/// `10.0.0.1:8080` is accepted.
pub fn is_ipv4(host: &str, strip_port: bool) -> bool {
    let host = if strip_port {
        match host.rsplit_once(':') {
            Some((addr, port)) if !addr.contains(':') && port.bytes().all(|b| b.is_ascii_digit()) => {
                addr
            }
            _ => host,
        }
    } else {
        host
    };

    host.parse::<Ipv4Addr>().is_ok()
}

/// Check whether `host` is an IPv6 literal
///
/// With `strip_brackets`, surrounding `[` and `]` are removed first, so
/// `[::1]` is accepted.
pub fn is_ipv6(host: &str, strip_brackets: bool) -> bool {
    let host = if strip_brackets {
        host.strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host)
    } else {
        host
    };

    host.parse::<Ipv6Addr>().is_ok()
}

/// Check whether `host` is any IP literal (bracketed IPv6, IPv4 with optional port)
pub fn is_ip_literal(host: &str) -> bool {
    is_ipv6(host, true) || is_ipv4(host, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4() {
        assert!(is_ipv4("127.0.0.1", false));
        assert!(is_ipv4("10.1.2.3:8080", true));
        assert!(!is_ipv4("10.1.2.3:8080", false));
        assert!(!is_ipv4("10.1.2", true));
        assert!(!is_ipv4("example.com", true));
        assert!(!is_ipv4("10.1.2.3:http", true));
    }

    #[test]
    fn test_ipv6() {
        assert!(is_ipv6("::1", false));
        assert!(is_ipv6("[2001:db8::1]", true));
        assert!(!is_ipv6("[2001:db8::1]", false));
        assert!(!is_ipv6("example.com", true));
    }

    #[test]
    fn test_ip_literal() {
        assert!(is_ip_literal("[::1]"));
        assert!(is_ip_literal("192.168.0.10"));
        assert!(!is_ip_literal("backend"));
    }
}
