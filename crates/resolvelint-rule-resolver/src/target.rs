// # Target Extractor
//
// Splits the first argument of a proxy-type directive (or of an upstream
// `server`) into scheme, host and port.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// `scheme://host:port`, host being a bracketed IPv6 literal or anything up
/// to the first `/ ? # :`
static TARGET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?P<scheme>[a-z][a-z0-9+.-]*)://)?(?P<host>\[[0-9a-fA-F:.]+\]|[^/?#:]+)(?::(?P<port>[0-9]+))?")
        .expect("target pattern is a valid regex")
});

/// Why a target was not extracted
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSkip {
    /// Unix domain socket, never resolved through DNS
    #[error("unix socket target")]
    UnixSocket,

    /// Target does not look like `[scheme://]host[:port]`
    #[error("unrecognized target")]
    Unrecognized,
}

/// Parsed proxy target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyTarget<'a> {
    /// Scheme without `://`
    pub scheme: Option<&'a str>,
    /// Host as written, possibly containing variables or IPv6 brackets
    pub host: &'a str,
    /// Port as written
    pub port: Option<&'a str>,
}

/// Extract scheme, host and port from a raw target string
pub fn extract(raw: &str) -> Result<ProxyTarget<'_>, TargetSkip> {
    if raw.contains("unix:") {
        return Err(TargetSkip::UnixSocket);
    }

    let captures = TARGET_PATTERN.captures(raw).ok_or(TargetSkip::Unrecognized)?;
    let host = captures.name("host").ok_or(TargetSkip::Unrecognized)?.as_str();

    Ok(ProxyTarget {
        scheme: captures.name("scheme").map(|m| m.as_str()),
        host,
        port: captures.name("port").map(|m| m.as_str()),
    })
}
