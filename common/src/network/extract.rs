//! # Token Extraction
//!
//! Purely syntactic scanners for CIDR and dotted-quad shaped substrings.
//!
//! Nothing here checks octet or prefix values; `999.1.1.1/24` is a perfectly good
//! token. Value validation happens when a token is turned into a
//! [`NetworkRange`](super::range::NetworkRange) or an [`Ipv4Addr`].

use std::net::Ipv4Addr;
use std::sync::OnceLock;

use regex::Regex;

const CIDR_PATTERN: &str = r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}/[0-9]{1,2}\b";
const CIDR_LINE_PATTERN: &str = r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}/[0-9]{1,2}$";
const IP_PATTERN: &str = r"(?:[0-9]{1,3}\.){3}[0-9]{1,3}";

static CIDR_RE: OnceLock<Regex> = OnceLock::new();
static CIDR_LINE_RE: OnceLock<Regex> = OnceLock::new();
static IP_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    // The patterns are compile-time constants covered by the tests below.
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern must compile"))
}

/// Every CIDR-shaped substring of a free-text blob, in order of appearance.
pub fn cidr_tokens(blob: &str) -> impl Iterator<Item = &str> {
    compiled(&CIDR_RE, CIDR_PATTERN)
        .find_iter(blob)
        .map(|m| m.as_str())
}

/// Returns the trimmed line if the whole of it is a single CIDR token.
pub fn cidr_line(line: &str) -> Option<&str> {
    let line = line.trim();
    compiled(&CIDR_LINE_RE, CIDR_LINE_PATTERN)
        .is_match(line)
        .then_some(line)
}

/// Every dotted-quad substring of a line.
pub fn ip_tokens(line: &str) -> impl Iterator<Item = &str> {
    compiled(&IP_RE, IP_PATTERN)
        .find_iter(line)
        .map(|m| m.as_str())
}

/// Strict parse of an extracted token. Anything that is not a valid address is `None`.
pub fn parse_ip(token: &str) -> Option<Ipv4Addr> {
    token.parse::<Ipv4Addr>().ok()
}
