//! # Network Ranges
//!
//! Canonical IPv4 networks and the deduplicated set they are collected into.
//!
//! A [`NetworkRange`] is always stored in its normalized form: the base address
//! is masked down to the prefix boundary, so `10.0.0.5/24` and `10.0.0.0/24`
//! compare equal and hash identically.

use std::collections::BTreeSet;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::RangeParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkRange {
    base: Ipv4Addr,
    prefix: u8,
}

impl NetworkRange {
    /// Builds a range from any address inside it.
    ///
    /// Host bits are cleared, so the result is the same for every address of the block.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Self, RangeParseError> {
        let network = Ipv4Network::new(addr, prefix)
            .map_err(|_| RangeParseError::InvalidPrefix(prefix.to_string()))?;

        Ok(Self {
            base: network.network(),
            prefix,
        })
    }

    pub fn base(&self) -> Ipv4Addr {
        self.base
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn mask(&self) -> u32 {
        match self.prefix {
            0 => 0,
            p => u32::MAX << (32 - p),
        }
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.base) | !self.mask())
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        u32::from(ip) & self.mask() == u32::from(self.base)
    }
}

impl FromStr for NetworkRange {
    type Err = RangeParseError;

    /// Parses `a.b.c.d/n`.
    ///
    /// Octets must be in `[0, 255]` and the prefix in `[0, 32]`.
    /// The address does not need to sit on the prefix boundary.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((ip_str, prefix_str)) = s.trim().split_once('/') else {
            return Err(RangeParseError::MissingPrefix(s.to_string()));
        };

        let addr = ip_str
            .parse::<Ipv4Addr>()
            .map_err(|_| RangeParseError::InvalidAddress(ip_str.to_string()))?;

        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|_| RangeParseError::InvalidPrefix(prefix_str.to_string()))?;

        Self::new(addr, prefix)
    }
}

impl fmt::Display for NetworkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix)
    }
}

/// A deduplicated, read-only-after-build collection of [`NetworkRange`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    ranges: BTreeSet<NetworkRange>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the range was not already present.
    pub fn insert(&mut self, range: NetworkRange) -> bool {
        self.ranges.insert(range)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkRange> {
        self.ranges.iter()
    }

    /// Linear scan over every range.
    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.ranges.iter().any(|range| range.contains(ip))
    }
}

impl FromIterator<NetworkRange> for RangeSet {
    fn from_iter<I: IntoIterator<Item = NetworkRange>>(iter: I) -> Self {
        Self {
            ranges: iter.into_iter().collect(),
        }
    }
}

impl Extend<NetworkRange> for RangeSet {
    fn extend<I: IntoIterator<Item = NetworkRange>>(&mut self, iter: I) {
        self.ranges.extend(iter);
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn range(s: &str) -> NetworkRange {
        s.parse().unwrap()
    }

    #[test]
    fn unmasked_input_is_normalized() {
        let r = range("10.0.0.5/24");
        assert_eq!(r.base(), Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(r.prefix(), 24);
        assert_eq!(r.to_string(), "10.0.0.0/24");
    }

    #[test]
    fn normalization_handles_odd_prefixes() {
        assert_eq!(range("172.16.5.10/20").to_string(), "172.16.0.0/20");
        assert_eq!(range("203.0.113.7/32").to_string(), "203.0.113.7/32");
        assert_eq!(range("10.20.30.40/0").to_string(), "0.0.0.0/0");
    }

    #[test]
    fn membership_on_a_slash_24() {
        let r = range("10.0.0.0/24");
        assert!(r.contains(Ipv4Addr::new(10, 0, 0, 1)));
        assert!(r.contains(Ipv4Addr::new(10, 0, 0, 255)));
        assert!(!r.contains(Ipv4Addr::new(10, 0, 1, 1)));
        assert!(!r.contains(Ipv4Addr::new(10, 0, 1, 0)));
    }

    #[test]
    fn prefix_zero_contains_everything() {
        let r = range("0.0.0.0/0");
        assert!(r.contains(Ipv4Addr::new(255, 255, 255, 255)));
        assert!(r.contains(Ipv4Addr::new(0, 0, 0, 0)));
        assert_eq!(r.broadcast(), Ipv4Addr::new(255, 255, 255, 255));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(matches!(
            "999.1.1.1/24".parse::<NetworkRange>(),
            Err(RangeParseError::InvalidAddress(_))
        ));
        assert!(matches!(
            "10.0.0.0/33".parse::<NetworkRange>(),
            Err(RangeParseError::InvalidPrefix(_))
        ));
        assert!(matches!(
            "10.0.0.0".parse::<NetworkRange>(),
            Err(RangeParseError::MissingPrefix(_))
        ));
    }

    #[test]
    fn equivalent_tokens_dedupe() {
        let set: RangeSet = ["10.0.0.5/24", "10.0.0.0/24", "10.0.0.200/24"]
            .iter()
            .map(|s| range(s))
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn set_membership_is_an_or_over_ranges() {
        let set: RangeSet = [range("10.0.0.0/8"), range("192.168.0.0/16")]
            .into_iter()
            .collect();
        assert!(set.contains(Ipv4Addr::new(192, 168, 44, 1)));
        assert!(set.contains(Ipv4Addr::new(10, 9, 9, 9)));
        assert!(!set.contains(Ipv4Addr::new(8, 8, 8, 8)));
        assert!(!RangeSet::new().contains(Ipv4Addr::new(10, 0, 0, 1)));
    }
}
