//! Port types with validation and parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortRange` bounds a scan and `ExcludeSet` holds the ports a scan must skip.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A validated TCP port number (1-65535).
///
/// Port 0 asks the OS for an ephemeral port, which is never what a
/// caller scanning a range means, so it is not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;
    /// First port outside the privileged range.
    pub const UNPRIVILEGED: u16 = 1024;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Check if this is a privileged port (< 1024).
    #[inline]
    pub const fn is_privileged(self) -> bool {
        self.0 < Self::UNPRIVILEGED
    }

    /// The next port up, if there is one.
    #[inline]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(p) => Some(Self(p)),
            None => None,
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value.into()))
    }
}

impl TryFrom<u32> for Port {
    type Error = PortError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(PortError::OutOfRange(value))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

impl FromStr for Port {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value: u32 = s
            .parse()
            .map_err(|_| PortError::InvalidFormat(s.to_string()))?;
        Self::try_from(value)
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u32),
    #[error("invalid port number: {0}")]
    InvalidFormat(String),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
}

/// An inclusive range of ports to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Lower bound of the default scan range.
    pub const DEFAULT_START: u16 = 3000;
    /// Upper bound of the default scan range.
    pub const DEFAULT_END: u16 = Port::MAX;

    /// Create a new port range.
    pub fn new(start: Port, end: Port) -> Result<Self, PortError> {
        if start > end {
            Err(PortError::InvalidRange(start.0, end.0))
        } else {
            Ok(Self { start, end })
        }
    }

    /// Create a range from raw numbers, validating both bounds and their order.
    pub fn from_bounds(start: u16, end: u16) -> Result<Self, PortError> {
        Self::new(Port::try_from(start)?, Port::try_from(end)?)
    }

    /// Create a range containing a single port.
    pub const fn single(port: Port) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    pub const fn start(&self) -> Port {
        self.start
    }

    pub const fn end(&self) -> Port {
        self.end
    }

    /// Get the number of ports in this range.
    pub const fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize + 1
    }

    /// Check if the range is empty (never true for valid ranges).
    pub const fn is_empty(&self) -> bool {
        false
    }

    pub const fn contains(&self, port: Port) -> bool {
        port.0 >= self.start.0 && port.0 <= self.end.0
    }

    /// Iterate over all ports in this range, ascending.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port)
    }
}

impl Default for PortRange {
    fn default() -> Self {
        Self {
            start: Port(Self::DEFAULT_START),
            end: Port(Self::DEFAULT_END),
        }
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for PortRange {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('-') {
            Some((start, end)) => Self::new(start.parse()?, end.parse()?),
            None => Ok(Self::single(s.parse()?)),
        }
    }
}

/// Ports a scan must skip regardless of whether they are free.
///
/// Parses the same syntax as a port list: "80", "80,443", "8000-8010",
/// or any comma-separated mix. An empty string is the empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeSet {
    ports: HashSet<Port>,
}

impl ExcludeSet {
    /// Create an empty exclusion set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single port.
    pub fn insert(&mut self, port: Port) {
        self.ports.insert(port);
    }

    /// Add every port in a range.
    pub fn insert_range(&mut self, range: PortRange) {
        self.ports.extend(range.iter());
    }

    pub fn contains(&self, port: Port) -> bool {
        self.ports.contains(&port)
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// All excluded ports in ascending order.
    pub fn to_sorted(&self) -> Vec<Port> {
        let mut ports: Vec<Port> = self.ports.iter().copied().collect();
        ports.sort_unstable();
        ports
    }
}

impl FromIterator<Port> for ExcludeSet {
    fn from_iter<I: IntoIterator<Item = Port>>(iter: I) -> Self {
        Self {
            ports: iter.into_iter().collect(),
        }
    }
}

impl Extend<Port> for ExcludeSet {
    fn extend<I: IntoIterator<Item = Port>>(&mut self, iter: I) {
        self.ports.extend(iter);
    }
}

impl FromStr for ExcludeSet {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = Self::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            set.insert_range(part.parse()?);
        }
        Ok(set)
    }
}

impl fmt::Display for ExcludeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.to_sorted().iter().map(|p| p.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(65535).is_some());
        assert_eq!(Port::try_from(70000u32), Err(PortError::OutOfRange(70000)));
        assert!("abc".parse::<Port>().is_err());
        assert!("8.5".parse::<Port>().is_err());
        assert_eq!("8080".parse::<Port>().unwrap().as_u16(), 8080);
    }

    #[test]
    fn test_port_properties() {
        assert!(Port::new(80).unwrap().is_privileged());
        assert!(!Port::new(1024).unwrap().is_privileged());
        assert_eq!(Port::new(65535).unwrap().next(), None);
        assert_eq!(Port::new(80).unwrap().next(), Port::new(81));
    }

    #[test]
    fn test_port_range() {
        let range = PortRange::from_bounds(1, 100).unwrap();
        assert_eq!(range.len(), 100);
        assert!(range.contains(Port::new(50).unwrap()));
        assert!(!range.contains(Port::new(101).unwrap()));
        assert_eq!(range.iter().count(), 100);

        assert_eq!(
            PortRange::from_bounds(10, 5),
            Err(PortError::InvalidRange(10, 5))
        );
        assert!(PortRange::from_bounds(0, 5).is_err());
    }

    #[test]
    fn test_port_range_parsing() {
        let range: PortRange = "8000-8010".parse().unwrap();
        assert_eq!(range.start().as_u16(), 8000);
        assert_eq!(range.end().as_u16(), 8010);
        assert_eq!(range.to_string(), "8000-8010");

        let single: PortRange = "22".parse().unwrap();
        assert_eq!(single.len(), 1);
        assert!("9-1".parse::<PortRange>().is_err());
    }

    #[test]
    fn test_default_range() {
        let range = PortRange::default();
        assert_eq!(range.start().as_u16(), 3000);
        assert_eq!(range.end().as_u16(), 65535);
    }

    #[test]
    fn test_exclude_set_parsing() {
        let set: ExcludeSet = "80, 443,8000-8002".parse().unwrap();
        assert_eq!(set.len(), 5);
        assert!(set.contains(Port::new(8001).unwrap()));
        assert!(!set.contains(Port::new(8003).unwrap()));
        assert_eq!(set.to_string(), "80,443,8000,8001,8002");

        let empty: ExcludeSet = "".parse().unwrap();
        assert!(empty.is_empty());

        assert!("80,0".parse::<ExcludeSet>().is_err());
        assert!("http".parse::<ExcludeSet>().is_err());
    }

    #[test]
    fn test_exclude_set_dedup() {
        let set: ExcludeSet = "80,80,443,80".parse().unwrap();
        assert_eq!(set.len(), 2);
    }
}
