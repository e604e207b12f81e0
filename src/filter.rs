//! Port exclusion.
//!
//! An [`ExclusionSet`] is parsed once from configuration and shared read-only
//! by every task.

use std::collections::HashSet;
use std::str::FromStr;

use crate::error_handling::ConfigError;

/// Ports that are never emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    ports: HashSet<u16>,
}

impl ExclusionSet {
    /// Builds a set from any collection of ports.
    pub fn new(ports: impl IntoIterator<Item = u16>) -> Self {
        Self {
            ports: ports.into_iter().collect(),
        }
    }

    /// Whether `port` is excluded.
    pub fn contains(&self, port: u16) -> bool {
        self.ports.contains(&port)
    }

    /// Whether nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Number of distinct excluded ports.
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Returns the ports not in the set, in their original order.
    ///
    /// Duplicates in `ports` are kept.
    pub fn filter(&self, ports: &[u16]) -> Vec<u16> {
        if self.ports.is_empty() {
            return ports.to_vec();
        }
        ports
            .iter()
            .copied()
            .filter(|port| !self.ports.contains(port))
            .collect()
    }
}

impl FromStr for ExclusionSet {
    type Err = ConfigError;

    /// Parses a comma-separated port list such as `80,443, 8080`.
    ///
    /// An empty (or all-whitespace) string is the empty set. Every item must
    /// be a port number; empty items are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::default());
        }
        s.split(',')
            .map(|item| {
                let item = item.trim();
                item.parse::<u16>()
                    .map_err(|_| ConfigError::InvalidPort(item.to_string()))
            })
            .collect::<Result<HashSet<_>, _>>()
            .map(|ports| Self { ports })
    }
}

/// Parses an exclude-port list. See [`ExclusionSet::from_str`].
pub fn parse_exclude_ports(s: &str) -> Result<ExclusionSet, ConfigError> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_subsequence(sub: &[u16], full: &[u16]) -> bool {
        let mut it = full.iter();
        sub.iter().all(|p| it.any(|q| q == p))
    }

    #[test]
    fn test_filter_removes_excluded_ports() {
        let set = ExclusionSet::new([443]);
        assert_eq!(set.filter(&[80, 443, 8080]), vec![80, 8080]);
    }

    #[test]
    fn test_filter_empty_set_is_passthrough() {
        let set = ExclusionSet::default();
        assert_eq!(set.filter(&[443, 80, 80, 22]), vec![443, 80, 80, 22]);
    }

    #[test]
    fn test_filter_empty_ports() {
        let set = ExclusionSet::new([80]);
        assert!(set.filter(&[]).is_empty());
    }

    #[test]
    fn test_filter_keeps_duplicates_and_order() {
        let set = ExclusionSet::new([22]);
        assert_eq!(set.filter(&[8080, 22, 80, 8080, 22]), vec![8080, 80, 8080]);
    }

    #[test]
    fn test_filter_output_is_ordered_subsequence_disjoint_from_set() {
        let ports: Vec<u16> = vec![1, 5, 22, 80, 5, 443, 3306, 22, 8080, 65535];
        let sets = [
            ExclusionSet::default(),
            ExclusionSet::new([5]),
            ExclusionSet::new([22, 80, 65535]),
            ExclusionSet::new(ports.iter().copied()),
            ExclusionSet::new([9999]),
        ];
        for set in &sets {
            let filtered = set.filter(&ports);
            assert!(filtered.iter().all(|p| !set.contains(*p)));
            assert!(is_subsequence(&filtered, &ports));
            let expected = ports.iter().filter(|p| !set.contains(**p)).count();
            assert_eq!(filtered.len(), expected);
        }
    }

    #[test]
    fn test_parse_empty_string() {
        assert!(parse_exclude_ports("").unwrap().is_empty());
        assert!(parse_exclude_ports("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_port_list() {
        let set = parse_exclude_ports("80,443, 8080").unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains(80));
        assert!(set.contains(443));
        assert!(set.contains(8080));
    }

    #[test]
    fn test_parse_rejects_malformed_items() {
        for bad in ["abc", "80,,443", "80,", "70000", "-1", "80;443", "1.5"] {
            let result = parse_exclude_ports(bad);
            assert!(
                matches!(result, Err(ConfigError::InvalidPort(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
