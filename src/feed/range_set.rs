//! Range set type.

use serde::{Deserialize, Serialize};

/// An ordered sequence of CIDR range strings.
///
/// Ranges are opaque tokens: they are never parsed as addresses, and two
/// ranges are equal only when their strings are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeSet(Vec<String>);

impl RangeSet {
    /// Creates a range set from the given ranges, keeping their order.
    #[must_use]
    pub const fn new(ranges: Vec<String>) -> Self {
        Self(ranges)
    }

    /// Returns the number of ranges, duplicates included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set holds no ranges.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the ranges in their original order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns the ranges sorted lexicographically, duplicates kept.
    #[must_use]
    pub fn sorted(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.0.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }

    /// Iterates over the ranges in their original order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for RangeSet {
    fn from(ranges: Vec<String>) -> Self {
        Self(ranges)
    }
}

impl FromIterator<String> for RangeSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for RangeSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(String::from).collect())
    }
}

impl<'a> IntoIterator for &'a RangeSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_keeps_duplicates() {
        let set: RangeSet = ["2.2.2.0/24", "1.1.1.0/24", "2.2.2.0/24"].into_iter().collect();
        assert_eq!(set.sorted(), vec!["1.1.1.0/24", "2.2.2.0/24", "2.2.2.0/24"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_sorted_is_lexicographic_not_numeric() {
        let set: RangeSet = ["10.0.0.0/8", "9.0.0.0/8"].into_iter().collect();
        assert_eq!(set.sorted(), vec!["10.0.0.0/8", "9.0.0.0/8"]);
    }

    #[test]
    fn test_deserializes_from_plain_array() {
        let set: RangeSet = serde_json::from_str(r#"["1.1.1.0/24"]"#).expect("valid array");
        assert_eq!(set.as_slice(), ["1.1.1.0/24"]);
    }
}
