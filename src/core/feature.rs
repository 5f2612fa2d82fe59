//! Access-point identifiers and pairwise feature keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Access-point identifier (a MAC address string in practice).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApId(String);

impl ApId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ApId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Ordered access-point pair: "absolute signal difference between `first` and `second`".
///
/// Both orientations of a pair carry the same value once a grid has been
/// symmetrized. The textual form is the two identifiers concatenated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureKey {
    first: ApId,
    second: ApId,
}

impl FeatureKey {
    /// Create a key for the ordered pair.
    pub fn new(first: impl Into<ApId>, second: impl Into<ApId>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// First access point.
    #[inline]
    pub fn first(&self) -> &ApId {
        &self.first
    }

    /// Second access point.
    #[inline]
    pub fn second(&self) -> &ApId {
        &self.second
    }

    /// Same pair with the halves swapped.
    pub fn reversed(&self) -> FeatureKey {
        FeatureKey {
            first: self.second.clone(),
            second: self.first.clone(),
        }
    }

    /// True for the orientation with `first <= second`.
    #[inline]
    pub fn is_canonical(&self) -> bool {
        self.first <= self.second
    }

    /// The canonical orientation of this pair.
    pub fn canonical(&self) -> FeatureKey {
        if self.is_canonical() {
            self.clone()
        } else {
            self.reversed()
        }
    }

    /// Pair of an access point with itself.
    #[inline]
    pub fn is_self_pair(&self) -> bool {
        self.first == self.second
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_swaps_halves() {
        let k = FeatureKey::new("00:11:22:33:44:55", "66:77:88:99:aa:bb");
        let r = k.reversed();

        assert_eq!(r.first().as_str(), "66:77:88:99:aa:bb");
        assert_eq!(r.second().as_str(), "00:11:22:33:44:55");
        assert_eq!(r.reversed(), k);
        assert_eq!(r.to_string(), "66:77:88:99:aa:bb00:11:22:33:44:55");
    }

    #[test]
    fn test_canonical_orientation() {
        let k = FeatureKey::new("b", "a");
        assert!(!k.is_canonical());
        assert_eq!(k.canonical(), FeatureKey::new("a", "b"));
        assert_eq!(k.canonical(), k.reversed().canonical());
    }

    #[test]
    fn test_self_pair() {
        let k = FeatureKey::new("a", "a");
        assert!(k.is_self_pair());
        assert!(k.is_canonical());
        assert_eq!(k.reversed(), k);
    }
}
