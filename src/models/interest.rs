//! Ordered set of topic interests selected by the user.

use serde::{Deserialize, Serialize};

/// Distinct topic ids in selection order; the first one is the primary interest.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct InterestSet(Vec<String>);

impl InterestSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interest. Returns false when it was already selected.
    pub fn select(&mut self, interest: &str) -> bool {
        if self.contains(interest) {
            return false;
        }
        self.0.push(interest.to_string());
        true
    }

    /// Remove an interest. Returns false when it was not selected.
    pub fn deselect(&mut self, interest: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|i| i != interest);
        self.0.len() != before
    }

    pub fn contains(&self, interest: &str) -> bool {
        self.0.iter().any(|i| i == interest)
    }

    pub fn primary(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for InterestSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = InterestSet::new();
        for interest in iter {
            set.select(interest.as_ref());
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_keeps_order_and_rejects_duplicates() {
        let mut set = InterestSet::new();
        assert!(set.select("python"));
        assert!(set.select("data-science"));
        assert!(!set.select("python"));

        assert_eq!(set.as_slice(), ["python", "data-science"]);
        assert_eq!(set.primary(), Some("python"));
    }

    #[test]
    fn test_deselect_promotes_next_primary() {
        let mut set: InterestSet = ["python", "javascript"].into_iter().collect();
        assert!(set.deselect("python"));
        assert!(!set.deselect("python"));
        assert_eq!(set.primary(), Some("javascript"));
    }
}
