//! Point selection state
//!
//! A selection is an ordered set of record indices. It round-trips through
//! a comma-separated string so selections can be copied between sessions.

use std::collections::BTreeSet;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    indices: BTreeSet<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    /// Parse a comma-separated index list; tokens that are not plain
    /// numbers are skipped
    pub fn from_csv(text: &str) -> Self {
        Self::from_indices(
            text.split(',')
                .filter_map(|token| token.trim().parse::<usize>().ok()),
        )
    }

    pub fn to_csv(&self) -> String {
        let parts: Vec<String> = self.indices.iter().map(usize::to_string).collect();
        parts.join(",")
    }

    pub fn insert(&mut self, index: usize) {
        self.indices.insert(index);
    }

    pub fn remove(&mut self, index: usize) {
        self.indices.remove(&index);
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Drop indices that no longer refer to a record, after a deletion
    pub fn retain_valid(&mut self, len: usize) {
        self.indices.retain(|&i| i < len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_roundtrip() {
        let selection = Selection::from_indices([7, 0, 3]);
        assert_eq!(selection.to_csv(), "0,3,7");
        assert_eq!(Selection::from_csv("0,3,7"), selection);
    }

    #[test]
    fn test_from_csv_skips_garbage() {
        let selection = Selection::from_csv(" 1, two,3 ,, -4");
        assert_eq!(selection.to_csv(), "1,3");
    }

    #[test]
    fn test_retain_valid() {
        let mut selection = Selection::from_indices([0, 5, 9]);
        selection.retain_valid(6);
        assert_eq!(selection.to_csv(), "0,5");
    }

    #[test]
    fn test_membership() {
        let mut selection = Selection::new();
        selection.insert(2);
        assert!(selection.contains(2));
        selection.remove(2);
        assert!(selection.is_empty());
    }
}
