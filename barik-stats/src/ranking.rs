//! Insertion-ordered tallies and top-N ranking.
//!
//! Rankings sort by value descending with a stable sort, so ties keep the
//! order in which each key was first seen. Output is identical across runs.

use indexmap::IndexMap;
use std::hash::Hash;

/// Counter or sum keyed by first-seen order.
#[derive(Debug, Clone)]
pub struct Tally<K, V> {
    entries: IndexMap<K, V>,
}

impl<K, V> Default for Tally<K, V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq, V: Copy + Default + std::ops::AddAssign> Tally<K, V> {
    pub fn add(&mut self, key: K, value: V) {
        *self.entries.entry(key).or_default() += value;
    }

    pub fn get(&self, key: &K) -> V {
        self.entries.get(key).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn into_map(self) -> IndexMap<K, V> {
        self.entries
    }
}

impl<K: Hash + Eq + Clone, V: Copy + Default + std::ops::AddAssign + PartialOrd> Tally<K, V> {
    /// Entries by value descending, first-seen order among equals.
    pub fn ranked(&self) -> Vec<(K, V)> {
        let mut out: Vec<(K, V)> = self.entries.iter().map(|(k, v)| (k.clone(), *v)).collect();
        out.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        out
    }

    pub fn top(&self, n: usize) -> Vec<(K, V)> {
        let mut out = self.ranked();
        out.truncate(n);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_keep_first_seen_order() {
        let mut t: Tally<&str, usize> = Tally::default();
        for k in ["b", "a", "c", "a", "b", "d"] {
            t.add(k, 1);
        }
        assert_eq!(t.ranked(), vec![("b", 2), ("a", 2), ("c", 1), ("d", 1)]);
        assert_eq!(t.top(3), vec![("b", 2), ("a", 2), ("c", 1)]);
        assert_eq!(t.get(&"z"), 0);
    }

    #[test]
    fn test_sums_floats() {
        let mut t: Tally<String, f64> = Tally::default();
        t.add("x".to_string(), -1.5);
        t.add("y".to_string(), -0.25);
        t.add("x".to_string(), 1.0);
        assert_eq!(t.ranked(), vec![("y".to_string(), -0.25), ("x".to_string(), -0.5)]);
        assert_eq!(t.len(), 2);
    }
}
