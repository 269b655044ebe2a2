//! Order-independent set of item identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Sorted, deduplicated item ids.
///
/// Two sets built from the same items in any order compare and hash equal.
/// Most rules carry one to three items, so storage is inline up to four.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ItemSet {
    items: SmallVec<[String; 4]>,
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set of one item.
    pub fn single(item: impl Into<String>) -> Self {
        let mut items = SmallVec::new();
        items.push(item.into());
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Sorted, deduplicated items.
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    /// Binary search over the sorted items.
    pub fn contains(&self, item: &str) -> bool {
        self.items
            .binary_search_by(|held| held.as_str().cmp(item))
            .is_ok()
    }

    /// Insert keeping order; false if already present.
    pub fn insert(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        match self.items.binary_search(&item) {
            Ok(_) => false,
            Err(pos) => {
                self.items.insert(pos, item);
                true
            }
        }
    }

    /// Every item also in `other`.
    pub fn is_subset(&self, other: &ItemSet) -> bool {
        self.len() <= other.len() && self.iter().all(|item| other.contains(item))
    }

    /// No item in common with `other`.
    pub fn is_disjoint(&self, other: &ItemSet) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().all(|item| !large.contains(item))
    }

    /// Items in either set.
    pub fn union(&self, other: &ItemSet) -> ItemSet {
        self.iter().chain(other.iter()).collect()
    }

    /// Items not in `other`.
    pub fn difference(&self, other: &ItemSet) -> ItemSet {
        self.iter().filter(|item| !other.contains(item)).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for ItemSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut items: SmallVec<[String; 4]> = iter.into_iter().map(Into::into).collect();
        items.sort_unstable();
        items.dedup();
        Self { items }
    }
}

impl From<Vec<String>> for ItemSet {
    fn from(items: Vec<String>) -> Self {
        items.into_iter().collect()
    }
}

impl From<ItemSet> for Vec<String> {
    fn from(set: ItemSet) -> Self {
        set.items.into_vec()
    }
}

impl<'a> IntoIterator for &'a ItemSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for ItemSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.items.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedups_and_sorts() {
        let set: ItemSet = ["milk", "bread", "milk"].into_iter().collect();
        assert_eq!(set.as_slice(), &["bread".to_string(), "milk".to_string()]);
    }

    #[test]
    fn set_algebra() {
        let a: ItemSet = ["a", "b", "c"].into_iter().collect();
        let b: ItemSet = ["b"].into_iter().collect();
        let d: ItemSet = ["d"].into_iter().collect();
        assert!(b.is_subset(&a));
        assert!(a.is_disjoint(&d));
        assert!(!a.is_disjoint(&b));
        assert_eq!(a.difference(&b).to_string(), "a + c");
        assert_eq!(b.union(&d).len(), 2);
    }

    #[test]
    fn insert_keeps_order() {
        let mut set = ItemSet::single("m");
        assert!(set.insert("a"));
        assert!(!set.insert("m"));
        assert_eq!(set.to_string(), "a + m");
    }
}
