//! Provide insertion-ordered containers, re-exports *indexmap*.
//!
//! Both containers use [`FixedHashState`], so lookups never depend on process state
//! and iteration follows insertion order.

use crate::hash::FixedHashState;

// -----------------------------------------------------------------------------
// Exports

/// An [`indexmap::IndexMap`] using [`FixedHashState`].
pub type IndexMap<K, V, S = FixedHashState> = indexmap::IndexMap<K, V, S>;

/// An [`indexmap::IndexSet`] using [`FixedHashState`].
///
/// # Examples
///
/// ```
/// use vc_utils::index::IndexSet;
///
/// let mut set: IndexSet<&str> = IndexSet::default();
/// assert!(set.insert("b"));
/// assert!(set.insert("a"));
/// assert!(!set.insert("b"));
///
/// let items: Vec<_> = set.iter().copied().collect();
/// assert_eq!(items, ["b", "a"]);
/// ```
pub type IndexSet<T, S = FixedHashState> = indexmap::IndexSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use indexmap;

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{IndexMap, IndexSet};

    #[test]
    fn keeps_first_insertion_order() {
        let set: IndexSet<i32> = [3, 1, 3, 2, 1].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.into_iter().collect::<Vec<_>>(), [3, 1, 2]);
    }

    #[test]
    fn map_reinsert_keeps_position() {
        let mut map: IndexMap<&str, i32> = IndexMap::default();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("a", 3);
        let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(entries, [("a", 3), ("b", 2)]);
    }
}
