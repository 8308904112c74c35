//! Optimized allocation and collection types for Arbor.
//!
//! This module provides:
//! - Re-exports of optimized hash collections using AHash
//! - SlotArena, a generational storage used by the scene tree

pub mod slot_arena;

pub use slot_arena::{SlotArena, SlotKey};

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashset_with_slot_keys() {
        let mut arena = SlotArena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&a));
        assert!(!set.contains(&b));
    }

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("key", "value");
        assert_eq!(map.get("key"), Some(&"value"));
    }
}
