//! Generic arena for dense, id-indexed storage of derived entities.
//!
//! An [`Arena`] gives O(1) insertion and lookup by opaque [`ArenaId`] keys and
//! iterates in allocation order, which is also declaration order for every
//! entity the elaborator allocates.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Trait for opaque id types used as arena keys.
///
/// Implementors must provide a bijection between `u32` indices and the id type.
pub trait ArenaId: Copy {
    /// Creates an id from a raw `u32` index.
    fn from_raw(index: u32) -> Self;

    /// Returns the raw `u32` index.
    fn as_raw(self) -> u32;
}

/// A dense, id-indexed container.
///
/// Items are only ever appended, so ids stay valid for the lifetime of the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena<I: ArenaId, T> {
    items: Vec<T>,
    #[serde(skip)]
    _marker: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Allocates a new item and returns its id.
    pub fn alloc(&mut self, item: T) -> I {
        let id = I::from_raw(self.items.len() as u32);
        self.items.push(item);
        id
    }

    /// Returns a reference to the item with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not allocated by this arena.
    pub fn get(&self, id: I) -> &T {
        &self.items[id.as_raw() as usize]
    }

    /// Returns a mutable reference to the item with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not allocated by this arena.
    pub fn get_mut(&mut self, id: I) -> &mut T {
        &mut self.items[id.as_raw() as usize]
    }

    /// Returns the id of the first item matching the predicate.
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<I> {
        self.items
            .iter()
            .position(|item| predicate(item))
            .map(|i| I::from_raw(i as u32))
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the arena holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over `(id, &T)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (I::from_raw(i as u32), item))
    }

    /// Iterates over items in allocation order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        self.get(id)
    }
}

impl<I: ArenaId, T> IndexMut<I> for Arena<I, T> {
    fn index_mut(&mut self, id: I) -> &mut T {
        self.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{PortId, WireId};

    #[test]
    fn alloc_and_index() {
        let mut arena: Arena<PortId, String> = Arena::new();
        let clk = arena.alloc("clk".to_string());
        let rst = arena.alloc("rst_n".to_string());
        assert_eq!(arena[clk], "clk");
        assert_eq!(arena[rst], "rst_n");
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn get_mut_modifies() {
        let mut arena: Arena<WireId, String> = Arena::new();
        let id = arena.alloc("sender_to_receiver_DATA".to_string());
        arena[id].push_str("_0");
        assert_eq!(arena.get(id), "sender_to_receiver_DATA_0");
    }

    #[test]
    fn find_returns_first_match() {
        let mut arena: Arena<PortId, &str> = Arena::new();
        arena.alloc("a");
        let b = arena.alloc("b");
        arena.alloc("b");
        assert_eq!(arena.find(|n| *n == "b"), Some(b));
        assert_eq!(arena.find(|n| *n == "z"), None);
    }

    #[test]
    fn iter_preserves_allocation_order() {
        let mut arena: Arena<PortId, &str> = Arena::new();
        arena.alloc("data_in");
        arena.alloc("clk");
        let names: Vec<_> = arena.values().copied().collect();
        assert_eq!(names, vec!["data_in", "clk"]);
        let ids: Vec<u32> = arena.iter().map(|(id, _)| id.as_raw()).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn default_is_empty() {
        let arena: Arena<WireId, u32> = Arena::default();
        assert!(arena.is_empty());
    }

    #[test]
    fn serde_roundtrip() {
        let mut arena: Arena<WireId, String> = Arena::new();
        arena.alloc("first".to_string());
        let json = serde_json::to_string(&arena).unwrap();
        let restored: Arena<WireId, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored[WireId::from_raw(0)], "first");
    }
}
