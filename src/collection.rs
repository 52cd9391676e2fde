//! Fixed-capacity containers.
//!
//! Both containers reserve storage for exactly `N` elements when they are
//! created and never grow, so a device running for months cannot fragment
//! its memory through them. Lookups are linear; `N` is expected to stay in
//! the tens.

use heapless::{Deque, Vec};

/// Errors that can occur during container operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CollectionError {
    /// The container is full and cannot accept another element.
    Full {
        /// Capacity of the container.
        capacity: usize,
    },
}

impl core::fmt::Display for CollectionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CollectionError::Full { capacity } => {
                write!(f, "container is full ({} elements)", capacity)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CollectionError {}

/// A key-value map with room for at most `N` entries.
///
/// Reads of absent keys or out-of-range indices return the fallback key or
/// value given at construction instead of failing, so callers on the hot
/// path never have to branch on `Option`.
///
/// # Type Parameters
/// * `K` - Key type, compared by equality
/// * `V` - Value type
/// * `N` - Maximum number of entries
#[derive(Debug, Clone)]
pub struct BoundedMap<K, V, const N: usize> {
    entries: Vec<(K, V), N>,
    fallback_key: K,
    fallback_value: V,
}

impl<K: PartialEq, V, const N: usize> BoundedMap<K, V, N> {
    /// Creates an empty map with the given fallback key and value.
    pub fn new(fallback_key: K, fallback_value: V) -> Self {
        Self {
            entries: Vec::new(),
            fallback_key,
            fallback_value,
        }
    }

    /// Inserts or updates an entry and returns its index.
    ///
    /// An existing key is updated in place. A new key is appended if room
    /// remains.
    ///
    /// # Errors
    /// * `Full` - The key is new and all `N` slots are taken
    pub fn set(&mut self, key: K, value: V) -> Result<usize, CollectionError> {
        if let Some(index) = self.index_of(&key) {
            self.entries[index].1 = value;
            return Ok(index);
        }

        let index = self.entries.len();
        self.entries
            .push((key, value))
            .map_err(|_| CollectionError::Full { capacity: N })?;
        Ok(index)
    }

    /// Returns the value for `key`, or the fallback value if absent.
    pub fn get(&self, key: &K) -> &V {
        match self.index_of(key) {
            Some(index) => &self.entries[index].1,
            None => &self.fallback_value,
        }
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Removes the entry for `key`, keeping the order of the others.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.index_of(key)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns the position of `key` in insertion order.
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Returns the key at `index`, or the fallback key.
    pub fn key_at(&self, index: usize) -> &K {
        self.entries
            .get(index)
            .map(|(k, _)| k)
            .unwrap_or(&self.fallback_key)
    }

    /// Returns the value at `index`, or the fallback value.
    pub fn value_at(&self, index: usize) -> &V {
        self.entries
            .get(index)
            .map(|(_, v)| v)
            .unwrap_or(&self.fallback_value)
    }

    /// Returns true if an entry for `key` exists.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index_of(key).is_some()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates mutably over values in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
    }

    /// Removes all entries. Storage is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        N
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if no further key can be added.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= N
    }
}

/// A double-ended sequence with room for at most `N` elements.
///
/// Out-of-range reads return the fallback element.
#[derive(Debug, Clone)]
pub struct BoundedSeq<T, const N: usize> {
    items: Deque<T, N>,
    fallback: T,
}

impl<T: PartialEq, const N: usize> BoundedSeq<T, N> {
    /// Creates an empty sequence with the given fallback element.
    pub fn new(fallback: T) -> Self {
        Self {
            items: Deque::new(),
            fallback,
        }
    }

    /// Adds an element to the front. Returns the new index (always 0).
    ///
    /// # Errors
    /// * `Full` - All `N` slots are taken
    pub fn push_front(&mut self, item: T) -> Result<usize, CollectionError> {
        self.items
            .push_front(item)
            .map_err(|_| CollectionError::Full { capacity: N })?;
        Ok(0)
    }

    /// Adds an element to the back and returns its index.
    ///
    /// # Errors
    /// * `Full` - All `N` slots are taken
    pub fn push_back(&mut self, item: T) -> Result<usize, CollectionError> {
        self.items
            .push_back(item)
            .map_err(|_| CollectionError::Full { capacity: N })?;
        Ok(self.items.len() - 1)
    }

    /// Removes and returns the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Removes and returns the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    /// Returns the element at `index`, or the fallback element.
    pub fn get(&self, index: usize) -> &T {
        self.items.iter().nth(index).unwrap_or(&self.fallback)
    }

    /// Returns the first element, or the fallback element.
    pub fn front(&self) -> &T {
        self.items.front().unwrap_or(&self.fallback)
    }

    /// Returns the last element, or the fallback element.
    pub fn back(&self) -> &T {
        self.items.back().unwrap_or(&self.fallback)
    }

    /// Returns true if an element equal to `item` is stored.
    pub fn contains(&self, item: &T) -> bool {
        self.items.iter().any(|i| i == item)
    }

    /// Iterates front to back.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Removes all elements. Storage is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns the maximum number of elements.
    pub fn capacity(&self) -> usize {
        N
    }

    /// Returns true if the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if no further element can be added.
    pub fn is_full(&self) -> bool {
        self.items.is_full()
    }
}
