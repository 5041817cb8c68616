//! Resizable ordered container indexed by `u32`, with holes.
//!
//! A [`Sequence`] behaves like an ECMAScript array's element store:
//!
//! - `len()` is always greater than the index of every present element.
//! - An index in `[0, len())` with no value is a *hole*. A hole is not the
//!   same thing as a present value that happens to be "empty"; `get` reports
//!   it as `None` and bulk operations carry it along as a hole.
//! - Valid indices are `0 ..= 2^32 - 2`; the largest length is `2^32 - 1`.
//!
//! Storage switches between a packed slot vector and a sparse index map
//! behind the scenes (see [`StorageConfig`]). The mode is never observable
//! through this API.
//!
//! ## Example
//!
//! ```
//! use sparse_seq::runner::ds::sequence::Sequence;
//!
//! let mut s = Sequence::from_values(vec![1, 2, 3, 4, 5, 6, 7, 8]);
//! let removed = s.splice(Some(0.0), Some(3.0), vec![1, 2, 3, 4]).unwrap();
//! assert_eq!(removed.to_vec(), vec![Some(1), Some(2), Some(3)]);
//! assert_eq!(s.len(), 9);
//! ```
//!
//! Operations run to completion and must not be re-entered; the borrow
//! checker already rules that out for safe callers.

mod iter;
mod mutation;

use std::fmt;
use std::iter::FromIterator;

use crate::runner::ds::error::SeqError;
use crate::runner::ds::operations::relative_index::{to_array_length, MAX_INDEX, MAX_LENGTH};
use crate::runner::ds::storage::{Storage, StorageConfig, StorageKind};

pub use self::iter::Iter;
pub use self::mutation::ConcatArg;
pub use crate::runner::ds::storage::Entries;

#[derive(Clone)]
pub struct Sequence<T> {
    length: u32,
    storage: Storage<T>,
    config: StorageConfig,
}

impl<T> Sequence<T> {
    /// An empty sequence with the default adaptive storage.
    pub fn new() -> Self {
        Self::with_config(StorageConfig::default())
    }

    pub fn with_config(config: StorageConfig) -> Self {
        Sequence {
            length: 0,
            storage: Storage::empty(&config),
            config,
        }
    }

    /// A sequence of `length` holes. Nothing is allocated for the holes.
    pub fn with_length(length: u32) -> Self {
        Self::with_length_and_config(length, StorageConfig::default())
    }

    pub fn with_length_and_config(length: u32, config: StorageConfig) -> Self {
        let mut seq = Self::with_config(config);
        seq.length = length;
        seq
    }

    /// A sequence holding `values` at indices `0..n`, all present.
    ///
    /// # Panics
    ///
    /// Panics if there are more than `2^32 - 1` values.
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        Self::from_values_with_config(values, StorageConfig::default())
    }

    pub fn from_values_with_config<I: IntoIterator<Item = T>>(
        values: I,
        config: StorageConfig,
    ) -> Self {
        Self::from_slots_with_config(values.into_iter().map(Some), config)
    }

    /// Like [`from_values`](Self::from_values), with `None` slots left as holes.
    ///
    /// # Panics
    ///
    /// Panics if there are more than `2^32 - 1` slots.
    pub fn from_slots<I: IntoIterator<Item = Option<T>>>(slots: I) -> Self {
        Self::from_slots_with_config(slots, StorageConfig::default())
    }

    pub fn from_slots_with_config<I: IntoIterator<Item = Option<T>>>(
        slots: I,
        config: StorageConfig,
    ) -> Self {
        let slots: Vec<Option<T>> = slots.into_iter().collect();
        assert!(
            slots.len() as u64 <= MAX_LENGTH as u64,
            "sequence length {} exceeds 2^32 - 1",
            slots.len()
        );
        let mut seq = Sequence {
            length: slots.len() as u32,
            storage: Storage::from_slots(slots),
            config,
        };
        seq.rebalance();
        seq
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn len(&self) -> u32 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of indices holding a value, holes excluded.
    pub fn present_count(&self) -> usize {
        self.storage.present_count()
    }

    pub(crate) fn storage_kind(&self) -> StorageKind {
        self.storage.kind()
    }

    /// The value at `index`, or `None` for a hole or an index past the end.
    pub fn get(&self, index: u32) -> Option<&T> {
        if index >= self.length {
            return None;
        }
        self.storage.get(index)
    }

    pub fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        if index >= self.length {
            return None;
        }
        self.storage.get_mut(index)
    }

    /// Stores `value` at `index`, growing `len()` to `index + 1` if needed.
    /// Returns the value previously at `index`.
    ///
    /// `u32::MAX` is not an element index: writing it would need a length of
    /// `2^32` and fails with [`SeqError::LengthOverflow`].
    pub fn set(&mut self, index: u32, value: T) -> Result<Option<T>, SeqError> {
        if index > MAX_INDEX {
            return Err(SeqError::LengthOverflow {
                requested: index as u64 + 1,
            });
        }
        let old = self.storage.insert(index, value, &self.config);
        if index >= self.length {
            self.length = index + 1;
        }
        self.rebalance();
        Ok(old)
    }

    /// Turns `index` into a hole. `len()` is unchanged.
    pub fn delete(&mut self, index: u32) -> Option<T> {
        if index >= self.length {
            return None;
        }
        let old = self.storage.remove(index);
        if old.is_some() {
            self.rebalance();
        }
        old
    }

    /// Assigns `len()` from a caller-supplied number.
    ///
    /// Shrinking drops every element at or above the new length; growing
    /// appends holes.
    pub fn set_length(&mut self, requested: f64) -> Result<(), SeqError> {
        let length = to_array_length(requested)?;
        self.resize(length);
        Ok(())
    }

    pub fn resize(&mut self, length: u32) {
        if length < self.length {
            self.storage.truncate(length);
            self.length = length;
            self.rebalance();
        } else {
            self.length = length;
        }
    }

    /// Shrinks to `length`; no-op if already shorter.
    pub fn truncate(&mut self, length: u32) {
        if length < self.length {
            self.resize(length);
        }
    }

    pub fn clear(&mut self) {
        self.resize(0);
    }

    /// Every index in `[0, len())` in ascending order, holes included.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Present elements only, ascending. Cost is proportional to the number
    /// of present elements in sparse mode.
    pub fn entries(&self) -> Entries<'_, T> {
        self.storage.entries()
    }

    pub fn first_index_where<F: FnMut(&T) -> bool>(&self, mut predicate: F) -> Option<u32> {
        self.entries().find(|(_, v)| predicate(v)).map(|(i, _)| i)
    }

    pub(crate) fn rebalance(&mut self) {
        self.storage.rebalance(&self.config);
    }
}

impl<T: Clone> Sequence<T> {
    /// All slots as a vector, holes as `None`.
    pub fn to_vec(&self) -> Vec<Option<T>> {
        self.iter().map(|(_, v)| v.cloned()).collect()
    }
}

impl<T: PartialEq> Sequence<T> {
    /// Lowest index holding `value`. Holes never match.
    pub fn index_of(&self, value: &T) -> Option<u32> {
        self.first_index_where(|v| v == value)
    }

    pub fn includes(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self.present_count() == other.present_count()
            && self.entries().eq(other.entries())
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("length", &self.length)
            .field("elements", &DebugEntries(self))
            .finish()
    }
}

struct DebugEntries<'a, T>(&'a Sequence<T>);

impl<'a, T: fmt::Debug> fmt::Debug for DebugEntries<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.entries()).finish()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = (u32, Option<&'a T>);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
