//! Backing store for [`Sequence`](super::sequence::Sequence).
//!
//! Elements live either in a packed run of slots starting at index 0 or in an
//! ordered index map. Which one is active is a memory heuristic only: every
//! operation here produces the same observable elements in both modes.
//!
//! ```text
//! Packed:  [Some(a), None, Some(c)]          indices >= 3 are holes
//! Sparse:  {0: a, 2: c, 90000: z}            missing keys are holes
//! ```

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::iter::Enumerate;
use std::mem;
use std::slice;
use std::str::FromStr;

/// How a sequence picks its representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoragePolicy {
    /// Switch between packed and sparse based on density.
    Adaptive,
    /// Never leave packed storage. Large gaps are materialized as holes.
    AlwaysPacked,
    /// Never leave sparse storage.
    AlwaysSparse,
}

impl FromStr for StoragePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adaptive" => Ok(StoragePolicy::Adaptive),
            "packed" => Ok(StoragePolicy::AlwaysPacked),
            "sparse" => Ok(StoragePolicy::AlwaysSparse),
            _ => Err(format!("unknown storage policy '{}'", s)),
        }
    }
}

impl fmt::Display for StoragePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoragePolicy::Adaptive => write!(f, "adaptive"),
            StoragePolicy::AlwaysPacked => write!(f, "packed"),
            StoragePolicy::AlwaysSparse => write!(f, "sparse"),
        }
    }
}

/// Tuning knobs for the packed/sparse switch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageConfig {
    pub policy: StoragePolicy,
    /// Widest run of holes a packed write may open past the packed end.
    pub max_gap: u32,
    /// Packed stores shorter than this never go sparse on density alone.
    pub sparse_min_length: u32,
}

impl StorageConfig {
    pub const fn new() -> Self {
        StorageConfig {
            policy: StoragePolicy::Adaptive,
            max_gap: 1024,
            sparse_min_length: 128,
        }
    }

    pub fn with_policy(mut self, policy: StoragePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn packed() -> Self {
        Self::new().with_policy(StoragePolicy::AlwaysPacked)
    }

    pub fn sparse() -> Self {
        Self::new().with_policy(StoragePolicy::AlwaysSparse)
    }

    fn allows_gap(&self, gap: u64) -> bool {
        match self.policy {
            StoragePolicy::AlwaysPacked => true,
            StoragePolicy::AlwaysSparse => false,
            StoragePolicy::Adaptive => gap <= self.max_gap as u64,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StorageKind {
    Packed,
    Sparse,
}

#[derive(Debug, Clone)]
pub(crate) enum Storage<T> {
    Packed { slots: Vec<Option<T>>, present: usize },
    Sparse(BTreeMap<u32, T>),
}

impl<T> Storage<T> {
    pub(crate) fn empty(config: &StorageConfig) -> Self {
        match config.policy {
            StoragePolicy::AlwaysSparse => Storage::Sparse(BTreeMap::new()),
            _ => Storage::Packed {
                slots: Vec::new(),
                present: 0,
            },
        }
    }

    pub(crate) fn from_slots(slots: Vec<Option<T>>) -> Self {
        let present = slots.iter().filter(|s| s.is_some()).count();
        let mut storage = Storage::Packed { slots, present };
        storage.trim();
        storage
    }

    pub(crate) fn kind(&self) -> StorageKind {
        match self {
            Storage::Packed { .. } => StorageKind::Packed,
            Storage::Sparse(_) => StorageKind::Sparse,
        }
    }

    pub(crate) fn present_count(&self) -> usize {
        match self {
            Storage::Packed { present, .. } => *present,
            Storage::Sparse(map) => map.len(),
        }
    }

    pub(crate) fn get(&self, index: u32) -> Option<&T> {
        match self {
            Storage::Packed { slots, .. } => slots.get(index as usize).and_then(Option::as_ref),
            Storage::Sparse(map) => map.get(&index),
        }
    }

    pub(crate) fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        match self {
            Storage::Packed { slots, .. } => {
                slots.get_mut(index as usize).and_then(Option::as_mut)
            }
            Storage::Sparse(map) => map.get_mut(&index),
        }
    }

    /// Writes `value` at `index`, going sparse when the write would open a
    /// gap the config does not allow.
    pub(crate) fn insert(&mut self, index: u32, value: T, config: &StorageConfig) -> Option<T> {
        if let Storage::Packed { slots, .. } = self {
            let end = slots.len() as u64;
            if index as u64 > end && !config.allows_gap(index as u64 - end) {
                self.make_sparse();
            }
        }
        match self {
            Storage::Packed { slots, present } => {
                let i = index as usize;
                if i >= slots.len() {
                    slots.resize_with(i, || None);
                    slots.push(Some(value));
                    *present += 1;
                    None
                } else {
                    let old = slots[i].replace(value);
                    if old.is_none() {
                        *present += 1;
                    }
                    old
                }
            }
            Storage::Sparse(map) => map.insert(index, value),
        }
    }

    pub(crate) fn remove(&mut self, index: u32) -> Option<T> {
        match self {
            Storage::Packed { slots, present } => {
                let old = slots.get_mut(index as usize).and_then(Option::take);
                if old.is_some() {
                    *present -= 1;
                    self.trim();
                }
                old
            }
            Storage::Sparse(map) => map.remove(&index),
        }
    }

    /// Drops every element at `len` or above.
    pub(crate) fn truncate(&mut self, len: u32) {
        match self {
            Storage::Packed { slots, present } => {
                let len = len as usize;
                if len < slots.len() {
                    *present -= slots.drain(len..).filter(Option::is_some).count();
                    self.trim();
                }
            }
            Storage::Sparse(map) => {
                map.split_off(&len);
            }
        }
    }

    /// Removes index 0 and moves every later element down by one.
    pub(crate) fn shift_front(&mut self) -> Option<T> {
        match self {
            Storage::Packed { slots, present } => {
                if slots.is_empty() {
                    return None;
                }
                let first = slots.remove(0);
                if first.is_some() {
                    *present -= 1;
                }
                first
            }
            Storage::Sparse(map) => {
                let first = map.remove(&0);
                *map = mem::take(map)
                    .into_iter()
                    .map(|(k, v)| (k - 1, v))
                    .collect();
                first
            }
        }
    }

    /// Mirrors every element across `[0, len)`.
    pub(crate) fn reverse(&mut self, len: u32, config: &StorageConfig) {
        if let Storage::Packed { slots, .. } = self {
            if !config.allows_gap(len as u64 - slots.len() as u64) {
                self.make_sparse();
            }
        }
        match self {
            Storage::Packed { slots, .. } => {
                slots.resize_with(len as usize, || None);
                slots.reverse();
                self.trim();
            }
            Storage::Sparse(map) => {
                *map = mem::take(map)
                    .into_iter()
                    .map(|(k, v)| (len - 1 - k, v))
                    .collect();
            }
        }
    }

    /// Replaces `[start, start + delete_count)` with `items`, which spans
    /// `items_len` indices, and moves the tail accordingly. Returns the
    /// removed window rebased to index 0.
    pub(crate) fn splice(
        &mut self,
        start: u32,
        delete_count: u32,
        items: Storage<T>,
        items_len: u32,
        config: &StorageConfig,
    ) -> Storage<T> {
        let packed_path = match (&*self, &items) {
            (Storage::Packed { slots, .. }, Storage::Packed { slots: item_slots, .. }) => {
                let lead_gap = (start as u64).saturating_sub(slots.len() as u64);
                let item_gap = items_len as u64 - item_slots.len() as u64;
                config.policy != StoragePolicy::AlwaysSparse
                    && config.allows_gap(lead_gap)
                    && config.allows_gap(item_gap)
            }
            _ => false,
        };

        match items {
            Storage::Packed {
                slots: item_slots,
                present: item_present,
            } if packed_path => {
                self.splice_packed(start, delete_count, item_slots, item_present, items_len)
            }
            items => self.splice_sparse(start, delete_count, items, items_len),
        }
    }

    fn splice_packed(
        &mut self,
        start: u32,
        delete_count: u32,
        mut item_slots: Vec<Option<T>>,
        item_present: usize,
        items_len: u32,
    ) -> Storage<T> {
        let removed = match self {
            Storage::Packed { slots, present } => {
                let end = (start as u64 + delete_count as u64).min(slots.len() as u64) as usize;
                let start = start as usize;
                if start > slots.len() {
                    slots.resize_with(start, || None);
                }
                item_slots.resize_with(items_len as usize, || None);
                let removed: Vec<Option<T>> =
                    slots.splice(start..end.max(start), item_slots).collect();
                let removed = Storage::from_slots(removed);
                *present = *present - removed.present_count() + item_present;
                removed
            }
            Storage::Sparse(_) => unreachable!("packed splice on sparse storage"),
        };
        self.trim();
        removed
    }

    fn splice_sparse(
        &mut self,
        start: u32,
        delete_count: u32,
        items: Storage<T>,
        items_len: u32,
    ) -> Storage<T> {
        self.make_sparse();
        match self {
            Storage::Sparse(map) => {
                let window_end = start as u64 + delete_count as u64;
                let shift = items_len as i64 - delete_count as i64;
                let tail = map.split_off(&start);
                let mut removed = BTreeMap::new();
                for (k, v) in items.into_entries() {
                    map.insert(start + k, v);
                }
                for (k, v) in tail {
                    if (k as u64) < window_end {
                        removed.insert(k - start, v);
                    } else {
                        map.insert((k as i64 + shift) as u32, v);
                    }
                }
                Storage::Sparse(removed)
            }
            Storage::Packed { .. } => unreachable!("storage was just made sparse"),
        }
    }

    /// Re-checks the representation against the config after a mutation.
    pub(crate) fn rebalance(&mut self, config: &StorageConfig) {
        match config.policy {
            StoragePolicy::AlwaysPacked => self.make_packed(),
            StoragePolicy::AlwaysSparse => self.make_sparse(),
            StoragePolicy::Adaptive => match self {
                Storage::Packed { slots, present } => {
                    if slots.len() >= config.sparse_min_length as usize
                        && *present * 4 < slots.len()
                    {
                        self.make_sparse();
                    }
                }
                Storage::Sparse(map) => {
                    // Packing must not materialize more holes than a packed
                    // write is allowed to open.
                    let span = map.keys().next_back().map_or(0, |last| *last as usize + 1);
                    let holes = span - map.len();
                    if map.len() * 2 >= span && holes <= config.max_gap as usize {
                        self.make_packed();
                    }
                }
            },
        }
    }

    pub(crate) fn entries(&self) -> Entries<'_, T> {
        match self {
            Storage::Packed { slots, .. } => Entries::Packed(slots.iter().enumerate()),
            Storage::Sparse(map) => Entries::Sparse(map.iter()),
        }
    }

    pub(crate) fn into_entries(self) -> IntoEntries<T> {
        match self {
            Storage::Packed { slots, .. } => {
                IntoEntries::Packed(slots.into_iter().enumerate())
            }
            Storage::Sparse(map) => IntoEntries::Sparse(map.into_iter()),
        }
    }

    fn make_sparse(&mut self) {
        if let Storage::Packed { slots, .. } = self {
            let map = mem::take(slots)
                .into_iter()
                .enumerate()
                .filter_map(|(i, slot)| slot.map(|v| (i as u32, v)))
                .collect();
            *self = Storage::Sparse(map);
        }
    }

    fn make_packed(&mut self) {
        if let Storage::Sparse(map) = self {
            let span = map.keys().next_back().map_or(0, |last| *last as usize + 1);
            let present = map.len();
            let mut slots = Vec::with_capacity(span);
            for (k, v) in mem::take(map) {
                slots.resize_with(k as usize, || None);
                slots.push(Some(v));
            }
            *self = Storage::Packed { slots, present };
        }
    }

    // Trailing holes are implicit in packed storage.
    fn trim(&mut self) {
        if let Storage::Packed { slots, .. } = self {
            while let Some(None) = slots.last() {
                slots.pop();
            }
        }
    }
}

impl<T: Clone> Storage<T> {
    /// Copies `[lo, hi)` into a new store rebased to index 0.
    pub(crate) fn slice(&self, lo: u32, hi: u32) -> Storage<T> {
        match self {
            Storage::Packed { slots, .. } => {
                let lo = (lo as usize).min(slots.len());
                let hi = (hi as usize).min(slots.len());
                Storage::from_slots(slots[lo..hi].to_vec())
            }
            Storage::Sparse(map) => {
                if lo >= hi {
                    return Storage::Sparse(BTreeMap::new());
                }
                Storage::Sparse(
                    map.range(lo..hi)
                        .map(|(k, v)| (k - lo, v.clone()))
                        .collect(),
                )
            }
        }
    }
}

/// Present elements of a store in ascending index order.
pub enum Entries<'a, T> {
    Packed(Enumerate<slice::Iter<'a, Option<T>>>),
    Sparse(btree_map::Iter<'a, u32, T>),
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (u32, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::Packed(it) => {
                for (i, slot) in it {
                    if let Some(v) = slot {
                        return Some((i as u32, v));
                    }
                }
                None
            }
            Entries::Sparse(it) => it.next().map(|(k, v)| (*k, v)),
        }
    }
}

pub(crate) enum IntoEntries<T> {
    Packed(Enumerate<std::vec::IntoIter<Option<T>>>),
    Sparse(btree_map::IntoIter<u32, T>),
}

impl<T> Iterator for IntoEntries<T> {
    type Item = (u32, T);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            IntoEntries::Packed(it) => {
                for (i, slot) in it {
                    if let Some(v) = slot {
                        return Some((i as u32, v));
                    }
                }
                None
            }
            IntoEntries::Sparse(it) => it.next(),
        }
    }
}
