//! Bulk mutation: splice, shift/unshift, push/pop, slice, concat, reverse.
//!
//! Every fallible operation computes and validates the resulting length
//! before it touches storage.

use super::Sequence;
use crate::runner::ds::error::SeqError;
use crate::runner::ds::operations::relative_index::{
    clamp_delete_count, compute_new_length, relative_end, relative_start, MAX_LENGTH,
};
use crate::runner::ds::storage::Storage;

/// One argument to [`Sequence::concat`].
pub enum ConcatArg<'a, T> {
    /// Appends every slot of the sequence, holes included.
    Spread(&'a Sequence<T>),
    /// Appends a single present value.
    Value(T),
}

impl<T> Sequence<T> {
    /// Removes `delete_count` elements starting at `start` and inserts
    /// `items` in their place. Returns the removed run as a new sequence
    /// whose length is the number of indices removed; holes stay holes.
    ///
    /// `start` is relative to the end when negative and clamped to
    /// `[0, len()]`. A missing `delete_count` removes through the end; a
    /// negative one removes nothing. A missing `start` removes nothing.
    pub fn splice(
        &mut self,
        start: Option<f64>,
        delete_count: Option<f64>,
        items: Vec<T>,
    ) -> Result<Sequence<T>, SeqError> {
        let (actual_start, actual_delete) = self.splice_window(start, delete_count);
        compute_new_length(self.length, actual_delete, items.len() as u64)?;
        let items = Sequence::from_values_with_config(items, self.config);
        self.splice_sequence(Some(actual_start as f64), Some(actual_delete as f64), items)
    }

    /// [`splice`](Self::splice) with a hole-preserving replacement run.
    ///
    /// Feeding the result of `splice(start, n, [])` back in with
    /// `splice_sequence(start, 0, removed)` restores the original exactly.
    pub fn splice_sequence(
        &mut self,
        start: Option<f64>,
        delete_count: Option<f64>,
        items: Sequence<T>,
    ) -> Result<Sequence<T>, SeqError> {
        let (actual_start, actual_delete) = self.splice_window(start, delete_count);
        let new_length = compute_new_length(self.length, actual_delete, items.length as u64)?;

        let removed = self.storage.splice(
            actual_start,
            actual_delete,
            items.storage,
            items.length,
            &self.config,
        );
        self.length = new_length;
        self.rebalance();

        let mut removed = Sequence {
            length: actual_delete,
            storage: removed,
            config: self.config,
        };
        removed.rebalance();
        Ok(removed)
    }

    fn splice_window(&self, start: Option<f64>, delete_count: Option<f64>) -> (u32, u32) {
        match start {
            Some(start) => {
                let start = relative_start(start, self.length);
                (start, clamp_delete_count(delete_count, start, self.length))
            }
            None => match delete_count {
                Some(_) => (0, clamp_delete_count(delete_count, 0, self.length)),
                None => (0, 0),
            },
        }
    }

    /// Removes and returns index 0, moving everything else down by one.
    ///
    /// Returns `None` both for an empty sequence and for a hole at index 0;
    /// only the latter changes `len()`.
    pub fn shift(&mut self) -> Option<T> {
        if self.length == 0 {
            return None;
        }
        let first = self.storage.shift_front();
        self.length -= 1;
        self.rebalance();
        first
    }

    /// Inserts `items` at the front. Returns the new length.
    pub fn unshift(&mut self, items: Vec<T>) -> Result<u32, SeqError> {
        if !items.is_empty() {
            self.splice(Some(0.0), Some(0.0), items)?;
        }
        Ok(self.length)
    }

    /// Appends `value` at index `len()`. Returns the new length.
    pub fn push(&mut self, value: T) -> Result<u32, SeqError> {
        self.set(self.length, value)?;
        Ok(self.length)
    }

    /// Removes the element at `len() - 1` and shrinks by one.
    pub fn pop(&mut self) -> Option<T> {
        if self.length == 0 {
            return None;
        }
        let last = self.length - 1;
        let value = self.storage.remove(last);
        self.length = last;
        self.rebalance();
        value
    }

    /// Reverses index order in place; holes are mirrored like values.
    pub fn reverse(&mut self) {
        if self.length > 1 {
            self.storage.reverse(self.length, &self.config);
            self.rebalance();
        }
    }
}

impl<T: Clone> Sequence<T> {
    /// Copies `[start, end)` into a new sequence. Both bounds are relative to
    /// the end when negative; a missing `start` is 0 and a missing `end` is
    /// `len()`.
    pub fn slice(&self, start: Option<f64>, end: Option<f64>) -> Sequence<T> {
        let lo = start.map_or(0, |s| relative_start(s, self.length));
        let hi = relative_end(end, self.length);
        let count = hi.saturating_sub(lo);
        let storage = if count == 0 {
            Storage::empty(&self.config)
        } else {
            self.storage.slice(lo, hi)
        };
        let mut out = Sequence {
            length: count,
            storage,
            config: self.config,
        };
        out.rebalance();
        out
    }

    /// A new sequence holding this one followed by each argument in order.
    pub fn concat(&self, args: Vec<ConcatArg<'_, T>>) -> Result<Sequence<T>, SeqError> {
        let mut out = self.clone();
        for arg in args {
            match arg {
                ConcatArg::Spread(other) => out.append(other)?,
                ConcatArg::Value(value) => {
                    out.push(value)?;
                }
            }
        }
        Ok(out)
    }

    /// Appends every slot of `other`, holes included.
    pub fn append(&mut self, other: &Sequence<T>) -> Result<(), SeqError> {
        let base = self.length;
        let requested = base as u64 + other.length as u64;
        if requested > MAX_LENGTH as u64 {
            return Err(SeqError::LengthOverflow { requested });
        }
        for (i, value) in other.entries() {
            self.storage.insert(base + i, value.clone(), &self.config);
        }
        self.length = requested as u32;
        self.rebalance();
        Ok(())
    }
}
