use super::Sequence;

/// Walks every index of a [`Sequence`], yielding `(index, Option<&T>)`.
///
/// Created by [`Sequence::iter`]. Each call to `iter()` starts over and sees
/// the sequence as it is at that moment.
pub struct Iter<'a, T> {
    seq: &'a Sequence<T>,
    front: u64,
    back: u64,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(seq: &'a Sequence<T>) -> Self {
        Iter {
            seq,
            front: 0,
            back: seq.len() as u64,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (u32, Option<&'a T>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let index = self.front as u32;
        self.front += 1;
        Some((index, self.seq.get(index)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.back - self.front) as usize;
        (remaining, Some(remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        let index = self.back as u32;
        Some((index, self.seq.get(index)))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
