use std::iter::FusedIterator;

use crate::unit_id::UnitId;

/// An iterator over the ids of a [`UnitIdRange`](super::UnitIdRange).
///
/// Each id is computed from the range start by whole-unit offsets, so month
/// clamping never accumulates.
#[derive(Debug, Clone)]
pub struct Ids {
    first: UnitId,
    front: u64,
    back: u64,
}

impl Ids {
    pub(crate) fn new(first: UnitId, length: u64) -> Self {
        Self {
            first,
            front: 0,
            back: length,
        }
    }

    fn nth_id(&self, offset: u64) -> Option<UnitId> {
        self.first.add(i64::try_from(offset).ok()?).ok()
    }

    fn remaining(&self) -> u64 {
        self.back - self.front
    }
}

impl Iterator for Ids {
    type Item = UnitId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let id = self.nth_id(self.front);
            self.front += 1;
            id
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let skip = u64::try_from(n).unwrap_or(u64::MAX);
        self.front = self.front.saturating_add(skip).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for Ids {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            self.nth_id(self.back)
        } else {
            None
        }
    }
}

impl ExactSizeIterator for Ids {}

impl FusedIterator for Ids {}
