use crate::{Price, PricePoint};

use std::{iter::FusedIterator, num::NonZero};

/// Default number of samples kept by a [`PriceHistory`].
pub const DEFAULT_CAPACITY: NonZero<usize> = NonZero::new(60).unwrap();

/// Fixed-capacity, chronologically ordered buffer of [`PricePoint`]s.
///
/// Backed by a ring buffer: once full, every [`push`](Self::push) overwrites
/// the oldest sample and hands it back. Iteration always yields oldest first.
///
/// # Example
///
/// ```
/// use ticker_sim::{PriceHistory, PricePoint};
/// use std::num::NonZero;
///
/// let mut history = PriceHistory::new(NonZero::new(2).unwrap());
/// history.push(PricePoint::new(301.0, 1, true));
/// history.push(PricePoint::new(302.0, 2, true));
/// let evicted = history.push(PricePoint::new(303.0, 3, true));
///
/// assert_eq!(evicted.map(|p| p.price), Some(301.0));
/// let prices: Vec<_> = history.iter().map(|p| p.price).collect();
/// assert_eq!(prices, [302.0, 303.0]);
/// ```
#[derive(Clone, Debug)]
pub struct PriceHistory {
    buffer: Vec<PricePoint>,
    head: usize,
    capacity: usize,
}

impl PriceHistory {
    #[must_use]
    pub fn new(capacity: NonZero<usize>) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity.get()),
            head: 0,
            capacity: capacity.get(),
        }
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.buffer.len() == self.capacity
    }

    /// Appends `point` as the newest sample, returning the evicted oldest
    /// sample once the buffer is full.
    #[inline]
    pub fn push(&mut self, point: PricePoint) -> Option<PricePoint> {
        if self.is_full() {
            let old = std::mem::replace(&mut self.buffer[self.head], point);

            self.head += 1;
            if self.head == self.capacity {
                self.head = 0;
            }

            Some(old)
        } else {
            self.buffer.push(point);

            None
        }
    }

    /// Sample at chronological position `index` (0 = oldest).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PricePoint> {
        if index >= self.len() {
            return None;
        }

        let mut slot = self.head + index;
        if slot >= self.len() {
            slot -= self.len();
        }

        self.buffer.get(slot)
    }

    #[must_use]
    pub fn first(&self) -> Option<&PricePoint> {
        self.get(0)
    }

    /// Newest sample.
    #[must_use]
    pub fn last(&self) -> Option<&PricePoint> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Sample just before the newest one.
    #[must_use]
    pub fn previous(&self) -> Option<&PricePoint> {
        self.len().checked_sub(2).and_then(|i| self.get(i))
    }

    /// Price change between the two newest samples; `0` before there are two.
    #[must_use]
    pub fn change(&self) -> Price {
        match (self.last(), self.previous()) {
            (Some(last), Some(previous)) => last.price - previous.price,
            _ => 0.0,
        }
    }

    /// Lowest and highest price currently held.
    #[must_use]
    pub fn price_range(&self) -> Option<(Price, Price)> {
        self.buffer.iter().fold(None, |acc, point| match acc {
            None => Some((point.price, point.price)),
            Some((min, max)) => Some((min.min(point.price), max.max(point.price))),
        })
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.head = 0;
    }

    /// Iterates samples oldest first.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        let (newer, older) = self.buffer.split_at(self.head);
        Iter {
            older: older.iter(),
            newer: newer.iter(),
        }
    }
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<'a> IntoIterator for &'a PriceHistory {
    type Item = &'a PricePoint;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<&PriceHistory> for Vec<PricePoint> {
    fn from(history: &PriceHistory) -> Self {
        history.iter().copied().collect()
    }
}

/// Chronological iterator over a [`PriceHistory`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    older: std::slice::Iter<'a, PricePoint>,
    newer: std::slice::Iter<'a, PricePoint>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a PricePoint;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.older.next().or_else(|| self.newer.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.older.len() + self.newer.len();
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.newer.next_back().or_else(|| self.older.next_back())
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
