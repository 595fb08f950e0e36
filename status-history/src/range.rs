//! Inclusive calendar date ranges
//!
//! A `DateRange` with `to < from` is empty. Iterating a range never builds the
//! list of dates up front.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Inclusive range of calendar days `[from, to]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Create a range. An inverted range is valid and empty.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    pub fn is_empty(&self) -> bool {
        self.to < self.from
    }

    /// True if `date` lies within the range, bounds included
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Number of days in the range (0 when inverted)
    pub fn num_days(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            // Both bounds are valid dates, so the span is small and non-negative
            self.to.signed_duration_since(self.from).num_days() as u64 + 1
        }
    }

    /// Lazily iterate the days of the range in ascending order
    pub fn days(&self) -> Days {
        Days {
            next: self.from,
            last: self.to,
            done: self.is_empty(),
        }
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = Days;

    fn into_iter(self) -> Days {
        self.days()
    }
}

/// Iterator over the days of a [`DateRange`]
///
/// A clone continues from the same position; call [`DateRange::days`]
/// again for a fresh pass.
#[derive(Debug, Clone)]
pub struct Days {
    next: NaiveDate,
    last: NaiveDate,
    done: bool,
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.done {
            return None;
        }
        let current = self.next;
        if current == self.last {
            self.done = true;
        } else {
            match current.succ_opt() {
                Some(next) => self.next = next,
                None => self.done = true,
            }
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Days {
    fn next_back(&mut self) -> Option<NaiveDate> {
        if self.done {
            return None;
        }
        let current = self.last;
        if current == self.next {
            self.done = true;
        } else {
            match current.pred_opt() {
                Some(prev) => self.last = prev,
                None => self.done = true,
            }
        }
        Some(current)
    }
}

impl ExactSizeIterator for Days {
    fn len(&self) -> usize {
        if self.done {
            0
        } else {
            self.last.signed_duration_since(self.next).num_days() as usize + 1
        }
    }
}

impl FusedIterator for Days {}
