use chrono::Weekday;

use crate::model::{Price, PriceInterval, TimeOfDay};

/// One weekday's intervals, sorted by lower bound and non-overlapping at every
/// observable instant. Non-overlap is maintained by construction: each insert
/// carves away the portion of existing intervals it covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayIndex {
    intervals: Vec<PriceInterval>,
}

impl DayIndex {
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn intervals(&self) -> &[PriceInterval] {
        &self.intervals
    }

    /// Insert an interval, overwriting whatever portion of existing intervals
    /// it overlaps (last write wins). An existing interval straddling the new
    /// one is split; its remnants keep their original price.
    pub fn insert(&mut self, interval: PriceInterval) {
        let mut next = Vec::with_capacity(self.intervals.len() + 1);
        for existing in self.intervals.drain(..) {
            if !existing.overlaps(&interval) {
                next.push(existing);
                continue;
            }
            if existing.lower < interval.lower {
                next.push(PriceInterval::new(existing.lower, interval.lower, existing.price));
            }
            if interval.upper < existing.upper {
                next.push(PriceInterval::new(interval.upper, existing.upper, existing.price));
            }
        }
        // Carving preserves order, so a binary search finds the slot.
        let pos = next.partition_point(|i| i.lower < interval.lower);
        next.insert(pos, interval);
        self.intervals = next;
    }

    /// Intervals intersecting the open-lower/closed-upper query window.
    /// Binary search skips everything starting at or after `end`.
    pub fn matching(&self, start: TimeOfDay, end: TimeOfDay) -> impl Iterator<Item = &PriceInterval> {
        let right_bound = self.intervals.partition_point(|i| i.lower < end);
        self.intervals[..right_bound]
            .iter()
            .filter(move |i| i.intersects_window(start, end))
    }

    /// The window's price, if exactly one interval intersects it. Zero hits or
    /// a window straddling a price boundary both come back as `None` — the
    /// store reports ambiguity rather than resolving it.
    pub fn price_for(&self, start: TimeOfDay, end: TimeOfDay) -> Option<Price> {
        let mut hits = self.matching(start, end);
        let first = hits.next()?;
        if hits.next().is_some() {
            return None;
        }
        Some(first.price)
    }
}

/// The full seven-weekday index. Built once by the normalizer, then immutable;
/// replacement swaps in a whole new table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    days: [DayIndex; 7],
}

impl RateTable {
    pub fn insert(&mut self, weekday: Weekday, interval: PriceInterval) {
        self.days[weekday.num_days_from_monday() as usize].insert(interval);
    }

    pub fn day(&self, weekday: Weekday) -> &DayIndex {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(DayIndex::is_empty)
    }
}
