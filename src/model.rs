use std::cmp::Ordering;
use std::fmt;

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

/// Price in the smallest currency unit — the only money type.
pub type Price = u32;

/// A wall-clock time of day pinned to a fixed UTC offset.
///
/// Not zone-aware: the offset is resolved once when a rate table is built and
/// baked in. Two values compare by their offset-adjusted instant within the
/// day, so `09:00-05:00` and `14:00+00:00` are the same point on the axis.
/// Ties (same instant, different offsets) fall back to the local second count,
/// mirroring how offset times order in the seed format this models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    second_of_day: i32,
    offset_seconds: i32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32, offset: FixedOffset) -> Self {
        Self::from_hms(hour, minute, 0, offset)
    }

    pub fn from_hms(hour: u32, minute: u32, second: u32, offset: FixedOffset) -> Self {
        debug_assert!(hour < 24 && minute < 60 && second < 60, "TimeOfDay out of range");
        Self {
            second_of_day: (hour * 3600 + minute * 60 + second) as i32,
            offset_seconds: offset.local_minus_utc(),
        }
    }

    pub fn second_of_day(&self) -> i32 {
        self.second_of_day
    }

    pub fn offset_seconds(&self) -> i32 {
        self.offset_seconds
    }

    /// Seconds relative to the UTC midnight anchoring this wall-clock day.
    /// This is the comparison axis; it can be negative or exceed 86400 for
    /// offsets far from UTC.
    pub fn instant_of_day(&self) -> i32 {
        self.second_of_day - self.offset_seconds
    }
}

impl Ord for TimeOfDay {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant_of_day()
            .cmp(&other.instant_of_day())
            .then(self.second_of_day.cmp(&other.second_of_day))
    }
}

impl PartialOrd for TimeOfDay {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (sign, off) = if self.offset_seconds < 0 {
            ('-', -self.offset_seconds)
        } else {
            ('+', self.offset_seconds)
        };
        write!(
            f,
            "{:02}:{:02}{}{:02}:{:02}",
            self.second_of_day / 3600,
            self.second_of_day % 3600 / 60,
            sign,
            off / 3600,
            off % 3600 / 60
        )
    }
}

/// A priced time-of-day range, open at both bounds as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceInterval {
    pub lower: TimeOfDay,
    pub upper: TimeOfDay,
    pub price: Price,
}

impl PriceInterval {
    pub fn new(lower: TimeOfDay, upper: TimeOfDay, price: Price) -> Self {
        debug_assert!(lower < upper, "PriceInterval lower must be before upper");
        Self { lower, upper, price }
    }

    /// Open-open overlap with another stored interval.
    pub fn overlaps(&self, other: &PriceInterval) -> bool {
        self.lower.max(other.lower) < self.upper.min(other.upper)
    }

    /// Intersection with a query window that excludes its own lower bound and
    /// includes its upper bound. On a dense time axis both reduce to the same
    /// strict test: a window ending exactly on this interval's upper bound
    /// still touches it, while a window starting exactly on the upper bound
    /// does not reach back into it.
    pub fn intersects_window(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.lower.max(start) < self.upper.min(end)
    }
}

/// One entry of the rates document: a day-set shorthand, an `HHMM-HHMM` time
/// range, an IANA zone name, and a price. Expanded by the normalizer, never
/// stored as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRateSpec {
    pub days: String,
    pub times: String,
    pub tz: String,
    pub price: Price,
}

/// The seed/update document shape: `{ "rates": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateDocument {
    pub rates: Vec<RawRateSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn off(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    #[test]
    fn time_of_day_orders_by_adjusted_instant() {
        // 09:00-05:00 and 14:00+00:00 are the same instant of day.
        let chicago = TimeOfDay::new(9, 0, off(-5));
        let utc = TimeOfDay::new(14, 0, off(0));
        assert_eq!(chicago.instant_of_day(), utc.instant_of_day());
        // Tie broken by local wall-clock seconds.
        assert!(chicago < utc);

        let later = TimeOfDay::new(15, 0, off(0));
        assert!(chicago < later);
        assert!(later > utc);
    }

    #[test]
    fn time_of_day_display() {
        assert_eq!(TimeOfDay::new(9, 30, off(-5)).to_string(), "09:30-05:00");
        assert_eq!(TimeOfDay::new(0, 0, off(0)).to_string(), "00:00+00:00");
    }

    #[test]
    fn interval_overlap_is_open_open() {
        let o = off(0);
        let a = PriceInterval::new(TimeOfDay::new(1, 0, o), TimeOfDay::new(9, 0, o), 1500);
        let b = PriceInterval::new(TimeOfDay::new(9, 0, o), TimeOfDay::new(12, 0, o), 1750);
        let c = PriceInterval::new(TimeOfDay::new(8, 0, o), TimeOfDay::new(10, 0, o), 2000);
        assert!(!a.overlaps(&b)); // adjacent, shared endpoint excluded
        assert!(a.overlaps(&c));
        assert!(b.overlaps(&c));
    }

    #[test]
    fn window_ending_on_upper_bound_matches() {
        let o = off(0);
        let a = PriceInterval::new(TimeOfDay::new(1, 0, o), TimeOfDay::new(9, 0, o), 1500);
        assert!(a.intersects_window(TimeOfDay::new(3, 0, o), TimeOfDay::new(9, 0, o)));
    }

    #[test]
    fn window_starting_on_upper_bound_does_not_reach_back() {
        let o = off(0);
        let a = PriceInterval::new(TimeOfDay::new(1, 0, o), TimeOfDay::new(9, 0, o), 1500);
        assert!(!a.intersects_window(TimeOfDay::new(9, 0, o), TimeOfDay::new(12, 0, o)));
    }

    #[test]
    fn empty_window_matches_nothing() {
        let o = off(0);
        let a = PriceInterval::new(TimeOfDay::new(1, 0, o), TimeOfDay::new(9, 0, o), 1500);
        let t = TimeOfDay::new(3, 0, o);
        assert!(!a.intersects_window(t, t));
    }

    #[test]
    fn rate_document_deserializes() {
        let doc: RateDocument = serde_json::from_str(
            r#"{"rates":[{"days":"mon,tues","times":"0900-2100","tz":"America/Chicago","price":1500}]}"#,
        )
        .unwrap();
        assert_eq!(doc.rates.len(), 1);
        assert_eq!(doc.rates[0].days, "mon,tues");
        assert_eq!(doc.rates[0].price, 1500);
    }
}
