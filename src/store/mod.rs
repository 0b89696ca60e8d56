mod error;
mod normalize;
mod table;

pub use error::NormalizeError;
pub use normalize::{normalize, weekday_from_token};
pub use table::{DayIndex, RateTable};

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Weekday;

use crate::model::{Price, PriceInterval, TimeOfDay};

/// The current rate table behind an atomically swappable handle.
///
/// Tables are immutable once built, so readers just clone the `Arc` under the
/// read lock and match against that snapshot without further synchronization.
/// `replace` builds nothing under the lock either — the caller hands over a
/// finished table and the writer publishes it with a single pointer store, so
/// a concurrent query sees either the old table or the new one, never a blend.
pub struct RateStore {
    current: RwLock<Arc<RateTable>>,
}

impl RateStore {
    pub fn new(initial: RateTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// Snapshot of the currently installed table.
    pub fn snapshot(&self) -> Arc<RateTable> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Price for a same-day window on `weekday`, open at `start`, closed at
    /// `end`. The caller is responsible for rejecting mis-ordered or cross-day
    /// windows before getting here. `None` means no single unambiguous price
    /// covers the window — a normal outcome, not an error.
    pub fn query(&self, weekday: Weekday, start: TimeOfDay, end: TimeOfDay) -> Option<Price> {
        self.snapshot().day(weekday).price_for(start, end)
    }

    /// Install `table` as the current table in one indivisible step.
    pub fn replace(&self, table: RateTable) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(table);
    }

    /// Current intervals for one weekday, for diagnostics and tests.
    pub fn list_intervals(&self, weekday: Weekday) -> Vec<PriceInterval> {
        self.snapshot().day(weekday).intervals().to_vec()
    }
}
