//! Daily model-call ceiling.
//!
//! The count resets when the local calendar date changes. Admission and the
//! increment happen under one lock, so two concurrent callers can never both
//! take the last slot.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;

/// Source of "today" for quota accounting.
pub trait Calendar: Send + Sync + fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// The machine's local calendar.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalCalendar;

impl Calendar for LocalCalendar {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// A calendar that only moves when told to.
#[derive(Debug)]
pub struct ManualCalendar {
    date: Mutex<NaiveDate>,
}

impl ManualCalendar {
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date: Mutex::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        *self.date.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = date;
    }
}

impl Calendar for ManualCalendar {
    fn today(&self) -> NaiveDate {
        *self.date.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Point-in-time view of quota usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaSnapshot {
    pub date: NaiveDate,
    pub used: u32,
    pub remaining: u32,
    pub daily_limit: u32,
}

impl QuotaSnapshot {
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

#[derive(Debug)]
struct QuotaState {
    date: NaiveDate,
    used: u32,
}

/// Counts admitted model calls per calendar day.
#[derive(Debug)]
pub struct QuotaTracker {
    daily_limit: u32,
    calendar: Arc<dyn Calendar>,
    state: Mutex<QuotaState>,
}

impl QuotaTracker {
    #[must_use]
    pub fn new(daily_limit: u32, calendar: Arc<dyn Calendar>) -> Self {
        let date = calendar.today();
        Self {
            daily_limit,
            calendar,
            state: Mutex::new(QuotaState { date, used: 0 }),
        }
    }

    #[must_use]
    pub const fn daily_limit(&self) -> u32 {
        self.daily_limit
    }

    /// Take one slot from today's budget.
    ///
    /// Returns `false` without counting anything once the ceiling is reached.
    pub fn admit(&self) -> bool {
        let mut state = self.current();
        if state.used >= self.daily_limit {
            return false;
        }
        state.used += 1;
        true
    }

    /// Usage for today, without taking a slot.
    pub fn snapshot(&self) -> QuotaSnapshot {
        let state = self.current();
        QuotaSnapshot {
            date: state.date,
            used: state.used,
            remaining: self.daily_limit.saturating_sub(state.used),
            daily_limit: self.daily_limit,
        }
    }

    /// Lock the state, resetting the count if the day has changed.
    fn current(&self) -> MutexGuard<'_, QuotaState> {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let today = self.calendar.today();
        if state.date != today {
            tracing::info!(previous = %state.date, %today, "quota day rolled over");
            state.date = today;
            state.used = 0;
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn admits_up_to_the_ceiling() {
        let quota = QuotaTracker::new(3, Arc::new(ManualCalendar::new(day(1))));
        assert!(quota.admit());
        assert!(quota.admit());
        assert!(quota.admit());
        assert!(!quota.admit());
        assert_eq!(quota.snapshot().used, 3);
        assert!(quota.snapshot().is_exhausted());
    }

    #[test]
    fn day_change_resets_before_admitting() {
        let calendar = Arc::new(ManualCalendar::new(day(1)));
        let quota = QuotaTracker::new(1, calendar.clone());
        assert!(quota.admit());
        assert!(!quota.admit());

        calendar.set(day(2));
        assert!(quota.admit());
        let snapshot = quota.snapshot();
        assert_eq!(snapshot.date, day(2));
        assert_eq!(snapshot.used, 1);
    }

    #[test]
    fn snapshot_does_not_consume() {
        let quota = QuotaTracker::new(950, Arc::new(ManualCalendar::new(day(1))));
        quota.admit();
        let first = quota.snapshot();
        let second = quota.snapshot();
        assert_eq!(first, second);
        assert_eq!(
            first,
            QuotaSnapshot {
                date: day(1),
                used: 1,
                remaining: 949,
                daily_limit: 950,
            }
        );
    }

    #[test]
    fn snapshot_after_rollover_reports_fresh_day() {
        let calendar = Arc::new(ManualCalendar::new(day(1)));
        let quota = QuotaTracker::new(5, calendar.clone());
        quota.admit();
        calendar.set(day(2));
        assert_eq!(quota.snapshot().used, 0);
        assert_eq!(quota.snapshot().remaining, 5);
    }

    #[test]
    fn concurrent_admits_never_exceed_ceiling() {
        let quota = Arc::new(QuotaTracker::new(50, Arc::new(ManualCalendar::new(day(1)))));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let quota = Arc::clone(&quota);
                std::thread::spawn(move || (0..20).filter(|_| quota.admit()).count())
            })
            .collect();
        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(admitted, 50);
        assert_eq!(quota.snapshot().used, 50);
    }
}
