use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Frequency, Recurrence};

/// Decides whether a calendar date carries an obligation for a habit.
///
/// The weekday mask filters first. An empty mask places no weekday
/// restriction. The interval then counts whole periods elapsed since the
/// creation date:
/// - daily: days since creation
/// - weekly: Monday-aligned calendar weeks since the creation week, so
///   intervals keep their phase across year boundaries
/// - monthly: calendar months since the creation month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSpec {
    pub frequency: Frequency,
    pub recurrence: Recurrence,
}

impl ScheduleSpec {
    pub fn new(frequency: Frequency, recurrence: Recurrence) -> Self {
        Self {
            frequency,
            recurrence,
        }
    }

    pub fn is_due(&self, date: NaiveDate, created_on: NaiveDate) -> bool {
        let days = self.recurrence.days();
        if !days.is_empty() && !days.contains(date.weekday()) {
            return false;
        }

        let interval = i64::from(self.recurrence.interval());
        if interval <= 1 {
            return true;
        }

        let elapsed = match self.frequency {
            Frequency::Daily => (date - created_on).num_days(),
            Frequency::Weekly => weeks_between(created_on, date),
            Frequency::Monthly => months_between(created_on, date),
        };
        elapsed.rem_euclid(interval) == 0
    }

    /// First due date in `[from, from + horizon_days)`, if any.
    pub fn next_due_on_or_after(
        &self,
        from: NaiveDate,
        created_on: NaiveDate,
        horizon_days: u32,
    ) -> Option<NaiveDate> {
        let start = from.max(created_on);
        start
            .iter_days()
            .take(horizon_days as usize)
            .find(|day| self.is_due(*day, created_on))
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn weeks_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (week_start(to) - week_start(from)).num_days().div_euclid(7)
}

fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.year() - from.year()) * 12 + i64::from(to.month()) - i64::from(from.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayMask;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn spec(frequency: Frequency, days: DayMask, interval: u32) -> ScheduleSpec {
        ScheduleSpec::new(frequency, Recurrence::with_days(days, interval).unwrap())
    }

    #[test]
    fn test_unrestricted_daily_is_always_due() {
        let created = date(2026, 1, 1);
        let schedule = spec(Frequency::Daily, DayMask::ALL, 1);
        for day in date(2025, 12, 1).iter_days().take(800) {
            assert!(schedule.is_due(day, created), "{day} should be due");
        }
    }

    #[test]
    fn test_every_third_day() {
        let created = date(2026, 1, 1);
        let schedule = spec(Frequency::Daily, DayMask::ALL, 3);
        for offset in 0..30 {
            let day = created + Duration::days(offset);
            assert_eq!(schedule.is_due(day, created), offset % 3 == 0, "offset {offset}");
        }
    }

    #[test]
    fn test_weekly_monday_friday() {
        let created = date(2026, 1, 1); // Thursday
        let schedule = spec(Frequency::Weekly, DayMask::MONDAY | DayMask::FRIDAY, 1);
        assert!(schedule.is_due(date(2026, 1, 5), created));
        assert!(schedule.is_due(date(2026, 1, 9), created));
        assert!(!schedule.is_due(date(2026, 1, 6), created));
        assert!(!schedule.is_due(date(2026, 1, 10), created));
    }

    #[test]
    fn test_biweekly_keeps_phase_across_year_boundary() {
        // Creation week starts Monday 2025-12-15; every other Monday after
        // that lands on 2025-12-29, 2026-01-12, 2026-01-26.
        let created = date(2025, 12, 17);
        let schedule = spec(Frequency::Weekly, DayMask::MONDAY, 2);
        assert!(!schedule.is_due(date(2025, 12, 22), created));
        assert!(schedule.is_due(date(2025, 12, 29), created));
        assert!(!schedule.is_due(date(2026, 1, 5), created));
        assert!(schedule.is_due(date(2026, 1, 12), created));
        assert!(schedule.is_due(date(2026, 1, 26), created));
    }

    #[test]
    fn test_every_other_month() {
        let created = date(2025, 11, 20);
        let schedule = spec(Frequency::Monthly, DayMask::ALL, 2);
        assert!(schedule.is_due(date(2025, 11, 3), created));
        assert!(!schedule.is_due(date(2025, 12, 3), created));
        assert!(schedule.is_due(date(2026, 1, 31), created));
        assert!(!schedule.is_due(date(2026, 2, 1), created));
    }

    #[test]
    fn test_empty_mask_places_no_weekday_restriction() {
        let created = date(2026, 1, 1);
        let schedule = spec(Frequency::Daily, DayMask::NONE, 1);
        for day in created.iter_days().take(14) {
            assert!(schedule.is_due(day, created));
        }
    }

    #[test]
    fn test_interval_before_creation_uses_euclidean_phase() {
        let created = date(2026, 1, 10);
        let schedule = spec(Frequency::Daily, DayMask::ALL, 3);
        assert!(schedule.is_due(date(2026, 1, 7), created));
        assert!(!schedule.is_due(date(2026, 1, 8), created));
    }

    #[test]
    fn test_next_due() {
        let created = date(2026, 1, 1);
        let schedule = spec(Frequency::Weekly, DayMask::SATURDAY, 1);
        assert_eq!(
            schedule.next_due_on_or_after(date(2026, 1, 5), created, 14),
            Some(date(2026, 1, 10))
        );
        assert_eq!(schedule.next_due_on_or_after(date(2026, 1, 5), created, 3), None);
        // Never earlier than creation.
        assert_eq!(
            schedule.next_due_on_or_after(date(2025, 1, 1), created, 30),
            Some(date(2026, 1, 3))
        );
    }
}
