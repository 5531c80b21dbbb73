use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A pause interval during which a habit has no obligations. `end_date` is
/// inclusive; `None` means the vacation is still running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacation {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
}

impl Vacation {
    pub fn new(
        id: Uuid,
        habit_id: Uuid,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        reason: Option<String>,
    ) -> AppResult<Self> {
        if id.is_nil() {
            return Err(AppError::ValidationFailed("vacation id is required".into()));
        }
        if habit_id.is_nil() {
            return Err(AppError::ValidationFailed(
                "vacation habit_id is required".into(),
            ));
        }
        if let Some(end) = end_date {
            check_range(start_date, end)?;
        }
        Ok(Self {
            id,
            habit_id,
            start_date,
            end_date,
            reason,
        })
    }

    /// Starts an open-ended vacation.
    pub fn begin(habit_id: Uuid, start_date: NaiveDate, reason: Option<String>) -> AppResult<Self> {
        Self::new(Uuid::new_v4(), habit_id, start_date, None, reason)
    }

    /// Closes an ongoing vacation. The end date can only be set once.
    pub fn end(&mut self, proposed_end: NaiveDate) -> AppResult<()> {
        if self.end_date.is_some() {
            return Err(AppError::AlreadyEnded);
        }
        check_range(self.start_date, proposed_end)?;
        self.end_date = Some(proposed_end);
        Ok(())
    }

    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.map_or(true, |end| date <= end)
    }
}

fn check_range(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if end < start {
        return Err(AppError::InvalidDateRange(format!(
            "end {end} precedes start {start}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_rejects_nil_ids() {
        let start = date(2026, 3, 1);
        assert!(matches!(
            Vacation::new(Uuid::nil(), Uuid::new_v4(), start, None, None),
            Err(AppError::ValidationFailed(_))
        ));
        assert!(matches!(
            Vacation::new(Uuid::new_v4(), Uuid::nil(), start, None, None),
            Err(AppError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        let result = Vacation::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            date(2026, 3, 10),
            Some(date(2026, 3, 9)),
            None,
        );
        assert!(matches!(result, Err(AppError::InvalidDateRange(_))));
    }

    #[test]
    fn test_end_once() {
        let mut vacation = Vacation::begin(Uuid::new_v4(), date(2026, 3, 1), None).unwrap();
        assert!(vacation.is_ongoing());
        assert!(vacation.covers(date(2030, 1, 1)));

        vacation.end(date(2026, 3, 1)).unwrap();
        assert_eq!(vacation.end_date, Some(date(2026, 3, 1)));
        assert!(vacation.covers(date(2026, 3, 1)));
        assert!(!vacation.covers(date(2026, 3, 2)));

        assert!(matches!(
            vacation.end(date(2026, 3, 5)),
            Err(AppError::AlreadyEnded)
        ));
    }

    #[test]
    fn test_end_before_start_is_rejected_and_leaves_vacation_open() {
        let mut vacation = Vacation::begin(Uuid::new_v4(), date(2026, 3, 10), None).unwrap();
        assert!(matches!(
            vacation.end(date(2026, 3, 9)),
            Err(AppError::InvalidDateRange(_))
        ));
        assert!(vacation.is_ongoing());
    }
}
