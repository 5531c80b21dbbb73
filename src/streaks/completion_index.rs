use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::CompletionLog;

/// Distinct calendar dates on which at least one completion was logged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionIndex {
    dates: BTreeSet<NaiveDate>,
}

impl CompletionIndex {
    pub fn new(logs: &[CompletionLog]) -> Self {
        Self {
            dates: logs.iter().map(|log| log.log_date).collect(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Number of distinct completed dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

impl FromIterator<NaiveDate> for CompletionIndex {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn log_on(date: NaiveDate, count: i32) -> CompletionLog {
        CompletionLog {
            count,
            ..CompletionLog::new(Uuid::new_v4(), Uuid::new_v4(), date)
        }
    }

    #[test]
    fn test_duplicate_dates_collapse() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let index = CompletionIndex::new(&[log_on(day, 1), log_on(day, 4)]);
        assert_eq!(index.len(), 1);
        assert!(index.contains(day));
    }

    #[test]
    fn test_first_and_last() {
        let a = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let b = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let index = CompletionIndex::new(&[log_on(b, 1), log_on(a, 1)]);
        assert_eq!(index.first(), Some(a));
        assert_eq!(index.last(), Some(b));
        assert!(CompletionIndex::default().last().is_none());
    }
}
