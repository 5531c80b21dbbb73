use chrono::NaiveDate;

use crate::models::Vacation;

/// Pause intervals for one habit, merged into sorted disjoint inclusive
/// ranges so membership is a binary search instead of a scan per day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VacationSet {
    ranges: Vec<(NaiveDate, NaiveDate)>,
}

impl VacationSet {
    pub fn new(vacations: &[Vacation]) -> Self {
        let mut ranges: Vec<(NaiveDate, NaiveDate)> = vacations
            .iter()
            .filter_map(|v| {
                let end = v.end_date.unwrap_or(NaiveDate::MAX);
                if end < v.start_date {
                    tracing::warn!(
                        vacation_id = %v.id,
                        habit_id = %v.habit_id,
                        start = %v.start_date,
                        end = %end,
                        "Ignoring vacation that ends before it starts"
                    );
                    return None;
                }
                Some((v.start_date, end))
            })
            .collect();
        ranges.sort_unstable();

        let mut merged: Vec<(NaiveDate, NaiveDate)> = Vec::with_capacity(ranges.len());
        for (start, end) in ranges {
            match merged.last_mut() {
                Some(last) if last.1.succ_opt().map_or(true, |next| start <= next) => {
                    last.1 = last.1.max(end);
                }
                _ => merged.push((start, end)),
            }
        }

        Self { ranges: merged }
    }

    pub fn is_paused(&self, date: NaiveDate) -> bool {
        let idx = self.ranges.partition_point(|(start, _)| *start <= date);
        idx > 0 && self.ranges[idx - 1].1 >= date
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Merged ranges, earliest first. Ongoing vacations end at `NaiveDate::MAX`.
    pub fn ranges(&self) -> &[(NaiveDate, NaiveDate)] {
        &self.ranges
    }
}
