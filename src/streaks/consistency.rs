use chrono::NaiveDate;

use crate::streaks::{CompletionIndex, ScheduleSpec, VacationSet};

/// Due and completed counts over a trailing window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsistencyWindow {
    pub expected: u32,
    pub completed: u32,
}

impl ConsistencyWindow {
    /// Percentage in `[0, 100]`. A window with nothing due scores 100.
    pub fn score(&self) -> f64 {
        if self.expected == 0 {
            return 100.0;
        }
        f64::from(self.completed) / f64::from(self.expected) * 100.0
    }
}

pub struct ConsistencyCalculator<'a> {
    schedule: &'a ScheduleSpec,
    created_on: NaiveDate,
    vacations: &'a VacationSet,
    completions: &'a CompletionIndex,
}

impl<'a> ConsistencyCalculator<'a> {
    pub fn new(
        schedule: &'a ScheduleSpec,
        created_on: NaiveDate,
        vacations: &'a VacationSet,
        completions: &'a CompletionIndex,
    ) -> Self {
        Self {
            schedule,
            created_on,
            vacations,
            completions,
        }
    }

    /// Counts the `window_days` days ending at `today`, skipping days before
    /// creation and paused days.
    pub fn window(&self, today: NaiveDate, window_days: u32) -> ConsistencyWindow {
        let mut window = ConsistencyWindow::default();
        let mut day = Some(today);

        for _ in 0..window_days {
            let Some(date) = day else { break };
            day = date.pred_opt();

            if date < self.created_on || self.vacations.is_paused(date) {
                continue;
            }
            if self.schedule.is_due(date, self.created_on) {
                window.expected += 1;
                if self.completions.contains(date) {
                    window.completed += 1;
                }
            }
        }

        window
    }

    pub fn consistency(&self, today: NaiveDate, window_days: u32) -> f64 {
        self.window(today, window_days).score()
    }
}
