use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{CompletionLog, Habit, HabitStats, Vacation};
use crate::streaks::{CompletionIndex, ConsistencyCalculator, ScheduleSpec, VacationSet};

/// How `longest_streak` is derived from the backward walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongestStreakMode {
    /// Walk back to the creation date and keep the longest run seen.
    #[default]
    FullHistory,
    /// Stop at the first missed due day. The longest streak then equals the
    /// run reaching back from `today`.
    MostRecentRun,
}

impl FromStr for LongestStreakMode {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "full_history" => Ok(Self::FullHistory),
            "most_recent_run" => Ok(Self::MostRecentRun),
            other => Err(AppError::ValidationFailed(format!(
                "unknown longest streak mode '{other}'"
            ))),
        }
    }
}

impl fmt::Display for LongestStreakMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullHistory => f.write_str("full_history"),
            Self::MostRecentRun => f.write_str("most_recent_run"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakPolicy {
    pub consistency_window_days: u32,
    /// Upper bound on days visited by the walk, whatever the creation date.
    pub max_walk_days: u32,
    pub longest_streak_mode: LongestStreakMode,
}

impl Default for StreakPolicy {
    fn default() -> Self {
        Self {
            consistency_window_days: 30,
            max_walk_days: 36_600,
            longest_streak_mode: LongestStreakMode::FullHistory,
        }
    }
}

/// What a single calendar day meant for a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    BeforeCreation,
    Paused,
    NotDue,
    Completed,
    Missed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub status: DayStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct WalkTotals {
    current: u32,
    longest: u32,
}

/// Streak and consistency engine for one habit. Inputs are indexed once at
/// construction; every query is a pure function of them and the dates
/// passed in.
#[derive(Debug, Clone)]
pub struct StreakCalculator {
    habit_id: Uuid,
    created_on: NaiveDate,
    schedule: ScheduleSpec,
    completions: CompletionIndex,
    vacations: VacationSet,
    policy: StreakPolicy,
}

impl StreakCalculator {
    pub fn new(
        habit: &Habit,
        logs: &[CompletionLog],
        vacations: &[Vacation],
        policy: StreakPolicy,
    ) -> AppResult<Self> {
        Ok(Self {
            habit_id: habit.id,
            created_on: habit.created_on,
            schedule: habit.schedule()?,
            completions: CompletionIndex::new(logs),
            vacations: VacationSet::new(vacations),
            policy,
        })
    }

    pub fn habit_id(&self) -> Uuid {
        self.habit_id
    }

    pub fn policy(&self) -> &StreakPolicy {
        &self.policy
    }

    pub fn calculate(&self, today: NaiveDate, updated_at: DateTime<Utc>) -> HabitStats {
        let consistency_score = self.consistency(today);

        if self.completions.is_empty() {
            tracing::debug!(habit_id = %self.habit_id, "No completions, returning empty stats");
            return HabitStats {
                consistency_score,
                ..HabitStats::empty(self.habit_id, updated_at)
            };
        }

        let totals = self.walk(today);
        let stats = HabitStats {
            habit_id: self.habit_id,
            current_streak: totals.current,
            longest_streak: totals.longest,
            total_completions: self.completions.len() as u64,
            last_completed_at: self.completions.last(),
            consistency_score,
            updated_at,
        };

        tracing::debug!(
            habit_id = %self.habit_id,
            today = %today,
            current_streak = stats.current_streak,
            longest_streak = stats.longest_streak,
            total_completions = stats.total_completions,
            consistency_score = stats.consistency_score,
            "Computed habit stats"
        );

        stats
    }

    pub fn consistency(&self, today: NaiveDate) -> f64 {
        ConsistencyCalculator::new(
            &self.schedule,
            self.created_on,
            &self.vacations,
            &self.completions,
        )
        .consistency(today, self.policy.consistency_window_days)
    }

    pub fn is_due(&self, date: NaiveDate) -> bool {
        date >= self.created_on && self.schedule.is_due(date, self.created_on)
    }

    /// Next date, on or after `from`, with an obligation that is not paused.
    pub fn next_due_on_or_after(&self, from: NaiveDate) -> Option<NaiveDate> {
        from.max(self.created_on)
            .iter_days()
            .take(self.policy.max_walk_days as usize)
            .find(|day| {
                !self.vacations.is_paused(*day) && self.schedule.is_due(*day, self.created_on)
            })
    }

    pub fn status_on(&self, date: NaiveDate) -> DayStatus {
        if date < self.created_on {
            DayStatus::BeforeCreation
        } else if self.vacations.is_paused(date) {
            DayStatus::Paused
        } else if !self.schedule.is_due(date, self.created_on) {
            DayStatus::NotDue
        } else if self.completions.contains(date) {
            DayStatus::Completed
        } else {
            DayStatus::Missed
        }
    }

    /// Per-day statuses for `from..=to`, oldest first. Bounded by the walk cap.
    pub fn timeline(&self, from: NaiveDate, to: NaiveDate) -> Vec<DayRecord> {
        from.iter_days()
            .take_while(|day| *day <= to)
            .take(self.policy.max_walk_days as usize)
            .map(|date| DayRecord {
                date,
                status: self.status_on(date),
            })
            .collect()
    }

    /// Walks backward one day at a time from `today`, ending on the first day
    /// that precedes creation. Paused days and days without an obligation
    /// leave every counter alone. The first missed due day ends the current
    /// streak.
    fn walk(&self, today: NaiveDate) -> WalkTotals {
        let mut totals = WalkTotals::default();
        let mut run: u32 = 0;
        let mut live = true;
        let mut day = Some(today);
        let mut steps: u32 = 0;

        while let Some(date) = day {
            if steps == self.policy.max_walk_days {
                tracing::warn!(
                    habit_id = %self.habit_id,
                    created_on = %self.created_on,
                    today = %today,
                    max_walk_days = self.policy.max_walk_days,
                    "Streak walk hit iteration cap"
                );
                break;
            }
            steps += 1;
            day = date.pred_opt();

            if !self.vacations.is_paused(date) && self.schedule.is_due(date, self.created_on) {
                if self.completions.contains(date) {
                    run += 1;
                    if live {
                        totals.current += 1;
                    }
                } else {
                    totals.longest = totals.longest.max(run);
                    run = 0;
                    live = false;
                    if self.policy.longest_streak_mode == LongestStreakMode::MostRecentRun {
                        break;
                    }
                }
            }

            // The first day before creation is still evaluated, then the walk ends.
            if date < self.created_on {
                break;
            }
        }

        totals.longest = totals.longest.max(run);
        totals
    }
}
