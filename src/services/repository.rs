use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{CompletionLog, Habit, HabitStats, Vacation};

/// Source of habit data and sink for computed stats. Failures are opaque to
/// the engine and surface as `AppError::Internal`.
pub trait HabitRepository: Send + Sync {
    fn find_habit(
        &self,
        habit_id: Uuid,
    ) -> impl Future<Output = anyhow::Result<Option<Habit>>> + Send;

    fn list_logs(
        &self,
        habit_id: Uuid,
    ) -> impl Future<Output = anyhow::Result<Vec<CompletionLog>>> + Send;

    fn list_vacations(
        &self,
        habit_id: Uuid,
    ) -> impl Future<Output = anyhow::Result<Vec<Vacation>>> + Send;

    fn insert_log(&self, log: CompletionLog) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Returns `false` when no such log existed.
    fn delete_log(
        &self,
        habit_id: Uuid,
        log_id: Uuid,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;

    /// Inserts or replaces by vacation id.
    fn save_vacation(&self, vacation: Vacation) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Sets the end date of a stored vacation as one atomic step, so two
    /// callers can never both end the same vacation. Domain failures
    /// (`NotFound`, `AlreadyEnded`, `InvalidDateRange`) travel as an
    /// `AppError` inside the returned error.
    fn end_vacation(
        &self,
        habit_id: Uuid,
        vacation_id: Uuid,
        end_date: NaiveDate,
    ) -> impl Future<Output = anyhow::Result<Vacation>> + Send;

    /// Inserts or replaces by habit id.
    fn upsert_stats(&self, stats: HabitStats) -> impl Future<Output = anyhow::Result<()>> + Send;

    fn find_stats(
        &self,
        habit_id: Uuid,
    ) -> impl Future<Output = anyhow::Result<Option<HabitStats>>> + Send;
}
