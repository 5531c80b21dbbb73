use chrono::{DateTime, NaiveDate, Utc};
use futures_util::future::join_all;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{CompletionLog, Habit, HabitStats, Vacation};
use crate::services::repository::HabitRepository;
use crate::streaks::{StreakCalculator, StreakPolicy};

/// Gathers a habit's data, runs the streak engine and upserts the result.
/// Stats are always recomputed from the full history, never patched.
pub struct StatsService<R> {
    repo: R,
    policy: StreakPolicy,
}

impl<R: HabitRepository> StatsService<R> {
    pub fn new(repo: R, policy: StreakPolicy) -> Self {
        Self { repo, policy }
    }

    pub fn from_config(repo: R, config: &Config) -> Self {
        Self::new(repo, config.streak_policy())
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Recomputes using the current wall clock; `today` is its UTC date.
    pub async fn recompute(&self, habit_id: Uuid) -> AppResult<HabitStats> {
        self.recompute_at(habit_id, Utc::now()).await
    }

    pub async fn recompute_at(&self, habit_id: Uuid, now: DateTime<Utc>) -> AppResult<HabitStats> {
        let habit = self.load_habit(habit_id).await?;

        let (logs, vacations) = tokio::try_join!(
            self.repo.list_logs(habit_id),
            self.repo.list_vacations(habit_id),
        )
        .map_err(upstream(habit_id, "fetch habit history"))?;

        let stats = StreakCalculator::new(&habit, &logs, &vacations, self.policy)?
            .calculate(now.date_naive(), now);

        self.repo
            .upsert_stats(stats.clone())
            .await
            .map_err(upstream(habit_id, "upsert stats"))?;

        tracing::info!(
            habit_id = %habit_id,
            logs = logs.len(),
            vacations = vacations.len(),
            current_streak = stats.current_streak,
            longest_streak = stats.longest_streak,
            consistency_score = stats.consistency_score,
            "Habit stats recomputed"
        );

        Ok(stats)
    }

    /// Recomputes several habits concurrently. Each habit is independent, so
    /// one failure does not affect the others.
    pub async fn recompute_many(
        &self,
        habit_ids: &[Uuid],
        now: DateTime<Utc>,
    ) -> Vec<(Uuid, AppResult<HabitStats>)> {
        let results = join_all(habit_ids.iter().map(|id| self.recompute_at(*id, now))).await;

        habit_ids
            .iter()
            .copied()
            .zip(results)
            .inspect(|(habit_id, result)| {
                if let Err(e) = result {
                    tracing::warn!(habit_id = %habit_id, error = %e, "Recompute failed");
                }
            })
            .collect()
    }

    pub async fn log_completion(
        &self,
        log: CompletionLog,
        now: DateTime<Utc>,
    ) -> AppResult<HabitStats> {
        log.validate()?;
        let habit_id = log.habit_id;
        self.load_habit(habit_id).await?;

        self.repo
            .insert_log(log)
            .await
            .map_err(upstream(habit_id, "insert log"))?;

        self.recompute_at(habit_id, now).await
    }

    /// Idempotent: deleting an unknown log still refreshes the stats.
    pub async fn delete_completion(
        &self,
        habit_id: Uuid,
        log_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<HabitStats> {
        let deleted = self
            .repo
            .delete_log(habit_id, log_id)
            .await
            .map_err(upstream(habit_id, "delete log"))?;

        if !deleted {
            tracing::debug!(habit_id = %habit_id, log_id = %log_id, "Log already gone");
        }

        self.recompute_at(habit_id, now).await
    }

    pub async fn start_vacation(
        &self,
        habit_id: Uuid,
        start_date: NaiveDate,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> AppResult<(Vacation, HabitStats)> {
        self.load_habit(habit_id).await?;
        let vacation = Vacation::begin(habit_id, start_date, reason)?;

        self.repo
            .save_vacation(vacation.clone())
            .await
            .map_err(upstream(habit_id, "save vacation"))?;

        tracing::info!(
            habit_id = %habit_id,
            vacation_id = %vacation.id,
            start = %start_date,
            "Vacation started"
        );

        let stats = self.recompute_at(habit_id, now).await?;
        Ok((vacation, stats))
    }

    pub async fn end_vacation(
        &self,
        habit_id: Uuid,
        vacation_id: Uuid,
        end_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<(Vacation, HabitStats)> {
        let vacation = self
            .repo
            .end_vacation(habit_id, vacation_id, end_date)
            .await
            .map_err(|e| match e.downcast::<AppError>() {
                Ok(domain) => domain,
                Err(e) => upstream(habit_id, "end vacation")(e),
            })?;

        tracing::info!(
            habit_id = %habit_id,
            vacation_id = %vacation_id,
            end = %end_date,
            "Vacation ended"
        );

        let stats = self.recompute_at(habit_id, now).await?;
        Ok((vacation, stats))
    }

    async fn load_habit(&self, habit_id: Uuid) -> AppResult<Habit> {
        self.repo
            .find_habit(habit_id)
            .await
            .map_err(upstream(habit_id, "fetch habit"))?
            .ok_or_else(|| AppError::NotFound(format!("Habit {habit_id} not found")))
    }
}

fn upstream(habit_id: Uuid, operation: &'static str) -> impl FnOnce(anyhow::Error) -> AppError {
    move |e| {
        tracing::error!(habit_id = %habit_id, operation, error = %e, "Repository error");
        AppError::Internal(e.context(operation))
    }
}
