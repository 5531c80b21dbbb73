use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{CompletionLog, Habit, HabitStats, Vacation};
use crate::services::repository::HabitRepository;

/// In-process repository for embedding and tests.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    store: Arc<RwLock<Store>>,
}

#[derive(Default)]
struct Store {
    habits: HashMap<Uuid, Habit>,
    logs: HashMap<Uuid, Vec<CompletionLog>>,
    vacations: HashMap<Uuid, Vec<Vacation>>,
    stats: HashMap<Uuid, HabitStats>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_habit(&self, habit: Habit) {
        self.store.write().await.habits.insert(habit.id, habit);
    }

    /// Drops the habit along with its logs, vacations and stats.
    pub async fn remove_habit(&self, habit_id: Uuid) -> bool {
        let mut store = self.store.write().await;
        store.logs.remove(&habit_id);
        store.vacations.remove(&habit_id);
        store.stats.remove(&habit_id);
        store.habits.remove(&habit_id).is_some()
    }
}

impl HabitRepository for InMemoryRepository {
    async fn find_habit(&self, habit_id: Uuid) -> anyhow::Result<Option<Habit>> {
        Ok(self.store.read().await.habits.get(&habit_id).cloned())
    }

    async fn list_logs(&self, habit_id: Uuid) -> anyhow::Result<Vec<CompletionLog>> {
        Ok(self
            .store
            .read()
            .await
            .logs
            .get(&habit_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_vacations(&self, habit_id: Uuid) -> anyhow::Result<Vec<Vacation>> {
        Ok(self
            .store
            .read()
            .await
            .vacations
            .get(&habit_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn insert_log(&self, log: CompletionLog) -> anyhow::Result<()> {
        let mut store = self.store.write().await;
        if !store.habits.contains_key(&log.habit_id) {
            anyhow::bail!("habit {} is not stored", log.habit_id);
        }
        store.logs.entry(log.habit_id).or_default().push(log);
        Ok(())
    }

    async fn delete_log(&self, habit_id: Uuid, log_id: Uuid) -> anyhow::Result<bool> {
        let mut store = self.store.write().await;
        let Some(logs) = store.logs.get_mut(&habit_id) else {
            return Ok(false);
        };
        let before = logs.len();
        logs.retain(|log| log.id != log_id);
        Ok(logs.len() != before)
    }

    async fn save_vacation(&self, vacation: Vacation) -> anyhow::Result<()> {
        let mut store = self.store.write().await;
        let vacations = store.vacations.entry(vacation.habit_id).or_default();
        match vacations.iter().position(|v| v.id == vacation.id) {
            Some(idx) => vacations[idx] = vacation,
            None => vacations.push(vacation),
        }
        Ok(())
    }

    async fn end_vacation(
        &self,
        habit_id: Uuid,
        vacation_id: Uuid,
        end_date: NaiveDate,
    ) -> anyhow::Result<Vacation> {
        let mut store = self.store.write().await;
        let vacation = store
            .vacations
            .get_mut(&habit_id)
            .and_then(|vacations| vacations.iter_mut().find(|v| v.id == vacation_id))
            .ok_or_else(|| AppError::NotFound(format!("Vacation {vacation_id} not found")))?;
        vacation.end(end_date)?;
        Ok(vacation.clone())
    }

    async fn upsert_stats(&self, stats: HabitStats) -> anyhow::Result<()> {
        self.store.write().await.stats.insert(stats.habit_id, stats);
        Ok(())
    }

    async fn find_stats(&self, habit_id: Uuid) -> anyhow::Result<Option<HabitStats>> {
        Ok(self.store.read().await.stats.get(&habit_id).cloned())
    }
}
