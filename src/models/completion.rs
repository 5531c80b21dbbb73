use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::habit::not_nil;

/// A completion recorded against a habit. Several logs may share a date; any
/// one of them marks the date as completed.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompletionLog {
    #[validate(custom = "not_nil")]
    pub id: Uuid,
    #[validate(custom = "not_nil")]
    pub habit_id: Uuid,
    pub user_id: Uuid,
    pub log_date: NaiveDate,
    #[validate(range(min = 1, message = "count must be at least 1"))]
    pub count: i32,
    pub note: Option<String>,
}

impl CompletionLog {
    pub fn new(habit_id: Uuid, user_id: Uuid, log_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            habit_id,
            user_id,
            log_date,
            count: 1,
            note: None,
        }
    }
}

/// Derived statistics for one habit. Recomputed from scratch after every log
/// mutation and upserted by habit id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitStats {
    pub habit_id: Uuid,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completions: u64,
    pub last_completed_at: Option<NaiveDate>,
    pub consistency_score: f64,
    pub updated_at: DateTime<Utc>,
}

impl HabitStats {
    pub fn empty(habit_id: Uuid, updated_at: DateTime<Utc>) -> Self {
        Self {
            habit_id,
            current_streak: 0,
            longest_streak: 0,
            total_completions: 0,
            last_completed_at: None,
            consistency_score: 0.0,
            updated_at,
        }
    }
}
