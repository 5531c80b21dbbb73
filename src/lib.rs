//! # HabitArc — streak engine
//!
//! Computes current streak, longest streak, distinct completions, last
//! completion date and a rolling consistency score for a habit, honouring its
//! recurrence schedule and any vacation pauses.
//!
//! - `models`   → habit, completion log, vacation and stats contracts
//! - `streaks`  → the pure calculation engine
//! - `services` → fetch / compute / upsert orchestration over a repository

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod streaks;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{CompletionLog, DayMask, Frequency, Habit, HabitStats, Recurrence, Vacation};
pub use services::{HabitRepository, InMemoryRepository, StatsService};
pub use streaks::{
    DayRecord, DayStatus, LongestStreakMode, ScheduleSpec, StreakCalculator, StreakPolicy,
};
