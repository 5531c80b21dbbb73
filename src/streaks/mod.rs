//! Recurrence-aware streak and consistency engine.
//!
//! Pure and synchronous: callers gather the habit, its completion logs and
//! its vacations, then pass `today` explicitly. Nothing here reads the clock
//! or performs I/O.

pub mod calculator;
pub mod completion_index;
pub mod consistency;
pub mod schedule;
pub mod vacation_set;

pub use calculator::{DayRecord, DayStatus, LongestStreakMode, StreakCalculator, StreakPolicy};
pub use completion_index::CompletionIndex;
pub use consistency::{ConsistencyCalculator, ConsistencyWindow};
pub use schedule::ScheduleSpec;
pub use vacation_set::VacationSet;
