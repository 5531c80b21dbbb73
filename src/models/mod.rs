pub mod completion;
pub mod day_mask;
pub mod habit;
pub mod vacation;

pub use completion::{CompletionLog, HabitStats};
pub use day_mask::DayMask;
pub use habit::{Frequency, Habit, Recurrence};
pub use vacation::Vacation;
