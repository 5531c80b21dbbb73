use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::models::day_mask::DayMask;
use crate::streaks::ScheduleSpec;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Default for Frequency {
    fn default() -> Self {
        Self::Daily
    }
}

impl Frequency {
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl FromStr for Frequency {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(AppError::ValidationFailed(format!(
                "unknown frequency '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which weekdays are eligible, and "every N periods" of the habit's
/// frequency. The interval is always within `1..=i32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recurrence {
    days: DayMask,
    interval: u32,
}

impl Default for Recurrence {
    fn default() -> Self {
        Self {
            days: DayMask::ALL,
            interval: 1,
        }
    }
}

impl Recurrence {
    pub fn new(days: i32, interval: i32) -> AppResult<Self> {
        let days = u8::try_from(days).map_err(|_| {
            AppError::ValidationFailed(format!(
                "recurrence days must be within 0..=127, got {days}"
            ))
        })?;
        let interval = u32::try_from(interval).map_err(|_| {
            AppError::ValidationFailed(format!(
                "recurrence interval must be at least 1, got {interval}"
            ))
        })?;
        Self::with_days(DayMask::from_bits(days)?, interval)
    }

    pub fn with_days(days: DayMask, interval: u32) -> AppResult<Self> {
        if interval < 1 || i32::try_from(interval).is_err() {
            return Err(AppError::ValidationFailed(format!(
                "recurrence interval must be within 1..={}, got {interval}",
                i32::MAX
            )));
        }
        Ok(Self { days, interval })
    }

    pub fn days(&self) -> DayMask {
        self.days
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }
}

impl<'de> Deserialize<'de> for Recurrence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            days: DayMask,
            interval: u32,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::with_days(raw.days, raw.interval).map_err(de::Error::custom)
    }
}

pub(crate) fn not_nil(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::new("nil_id"));
    }
    Ok(())
}

/// Habit descriptor as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Habit {
    #[validate(custom = "not_nil")]
    pub id: Uuid,
    pub created_on: NaiveDate,
    #[serde(default)]
    pub frequency: Frequency,
    #[validate(range(min = 0, max = 127, message = "recurrence_days must be 0-127"))]
    pub recurrence_days: i32,
    #[validate(range(min = 1, message = "recurrence_interval must be at least 1"))]
    pub recurrence_interval: i32,
}

impl Habit {
    pub fn new(
        id: Uuid,
        created_on: NaiveDate,
        frequency: Frequency,
        recurrence: Recurrence,
    ) -> Self {
        Self {
            id,
            created_on,
            frequency,
            recurrence_days: i32::from(recurrence.days().bits()),
            // Bounded by `Recurrence::with_days`.
            recurrence_interval: i32::try_from(recurrence.interval()).unwrap_or(i32::MAX),
        }
    }

    pub fn recurrence(&self) -> AppResult<Recurrence> {
        Recurrence::new(self.recurrence_days, self.recurrence_interval)
    }

    /// Validates the descriptor and builds its schedule predicate.
    pub fn schedule(&self) -> AppResult<ScheduleSpec> {
        self.validate()?;
        Ok(ScheduleSpec::new(self.frequency, self.recurrence()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_frequency_parses_known_values_only() {
        assert_eq!("weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert!(matches!(
            "yearly".parse::<Frequency>(),
            Err(AppError::ValidationFailed(_))
        ));
        assert!(matches!(
            "Daily".parse::<Frequency>(),
            Err(AppError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_frequency_serde_rejects_unknown() {
        let parsed: Frequency = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(parsed, Frequency::Monthly);
        assert!(serde_json::from_str::<Frequency>("\"hourly\"").is_err());
    }

    #[test]
    fn test_recurrence_validation() {
        assert!(Recurrence::new(0, 1).is_ok());
        assert!(Recurrence::new(127, 5).is_ok());
        assert!(Recurrence::new(128, 1).is_err());
        assert!(Recurrence::new(-1, 1).is_err());
        assert!(Recurrence::new(127, 0).is_err());
        assert!(Recurrence::new(127, -3).is_err());
    }

    #[test]
    fn test_recurrence_interval_fits_descriptor() {
        let too_wide = Recurrence::with_days(DayMask::ALL, i32::MAX as u32 + 1);
        assert!(matches!(too_wide, Err(AppError::ValidationFailed(_))));

        let widest = Recurrence::with_days(DayMask::ALL, i32::MAX as u32).unwrap();
        let habit = Habit::new(Uuid::new_v4(), date(2026, 1, 1), Frequency::Monthly, widest);
        assert_eq!(habit.recurrence_interval, i32::MAX);
        assert_eq!(habit.recurrence().unwrap(), widest);
    }

    #[test]
    fn test_recurrence_deserialize_validates() {
        let ok: Recurrence = serde_json::from_str(r#"{"days":34,"interval":2}"#).unwrap();
        assert_eq!(ok.interval(), 2);
        assert!(serde_json::from_str::<Recurrence>(r#"{"days":34,"interval":0}"#).is_err());
        assert!(serde_json::from_str::<Recurrence>(r#"{"days":200,"interval":1}"#).is_err());
    }

    #[test]
    fn test_habit_validate_rejects_bad_descriptor() {
        let mut habit = Habit::new(
            Uuid::new_v4(),
            date(2026, 1, 1),
            Frequency::Daily,
            Recurrence::default(),
        );
        assert!(habit.schedule().is_ok());

        habit.recurrence_interval = 0;
        assert!(matches!(habit.schedule(), Err(AppError::ValidationFailed(_))));

        habit.recurrence_interval = 1;
        habit.recurrence_days = 200;
        assert!(matches!(habit.schedule(), Err(AppError::ValidationFailed(_))));

        habit.recurrence_days = 127;
        habit.id = Uuid::nil();
        assert!(matches!(habit.schedule(), Err(AppError::ValidationFailed(_))));
    }

    #[test]
    fn test_habit_deserializes_with_default_frequency() {
        let id = Uuid::new_v4();
        let habit: Habit = serde_json::from_value(serde_json::json!({
            "id": id,
            "created_on": "2026-01-01",
            "recurrence_days": 34,
            "recurrence_interval": 1,
        }))
        .unwrap();
        assert_eq!(habit.frequency, Frequency::Daily);
        assert_eq!(habit.recurrence().unwrap().days(), DayMask::MONDAY | DayMask::FRIDAY);
    }
}
