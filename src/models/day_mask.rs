use std::fmt;
use std::ops::BitOr;

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Weekdays eligible for obligation, one bit per day: bit0 = Sunday through
/// bit6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayMask(u8);

/// Indexed by `Weekday::num_days_from_sunday()`.
const WEEKDAY_BITS: [DayMask; 7] = [
    DayMask::SUNDAY,
    DayMask::MONDAY,
    DayMask::TUESDAY,
    DayMask::WEDNESDAY,
    DayMask::THURSDAY,
    DayMask::FRIDAY,
    DayMask::SATURDAY,
];

impl DayMask {
    pub const NONE: DayMask = DayMask(0);
    pub const SUNDAY: DayMask = DayMask(1);
    pub const MONDAY: DayMask = DayMask(1 << 1);
    pub const TUESDAY: DayMask = DayMask(1 << 2);
    pub const WEDNESDAY: DayMask = DayMask(1 << 3);
    pub const THURSDAY: DayMask = DayMask(1 << 4);
    pub const FRIDAY: DayMask = DayMask(1 << 5);
    pub const SATURDAY: DayMask = DayMask(1 << 6);
    pub const WEEKDAYS: DayMask = DayMask(0b011_1110);
    pub const WEEKENDS: DayMask = DayMask(0b100_0001);
    pub const ALL: DayMask = DayMask(0b111_1111);

    pub fn from_bits(bits: u8) -> AppResult<Self> {
        if bits > Self::ALL.0 {
            return Err(AppError::ValidationFailed(format!(
                "recurrence days must be within 0..=127, got {bits}"
            )));
        }
        Ok(Self(bits))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn for_weekday(weekday: Weekday) -> Self {
        WEEKDAY_BITS[weekday.num_days_from_sunday() as usize]
    }

    pub fn contains(self, weekday: Weekday) -> bool {
        self.0 & Self::for_weekday(weekday).0 != 0
    }

    pub fn contains_date<D: Datelike>(self, date: &D) -> bool {
        self.contains(date.weekday())
    }

    /// Number of weekdays selected.
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }
}

impl BitOr for DayMask {
    type Output = DayMask;

    fn bitor(self, rhs: DayMask) -> DayMask {
        DayMask(self.0 | rhs.0)
    }
}

impl TryFrom<u8> for DayMask {
    type Error = AppError;

    fn try_from(bits: u8) -> AppResult<Self> {
        Self::from_bits(bits)
    }
}

impl From<DayMask> for u8 {
    fn from(mask: DayMask) -> u8 {
        mask.0
    }
}

impl fmt::Display for DayMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
        let days: Vec<&str> = LABELS
            .iter()
            .zip(WEEKDAY_BITS.iter())
            .filter(|(_, bit)| self.0 & bit.0 != 0)
            .map(|(label, _)| *label)
            .collect();
        if days.is_empty() {
            write!(f, "-")
        } else {
            write!(f, "{}", days.join(","))
        }
    }
}
