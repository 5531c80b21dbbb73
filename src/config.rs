use std::env;

use crate::streaks::{LongestStreakMode, StreakPolicy};

#[derive(Debug, Clone)]
pub struct Config {
    pub consistency_window_days: u32,
    pub max_walk_days: u32,
    pub longest_streak_mode: LongestStreakMode,
}

impl Default for Config {
    fn default() -> Self {
        let policy = StreakPolicy::default();
        Self {
            consistency_window_days: policy.consistency_window_days,
            max_walk_days: policy.max_walk_days,
            longest_streak_mode: policy.longest_streak_mode,
        }
    }
}

impl Config {
    /// Applies a `.env` file if one is present, then reads the environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            consistency_window_days: env::var("STREAK_CONSISTENCY_WINDOW_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.consistency_window_days),
            max_walk_days: env::var("STREAK_MAX_WALK_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|days: &u32| *days > 0)
                .unwrap_or(defaults.max_walk_days),
            longest_streak_mode: env::var("STREAK_LONGEST_MODE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.longest_streak_mode),
        }
    }

    pub fn streak_policy(&self) -> StreakPolicy {
        StreakPolicy {
            consistency_window_days: self.consistency_window_days,
            max_walk_days: self.max_walk_days,
            longest_streak_mode: self.longest_streak_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_policy_default() {
        let config = Config::default();
        assert_eq!(config.streak_policy(), StreakPolicy::default());
        assert_eq!(config.consistency_window_days, 30);
    }

    // Single test touching the process environment to avoid races between
    // parallel test threads.
    #[test]
    fn test_from_env_overrides_and_fallbacks() {
        // No .env file in the crate root; load falls through to the environment.
        let loaded = Config::load();
        assert!(loaded.max_walk_days > 0);

        env::set_var("STREAK_CONSISTENCY_WINDOW_DAYS", "14");
        env::set_var("STREAK_MAX_WALK_DAYS", "0");
        env::set_var("STREAK_LONGEST_MODE", "most_recent_run");

        let config = Config::from_env();
        assert_eq!(config.consistency_window_days, 14);
        assert_eq!(config.max_walk_days, StreakPolicy::default().max_walk_days);
        assert_eq!(config.longest_streak_mode, LongestStreakMode::MostRecentRun);

        env::set_var("STREAK_LONGEST_MODE", "sometimes");
        let config = Config::from_env();
        assert_eq!(config.longest_streak_mode, LongestStreakMode::FullHistory);

        env::remove_var("STREAK_CONSISTENCY_WINDOW_DAYS");
        env::remove_var("STREAK_MAX_WALK_DAYS");
        env::remove_var("STREAK_LONGEST_MODE");
    }
}
