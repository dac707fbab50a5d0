//! Configuration system for LessonForge.
//!
//! Load timetabling configuration from TOML or YAML files to tune penalty
//! weights, the double period policy and the solve time budget without code
//! changes. Hard constraints are never configured here.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use lessonforge_config::{SyncScope, TimetableConfig};
//! use std::time::Duration;
//!
//! let config = TimetableConfig::from_toml_str(r#"
//!     sync_scope = "school"
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!
//!     [double_periods]
//!     allowed = false
//!
//!     [weights]
//!     idle_gap = 800
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Duration::from_secs(30));
//! assert!(!config.double_periods.allowed);
//! assert_eq!(config.weights.idle_gap, 800);
//! assert_eq!(config.weights.single_lesson_day, 1000);
//! assert_eq!(config.sync_scope, SyncScope::School);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use lessonforge_config::TimetableConfig;
//!
//! let config = TimetableConfig::load("timetable.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use lessonforge_core::{PenaltyCategory, DEFAULT_FREE_QUOTA};
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Time budget used when no termination is configured.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 60;

/// Daily lesson count above which a teacher's day counts as overloaded.
pub const DEFAULT_DAILY_OVERLOAD_THRESHOLD: u32 = 4;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main timetabling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TimetableConfig {
    /// Solve time budget.
    #[serde(default)]
    pub termination: TerminationConfig,

    /// Double period policy.
    #[serde(default)]
    pub double_periods: DoublePeriodConfig,

    /// Soft constraint weights.
    #[serde(default)]
    pub weights: PenaltyWeights,

    /// Lessons per day a teacher may take before overload is penalized.
    #[serde(default = "default_overload_threshold")]
    pub daily_overload_threshold: u32,

    /// Free periods per day tolerated for teachers without a declared quota.
    #[serde(default = "default_free_quota")]
    pub default_free_quota: u32,

    /// Whether synchronization is judged per class or across the school.
    #[serde(default)]
    pub sync_scope: SyncScope,

    /// Hard cap on lessons of one subject per class and day.
    #[serde(default)]
    pub max_daily_lessons_per_subject: Option<u32>,
}

fn default_overload_threshold() -> u32 {
    DEFAULT_DAILY_OVERLOAD_THRESHOLD
}

fn default_free_quota() -> u32 {
    DEFAULT_FREE_QUOTA
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            termination: TerminationConfig::default(),
            double_periods: DoublePeriodConfig::default(),
            weights: PenaltyWeights::default(),
            daily_overload_threshold: DEFAULT_DAILY_OVERLOAD_THRESHOLD,
            default_free_quota: DEFAULT_FREE_QUOTA,
            sync_scope: SyncScope::default(),
            max_daily_lessons_per_subject: None,
        }
    }
}

impl TimetableConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_limit().is_zero() {
            return Err(ConfigError::Invalid(
                "termination time limit must be positive".to_string(),
            ));
        }
        let penalties = [
            ("daily_overload", self.weights.daily_overload),
            ("single_lesson_day", self.weights.single_lesson_day),
            ("idle_gap", self.weights.idle_gap),
            ("sync_disagreement", self.weights.sync_disagreement),
        ];
        for (name, weight) in penalties {
            if weight < 0 {
                return Err(ConfigError::Invalid(format!(
                    "weight '{}' must not be negative (got {})",
                    name, weight
                )));
            }
        }
        if self.max_daily_lessons_per_subject == Some(0) {
            return Err(ConfigError::Invalid(
                "max_daily_lessons_per_subject must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the time limit in seconds.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = TerminationConfig {
            seconds_spent_limit: Some(seconds),
            millis_spent_limit: None,
        };
        self
    }

    /// Sets the time limit in milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination = TerminationConfig {
            seconds_spent_limit: None,
            millis_spent_limit: Some(millis),
        };
        self
    }

    /// Allows or forbids double periods.
    pub fn with_double_periods(mut self, allowed: bool) -> Self {
        self.double_periods.allowed = allowed;
        self
    }

    /// Sets the weight of each double period; negative rewards them.
    pub fn with_double_period_weight(mut self, weight: i64) -> Self {
        self.double_periods.weight = weight;
        self
    }

    pub fn with_weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_sync_scope(mut self, scope: SyncScope) -> Self {
        self.sync_scope = scope;
        self
    }

    pub fn with_max_daily_lessons_per_subject(mut self, max: u32) -> Self {
        self.max_daily_lessons_per_subject = Some(max);
        self
    }

    /// Returns the solve time budget, falling back to
    /// [`DEFAULT_TIME_LIMIT_SECS`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lessonforge_config::TimetableConfig;
    /// use std::time::Duration;
    ///
    /// let config = TimetableConfig::new().with_termination_millis(1500);
    /// assert_eq!(config.time_limit(), Duration::from_millis(1500));
    ///
    /// let default = TimetableConfig::new();
    /// assert_eq!(default.time_limit(), Duration::from_secs(60));
    /// ```
    pub fn time_limit(&self) -> Duration {
        self.termination
            .time_limit()
            .unwrap_or(Duration::from_secs(DEFAULT_TIME_LIMIT_SECS))
    }

    /// Weight of a soft constraint category.
    pub fn weight(&self, category: PenaltyCategory) -> i64 {
        match category {
            PenaltyCategory::DailyOverload => self.weights.daily_overload,
            PenaltyCategory::SingleLessonDay => self.weights.single_lesson_day,
            PenaltyCategory::IdleGap => self.weights.idle_gap,
            PenaltyCategory::DoublePeriod => self.double_periods.weight,
            PenaltyCategory::SyncDisagreement => self.weights.sync_disagreement,
        }
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving, added to the seconds.
    pub millis_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        if self.seconds_spent_limit.is_none() && self.millis_spent_limit.is_none() {
            return None;
        }
        let seconds = Duration::from_secs(self.seconds_spent_limit.unwrap_or(0));
        Some(seconds + Duration::from_millis(self.millis_spent_limit.unwrap_or(0)))
    }
}

/// Double period policy.
///
/// When `allowed` is false, a teacher may never teach the same class in two
/// consecutive periods. When true, every genuine pair contributes `weight`
/// to the objective (negative by default, i.e. a reward).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DoublePeriodConfig {
    #[serde(default = "default_true")]
    pub allowed: bool,

    #[serde(default = "default_double_period_weight")]
    pub weight: i64,

    /// Forbid three consecutive periods of the same subject.
    #[serde(default = "default_true")]
    pub forbid_triples: bool,
}

fn default_true() -> bool {
    true
}

fn default_double_period_weight() -> i64 {
    -10
}

impl Default for DoublePeriodConfig {
    fn default() -> Self {
        Self {
            allowed: true,
            weight: default_double_period_weight(),
            forbid_triples: true,
        }
    }
}

/// Relative severities of the soft constraints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PenaltyWeights {
    /// Per lesson above the daily overload threshold.
    pub daily_overload: i64,

    /// Per teacher day with exactly one lesson.
    pub single_lesson_day: i64,

    /// Per idle period beyond the teacher's free quota.
    pub idle_gap: i64,

    /// Per day two synchronized subjects disagree.
    pub sync_disagreement: i64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            daily_overload: 200,
            single_lesson_day: 1000,
            idle_gap: 500,
            sync_disagreement: 10,
        }
    }
}

/// Where synchronization presence is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncScope {
    /// Each class taking all members of a group is judged on its own.
    #[default]
    PerClass,

    /// A member is present on a day if any class has it that day.
    School,
}
