use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid setting {field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioSettings {
    /// Minimum row count a category needs before its ratio is reported
    pub min_support: usize,
}

impl Default for RatioSettings {
    fn default() -> Self {
        Self { min_support: 50 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RollingSettings {
    pub window: usize,
    pub min_periods: usize,
}

impl Default for RollingSettings {
    fn default() -> Self {
        Self {
            window: 30,
            min_periods: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Statements dated before this year are left out of the yearly views
    pub min_year: i32,
    /// Origin of the date slider offsets
    pub epoch: NaiveDate,
    pub top_speakers: usize,
    pub default_top_n: usize,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            min_year: 2007,
            epoch: NaiveDate::from_ymd_opt(2007, 1, 1).unwrap_or_default(),
            top_speakers: 30,
            default_top_n: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    /// Lowest label code counted as disinformation
    pub false_min: u8,
    /// Highest label code counted as disinformation
    pub false_max: u8,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            false_min: 0,
            false_max: 2,
        }
    }
}

impl LabelSettings {
    pub fn false_range(&self) -> RangeInclusive<u8> {
        self.false_min..=self.false_max
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ratios: RatioSettings,
    pub rolling: RollingSettings,
    pub timeline: TimelineSettings,
    pub labels: LabelSettings,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ratios.min_support == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "ratios.min_support",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.rolling.window == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "rolling.window",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.rolling.min_periods == 0 || self.rolling.min_periods > self.rolling.window {
            return Err(ConfigError::InvalidSetting {
                field: "rolling.min_periods",
                reason: format!("must be between 1 and the window ({})", self.rolling.window),
            });
        }
        if self.timeline.top_speakers == 0 {
            return Err(ConfigError::InvalidSetting {
                field: "timeline.top_speakers",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.labels.false_min > self.labels.false_max {
            return Err(ConfigError::InvalidSetting {
                field: "labels",
                reason: "false_min is greater than false_max".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ratios.min_support, 50);
        assert_eq!(config.rolling.window, 30);
        assert_eq!(config.rolling.min_periods, 10);
        assert_eq!(config.timeline.min_year, 2007);
        assert_eq!(config.labels.false_range(), 0..=2);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: Config = serde_yaml::from_str("rolling:\n  window: 7\n  min_periods: 3\n").unwrap();
        assert_eq!(config.rolling.window, 7);
        assert_eq!(config.rolling.min_periods, 3);
        assert_eq!(config.ratios.min_support, 50);
        assert_eq!(
            config.timeline.epoch,
            NaiveDate::from_ymd_opt(2007, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_min_periods_above_window_rejected() {
        let mut config = Config::default();
        config.rolling.min_periods = 31;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidSetting {
                field: "rolling.min_periods",
                ..
            })
        ));
    }
}
