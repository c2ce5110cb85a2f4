use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A calendar day that recurs every year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualDate {
    pub month: u32,
    pub day: u32,
    pub label: String,
}

impl AnnualDate {
    pub fn new(month: u32, day: u32, label: &str) -> Self {
        Self {
            month,
            day,
            label: label.to_string(),
        }
    }
}

/// Thresholds for the skipped-tracks metric
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkipSettings {
    pub min_plays: u64,     // pairs with fewer plays are excluded entirely
    pub min_skip_rate: f64, // percentage; only rates strictly above this are kept
    pub limit: usize,
}

/// Settings for the metrics report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub timezone: String, // IANA name, e.g. "America/Los_Angeles"
    pub top_limit: usize,
    pub split_top_artists: usize, // top artists per weekday/weekend bucket
    pub peak_hour_count: usize,
    pub skips: SkipSettings,
    pub birthday: AnnualDate,
    pub holidays: Vec<AnnualDate>,
    pub holiday_key_prefix: String, // report keys look like "<prefix>_<month>_<day>"
}

impl Default for SkipSettings {
    fn default() -> Self {
        Self {
            min_plays: 10,
            min_skip_rate: 30.0,
            limit: 10,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: "America/Los_Angeles".to_string(),
            top_limit: 5,
            split_top_artists: 3,
            peak_hour_count: 5,
            skips: SkipSettings::default(),
            birthday: AnnualDate::new(4, 6, "6 de abril"),
            holidays: vec![
                AnnualDate::new(1, 1, "Año Nuevo"),
                AnnualDate::new(2, 5, "Día de la Constitución"),
                AnnualDate::new(3, 21, "Natalicio de Benito Juárez"),
                AnnualDate::new(5, 1, "Día del Trabajo"),
                AnnualDate::new(5, 5, "Cinco de Mayo"),
                AnnualDate::new(9, 16, "Día de la Independencia"),
                AnnualDate::new(11, 2, "Día de los Muertos"),
                AnnualDate::new(11, 20, "Revolución Mexicana"),
                AnnualDate::new(12, 25, "Navidad"),
            ],
            holiday_key_prefix: "mx".to_string(),
        }
    }
}

impl ReportConfig {
    /// Load report settings from a JSON file; absent keys keep their defaults
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report config '{}'", path.display()))?;
        let config: ReportConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse report config '{}'", path.display()))?;
        config.time_zone()?;
        Ok(config)
    }

    /// The configured time zone, parsed
    pub fn time_zone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("Invalid time zone '{}': {}", self.timezone, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();

        assert_eq!(config.top_limit, 5);
        assert_eq!(config.skips.min_plays, 10);
        assert_eq!(config.holidays.len(), 9);
        assert_eq!(config.time_zone().unwrap(), chrono_tz::America::Los_Angeles);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"timezone": "Europe/Madrid", "top_limit": 10}}"#).unwrap();

        let config = ReportConfig::load_from_file(file.path()).unwrap();

        assert_eq!(config.timezone, "Europe/Madrid");
        assert_eq!(config.top_limit, 10);
        assert_eq!(config.peak_hour_count, 5);
        assert_eq!(config.birthday, AnnualDate::new(4, 6, "6 de abril"));
    }

    #[test]
    fn test_partial_skip_settings_keep_other_thresholds() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"skips": {{"min_plays": 5}}}}"#).unwrap();

        let config = ReportConfig::load_from_file(file.path()).unwrap();

        assert_eq!(config.skips.min_plays, 5);
        assert_eq!(config.skips.min_skip_rate, 30.0);
        assert_eq!(config.skips.limit, 10);
        assert_eq!(config.top_limit, 5);
    }

    #[test]
    fn test_invalid_time_zone_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"timezone": "Mars/Olympus_Mons"}}"#).unwrap();

        let err = ReportConfig::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus_Mons"));
    }
}
