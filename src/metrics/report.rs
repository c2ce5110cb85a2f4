use super::aggregate::localize;
use super::config::ReportConfig;
use super::heatmaps::{DayHourCell, Heatmaps, HourBucket, HourlyCell, WeekdayHourCell};
use super::overview::Overview;
use super::peak_hours::{PeakHours, PeakHoursSummary};
use super::rankings::{Rankings, TopArtist, TopTrack};
use super::skips::{SkipAnalysis, SkippedTrack};
use super::special_days::{SpecialDay, SpecialDays};
use super::trend::{MonthTrend, MonthlyTrend};
use super::week_split::{WeekSplit, WeekdayVsWeekend};
use crate::models::PlayEvent;
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    pub timezone: String,
    pub data_source: String,
    pub skip_definition: String,
    pub min_plays_for_skip_rate: u64,
}

/// Everything the dashboard reads, in one document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub overview: Overview,
    pub top_artists: Vec<TopArtist>,
    pub top_tracks: Vec<TopTrack>,
    pub hourly_heatmap: Vec<HourlyCell>,
    pub weekday_hour_heatmap: Vec<WeekdayHourCell>,
    pub day_hour_heatmap: Vec<DayHourCell>,
    pub hourly_distribution: Vec<HourBucket>,
    pub weekday_vs_weekend: WeekdayVsWeekend,
    pub skipped_tracks: Vec<SkippedTrack>,
    pub monthly_trend: Vec<MonthTrend>,
    pub special_days: BTreeMap<String, SpecialDay>,
    pub peak_hours: PeakHoursSummary,
    pub metadata: ReportMetadata,
}

/// Computes the metrics report from a streaming history
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Compute every metric; fails only when the configured time zone is unknown
    pub fn generate(&self, events: &[PlayEvent]) -> Result<MetricsReport> {
        let tz = self.config.time_zone()?;
        let plays = localize(events, tz);

        Ok(MetricsReport {
            overview: Overview::calculate(events),
            top_artists: Rankings::top_artists(events, self.config.top_limit),
            top_tracks: Rankings::top_tracks(events, self.config.top_limit),
            hourly_heatmap: Heatmaps::hourly(&plays),
            weekday_hour_heatmap: Heatmaps::weekday_hour(&plays),
            day_hour_heatmap: Heatmaps::day_hour(&plays),
            hourly_distribution: Heatmaps::hourly_distribution(&plays),
            weekday_vs_weekend: WeekSplit::compare(&plays, self.config.split_top_artists),
            skipped_tracks: SkipAnalysis::skipped_tracks(events, &self.config.skips),
            monthly_trend: MonthlyTrend::compute(&plays),
            special_days: SpecialDays::lookup(
                &plays,
                &self.config.birthday,
                &self.config.holidays,
                &self.config.holiday_key_prefix,
            ),
            peak_hours: PeakHours::find(&plays, self.config.peak_hour_count),
            metadata: self.metadata(),
        })
    }

    fn metadata(&self) -> ReportMetadata {
        ReportMetadata {
            timezone: zone_label(&self.config.timezone),
            data_source: "Spotify Extended Streaming History".to_string(),
            skip_definition: "Canción marcada como 'skipped' o terminada con 'fwdbtn'/'backbtn'"
                .to_string(),
            min_plays_for_skip_rate: self.config.skips.min_plays,
        }
    }
}

/// Zone name followed by its common English name when one is known
pub fn zone_label(zone: &str) -> String {
    let common = match zone {
        "America/Los_Angeles" => Some("Pacific Time"),
        "America/Denver" => Some("Mountain Time"),
        "America/Chicago" | "America/Mexico_City" => Some("Central Time"),
        "America/New_York" => Some("Eastern Time"),
        _ => None,
    };
    match common {
        Some(name) => format!("{zone} ({name})"),
        None => zone.to_string(),
    }
}
