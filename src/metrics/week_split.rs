use super::aggregate::{
    LocalPlay, MS_PER_HOUR, Tally, group_by, rank_by, round_to, to_hours, to_minutes,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistMinutes {
    pub artist: String,
    pub minutes: u64,
}

/// Listening summary for one side of the weekday/weekend split
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitStats {
    pub total_hours: f64,
    pub total_plays: u64,
    pub days_count: usize,
    pub avg_hours_per_day: f64,
    pub avg_plays_per_day: f64,
    pub unique_artists: usize,
    pub top_artists: Vec<ArtistMinutes>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayVsWeekend {
    pub weekday: SplitStats,
    pub weekend: SplitStats,
}

/// Compares Monday–Friday against Saturday–Sunday, normalized per day observed
pub struct WeekSplit;

impl WeekSplit {
    pub fn compare(plays: &[LocalPlay<'_>], top_artists: usize) -> WeekdayVsWeekend {
        let (weekend, weekday): (Vec<&LocalPlay<'_>>, Vec<&LocalPlay<'_>>) =
            plays.iter().partition(|p| p.is_weekend());

        WeekdayVsWeekend {
            weekday: Self::summarize(&weekday, top_artists),
            weekend: Self::summarize(&weekend, top_artists),
        }
    }

    fn summarize(plays: &[&LocalPlay<'_>], top_artists: usize) -> SplitStats {
        let mut total = Tally::default();
        let mut days: HashSet<NaiveDate> = HashSet::new();
        for play in plays {
            total.add(play.event);
            days.insert(play.local.date_naive());
        }

        let artist_ms = group_by(
            plays.iter(),
            |p| p.event.artist().map(str::to_string),
            |ms: &mut u64, p| *ms += p.event.ms_played,
        );
        let unique_artists = artist_ms.len();
        let top = rank_by(artist_ms, |ms| *ms, top_artists)
            .into_iter()
            .map(|(artist, ms)| ArtistMinutes {
                artist,
                minutes: to_minutes(ms),
            })
            .collect();

        let days_count = days.len().max(1);
        let hours = total.ms as f64 / MS_PER_HOUR;

        SplitStats {
            total_hours: to_hours(total.ms),
            total_plays: total.plays,
            days_count,
            avg_hours_per_day: round_to(hours / days_count as f64, 2),
            avg_plays_per_day: round_to(total.plays as f64 / days_count as f64, 1),
            unique_artists,
            top_artists: top,
        }
    }
}
