use super::aggregate::{to_days, to_hours, to_minutes};
use crate::models::PlayEvent;
use serde::Serialize;
use std::collections::HashSet;

/// Headline totals for the whole history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_plays: usize,
    pub total_minutes: u64,
    pub total_hours: f64,
    pub total_days: f64,
    pub unique_artists: usize,
    pub unique_tracks: usize,
}

impl Overview {
    pub fn calculate(events: &[PlayEvent]) -> Self {
        let total_ms: u64 = events.iter().map(|e| e.ms_played).sum();
        let artists: HashSet<&str> = events.iter().filter_map(PlayEvent::artist).collect();
        let tracks: HashSet<&str> = events.iter().filter_map(PlayEvent::track_uri).collect();

        Self {
            total_plays: events.len(),
            total_minutes: to_minutes(total_ms),
            total_hours: to_hours(total_ms),
            total_days: to_days(total_ms),
            unique_artists: artists.len(),
            unique_tracks: tracks.len(),
        }
    }
}
