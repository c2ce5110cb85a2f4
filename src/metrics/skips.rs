use super::aggregate::group_by;
use super::config::SkipSettings;
use super::rankings::track_artist_key;
use crate::models::PlayEvent;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedTrack {
    pub track: String,
    pub artist: String,
    pub total_plays: u64,
    pub skipped: u64,
    pub skip_rate: u64, // percent
}

#[derive(Debug, Default)]
struct SkipCount {
    plays: u64,
    skipped: u64,
}

/// Tracks that are often started but not finished
pub struct SkipAnalysis;

impl SkipAnalysis {
    /// A play counts as skipped when flagged as such or ended with the forward/back buttons
    pub fn skipped_tracks(events: &[PlayEvent], settings: &SkipSettings) -> Vec<SkippedTrack> {
        let counts = group_by(
            events,
            |event| track_artist_key(event),
            |count: &mut SkipCount, event| {
                count.plays += 1;
                if event.was_skipped() {
                    count.skipped += 1;
                }
            },
        );

        let mut candidates: Vec<SkippedTrack> = counts
            .into_iter()
            .filter(|(_, count)| count.plays >= settings.min_plays)
            .filter_map(|((track, artist), count)| {
                let rate = count.skipped as f64 / count.plays as f64 * 100.0;
                (rate > settings.min_skip_rate).then(|| SkippedTrack {
                    track,
                    artist,
                    total_plays: count.plays,
                    skipped: count.skipped,
                    skip_rate: rate.round() as u64,
                })
            })
            .collect();

        candidates.sort_by(|a, b| b.skip_rate.cmp(&a.skip_rate));
        candidates.truncate(settings.limit);
        candidates
    }
}
