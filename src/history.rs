use crate::models::PlayEvent;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

const TRACK_URI_PREFIX: &str = "spotify:track:";

/// Listening totals for one catalog track, built from the history log
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackStat {
    pub ms_played: u64,
    pub play_count: u64,
    pub track_name: String,
    pub artist_name: String,
    pub album_name: String,
}

/// Load the streaming history export (a JSON array of play events)
pub fn load_history(path: impl AsRef<Path>) -> Result<Vec<PlayEvent>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file '{}'", path.display()))?;
    let events: Vec<PlayEvent> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse history file '{}'", path.display()))?;
    Ok(events)
}

/// Extract the catalog id from a `spotify:track:<id>` URI
pub fn track_id_from_uri(uri: &str) -> Option<&str> {
    uri.strip_prefix(TRACK_URI_PREFIX)
        .filter(|id| !id.is_empty() && !id.contains(':'))
}

/// Sum play time and play count per track id
///
/// Events without a track URI (podcasts, audiobooks, local files) are skipped.
/// Display names are taken from the last event seen for each id.
pub fn aggregate_track_stats(events: &[PlayEvent]) -> BTreeMap<String, TrackStat> {
    let mut tracks: BTreeMap<String, TrackStat> = BTreeMap::new();

    for event in events {
        let Some(track_id) = event.track_uri().and_then(track_id_from_uri) else {
            continue;
        };

        let stat = tracks.entry(track_id.to_string()).or_default();
        stat.ms_played += event.ms_played;
        stat.play_count += 1;
        stat.track_name = event.track().unwrap_or_default().to_string();
        stat.artist_name = event.artist().unwrap_or_default().to_string();
        stat.album_name = event.album().unwrap_or_default().to_string();
    }

    tracks
}
