use super::aggregate::{Tally, group_by, rank_by, share_of_leader};
use crate::models::PlayEvent;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopArtist {
    pub artist: String,
    pub minutes: u64,
    pub hours: f64,
    pub plays: u64,
    pub pct: u64, // share of the leader's listening time
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTrack {
    pub track: String,
    pub artist: String,
    pub minutes: u64,
    pub hours: f64,
    pub plays: u64,
    pub pct: u64,
}

/// Top-N rankings by listening time
pub struct Rankings;

impl Rankings {
    pub fn top_artists(events: &[PlayEvent], limit: usize) -> Vec<TopArtist> {
        let groups = group_by(
            events,
            |event| event.artist().map(str::to_string),
            |tally: &mut Tally, event| tally.add(event),
        );
        let top = rank_by(groups, |tally| tally.ms, limit);
        let leader_ms = top.first().map(|(_, tally)| tally.ms).unwrap_or(0);

        top.into_iter()
            .map(|(artist, tally)| TopArtist {
                artist,
                minutes: tally.minutes(),
                hours: tally.hours(),
                plays: tally.plays,
                pct: share_of_leader(tally.ms, leader_ms),
            })
            .collect()
    }

    /// Tracks are keyed by (title, artist) so same-named songs by different artists stay apart
    pub fn top_tracks(events: &[PlayEvent], limit: usize) -> Vec<TopTrack> {
        let groups = group_by(
            events,
            |event| track_artist_key(event),
            |tally: &mut Tally, event| tally.add(event),
        );
        let top = rank_by(groups, |tally| tally.ms, limit);
        let leader_ms = top.first().map(|(_, tally)| tally.ms).unwrap_or(0);

        top.into_iter()
            .map(|((track, artist), tally)| TopTrack {
                track,
                artist,
                minutes: tally.minutes(),
                hours: tally.hours(),
                plays: tally.plays,
                pct: share_of_leader(tally.ms, leader_ms),
            })
            .collect()
    }
}

/// (track, artist) for events carrying both names
pub(crate) fn track_artist_key(event: &PlayEvent) -> Option<(String, String)> {
    Some((event.track()?.to_string(), event.artist()?.to_string()))
}
