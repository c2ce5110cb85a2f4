use super::snapshot::{
    CatalogSnapshot, EnrichedAlbum, EnrichedArtist, EnrichedTrack, SnapshotMetadata,
};
use crate::client::{CatalogSource, MAX_IDS_PER_REQUEST};
use crate::history::TrackStat;
use crate::models::{CatalogArtist, CatalogTrack};
use chrono::Local;
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Duration;

/// How catalog lookups are batched
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub batch_size: usize,
    pub delay_between_batches: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            batch_size: MAX_IDS_PER_REQUEST,
            delay_between_batches: Duration::from_millis(100),
        }
    }
}

/// Fetches catalog records for the tracks in a listening history and merges local stats onto them
pub struct CatalogEnricher<S: CatalogSource> {
    source: S,
    settings: FetchSettings,
}

impl<S: CatalogSource> CatalogEnricher<S> {
    pub fn new(source: S) -> Self {
        Self::with_settings(source, FetchSettings::default())
    }

    pub fn with_settings(source: S, settings: FetchSettings) -> Self {
        let batch_size = settings.batch_size.clamp(1, MAX_IDS_PER_REQUEST);
        Self {
            source,
            settings: FetchSettings {
                batch_size,
                ..settings
            },
        }
    }

    /// Run the full fetch and merge for the given per-track stats
    pub fn enrich(&self, local_stats: &BTreeMap<String, TrackStat>) -> CatalogSnapshot {
        println!("\nFetching track details...");
        let track_ids: Vec<String> = local_stats.keys().cloned().collect();
        let fetched_tracks = self.fetch_in_batches(&track_ids, "tracks", |ids| {
            self.source.fetch_tracks(ids)
        });

        let (mut tracks, mut albums, artist_ids) = Self::collect_entities(&fetched_tracks);

        println!("\nFetching details for {} artists...", artist_ids.len());
        let artist_ids: Vec<String> = artist_ids.into_iter().collect();
        let fetched_artists = self.fetch_in_batches(&artist_ids, "artists", |ids| {
            self.source.fetch_artists(ids)
        });

        let mut artists = Self::index_artists(fetched_artists);

        merge_track_stats(&mut tracks, local_stats);
        merge_album_stats(&tracks, &mut albums);
        merge_artist_stats(&tracks, &mut artists);

        let metadata = SnapshotMetadata {
            total_tracks: tracks.len(),
            total_albums: albums.len(),
            total_artists: artists.len(),
            fetched_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        };

        CatalogSnapshot {
            tracks,
            albums: albums.into_values().collect(),
            artists: artists.into_values().collect(),
            metadata,
        }
    }

    /// Request ids in sequential chunks; a failed chunk is logged and yields nothing
    fn fetch_in_batches<T, F>(&self, ids: &[String], label: &str, fetch: F) -> Vec<T>
    where
        F: Fn(&[String]) -> anyhow::Result<Vec<Option<T>>>,
    {
        let batch_size = self.settings.batch_size;
        let total_batches = ids.len().div_ceil(batch_size);
        let mut records = Vec::new();

        for (index, batch) in ids.chunks(batch_size).enumerate() {
            if index > 0 && !self.settings.delay_between_batches.is_zero() {
                std::thread::sleep(self.settings.delay_between_batches);
            }

            println!(
                "  Batch {}/{} ({} {})",
                index + 1,
                total_batches,
                batch.len(),
                label
            );

            match fetch(batch) {
                Ok(items) => {
                    let returned = items.len();
                    records.extend(items.into_iter().flatten());
                    debug!("{label} batch {} returned {returned} entries", index + 1);
                }
                Err(e) => {
                    warn!("  {e} (skipping {} {label})", batch.len());
                }
            }
        }

        records
    }

    /// Build track records and discover albums and artists from fetched tracks
    fn collect_entities(
        fetched: &[CatalogTrack],
    ) -> (
        Vec<EnrichedTrack>,
        BTreeMap<String, EnrichedAlbum>,
        BTreeSet<String>,
    ) {
        let mut tracks = Vec::with_capacity(fetched.len());
        let mut albums: BTreeMap<String, EnrichedAlbum> = BTreeMap::new();
        let mut artist_ids: BTreeSet<String> = BTreeSet::new();

        for track in fetched {
            artist_ids.extend(track.artists.iter().map(|artist| artist.id.clone()));

            if let Some(album) = track.album.as_ref().and_then(EnrichedAlbum::from_catalog) {
                albums.entry(album.id.clone()).or_insert(album);
            }

            tracks.push(EnrichedTrack::from_catalog(track));
        }

        (tracks, albums, artist_ids)
    }

    fn index_artists(fetched: Vec<CatalogArtist>) -> BTreeMap<String, EnrichedArtist> {
        fetched
            .into_iter()
            .map(|artist| (artist.id.clone(), EnrichedArtist::from_catalog(artist)))
            .collect()
    }
}

/// Join local listening stats onto fetched tracks by id
pub fn merge_track_stats(tracks: &mut [EnrichedTrack], local_stats: &BTreeMap<String, TrackStat>) {
    for track in tracks.iter_mut() {
        if let Some(stat) = local_stats.get(&track.id) {
            track.ms_played = stat.ms_played;
            track.play_count = stat.play_count;
        }
    }
}

/// Sum track stats per album id onto the album records
pub fn merge_album_stats(tracks: &[EnrichedTrack], albums: &mut BTreeMap<String, EnrichedAlbum>) {
    let mut totals: HashMap<&str, (u64, u64)> = HashMap::new();
    for track in tracks {
        if let Some(album_id) = track.album_id.as_deref() {
            let entry = totals.entry(album_id).or_default();
            entry.0 += track.ms_played;
            entry.1 += track.play_count;
        }
    }

    for (album_id, (ms_played, play_count)) in totals {
        if let Some(album) = albums.get_mut(album_id) {
            album.ms_played = ms_played;
            album.play_count = play_count;
        }
    }
}

/// Sum track stats per artist id; a track counts toward every contributing artist
pub fn merge_artist_stats(
    tracks: &[EnrichedTrack],
    artists: &mut BTreeMap<String, EnrichedArtist>,
) {
    let mut totals: HashMap<&str, (u64, u64)> = HashMap::new();
    for track in tracks {
        for artist_id in &track.artist_ids {
            let entry = totals.entry(artist_id.as_str()).or_default();
            entry.0 += track.ms_played;
            entry.1 += track.play_count;
        }
    }

    for (artist_id, (ms_played, play_count)) in totals {
        if let Some(artist) = artists.get_mut(artist_id) {
            artist.ms_played = ms_played;
            artist.play_count = play_count;
        }
    }
}
