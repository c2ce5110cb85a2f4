// Tests for catalog fetching and stat merging against a mocked catalog service

use super::*;
use crate::client::MockCatalogSource;
use crate::history::TrackStat;
use crate::models::{ArtistRef, CatalogAlbum, CatalogArtist, CatalogTrack, Followers};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn artist_ref(id: &str) -> ArtistRef {
    ArtistRef {
        id: id.to_string(),
        name: format!("Artist {id}"),
    }
}

fn catalog_track(id: &str, album_id: &str, artist_ids: &[&str]) -> CatalogTrack {
    CatalogTrack {
        id: id.to_string(),
        name: Some(format!("Track {id}")),
        popularity: Some(50),
        duration_ms: Some(200_000),
        explicit: Some(false),
        track_number: Some(1),
        album: Some(CatalogAlbum {
            id: Some(album_id.to_string()),
            name: Some(format!("Album {album_id}")),
            album_type: Some("album".to_string()),
            release_date: Some("2024-05-01".to_string()),
            total_tracks: Some(10),
            images: vec![],
            artists: artist_ids.iter().map(|id| artist_ref(id)).collect(),
        }),
        artists: artist_ids.iter().map(|id| artist_ref(id)).collect(),
    }
}

fn catalog_artist(id: &str) -> CatalogArtist {
    CatalogArtist {
        id: id.to_string(),
        name: format!("Artist {id}"),
        genres: vec!["indie".to_string()],
        popularity: Some(70),
        followers: Some(Followers { total: 1234 }),
        images: vec![],
    }
}

fn stat(ms_played: u64, play_count: u64) -> TrackStat {
    TrackStat {
        ms_played,
        play_count,
        ..Default::default()
    }
}

fn fast_settings(batch_size: usize) -> FetchSettings {
    FetchSettings {
        batch_size,
        delay_between_batches: Duration::ZERO,
    }
}

#[test]
fn test_merges_stats_onto_tracks_albums_and_artists() {
    let mut source = MockCatalogSource::new();
    source.expect_fetch_tracks().times(1).returning(|_| {
        Ok(vec![
            Some(catalog_track("t1", "al1", &["ar1", "ar2"])),
            Some(catalog_track("t2", "al1", &["ar1"])),
        ])
    });
    source
        .expect_fetch_artists()
        .times(1)
        .returning(|ids| Ok(ids.iter().map(|id| Some(catalog_artist(id))).collect()));

    let mut local = BTreeMap::new();
    local.insert("t1".to_string(), stat(1000, 2));
    local.insert("t2".to_string(), stat(500, 1));

    let snapshot = CatalogEnricher::with_settings(source, fast_settings(50)).enrich(&local);

    assert_eq!(snapshot.tracks.len(), 2);
    assert_eq!(snapshot.albums.len(), 1);
    assert_eq!(snapshot.artists.len(), 2);

    let album = &snapshot.albums[0];
    assert_eq!(album.ms_played, 1500);
    assert_eq!(album.play_count, 3);

    let ar1 = snapshot.artists.iter().find(|a| a.id == "ar1").unwrap();
    let ar2 = snapshot.artists.iter().find(|a| a.id == "ar2").unwrap();
    assert_eq!(ar1.ms_played, 1500);
    assert_eq!(ar1.play_count, 3);
    assert_eq!(ar2.ms_played, 1000);
    assert_eq!(ar2.followers, 1234);

    assert_eq!(snapshot.metadata.total_tracks, 2);
    assert_eq!(snapshot.metadata.total_albums, 1);
    assert_eq!(snapshot.metadata.total_artists, 2);
}

#[test]
fn test_batches_are_capped_and_each_artist_fetched_once() {
    let track_calls = Arc::new(Mutex::new(Vec::new()));
    let artist_calls = Arc::new(Mutex::new(Vec::new()));

    let mut source = MockCatalogSource::new();
    let recorded_tracks = Arc::clone(&track_calls);
    source.expect_fetch_tracks().returning(move |ids| {
        recorded_tracks.lock().unwrap().push(ids.to_vec());
        // every track shares one of two artists
        Ok(ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let artist = if i % 2 == 0 { "even" } else { "odd" };
                Some(catalog_track(id, &format!("album-{id}"), &[artist]))
            })
            .collect())
    });
    let recorded_artists = Arc::clone(&artist_calls);
    source.expect_fetch_artists().returning(move |ids| {
        recorded_artists.lock().unwrap().push(ids.to_vec());
        Ok(ids.iter().map(|id| Some(catalog_artist(id))).collect())
    });

    let local: BTreeMap<String, TrackStat> = (0..120)
        .map(|i| (format!("track{i:03}"), stat(100, 1)))
        .collect();

    let snapshot = CatalogEnricher::with_settings(source, fast_settings(50)).enrich(&local);

    let track_calls = track_calls.lock().unwrap();
    assert_eq!(
        track_calls.iter().map(Vec::len).collect::<Vec<_>>(),
        vec![50, 50, 20]
    );

    let artist_calls = artist_calls.lock().unwrap();
    let requested: Vec<&String> = artist_calls.iter().flatten().collect();
    let unique: HashSet<&String> = requested.iter().copied().collect();
    assert_eq!(requested.len(), unique.len());
    assert_eq!(requested, vec!["even", "odd"]);
    assert_eq!(snapshot.artists.len(), 2);
    assert_eq!(snapshot.tracks.len(), 120);
}

#[test]
fn test_failed_batch_contributes_nothing_and_run_continues() {
    let mut source = MockCatalogSource::new();
    let mut call = 0;
    source.expect_fetch_tracks().times(2).returning(move |ids| {
        call += 1;
        if call == 1 {
            Err(anyhow::anyhow!("Error fetching tracks: 429"))
        } else {
            Ok(ids
                .iter()
                .map(|id| Some(catalog_track(id, "al1", &["ar1"])))
                .collect())
        }
    });
    source
        .expect_fetch_artists()
        .times(1)
        .returning(|_| Err(anyhow::anyhow!("Error fetching artists: 500")));

    let local: BTreeMap<String, TrackStat> =
        ["a", "b", "c"].iter().map(|id| (id.to_string(), stat(10, 1))).collect();

    let snapshot = CatalogEnricher::with_settings(source, fast_settings(2)).enrich(&local);

    // first batch (a, b) failed, second batch (c) succeeded
    assert_eq!(snapshot.tracks.len(), 1);
    assert_eq!(snapshot.tracks[0].id, "c");
    assert_eq!(snapshot.albums.len(), 1);
    // artist lookup failed, so no artist records survive
    assert!(snapshot.artists.is_empty());
    assert_eq!(snapshot.metadata.total_artists, 0);
}

#[test]
fn test_null_catalog_entries_are_dropped() {
    let mut source = MockCatalogSource::new();
    source
        .expect_fetch_tracks()
        .returning(|_| Ok(vec![None, Some(catalog_track("known", "al1", &["ar1"]))]));
    source
        .expect_fetch_artists()
        .returning(|_| Ok(vec![None]));

    let local: BTreeMap<String, TrackStat> = [("known", stat(1, 1)), ("unknown", stat(1, 1))]
        .into_iter()
        .map(|(id, s)| (id.to_string(), s))
        .collect();

    let snapshot = CatalogEnricher::with_settings(source, fast_settings(50)).enrich(&local);

    assert_eq!(snapshot.tracks.len(), 1);
    assert!(snapshot.artists.is_empty());
}

#[test]
fn test_every_track_album_is_present_in_albums() {
    let mut source = MockCatalogSource::new();
    source.expect_fetch_tracks().returning(|ids| {
        Ok(ids
            .iter()
            .map(|id| {
                let mut track = catalog_track(id, &format!("album-{id}"), &["ar1"]);
                if id == "no-album" {
                    track.album = None;
                }
                Some(track)
            })
            .collect())
    });
    source
        .expect_fetch_artists()
        .returning(|ids| Ok(ids.iter().map(|id| Some(catalog_artist(id))).collect()));

    let local: BTreeMap<String, TrackStat> = ["x", "y", "no-album"]
        .iter()
        .map(|id| (id.to_string(), stat(5, 1)))
        .collect();

    let snapshot = CatalogEnricher::with_settings(source, fast_settings(50)).enrich(&local);

    let album_ids: HashSet<&str> = snapshot.albums.iter().map(|a| a.id.as_str()).collect();
    for track in &snapshot.tracks {
        if let Some(album_id) = &track.album_id {
            assert!(album_ids.contains(album_id.as_str()));
        }
    }
    assert_eq!(snapshot.albums.len(), 2);
}

#[test]
fn test_no_tracks_means_no_requests() {
    let mut source = MockCatalogSource::new();
    source.expect_fetch_tracks().never();
    source.expect_fetch_artists().never();

    let snapshot = CatalogEnricher::new(source).enrich(&BTreeMap::new());

    assert!(snapshot.tracks.is_empty());
    assert_eq!(snapshot.metadata.total_albums, 0);
}
