use crate::models::{CatalogAlbum, CatalogArtist, CatalogTrack, Image};
use serde::{Deserialize, Serialize};

/// A fetched track with the listening stats from the history log merged in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedTrack {
    pub id: String,
    pub name: Option<String>,
    pub popularity: Option<u32>,
    pub duration_ms: Option<u64>,
    pub explicit: Option<bool>,
    pub track_number: Option<u32>,
    pub album_id: Option<String>,
    pub artist_ids: Vec<String>,
    pub artist_names: Vec<String>,
    // Stats from listening history
    pub ms_played: u64,
    pub play_count: u64,
}

impl EnrichedTrack {
    pub fn from_catalog(track: &CatalogTrack) -> Self {
        Self {
            id: track.id.clone(),
            name: track.name.clone(),
            popularity: track.popularity,
            duration_ms: track.duration_ms,
            explicit: track.explicit,
            track_number: track.track_number,
            album_id: track.album.as_ref().and_then(|album| album.id.clone()),
            artist_ids: track.artists.iter().map(|a| a.id.clone()).collect(),
            artist_names: track.artists.iter().map(|a| a.name.clone()).collect(),
            ms_played: 0,
            play_count: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedAlbum {
    pub id: String,
    pub name: Option<String>,
    pub album_type: Option<String>,
    pub release_date: Option<String>,
    pub total_tracks: Option<u32>,
    pub images: Vec<Image>,
    pub artist_ids: Vec<String>,
    pub artist_names: Vec<String>,
    pub ms_played: u64,
    pub play_count: u64,
}

impl EnrichedAlbum {
    /// Build from the simplified album embedded in a track; `None` when the album has no id
    pub fn from_catalog(album: &CatalogAlbum) -> Option<Self> {
        let id = album.id.clone()?;
        Some(Self {
            id,
            name: album.name.clone(),
            album_type: album.album_type.clone(),
            release_date: album.release_date.clone(),
            total_tracks: album.total_tracks,
            images: album.images.clone(),
            artist_ids: album.artists.iter().map(|a| a.id.clone()).collect(),
            artist_names: album.artists.iter().map(|a| a.name.clone()).collect(),
            ms_played: 0,
            play_count: 0,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedArtist {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub popularity: Option<u32>,
    pub followers: u64,
    pub images: Vec<Image>,
    pub ms_played: u64,
    pub play_count: u64,
}

impl EnrichedArtist {
    pub fn from_catalog(artist: CatalogArtist) -> Self {
        Self {
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
            popularity: artist.popularity,
            followers: artist.followers.map(|f| f.total).unwrap_or(0),
            images: artist.images,
            ms_played: 0,
            play_count: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub total_tracks: usize,
    pub total_albums: usize,
    pub total_artists: usize,
    pub fetched_at: String,
}

/// The enriched catalog written by the metadata job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub tracks: Vec<EnrichedTrack>,
    pub albums: Vec<EnrichedAlbum>,
    pub artists: Vec<EnrichedArtist>,
    pub metadata: SnapshotMetadata,
}
