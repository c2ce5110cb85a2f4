use serde::{Deserialize, Serialize};

/// One row of the Spotify Extended Streaming History export
///
/// Every field tolerates being absent or `null`; unknown export fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayEvent {
    #[serde(default)]
    pub ts: Option<String>, // ISO-8601, UTC
    #[serde(default, deserialize_with = "null_as_zero")]
    pub ms_played: u64,
    #[serde(default)]
    pub spotify_track_uri: Option<String>,
    #[serde(default)]
    pub master_metadata_track_name: Option<String>,
    #[serde(default)]
    pub master_metadata_album_artist_name: Option<String>,
    #[serde(default)]
    pub master_metadata_album_album_name: Option<String>,
    #[serde(default)]
    pub skipped: Option<bool>,
    #[serde(default)]
    pub reason_end: Option<String>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

impl PlayEvent {
    /// Artist display name, if present and non-empty
    pub fn artist(&self) -> Option<&str> {
        non_empty(&self.master_metadata_album_artist_name)
    }

    /// Track display name, if present and non-empty
    pub fn track(&self) -> Option<&str> {
        non_empty(&self.master_metadata_track_name)
    }

    pub fn album(&self) -> Option<&str> {
        non_empty(&self.master_metadata_album_album_name)
    }

    pub fn track_uri(&self) -> Option<&str> {
        non_empty(&self.spotify_track_uri)
    }

    /// Whether this play ended in a skip: the explicit flag, or forward/back navigation
    pub fn was_skipped(&self) -> bool {
        self.skipped.unwrap_or(false)
            || matches!(self.reason_end.as_deref(), Some("fwdbtn") | Some("backbtn"))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Image reference attached to catalog albums and artists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// Artist reference embedded in track and album records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

/// Simplified album embedded in a catalog track
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogAlbum {
    pub id: Option<String>,
    pub name: Option<String>,
    pub album_type: Option<String>,
    pub release_date: Option<String>,
    pub total_tracks: Option<u32>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

/// Full track object from the `/v1/tracks` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogTrack {
    pub id: String,
    pub name: Option<String>,
    pub popularity: Option<u32>,
    pub duration_ms: Option<u64>,
    pub explicit: Option<bool>,
    pub track_number: Option<u32>,
    #[serde(default)]
    pub album: Option<CatalogAlbum>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Followers {
    #[serde(default)]
    pub total: u64,
}

/// Full artist object from the `/v1/artists` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogArtist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub popularity: Option<u32>,
    #[serde(default)]
    pub followers: Option<Followers>,
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Response structure for the token exchange
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub expires_in: Option<u64>,
}

/// Response structure for the several-tracks call; unknown ids come back as `null`
#[derive(Debug, Deserialize)]
pub struct TracksResponse {
    #[serde(default)]
    pub tracks: Vec<Option<CatalogTrack>>,
}

/// Response structure for the several-artists call
#[derive(Debug, Deserialize)]
pub struct ArtistsResponse {
    #[serde(default)]
    pub artists: Vec<Option<CatalogArtist>>,
}
