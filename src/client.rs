use crate::config::Config;
use crate::models::{ArtistsResponse, CatalogArtist, CatalogTrack, TokenResponse, TracksResponse};
use anyhow::{Context, Result};
use ureq::Agent;

/// Largest number of ids the several-items endpoints accept in one call
pub const MAX_IDS_PER_REQUEST: usize = 50;

/// Lookup seam over the catalog service, one batch of ids per call
#[cfg_attr(test, mockall::automock)]
pub trait CatalogSource {
    /// Fetch up to 50 tracks; ids unknown to the catalog come back as `None`
    fn fetch_tracks(&self, ids: &[String]) -> Result<Vec<Option<CatalogTrack>>>;

    /// Fetch up to 50 artists; ids unknown to the catalog come back as `None`
    fn fetch_artists(&self, ids: &[String]) -> Result<Vec<Option<CatalogArtist>>>;
}

/// A minimal Spotify Web API client using the client-credentials flow
pub struct SpotifyClient {
    agent: Agent,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    /// Exchange the configured credentials for a bearer token and build a client
    pub fn connect(config: &Config) -> Result<Self> {
        let agent = Agent::new();
        let access_token = Self::request_token(&agent, config)?;

        Ok(SpotifyClient {
            agent,
            api_url: config.api_url.clone(),
            access_token,
        })
    }

    fn request_token(agent: &Agent, config: &Config) -> Result<String> {
        let url = format!("{}/api/token", config.accounts_url);

        let response = agent
            .post(&url)
            .send_form(&[
                ("grant_type", "client_credentials"),
                ("client_id", config.client_id.as_str()),
                ("client_secret", config.client_secret.as_str()),
            ])
            .map_err(|e| anyhow::anyhow!("Token request failed: {}", e))?;

        let token: TokenResponse = response
            .into_json()
            .context("Failed to parse token response")?;

        Ok(token.access_token)
    }

    /// Issue one several-items GET and return the raw response text
    fn get_batch(&self, endpoint: &str, ids: &[String]) -> Result<String> {
        if ids.len() > MAX_IDS_PER_REQUEST {
            return Err(anyhow::anyhow!(
                "Batch of {} ids exceeds the {} id limit",
                ids.len(),
                MAX_IDS_PER_REQUEST
            ));
        }

        let url = format!("{}/v1/{}", self.api_url, endpoint);

        let response = self
            .agent
            .get(&url)
            .query("ids", &ids.join(","))
            .set("Authorization", &format!("Bearer {}", self.access_token))
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => {
                    anyhow::anyhow!("Error fetching {}: {}", endpoint, code)
                }
                other => anyhow::anyhow!("HTTP request for {} failed: {}", endpoint, other),
            })?;

        Ok(response.into_string()?)
    }
}

impl CatalogSource for SpotifyClient {
    fn fetch_tracks(&self, ids: &[String]) -> Result<Vec<Option<CatalogTrack>>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let response_text = self.get_batch("tracks", ids)?;
        let parsed: TracksResponse = serde_json::from_str(&response_text)
            .map_err(|e| anyhow::anyhow!("Failed to parse tracks response: {}", e))?;

        Ok(parsed.tracks)
    }

    fn fetch_artists(&self, ids: &[String]) -> Result<Vec<Option<CatalogArtist>>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let response_text = self.get_batch("artists", ids)?;
        let parsed: ArtistsResponse = serde_json::from_str(&response_text)
            .map_err(|e| anyhow::anyhow!("Failed to parse artists response: {}", e))?;

        Ok(parsed.artists)
    }
}
