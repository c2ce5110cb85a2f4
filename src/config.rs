use anyhow::{Context, Result};

pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com";

/// Catalog service configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub accounts_url: String,
    pub api_url: String,
}

impl Config {
    /// Build a configuration from any key lookup (the process environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .with_context(|| {
                    format!(
                        "Missing Spotify credentials: set {key} (SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET are required)"
                    )
                })
        };

        let client_id = required("SPOTIFY_CLIENT_ID")?;
        let client_secret = required("SPOTIFY_CLIENT_SECRET")?;
        let accounts_url =
            lookup("SPOTIFY_ACCOUNTS_URL").unwrap_or_else(|| DEFAULT_ACCOUNTS_URL.to_string());
        let api_url = lookup("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Config {
            client_id,
            client_secret,
            accounts_url: accounts_url.trim_end_matches('/').to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    Config::from_lookup(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_loads_credentials_with_default_urls() {
        let config = Config::from_lookup(lookup_from(&[
            ("SPOTIFY_CLIENT_ID", "id"),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.client_id, "id");
        assert_eq!(config.client_secret, "secret");
        assert_eq!(config.accounts_url, DEFAULT_ACCOUNTS_URL);
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("SPOTIFY_CLIENT_ID", "id")])).unwrap_err();
        assert!(err.to_string().contains("SPOTIFY_CLIENT_SECRET"));
    }

    #[test]
    fn test_blank_credentials_are_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("SPOTIFY_CLIENT_ID", "   "),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_url_overrides_drop_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[
            ("SPOTIFY_CLIENT_ID", "id"),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
            ("SPOTIFY_API_URL", "http://localhost:8080/"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:8080");
    }
}
