//! Configuration management for the client.

use reqwest::Url;
use std::env;
use std::path::PathBuf;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the catalog API, always ending in `/`
    pub api_url: Url,
    /// Directory holding the persisted cache
    pub cache_dir: PathBuf,
    /// Image hosts served through the optimized path
    pub image_hosts: Vec<String>,
}

impl ClientConfig {
    /// Load `.env` if present, then read the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = parse_api_url(
            &env::var("API_URL").unwrap_or_else(|_| "http://localhost:3000/".to_string()),
        )?;

        let cache_dir = env::var("CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".catalog-cache"));

        let image_hosts = env::var("IMAGE_HOSTS")
            .map(|hosts| parse_hosts(&hosts))
            .unwrap_or_else(|_| default_image_hosts());

        Ok(Self {
            api_url,
            cache_dir,
            image_hosts,
        })
    }
}

/// Parse a base URL, adding the trailing slash relative joins rely on.
pub fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw).map_err(|_| ConfigError::InvalidApiUrl(raw.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidApiUrl(raw.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_hosts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|h| h.trim().to_lowercase())
        .filter(|h| !h.is_empty())
        .collect()
}

fn default_image_hosts() -> Vec<String> {
    vec!["localhost".to_string(), "picsum.photos".to_string()]
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API_URL value: {0}")]
    InvalidApiUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_gets_trailing_slash() {
        let url = parse_api_url("http://localhost:3000/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/");

        let url = parse_api_url("http://localhost:3000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/");
    }

    #[test]
    fn rejects_bad_api_url() {
        assert!(parse_api_url("not a url").is_err());
        assert!(parse_api_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn hosts_are_trimmed_and_lowercased() {
        assert_eq!(
            parse_hosts(" LocalHost, picsum.photos ,,"),
            vec!["localhost", "picsum.photos"]
        );
    }
}
