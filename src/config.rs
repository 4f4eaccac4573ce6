use serde::Deserialize;
use std::time::Duration;

/// Default request timeout applied when `SCORING_API_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Backend root, without trailing slash. Endpoints live under `<base>/api`.
    pub scoring_api_url: String,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Loads configuration from the process environment (and `.env`, if present).
    ///
    /// There is no fallback host: a missing `SCORING_API_URL` is a startup error.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_lookup(|key| std::env::var(key).ok())?;

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Scoring API URL: {}", config.scoring_api_url);
        tracing::debug!("Request timeout: {}s", config.request_timeout_secs);

        Ok(config)
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scoring_api_url = lookup("SCORING_API_URL")
            .or_else(|| lookup("VITE_API_URL"))
            .ok_or_else(|| {
                anyhow::anyhow!("SCORING_API_URL or VITE_API_URL environment variable required")
            })
            .and_then(|url| {
                let url = url.trim();
                if url.is_empty() {
                    anyhow::bail!("SCORING_API_URL cannot be empty");
                }
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    anyhow::bail!("SCORING_API_URL must start with http:// or https://");
                }
                url::Url::parse(url)
                    .map_err(|e| anyhow::anyhow!("SCORING_API_URL is not a valid URL: {}", e))?;
                Ok(url.trim_end_matches('/').to_string())
            })?;

        let request_timeout_secs = match lookup("SCORING_API_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    anyhow::anyhow!("SCORING_API_TIMEOUT_SECS must be a positive number of seconds")
                })?,
            _ => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            scoring_api_url,
            request_timeout_secs,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_missing_url_fails_fast() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("SCORING_API_URL"));
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = Config::from_lookup(lookup_from(&[("SCORING_API_URL", "  ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_url_scheme_required() {
        let result = Config::from_lookup(lookup_from(&[("SCORING_API_URL", "api.example.com")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_trailing_slash_stripped_and_default_timeout() {
        let config =
            Config::from_lookup(lookup_from(&[("SCORING_API_URL", "https://scoring.example.com/")]))
                .unwrap();
        assert_eq!(config.scoring_api_url, "https://scoring.example.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_vite_alias_accepted() {
        let config =
            Config::from_lookup(lookup_from(&[("VITE_API_URL", "http://localhost:8000")])).unwrap();
        assert_eq!(config.scoring_api_url, "http://localhost:8000");
    }

    #[test]
    fn test_primary_variable_wins_over_alias() {
        let config = Config::from_lookup(lookup_from(&[
            ("SCORING_API_URL", "https://primary.example.com"),
            ("VITE_API_URL", "https://alias.example.com"),
        ]))
        .unwrap();
        assert_eq!(config.scoring_api_url, "https://primary.example.com");
    }

    #[test]
    fn test_timeout_parsing() {
        let config = Config::from_lookup(lookup_from(&[
            ("SCORING_API_URL", "https://scoring.example.com"),
            ("SCORING_API_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.request_timeout_secs, 5);

        for bad in ["0", "-3", "soon"] {
            let result = Config::from_lookup(lookup_from(&[
                ("SCORING_API_URL", "https://scoring.example.com"),
                ("SCORING_API_TIMEOUT_SECS", bad),
            ]));
            assert!(result.is_err(), "timeout {:?} should be rejected", bad);
        }
    }
}
