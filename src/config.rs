use serde::Deserialize;

use crate::services::sessions::{DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL_SECS};

/// Where recommendation entities come from
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// External recommendation API at `api_base_url`
    #[default]
    Live,
    /// Bundled in-memory fixtures, no network access
    Mock,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the external recommendation API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Key used to sign the session cookie
    #[serde(default = "default_secret_key")]
    pub secret_key: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of recommendations per page
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    #[serde(default)]
    pub data_source: DataSource,

    /// Directory holding `index.html` and the shell's assets
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Seconds a session stays valid after creation
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Upper bound on sessions held in memory
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_secret_key() -> String {
    "default_secret_key".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_per_page() -> usize {
    3
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_session_ttl_secs() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            secret_key: default_secret_key(),
            host: default_host(),
            port: default_port(),
            per_page: default_per_page(),
            data_source: DataSource::default(),
            static_dir: default_static_dir(),
            session_ttl_secs: default_session_ttl_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_is_empty() {
        let config: Config = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.per_page, 3);
        assert_eq!(config.data_source, DataSource::Live);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert_eq!(config.session_ttl_secs, 86_400);
        assert_eq!(config.max_sessions, 10_000);
    }

    #[test]
    fn test_overrides_from_env() {
        let vars = vec![
            ("API_BASE_URL".to_string(), "http://recs.internal:8080".to_string()),
            ("DATA_SOURCE".to_string(), "mock".to_string()),
            ("PER_PAGE".to_string(), "5".to_string()),
            ("MAX_SESSIONS".to_string(), "50".to_string()),
        ];
        let config: Config = envy::from_iter(vars).unwrap();
        assert_eq!(config.api_base_url, "http://recs.internal:8080");
        assert_eq!(config.data_source, DataSource::Mock);
        assert_eq!(config.per_page, 5);
        assert_eq!(config.max_sessions, 50);
        assert_eq!(config.secret_key, "default_secret_key");
    }
}
