use compost_types::FeedSettings;
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct FeedConfig {
    /// Realtime database base URL; empty keeps the dashboard offline.
    #[serde(default)]
    pub database_url: String,
    /// Show demo readings while the store holds no sensor data.
    #[serde(default = "default_demo_fallback")]
    pub demo_fallback: bool,
}

fn default_demo_fallback() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            feed: FeedConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            demo_fallback: default_demo_fallback(),
        }
    }
}

impl Config {
    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            database_url: self.feed.database_url.trim().to_string(),
            demo_fallback: self.feed.demo_fallback,
        }
    }
}

pub fn load(path: &str) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse(&contents).unwrap_or_else(|e| {
            tracing::warn!("failed to parse config {path}: {e}, using defaults");
            Config::default()
        }),
        Err(e) => {
            tracing::warn!("failed to read config {path}: {e}, using defaults");
            Config::default()
        }
    }
}

pub fn parse(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}
