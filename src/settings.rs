use crate::theme::ThemePreference;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    #[serde(default)]
    pub theme: ThemePreference,
    /// City passed to the weather fetcher.
    #[serde(default = "default_weather_city")]
    pub weather_city: String,
    /// OpenWeatherMap API key. When absent the mock provider is used.
    #[serde(default)]
    pub weather_api_key: Option<String>,
    /// Minutes between automatic weather refreshes.
    #[serde(default = "default_weather_refresh_mins")]
    pub weather_refresh_mins: f32,
    /// Minutes a fetched weather report stays fresh in the cache.
    #[serde(default = "default_weather_cache_mins")]
    pub weather_cache_mins: f32,
    /// Upstream weather calls allowed per calendar day.
    #[serde(default = "default_weather_daily_limit")]
    pub weather_daily_limit: u32,
    /// Seconds between automatic forex refreshes.
    #[serde(default = "default_forex_refresh_secs")]
    pub forex_refresh_secs: f32,
    /// Enable toast notifications in the UI.
    #[serde(default = "default_toasts")]
    pub enable_toasts: bool,
    /// Duration of toast notifications in seconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: f32,
    /// Last known window size. If absent, a default size is used.
    #[serde(default)]
    pub window_size: Option<(f32, f32)>,
    #[serde(default)]
    pub widget_settings: HashMap<String, serde_json::Value>,
}

fn default_weather_city() -> String {
    "Nazaré,PT".into()
}

fn default_weather_refresh_mins() -> f32 {
    20.0
}

fn default_weather_cache_mins() -> f32 {
    15.0
}

fn default_weather_daily_limit() -> u32 {
    900
}

fn default_forex_refresh_secs() -> f32 {
    30.0
}

fn default_toasts() -> bool {
    true
}

fn default_toast_duration() -> f32 {
    3.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            theme: ThemePreference::default(),
            weather_city: default_weather_city(),
            weather_api_key: None,
            weather_refresh_mins: default_weather_refresh_mins(),
            weather_cache_mins: default_weather_cache_mins(),
            weather_daily_limit: default_weather_daily_limit(),
            forex_refresh_secs: default_forex_refresh_secs(),
            enable_toasts: true,
            toast_duration: default_toast_duration(),
            window_size: None,
            widget_settings: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Directory holding all persisted state (settings, snapshots, call tracking).
pub fn config_dir() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("homeboard")
}

pub fn settings_path() -> PathBuf {
    config_dir().join(SETTINGS_FILE)
}
