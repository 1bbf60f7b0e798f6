use super::{CachedFetcher, FetchGate, Provider};
use crate::settings::Settings;
use anyhow::{bail, Context, Result};
use rand::Rng;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const WEATHER_RESOURCE: &str = "weather";

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature_c: i32,
    pub condition: String,
    pub humidity: u8,
    #[serde(default)]
    pub description: Option<String>,
}

impl WeatherReport {
    /// Sentinel report shown when the daily limit is exhausted or the
    /// upstream fails and no fresh cache exists.
    pub fn unavailable() -> Self {
        Self {
            temperature_c: 18,
            condition: "Data Unavailable".into(),
            humidity: 65,
            description: Some("Daily API limit reached".into()),
        }
    }
}

/// Default provider: plausible made-up weather, no network.
pub struct MockWeatherProvider;

impl Provider<WeatherReport> for MockWeatherProvider {
    fn fetch(&self, _query: &str) -> Result<WeatherReport> {
        let mut rng = rand::thread_rng();
        let conditions = ["Sunny", "Partly Cloudy", "Cloudy"];
        Ok(WeatherReport {
            temperature_c: rng.gen_range(15..25),
            condition: conditions[rng.gen_range(0..conditions.len())].into(),
            humidity: rng.gen_range(50..80),
            description: None,
        })
    }
}

/// OpenWeatherMap-backed provider, used only when an API key is configured.
pub struct HttpWeatherProvider {
    client: Client,
    api_key: String,
}

impl HttpWeatherProvider {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent("homeboard weather")
            .timeout(HTTP_TIMEOUT)
            .build()?;
        Ok(Self { client, api_key })
    }
}

impl Provider<WeatherReport> for HttpWeatherProvider {
    fn fetch(&self, city: &str) -> Result<WeatherReport> {
        let url = format!(
            "{OPENWEATHER_URL}?q={city}&appid={}&units=metric",
            self.api_key
        );
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            bail!("weather API request failed: {}", response.status());
        }
        let body: serde_json::Value = serde_json::from_str(&response.text()?)?;
        let temperature = body["main"]["temp"]
            .as_f64()
            .context("weather response missing main.temp")?;
        let humidity = body["main"]["humidity"]
            .as_f64()
            .context("weather response missing main.humidity")?;
        let condition = body["weather"][0]["main"]
            .as_str()
            .context("weather response missing weather[0].main")?;
        Ok(WeatherReport {
            temperature_c: temperature.round() as i32,
            condition: condition.to_string(),
            humidity: humidity.round() as u8,
            description: body["weather"][0]["description"]
                .as_str()
                .map(str::to_string),
        })
    }
}

/// Build the weather fetcher from settings: 900 calls/day and a 15 minute
/// freshness window by default, mock provider unless an API key is set.
pub fn weather_fetcher(base_dir: &Path, settings: &Settings) -> CachedFetcher<WeatherReport> {
    let gate = FetchGate::new(
        WEATHER_RESOURCE,
        base_dir,
        Some(settings.weather_daily_limit),
        Some(Duration::from_secs_f32(
            settings.weather_cache_mins.max(0.0) * 60.0,
        )),
    );
    let provider: Box<dyn Provider<WeatherReport>> = match settings.weather_api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => match HttpWeatherProvider::new(key.to_string()) {
            Ok(provider) => Box::new(provider),
            Err(err) => {
                tracing::warn!("failed to build HTTP weather client, using mock data: {err}");
                Box::new(MockWeatherProvider)
            }
        },
        _ => Box::new(MockWeatherProvider),
    };
    CachedFetcher::new(gate, provider, WeatherReport::unavailable())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_reports_are_in_range() {
        for _ in 0..50 {
            let report = MockWeatherProvider.fetch("Nazaré,PT").expect("mock fetch");
            assert!((15..25).contains(&report.temperature_c));
            assert!((50..80).contains(&report.humidity));
        }
    }

    #[test]
    fn sentinel_is_flagged_as_unavailable() {
        let report = WeatherReport::unavailable();
        assert_eq!(report.condition, "Data Unavailable");
    }
}
