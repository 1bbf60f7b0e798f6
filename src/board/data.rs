use crate::fetch::forex::{forex_fetcher, Quote};
use crate::fetch::weather::{weather_fetcher, WeatherReport};
use crate::fetch::{CachedFetcher, FetchSource, Fetched, Usage};
use crate::settings::Settings;
use std::path::Path;
use std::sync::Mutex;

/// Owns the rate-limited fetchers and hands widgets a narrow read surface.
/// Constructed once at startup and passed by handle; there is no ambient
/// global state.
pub struct DataHub {
    weather: Mutex<CachedFetcher<WeatherReport>>,
    forex: Mutex<CachedFetcher<Vec<Quote>>>,
}

impl DataHub {
    pub fn new(base_dir: &Path, settings: &Settings) -> Self {
        Self {
            weather: Mutex::new(weather_fetcher(base_dir, settings)),
            forex: Mutex::new(forex_fetcher(base_dir)),
        }
    }

    pub fn weather(&self, city: &str) -> Fetched<WeatherReport> {
        match self.weather.lock() {
            Ok(mut fetcher) => fetcher.fetch(city),
            Err(_) => Fetched {
                payload: WeatherReport::unavailable(),
                source: FetchSource::Fallback,
            },
        }
    }

    pub fn weather_usage(&self) -> Usage {
        self.weather
            .lock()
            .map(|fetcher| fetcher.usage())
            .unwrap_or(Usage {
                used: 0,
                remaining: None,
                limit: None,
            })
    }

    pub fn forex(&self, symbols: &[String]) -> Vec<Quote> {
        let query = symbols.join(",");
        self.forex
            .lock()
            .map(|mut fetcher| fetcher.fetch(&query).payload)
            .unwrap_or_default()
    }
}
