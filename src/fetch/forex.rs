use super::{CachedFetcher, FetchGate, Provider};
use anyhow::Result;
use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const FOREX_RESOURCE: &str = "forex";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// Baseline quotes the mock provider jitters around. The symbol set doubles
/// as the default pair list for the forex widget.
static BASELINE: Lazy<Vec<Quote>> = Lazy::new(|| {
    let quote = |symbol: &str, price: f64, change: f64, change_percent: f64| Quote {
        symbol: symbol.into(),
        price,
        change,
        change_percent,
    };
    vec![
        quote("XAU/USD", 2045.50, 12.30, 0.60),
        quote("BTC/USD", 43250.00, -850.00, -1.93),
        quote("EUR/USD", 1.0875, 0.0025, 0.23),
        quote("GBP/JPY", 185.45, -0.75, -0.40),
        quote("USD/JPY", 149.85, 0.35, 0.23),
        quote("AUD/USD", 0.6745, -0.0015, -0.22),
    ]
});

pub fn known_symbols() -> Vec<String> {
    BASELINE.iter().map(|q| q.symbol.clone()).collect()
}

pub fn baseline_quote(symbol: &str) -> Option<&'static Quote> {
    BASELINE.iter().find(|q| q.symbol == symbol)
}

/// Mock quotes with a ±1% random walk around the baseline. Unknown symbols
/// are silently skipped, matching the degrade-everywhere contract.
pub struct MockForexProvider;

impl Provider<Vec<Quote>> for MockForexProvider {
    fn fetch(&self, query: &str) -> Result<Vec<Quote>> {
        let mut rng = rand::thread_rng();
        let quotes = query
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(baseline_quote)
            .map(|base| {
                let variation = rng.gen_range(-0.01..0.01);
                Quote {
                    symbol: base.symbol.clone(),
                    price: base.price * (1.0 + variation),
                    change: base.change * (1.0 + variation * 0.5),
                    change_percent: base.change_percent * (1.0 + variation * 0.5),
                }
            })
            .collect();
        Ok(quotes)
    }
}

/// Forex deliberately runs the same gate as weather but with rate limiting
/// and caching both disabled: it refreshes on its own short timer instead.
pub fn forex_fetcher(base_dir: &Path) -> CachedFetcher<Vec<Quote>> {
    let gate = FetchGate::new(FOREX_RESOURCE, base_dir, None, None);
    CachedFetcher::new(gate, Box::new(MockForexProvider), Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_returns_requested_symbols_in_order() {
        let quotes = MockForexProvider
            .fetch("EUR/USD, BTC/USD")
            .expect("mock fetch");
        let symbols: Vec<&str> = quotes.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["EUR/USD", "BTC/USD"]);
    }

    #[test]
    fn unknown_symbols_are_skipped() {
        let quotes = MockForexProvider
            .fetch("EUR/USD,NOPE/USD")
            .expect("mock fetch");
        assert_eq!(quotes.len(), 1);
    }

    #[test]
    fn jitter_stays_within_one_percent() {
        let base = baseline_quote("EUR/USD").expect("baseline");
        for _ in 0..50 {
            let quotes = MockForexProvider.fetch("EUR/USD").expect("mock fetch");
            let price = quotes[0].price;
            assert!((price - base.price).abs() <= base.price * 0.0101);
        }
    }
}
