use anyhow::Result;
use homeboard::fetch::{CachedFetcher, FetchGate, FetchSource, Provider};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

const MINUTE_MS: i64 = 60 * 1000;

/// Provider that hands out 1, 2, 3, … so tests can tell fetches apart.
#[derive(Default)]
struct SequenceProvider {
    next: AtomicU32,
}

impl Provider<u32> for SequenceProvider {
    fn fetch(&self, _query: &str) -> Result<u32> {
        Ok(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

struct FailingProvider;

impl Provider<u32> for FailingProvider {
    fn fetch(&self, _query: &str) -> Result<u32> {
        anyhow::bail!("upstream is down")
    }
}

fn weather_like_fetcher(dir: &std::path::Path, limit: u32) -> CachedFetcher<u32> {
    let gate = FetchGate::new(
        "res",
        dir,
        Some(limit),
        Some(Duration::from_secs(15 * 60)),
    );
    CachedFetcher::new(gate, Box::<SequenceProvider>::default(), 0)
}

#[test]
fn payload_is_served_unchanged_inside_the_window_and_refetched_after() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut fetcher = weather_like_fetcher(dir.path(), 900);

    let first = fetcher.fetch_at("q", 0, "2026-08-04");
    assert_eq!(first.source, FetchSource::Upstream);
    assert_eq!(first.payload, 1);

    let within = fetcher.fetch_at("q", 14 * MINUTE_MS, "2026-08-04");
    assert_eq!(within.source, FetchSource::Cache);
    assert_eq!(within.payload, 1);

    let beyond = fetcher.fetch_at("q", 16 * MINUTE_MS, "2026-08-04");
    assert_eq!(beyond.source, FetchSource::Upstream);
    assert_eq!(beyond.payload, 2);
}

#[test]
fn cache_reads_never_count_against_the_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut fetcher = weather_like_fetcher(dir.path(), 900);

    fetcher.fetch_at("q", 0, "2026-08-04");
    for minute in 1..10 {
        fetcher.fetch_at("q", minute * MINUTE_MS, "2026-08-04");
    }
    // A fresh gate over the same files sees exactly one recorded call.
    let gate = FetchGate::<u32>::new("res", dir.path(), Some(900), None);
    assert_eq!(gate.usage("2026-08-04").used, 1);
    assert_eq!(gate.usage("2026-08-04").remaining, Some(899));
}

#[test]
fn exhausted_limit_serves_the_sentinel_until_the_date_changes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut fetcher = weather_like_fetcher(dir.path(), 1);

    let first = fetcher.fetch_at("q", 0, "2026-08-04");
    assert_eq!(first.source, FetchSource::Upstream);

    // Past the freshness window with the budget spent: sentinel, no error.
    let starved = fetcher.fetch_at("q", 20 * MINUTE_MS, "2026-08-04");
    assert_eq!(starved.source, FetchSource::Fallback);
    assert_eq!(starved.payload, 0);

    // Midnight rolls the date string over and the budget returns, even
    // though far less than 24 hours have elapsed.
    let next_day = fetcher.fetch_at("q", 40 * MINUTE_MS, "2026-08-05");
    assert_eq!(next_day.source, FetchSource::Upstream);
}

#[test]
fn provider_failure_degrades_to_the_sentinel() {
    let dir = tempfile::tempdir().expect("tempdir");
    let gate = FetchGate::new("res", dir.path(), None, None);
    let mut fetcher = CachedFetcher::new(gate, Box::new(FailingProvider), 7);

    let out = fetcher.fetch_at("q", 0, "2026-08-04");
    assert_eq!(out.source, FetchSource::Fallback);
    assert_eq!(out.payload, 7);
}

#[test]
fn windowless_unlimited_gate_refetches_every_time() {
    let dir = tempfile::tempdir().expect("tempdir");
    let gate = FetchGate::new("res", dir.path(), None, None);
    let mut fetcher = CachedFetcher::new(gate, Box::<SequenceProvider>::default(), 0);

    for expected in 1..=5 {
        let out = fetcher.fetch_at("q", 0, "2026-08-04");
        assert_eq!(out.source, FetchSource::Upstream);
        assert_eq!(out.payload, expected);
    }
}
