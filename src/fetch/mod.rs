use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod forex;
pub mod weather;

/// Narrow contract implemented by upstream data sources. The rest of the
/// system only ever sees this trait, never a concrete provider.
pub trait Provider<T>: Send {
    fn fetch(&self, query: &str) -> Result<T>;
}

/// Per-resource upstream call tracking for the current calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RateLimitRecord {
    pub count: u32,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub payload: T,
    pub timestamp_ms: i64,
}

/// Today as a date string. The day boundary is the local calendar date, not
/// elapsed time: crossing midnight resets the counter immediately.
pub fn today_string() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Call counts used so far today, and what is left of the daily budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub used: u32,
    pub remaining: Option<u32>,
    pub limit: Option<u32>,
}

/// Bounds upstream calls per calendar day and serves cached payloads within a
/// freshness window. Both the call record and the cache entry persist as their
/// own JSON files, best-effort: missing or corrupt data is empty state.
///
/// `daily_limit: None` disables rate limiting; `freshness: None` disables
/// caching (the resource re-fetches on every request).
pub struct FetchGate<T> {
    calls_path: PathBuf,
    cache_path: PathBuf,
    daily_limit: Option<u32>,
    freshness: Option<Duration>,
    calls: RateLimitRecord,
    cache: Option<CacheEntry<T>>,
}

impl<T: Serialize + DeserializeOwned + Clone> FetchGate<T> {
    pub fn new(
        name: &str,
        base_dir: &Path,
        daily_limit: Option<u32>,
        freshness: Option<Duration>,
    ) -> Self {
        let calls_path = base_dir.join(format!("{name}_calls.json"));
        let cache_path = base_dir.join(format!("{name}_cache.json"));
        let calls = read_json(&calls_path).unwrap_or_default();
        let cache = if freshness.is_some() {
            read_json(&cache_path)
        } else {
            None
        };
        Self {
            calls_path,
            cache_path,
            daily_limit,
            freshness,
            calls,
            cache,
        }
    }

    pub fn can_call(&self, today: &str) -> bool {
        match self.daily_limit {
            None => true,
            // A stale date means the counter resets on the next recorded call.
            Some(limit) => self.calls.date != today || self.calls.count < limit,
        }
    }

    pub fn record_call(&mut self, today: &str) {
        if self.calls.date != today {
            self.calls = RateLimitRecord {
                count: 0,
                date: today.to_string(),
            };
        }
        self.calls.count += 1;
        write_json(&self.calls_path, &self.calls);
    }

    pub fn usage(&self, today: &str) -> Usage {
        let used = if self.calls.date == today {
            self.calls.count
        } else {
            0
        };
        Usage {
            used,
            remaining: self.daily_limit.map(|limit| limit.saturating_sub(used)),
            limit: self.daily_limit,
        }
    }

    /// Cached payload, only while still inside the freshness window. Cache
    /// reads never count against the daily limit.
    pub fn get(&self, now_ms: i64) -> Option<T> {
        let window = self.freshness?;
        let entry = self.cache.as_ref()?;
        if now_ms.saturating_sub(entry.timestamp_ms) < window.as_millis() as i64 {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    pub fn put(&mut self, payload: T, now_ms: i64) {
        if self.freshness.is_none() {
            return;
        }
        let entry = CacheEntry {
            payload,
            timestamp_ms: now_ms,
        };
        write_json(&self.cache_path, &entry);
        self.cache = Some(entry);
    }
}

fn read_json<V: DeserializeOwned>(path: &Path) -> Option<V> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("ignoring corrupt state file {}: {err}", path.display());
            None
        }
    }
}

fn write_json<V: Serialize>(path: &Path, value: &V) {
    let json = match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!("failed to serialize {}: {err}", path.display());
            return;
        }
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(err) = std::fs::write(path, json) {
        tracing::warn!("failed to persist {}: {err}", path.display());
    }
}

/// Where a served payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    Upstream,
    Cache,
    /// Rate limit exhausted or upstream failed; the payload is the resource's
    /// sentinel value.
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub payload: T,
    pub source: FetchSource,
}

/// A [`FetchGate`] combined with a pluggable provider and a sentinel payload
/// for the degraded path. Callers always receive a payload, never an error.
pub struct CachedFetcher<T> {
    gate: FetchGate<T>,
    provider: Box<dyn Provider<T>>,
    fallback: T,
}

impl<T: Serialize + DeserializeOwned + Clone> CachedFetcher<T> {
    pub fn new(gate: FetchGate<T>, provider: Box<dyn Provider<T>>, fallback: T) -> Self {
        Self {
            gate,
            provider,
            fallback,
        }
    }

    pub fn fetch(&mut self, query: &str) -> Fetched<T> {
        self.fetch_at(query, now_millis(), &today_string())
    }

    pub fn fetch_at(&mut self, query: &str, now_ms: i64, today: &str) -> Fetched<T> {
        if let Some(payload) = self.gate.get(now_ms) {
            return Fetched {
                payload,
                source: FetchSource::Cache,
            };
        }
        if !self.gate.can_call(today) {
            tracing::warn!("daily call limit reached, serving fallback payload");
            return Fetched {
                payload: self.fallback.clone(),
                source: FetchSource::Fallback,
            };
        }
        match self.provider.fetch(query) {
            Ok(payload) => {
                // The call is recorded before caching so a write failure can
                // never under-count upstream traffic.
                self.gate.record_call(today);
                self.gate.put(payload.clone(), now_ms);
                Fetched {
                    payload,
                    source: FetchSource::Upstream,
                }
            }
            Err(err) => {
                tracing::warn!("upstream fetch failed: {err}");
                Fetched {
                    payload: self.fallback.clone(),
                    source: FetchSource::Fallback,
                }
            }
        }
    }

    pub fn usage(&self) -> Usage {
        self.gate.usage(&today_string())
    }
}
