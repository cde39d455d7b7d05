//! Shared test helpers: a scripted in-process upstream.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use locality_cache::{CacheError, Config, GeocodeCache, LocalityFetcher, LocalityResult, Result};

/// What the scripted upstream answers for a coordinate pair.
#[derive(Debug, Clone)]
pub enum Reply {
    Found(String),
    NotFound,
    Fail(CacheError),
    /// The lookup task dies without an answer
    Panic,
}

/// One recorded upstream call.
#[derive(Debug, Clone)]
pub struct Call {
    pub latitude: f64,
    pub longitude: f64,
    pub started_at: Instant,
}

/// Upstream stand-in that records calls and answers from a script.
///
/// Unscripted coordinates resolve to `place_<lat>_<lon>`.
pub struct ScriptedFetcher {
    delay: Duration,
    replies: Mutex<HashMap<(i64, i64), Reply>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedFetcher {
    pub fn new() -> Arc<Self> {
        Self::with_delay(Duration::ZERO)
    }

    /// Every call takes `delay` before answering.
    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn script(&self, latitude: f64, longitude: f64, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .insert(slot(latitude, longitude), reply);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LocalityFetcher for ScriptedFetcher {
    async fn fetch_locality(&self, latitude: f64, longitude: f64) -> Result<Option<LocalityResult>> {
        self.calls.lock().unwrap().push(Call {
            latitude,
            longitude,
            started_at: Instant::now(),
        });

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get(&slot(latitude, longitude))
            .cloned();

        match reply {
            Some(Reply::Found(name)) => Ok(Some(LocalityResult::new(name, latitude, longitude))),
            Some(Reply::NotFound) => Ok(None),
            Some(Reply::Fail(err)) => Err(err),
            Some(Reply::Panic) => panic!("scripted upstream crash at {},{}", latitude, longitude),
            None => Ok(Some(LocalityResult::new(
                default_name(latitude, longitude),
                latitude,
                longitude,
            ))),
        }
    }
}

pub fn default_name(latitude: f64, longitude: f64) -> String {
    format!("place_{}_{}", latitude, longitude)
}

fn slot(latitude: f64, longitude: f64) -> (i64, i64) {
    (
        (latitude * 1000.0).round() as i64,
        (longitude * 1000.0).round() as i64,
    )
}

/// Config with the given bounds and three-digit keys.
pub fn config(capacity: usize, ttl_ms: u64, min_interval_ms: u64) -> Config {
    Config {
        capacity,
        ttl_ms,
        min_interval_ms,
        coordinate_precision: 3,
        ..Config::default()
    }
}

pub fn cache_with(config: &Config, fetcher: &Arc<ScriptedFetcher>) -> GeocodeCache {
    GeocodeCache::new(config, fetcher.clone())
}
