// src/server/rate_limit.rs
//! Per-client sliding-window throttle.
//!
//! Each client keeps the instants of its accepted requests inside the
//! trailing window. Rejected requests are not recorded. State is
//! process-local and starts empty on every restart.

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<Mutex<HashMap<String, VecDeque<Instant>>>>,
    window: Duration,
    limit: Option<usize>,
}

impl RateLimiter {
    /// `limit` requests per `window`; zero or a negative limit disables throttling.
    pub fn new(limit: i64, window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            window,
            limit: usize::try_from(limit).ok().filter(|limit| *limit > 0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.limit.is_some()
    }

    /// Accepts and records a request from `client`, or rejects it.
    pub fn check_and_record(&self, client: &str) -> bool {
        self.check_and_record_at(client, Instant::now())
    }

    /// As [`check_and_record`](Self::check_and_record), with the clock supplied.
    pub fn check_and_record_at(&self, client: &str, now: Instant) -> bool {
        let Some(limit) = self.limit else {
            return true;
        };

        let mut inner = self.inner.lock();

        let queue = inner.entry(client.to_string()).or_default();
        prune_queue(queue, now, self.window);
        if queue.len() >= limit {
            return false;
        }
        queue.push_back(now);

        inner.retain(|_, events| {
            prune_queue(events, now, self.window);
            !events.is_empty()
        });

        true
    }

    /// Number of clients with requests inside the window.
    pub fn tracked_clients(&self) -> usize {
        self.inner.lock().len()
    }
}

fn prune_queue(queue: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(front) = queue.front() {
        if now.saturating_duration_since(*front) > window {
            queue.pop_front();
        } else {
            break;
        }
    }
}
