use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use dashmap::DashMap;

use super::RenderError;

const SECS_PER_DAY: u64 = 86_400;

/// Counts after recording one hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitCount {
    pub today: u64,
    pub total: u64,
}

/// Counting backend. Records one hit and returns the updated counts.
#[async_trait]
pub trait HitCounter: Send + Sync {
    async fn increment(&self, urn: &str) -> Result<HitCount, RenderError>;
}

#[derive(Debug, Default)]
struct Counts {
    day: u64,
    today: u64,
    total: u64,
}

/// Process-local counter. Days roll over at UTC midnight.
#[derive(Default)]
pub struct InMemoryHitCounter {
    counts: DashMap<String, Counts>,
}

impl InMemoryHitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_at(&self, urn: &str, now: SystemTime) -> HitCount {
        let day = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() / SECS_PER_DAY)
            .unwrap_or(0);

        let mut entry = self.counts.entry(urn.to_string()).or_default();
        if entry.day != day {
            entry.day = day;
            entry.today = 0;
        }
        entry.today += 1;
        entry.total += 1;

        HitCount {
            today: entry.today,
            total: entry.total,
        }
    }
}

#[async_trait]
impl HitCounter for InMemoryHitCounter {
    async fn increment(&self, urn: &str) -> Result<HitCount, RenderError> {
        Ok(self.increment_at(urn, SystemTime::now()))
    }
}
