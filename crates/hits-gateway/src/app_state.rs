//! Shared application state for the hits gateway.
//!
//! Owns the validated config, the producer side of the preview queue, and the
//! metrics registry. Building the state spawns the single preview worker, so
//! it must be called inside a Tokio runtime.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use hits_core::error::Result;

use crate::config::HitsConfig;
use crate::obs::HitsMetrics;
use crate::preview::PreviewQueue;
use crate::render::{BadgePreviewRenderer, InMemoryHitCounter, PreviewRenderer};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    queue: PreviewQueue,
    metrics: Arc<HitsMetrics>,
}

struct AppStateInner {
    cfg: HitsConfig,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl AppState {
    /// Build application state around a renderer.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: HitsConfig, renderer: Arc<dyn PreviewRenderer>) -> Result<Self> {
        cfg.validate()?;

        let metrics = Arc::new(HitsMetrics::default());
        let (queue, worker) = PreviewQueue::start(renderer, Arc::clone(&metrics));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                worker: Mutex::new(Some(worker)),
            }),
            queue,
            metrics,
        })
    }

    /// State with the built-in badge renderer over an in-memory counter.
    pub fn with_default_renderer(cfg: HitsConfig) -> Result<Self> {
        let counter = Arc::new(InMemoryHitCounter::new());
        Self::new(cfg, Arc::new(BadgePreviewRenderer::new(counter)))
    }

    pub fn cfg(&self) -> &HitsConfig {
        &self.inner.cfg
    }

    pub fn queue(&self) -> &PreviewQueue {
        &self.queue
    }

    pub fn metrics(&self) -> Arc<HitsMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Stop the worker and wait for it to drain. Idempotent.
    pub async fn shutdown(&self) {
        self.queue.shutdown();
        let worker = self.inner.worker.lock().await.take();
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                tracing::warn!(error = %e, "preview worker ended abnormally");
            }
        }
    }
}
