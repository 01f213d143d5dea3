//! Admission queue + the single preview worker.
//!
//! Producers (request handlers) never block: the channel is unbounded, so
//! admission trades memory under overload for handler simplicity. Exactly one
//! worker task drains it, which serializes every renderer call.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures_util::FutureExt;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::Instrument;

use hits_core::error::{HitsError, Result};

use super::deferred::Completer;
use super::params::PreviewParams;
use crate::obs::HitsMetrics;
use crate::render::PreviewRenderer;

/// One admitted preview request. Owned by the queue, then by the worker.
pub struct WorkItem {
    pub urn: String,
    pub params: PreviewParams,
    pub completer: Completer<String>,
}

impl WorkItem {
    pub fn new(urn: String, params: PreviewParams, completer: Completer<String>) -> Self {
        Self {
            urn,
            params,
            completer,
        }
    }
}

/// Producer handle. Cheap to clone; every clone feeds the same worker.
#[derive(Clone)]
pub struct PreviewQueue {
    tx: mpsc::UnboundedSender<WorkItem>,
    shutdown: Arc<watch::Sender<bool>>,
    metrics: Arc<HitsMetrics>,
}

impl PreviewQueue {
    /// Spawn the worker and return the producer handle plus the worker task.
    pub fn start(
        renderer: Arc<dyn PreviewRenderer>,
        metrics: Arc<HitsMetrics>,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let worker = tokio::spawn(
            run_worker(rx, shutdown_rx, renderer, Arc::clone(&metrics))
                .instrument(tracing::info_span!("preview_worker")),
        );

        let queue = Self {
            tx,
            shutdown: Arc::new(shutdown_tx),
            metrics,
        };
        (queue, worker)
    }

    /// Hand an item to the worker without blocking.
    ///
    /// If the worker is gone the item is rejected here, so its handle is
    /// still settled exactly once.
    pub fn enqueue(&self, item: WorkItem) -> Result<()> {
        self.metrics.queue_depth.inc(&[]);
        if let Err(mpsc::error::SendError(item)) = self.tx.send(item) {
            self.metrics.queue_depth.dec(&[]);
            let err = HitsError::BackendUnavailable("preview worker stopped".into());
            item.completer.reject(err.clone());
            return Err(err);
        }
        Ok(())
    }

    /// Ask the worker to stop. Items still queued are rejected.
    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }
}

async fn run_worker(
    mut rx: mpsc::UnboundedReceiver<WorkItem>,
    mut shutdown: watch::Receiver<bool>,
    renderer: Arc<dyn PreviewRenderer>,
    metrics: Arc<HitsMetrics>,
) {
    tracing::info!("preview worker started");

    loop {
        let item = tokio::select! {
            biased;
            // Err means every queue handle is gone, which is a shutdown too.
            _ = shutdown.changed() => break,
            next = rx.recv() => match next {
                Some(item) => item,
                None => break,
            },
        };
        metrics.queue_depth.dec(&[]);
        process(item, renderer.as_ref(), &metrics).await;
    }

    rx.close();
    let mut dropped = 0usize;
    while let Ok(item) = rx.try_recv() {
        metrics.queue_depth.dec(&[]);
        item.completer
            .reject(HitsError::BackendUnavailable("preview worker shutting down".into()));
        dropped += 1;
    }

    tracing::info!(dropped, "preview worker stopped");
}

async fn process(item: WorkItem, renderer: &dyn PreviewRenderer, metrics: &HitsMetrics) {
    let WorkItem {
        urn,
        params,
        completer,
    } = item;

    let started = Instant::now();
    let rendered = AssertUnwindSafe(renderer.render(&urn, &params))
        .catch_unwind()
        .await;
    metrics.render_duration.observe(&[], started.elapsed());

    let outcome = match rendered {
        Ok(Ok(svg)) if !svg.is_empty() => Ok(svg),
        Ok(Ok(_)) => Err("renderer returned empty output".to_string()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("renderer panicked".to_string()),
    };

    let won = match outcome {
        Ok(svg) => completer.resolve(svg),
        Err(reason) => {
            tracing::warn!(%urn, %reason, "preview render failed");
            metrics.render_failures.inc(&[]);
            completer.reject(HitsError::BackendUnavailable(reason))
        }
    };

    if won {
        tracing::debug!(%urn, "preview completed");
    } else {
        tracing::debug!(%urn, "late preview result discarded");
        metrics.late_results.inc(&[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::Deferred;
    use crate::render::RenderError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records call order; fails or panics on request.
    #[derive(Default)]
    struct Scripted {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PreviewRenderer for Scripted {
        async fn render(&self, urn: &str, _params: &PreviewParams) -> std::result::Result<String, RenderError> {
            self.calls.lock().unwrap().push(urn.to_string());
            match urn {
                "fail" => Err(RenderError::Failed("boom".into())),
                "panic" => panic!("renderer exploded"),
                "empty" => Ok(String::new()),
                "slow" => {
                    tokio::time::sleep(Duration::from_secs(11)).await;
                    Ok("<svg>slow</svg>".into())
                }
                _ => Ok(format!("<svg>{urn}</svg>")),
            }
        }
    }

    fn admit(queue: &PreviewQueue, urn: &str, timeout: Option<Duration>) -> Deferred<String> {
        let d = Deferred::new(timeout);
        queue
            .enqueue(WorkItem::new(urn.into(), PreviewParams::default(), d.completer()))
            .unwrap();
        d
    }

    #[tokio::test]
    async fn failures_do_not_stop_the_worker() {
        let renderer = Arc::new(Scripted::default());
        let metrics = Arc::new(HitsMetrics::default());
        let (queue, _worker) = PreviewQueue::start(renderer.clone(), Arc::clone(&metrics));

        let names = ["a", "fail", "panic", "empty", "b"];
        let waits: Vec<_> = names.iter().map(|n| admit(&queue, n, None)).collect();

        let mut outcomes = Vec::new();
        for w in waits {
            outcomes.push(w.wait().await);
        }

        assert_eq!(outcomes[0], Ok("<svg>a</svg>".to_string()));
        for o in &outcomes[1..4] {
            assert!(matches!(o, Err(HitsError::BackendUnavailable(_))));
        }
        assert_eq!(outcomes[4], Ok("<svg>b</svg>".to_string()));

        assert_eq!(*renderer.calls.lock().unwrap(), names);
        assert_eq!(metrics.render_failures.get(&[]), 3);
        assert_eq!(metrics.queue_depth.get(&[]), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_render_times_out_and_late_result_is_discarded() {
        let renderer = Arc::new(Scripted::default());
        let metrics = Arc::new(HitsMetrics::default());
        let (queue, _worker) = PreviewQueue::start(renderer, Arc::clone(&metrics));

        let slow = admit(&queue, "slow", Some(Duration::from_secs(10)));
        let next = admit(&queue, "next", Some(Duration::from_secs(30)));

        assert_eq!(slow.wait().await, Err(HitsError::Timeout));
        assert_eq!(next.wait().await, Ok("<svg>next</svg>".to_string()));
        assert_eq!(metrics.late_results.get(&[]), 1);
    }

    #[tokio::test]
    async fn shutdown_rejects_and_stops() {
        let renderer = Arc::new(Scripted::default());
        let metrics = Arc::new(HitsMetrics::default());
        let (queue, worker) = PreviewQueue::start(renderer, metrics);

        queue.shutdown();
        worker.await.unwrap();

        let d: Deferred<String> = Deferred::new(None);
        let err = queue
            .enqueue(WorkItem::new("a".into(), PreviewParams::default(), d.completer()))
            .unwrap_err();
        assert!(matches!(err, HitsError::BackendUnavailable(_)));
        assert!(matches!(d.wait().await, Err(HitsError::BackendUnavailable(_))));
    }
}
