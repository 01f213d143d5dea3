//! Single-assignment completion handle.
//!
//! A [`Deferred`] is held by whoever answers the HTTP request; any number of
//! [`Completer`] clones may race to settle it. The first `resolve`/`reject`
//! wins and later attempts return `false`.
//!
//! Escape paths:
//! - timeout: `on_timeout` runs when the wait limit elapses; if it leaves the
//!   handle pending, `HitsError::Timeout` is set
//! - transport error: `on_transport_error` runs when the waiting future is
//!   dropped while still pending (client went away)

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::oneshot;

use hits_core::error::HitsError;

pub type Outcome<T> = Result<T, HitsError>;

type Callback<T> = Box<dyn FnOnce(&Completer<T>) + Send>;
type Slot<T> = Mutex<Option<oneshot::Sender<Outcome<T>>>>;

/// Writing side of a completion handle.
pub struct Completer<T> {
    slot: Arc<Slot<T>>,
}

impl<T> Clone for Completer<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Completer<T> {
    /// Settle with a value. Returns `true` if this call won.
    pub fn resolve(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Settle with an error. Returns `true` if this call won.
    pub fn reject(&self, err: HitsError) -> bool {
        self.settle(Err(err))
    }

    pub fn is_settled(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn settle(&self, outcome: Outcome<T>) -> bool {
        // Taking the sender under the lock is the compare-and-set.
        let tx = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match tx {
            Some(tx) => {
                // Receiver may be gone (caller disconnected); still settled.
                let _ = tx.send(outcome);
                true
            }
            None => false,
        }
    }
}

/// Reading side of a completion handle.
pub struct Deferred<T> {
    completer: Completer<T>,
    rx: oneshot::Receiver<Outcome<T>>,
    timeout: Option<Duration>,
    on_timeout: Option<Callback<T>>,
    on_transport_error: Option<Callback<T>>,
}

impl<T: Send + 'static> Deferred<T> {
    /// `None` waits without limit.
    pub fn new(timeout: Option<Duration>) -> Self {
        let (tx, rx) = oneshot::channel();
        Self {
            completer: Completer {
                slot: Arc::new(Mutex::new(Some(tx))),
            },
            rx,
            timeout,
            on_timeout: None,
            on_transport_error: None,
        }
    }

    pub fn completer(&self) -> Completer<T> {
        self.completer.clone()
    }

    pub fn on_timeout<F>(&mut self, f: F)
    where
        F: FnOnce(&Completer<T>) + Send + 'static,
    {
        self.on_timeout = Some(Box::new(f));
    }

    pub fn on_transport_error<F>(&mut self, f: F)
    where
        F: FnOnce(&Completer<T>) + Send + 'static,
    {
        self.on_transport_error = Some(Box::new(f));
    }

    /// Wait for the terminal outcome.
    ///
    /// Always returns the value that actually won, even when the timeout
    /// and a late `resolve` race.
    pub async fn wait(self) -> Outcome<T> {
        let Deferred {
            completer,
            mut rx,
            timeout,
            on_timeout,
            on_transport_error,
        } = self;

        let mut guard = TransportGuard {
            completer: completer.clone(),
            callback: on_transport_error,
        };

        let received = match timeout {
            Some(limit) => tokio::time::timeout(limit, &mut rx).await.ok(),
            None => Some((&mut rx).await),
        };

        let received = match received {
            Some(r) => r,
            None => {
                if let Some(cb) = on_timeout {
                    cb(&completer);
                }
                completer.reject(HitsError::Timeout);
                // Settled by now, either by us or by whoever beat us.
                rx.await
            }
        };

        guard.disarm();
        received.unwrap_or_else(|_| Err(HitsError::Internal("completion handle dropped".into())))
    }
}

/// Fires the transport-error callback if the wait is abandoned while pending.
struct TransportGuard<T> {
    completer: Completer<T>,
    callback: Option<Callback<T>>,
}

impl<T> TransportGuard<T> {
    fn disarm(&mut self) {
        self.callback = None;
    }
}

impl<T> Drop for TransportGuard<T> {
    fn drop(&mut self) {
        if let Some(cb) = self.callback.take() {
            if !self.completer.is_settled() {
                cb(&self.completer);
            }
        }
    }
}
