//! Lightweight in-process metrics.
//!
//! Exposes minimal Prometheus-compatible metrics backed by `DashMap` and
//! atomics, rendered as text by the `/metrics` handler.

pub mod metrics;

pub use metrics::HitsMetrics;
