//! hits gateway library entry.
//!
//! This crate wires config, the preview pipeline (admission queue, single
//! worker, completion handles), the default renderer, and metrics into an
//! axum service. It is intended to be consumed by the binary (`main.rs`) and
//! by integration tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod preview;
pub mod render;
pub mod router;
