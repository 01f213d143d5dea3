//! Preview pipeline.
//!
//! Request handler -> admission queue -> single worker -> completion handle.
//! - `handler`: validate + normalize, build a work item, enqueue, await
//! - `deferred`: single-assignment completion handle (first writer wins)
//! - `queue`: unbounded FIFO drained by exactly one worker task
//! - `reply`: maps the terminal outcome to an HTTP response

pub mod deferred;
pub mod handler;
pub mod params;
pub mod queue;
pub mod reply;

pub use deferred::{Completer, Deferred, Outcome};
pub use params::PreviewParams;
pub use queue::{PreviewQueue, WorkItem};
