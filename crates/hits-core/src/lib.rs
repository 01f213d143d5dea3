//! hits core: transport-agnostic primitives, error types, and the badge builder.
//!
//! This crate defines the identifier normalization rules and the error surface
//! shared by the gateway and its tests. It intentionally carries no transport or
//! runtime dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Normalization and badge rendering are total: malformed input yields a
//! canonical (possibly empty) string or a fallback colour, never a crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod badge;
pub mod error;
pub mod urn;

/// Shared result type.
pub use error::{ClientCode, HitsError, Result};
