//! Top-level facade crate for hits.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use hits_core::*;
}

pub mod gateway {
    pub use hits_gateway::*;
}
