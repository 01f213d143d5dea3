//! Renderer seam.
//!
//! The worker loop only knows [`PreviewRenderer`]. The default implementation
//! counts through a [`HitCounter`] and draws with the core badge builder; tests
//! and embedders can plug in anything else.

pub mod badge_renderer;
pub mod counter;

use async_trait::async_trait;
use thiserror::Error;

use crate::preview::PreviewParams;

pub use badge_renderer::BadgePreviewRenderer;
pub use counter::{HitCount, HitCounter, InMemoryHitCounter};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unsupported view: {0}")]
    UnsupportedView(String),
    #[error("renderer failed: {0}")]
    Failed(String),
}

/// Produces the final badge for one admitted request.
///
/// Called by the single preview worker only, so implementations never see
/// concurrent calls from this process.
#[async_trait]
pub trait PreviewRenderer: Send + Sync {
    async fn render(&self, urn: &str, params: &PreviewParams) -> Result<String, RenderError>;
}
