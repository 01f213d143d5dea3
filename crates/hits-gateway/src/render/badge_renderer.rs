use std::sync::Arc;

use async_trait::async_trait;
use hits_core::badge::{Badge, Style};

use super::{HitCounter, PreviewRenderer, RenderError};
use crate::preview::PreviewParams;

/// Default renderer: record a hit, then draw the counter badge.
pub struct BadgePreviewRenderer {
    counter: Arc<dyn HitCounter>,
}

impl BadgePreviewRenderer {
    pub fn new(counter: Arc<dyn HitCounter>) -> Self {
        Self { counter }
    }
}

#[async_trait]
impl PreviewRenderer for BadgePreviewRenderer {
    async fn render(&self, urn: &str, params: &PreviewParams) -> Result<String, RenderError> {
        // Reject unknown views before counting so a bad request does not count.
        let view = View::parse(&params.view)?;
        let count = self.counter.increment(urn).await?;

        let extra = params.extra_count.unwrap_or(0);
        let total = add_signed(count.total, extra);
        let message = match view {
            View::Total => total.to_string(),
            View::Today => count.today.to_string(),
            View::TodayTotal => format!("{} / {}", count.today, total),
        };

        Ok(Badge::builder()
            .label(params.label.as_str())
            .message(message)
            .color(params.color.as_str())
            .label_color(params.label_color.as_str())
            .style(Style::parse(&params.style))
            .links(params.links.iter().cloned())
            .logo(params.logo.clone())
            .logo_width(params.logo_width)
            .build())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Total,
    Today,
    TodayTotal,
}

impl View {
    fn parse(s: &str) -> Result<Self, RenderError> {
        match s {
            "total" => Ok(View::Total),
            "today" => Ok(View::Today),
            "today/total" | "today-total" => Ok(View::TodayTotal),
            other => Err(RenderError::UnsupportedView(other.to_string())),
        }
    }
}

fn add_signed(base: u64, delta: i64) -> u64 {
    if delta >= 0 {
        base.saturating_add(delta.unsigned_abs())
    } else {
        base.saturating_sub(delta.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::InMemoryHitCounter;

    fn renderer() -> BadgePreviewRenderer {
        BadgePreviewRenderer::new(Arc::new(InMemoryHitCounter::new()))
    }

    #[tokio::test]
    async fn total_view_counts_up() {
        let r = renderer();
        let p = PreviewParams::default();
        r.render("a", &p).await.unwrap();
        let svg = r.render("a", &p).await.unwrap();
        assert!(svg.contains(">2</text>"));
        assert!(svg.contains(">hits</text>"));
    }

    #[tokio::test]
    async fn today_total_view_with_extra_count() {
        let r = renderer();
        let p = PreviewParams {
            view: "today/total".into(),
            extra_count: Some(100),
            ..PreviewParams::default()
        };
        let svg = r.render("a", &p).await.unwrap();
        assert!(svg.contains(">1 / 101</text>"));
    }

    #[tokio::test]
    async fn unknown_view_fails_without_counting() {
        let r = renderer();
        let bad = PreviewParams {
            view: "weekly".into(),
            ..PreviewParams::default()
        };
        assert!(matches!(r.render("a", &bad).await, Err(RenderError::UnsupportedView(_))));

        let svg = r.render("a", &PreviewParams::default()).await.unwrap();
        assert!(svg.contains(">1</text>"));
    }

    #[test]
    fn negative_extra_saturates() {
        assert_eq!(add_signed(3, -10), 0);
        assert_eq!(add_signed(3, 4), 7);
    }
}
