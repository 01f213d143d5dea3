//! SVG badge builder.
//!
//! Produces shields-style badges: a label half and a message half, each with
//! its own colour. Used both for rendered hit counters and for error badges.
//! Building is pure and infallible; unknown colours and styles fall back to
//! defaults rather than failing.

mod color;
mod style;
mod text;

pub use color::resolve_color;
pub use style::Style;

use style::Metrics;
use text::{escape_xml, text_width};

/// Default message colour.
pub const DEFAULT_COLOR: &str = "#4c1";
/// Default label colour.
pub const DEFAULT_LABEL_COLOR: &str = "#555";

const HORIZONTAL_PADDING: f64 = 6.0;
const LOGO_SIZE: u32 = 14;
const LOGO_GAP: f64 = 3.0;

/// Badge description. Start from [`Badge::builder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    label: String,
    message: String,
    color: String,
    label_color: String,
    style: Style,
    links: Vec<String>,
    logo: Option<String>,
    logo_width: u32,
}

impl Default for Badge {
    fn default() -> Self {
        Self {
            label: String::new(),
            message: String::new(),
            color: DEFAULT_COLOR.to_string(),
            label_color: DEFAULT_LABEL_COLOR.to_string(),
            style: Style::Flat,
            links: Vec::new(),
            logo: None,
            logo_width: 0,
        }
    }
}

impl Badge {
    pub fn builder() -> BadgeBuilder {
        BadgeBuilder { badge: Badge::default() }
    }

    /// Render to an SVG document.
    pub fn render(&self) -> String {
        let m = self.style.metrics();
        let label = self.display_text(&self.label, &m);
        let message = self.display_text(&self.message, &m);

        let logo = self.logo.as_deref().filter(|l| l.starts_with("data:"));
        let logo_width = match (logo, self.logo_width) {
            (None, _) => 0,
            (Some(_), 0) => LOGO_SIZE,
            (Some(_), w) => w,
        };
        let logo_span = if logo_width > 0 { f64::from(logo_width) + LOGO_GAP } else { 0.0 };

        let label_text_w = text_width(&label) * m.width_scale;
        let message_text_w = text_width(&message) * m.width_scale;

        let has_label = !label.is_empty() || logo_width > 0;
        let label_w = if has_label {
            (label_text_w + logo_span + 2.0 * m.padding(HORIZONTAL_PADDING)).round()
        } else {
            0.0
        };
        let message_w = (message_text_w + 2.0 * m.padding(HORIZONTAL_PADDING)).round();
        let total_w = label_w + message_w;

        let label_x = logo_span + (label_w - logo_span) / 2.0;
        let message_x = label_w + message_w / 2.0;

        let color = resolve_color(&self.color, DEFAULT_COLOR);
        let label_color = resolve_color(&self.label_color, DEFAULT_LABEL_COLOR);
        let aria = if label.is_empty() {
            escape_xml(&message)
        } else {
            format!("{}: {}", escape_xml(&label), escape_xml(&message))
        };

        let mut svg = String::with_capacity(1024);
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" role="img" aria-label="{aria}"><title>{aria}</title>"#,
            w = total_w,
            h = m.height,
        ));
        if m.gradient {
            svg.push_str(r##"<linearGradient id="s" x2="0" y2="100%"><stop offset="0" stop-color="#bbb" stop-opacity=".1"/><stop offset="1" stop-opacity=".1"/></linearGradient>"##);
        }
        svg.push_str(&format!(
            r##"<clipPath id="r"><rect width="{w}" height="{h}" rx="{rx}" fill="#fff"/></clipPath><g clip-path="url(#r)">"##,
            w = total_w,
            h = m.height,
            rx = m.radius,
        ));
        if has_label {
            svg.push_str(&format!(
                r#"<rect width="{label_w}" height="{h}" fill="{label_color}"/>"#,
                h = m.height
            ));
        }
        svg.push_str(&format!(
            r#"<rect x="{label_w}" width="{message_w}" height="{h}" fill="{color}"/>"#,
            h = m.height
        ));
        if m.gradient {
            svg.push_str(&format!(
                r#"<rect width="{total_w}" height="{h}" fill="url(#s)"/>"#,
                h = m.height
            ));
        }
        svg.push_str("</g>");

        svg.push_str(&format!(
            r##"<g fill="#fff" text-anchor="middle" font-family="Verdana,Geneva,DejaVu Sans,sans-serif" text-rendering="geometricPrecision" font-size="{fs}"{weight}>"##,
            fs = m.font_size,
            weight = if m.bold { r#" font-weight="bold""# } else { "" },
        ));
        if let Some(logo) = logo {
            let y = (f64::from(m.height) - f64::from(LOGO_SIZE)) / 2.0;
            svg.push_str(&format!(
                r#"<image x="{x}" y="{y}" width="{logo_width}" height="{LOGO_SIZE}" xlink:href="{href}"/>"#,
                x = m.padding(HORIZONTAL_PADDING),
                href = escape_xml(logo),
            ));
        }
        if !label.is_empty() {
            push_text(&mut svg, &m, label_x, &label);
        }
        push_text(&mut svg, &m, message_x, &message);
        svg.push_str("</g>");

        // shields convention: first link covers the label, second the message.
        if let Some(href) = self.links.first() {
            let width = if self.links.len() > 1 { label_w } else { total_w };
            push_link(&mut svg, href, 0.0, width, m.height);
        }
        if let Some(href) = self.links.get(1) {
            push_link(&mut svg, href, label_w, message_w, m.height);
        }

        svg.push_str("</svg>");
        svg
    }

    fn display_text(&self, s: &str, m: &Metrics) -> String {
        if m.uppercase {
            s.to_uppercase()
        } else {
            s.to_string()
        }
    }
}

fn push_text(svg: &mut String, m: &Metrics, x: f64, text: &str) {
    let escaped = escape_xml(text);
    if m.gradient {
        svg.push_str(&format!(
            r##"<text x="{x}" y="{y}" fill="#010101" fill-opacity=".3">{escaped}</text>"##,
            y = m.text_y + 1.0,
        ));
    }
    svg.push_str(&format!(r#"<text x="{x}" y="{y}">{escaped}</text>"#, y = m.text_y));
}

fn push_link(svg: &mut String, href: &str, x: f64, width: f64, height: u32) {
    svg.push_str(&format!(
        r#"<a target="_blank" xlink:href="{href}"><rect x="{x}" width="{width}" height="{height}" fill="rgba(0,0,0,0)"/></a>"#,
        href = escape_xml(href),
    ));
}

/// Fluent builder mirroring the query parameters a badge request carries.
#[derive(Debug, Clone)]
pub struct BadgeBuilder {
    badge: Badge,
}

impl BadgeBuilder {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.badge.label = label.into();
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.badge.message = message.into();
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.badge.color = color.into();
        self
    }

    pub fn label_color(mut self, color: impl Into<String>) -> Self {
        self.badge.label_color = color.into();
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.badge.style = style;
        self
    }

    pub fn links(mut self, links: impl IntoIterator<Item = String>) -> Self {
        self.badge.links = links.into_iter().collect();
        self
    }

    /// Only `data:` URIs are embedded; other values are ignored at render time.
    pub fn logo(mut self, logo: Option<String>) -> Self {
        self.badge.logo = logo;
        self
    }

    pub fn logo_width(mut self, width: u32) -> Self {
        self.badge.logo_width = width;
        self
    }

    /// Render the configured badge.
    pub fn build(self) -> String {
        self.badge.render()
    }
}

/// Build an error badge. Pure and infallible.
pub fn error_badge(label: &str, message: &str, color: &str) -> String {
    Badge::builder().label(label).message(message).color(color).build()
}
