use url::form_urlencoded;

use hits_core::badge::{DEFAULT_COLOR, DEFAULT_LABEL_COLOR};
use hits_core::error::{HitsError, Result};

/// Rendering parameters carried by one preview request.
///
/// Every field is optional on the wire; empty values fall back to the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewParams {
    pub view: String,
    pub style: String,
    pub label: String,
    pub color: String,
    pub label_color: String,
    pub links: Vec<String>,
    pub logo: Option<String>,
    pub logo_width: u32,
    pub extra_count: Option<i64>,
}

impl Default for PreviewParams {
    fn default() -> Self {
        Self {
            view: "total".into(),
            style: "flat".into(),
            label: "hits".into(),
            color: DEFAULT_COLOR.into(),
            label_color: DEFAULT_LABEL_COLOR.into(),
            links: Vec::new(),
            logo: None,
            logo_width: 0,
            extra_count: None,
        }
    }
}

impl PreviewParams {
    /// Parse a raw (still encoded) query string. `link` may repeat.
    pub fn from_query(query: Option<&str>) -> Result<Self> {
        let mut p = Self::default();
        let Some(query) = query else {
            return Ok(p);
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "view" => p.view = value.into_owned(),
                "style" => p.style = value.into_owned(),
                "label" => p.label = value.into_owned(),
                "color" => p.color = value.into_owned(),
                "labelColor" => p.label_color = value.into_owned(),
                "link" => p.links.push(value.into_owned()),
                "logo" => p.logo = Some(value.into_owned()),
                "logoWidth" => {
                    // Signed on the wire; negative widths mean "no extra width".
                    let width: i32 = value
                        .trim()
                        .parse()
                        .map_err(|_| HitsError::BadRequest("Invalid logoWidth".into()))?;
                    p.logo_width = width.max(0).unsigned_abs();
                }
                "extraCount" => {
                    p.extra_count = Some(
                        value
                            .trim()
                            .parse()
                            .map_err(|_| HitsError::BadRequest("Invalid extraCount".into()))?,
                    )
                }
                _ => {}
            }
        }
        Ok(p)
    }
}
