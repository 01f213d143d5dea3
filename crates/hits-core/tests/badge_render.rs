//! Badge rendering tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hits_core::badge::{error_badge, Badge, Style};

fn attr(svg: &str, name: &str) -> f64 {
    let needle = format!("{name}=\"");
    let start = svg.find(&needle).unwrap() + needle.len();
    let end = start + svg[start..].find('"').unwrap();
    svg[start..end].parse().unwrap()
}

#[test]
fn longer_messages_make_wider_badges() {
    let short = Badge::builder().label("hits").message("1").build();
    let long = Badge::builder().label("hits").message("1 / 1234567").build();
    assert!(attr(&long, "width") > attr(&short, "width"));
}

#[test]
fn logo_width_widens_the_label() {
    let base = Badge::builder()
        .label("hits")
        .message("1")
        .logo(Some("data:image/svg+xml;base64,PHN2Zy8+".into()))
        .build();
    let wide = Badge::builder()
        .label("hits")
        .message("1")
        .logo(Some("data:image/svg+xml;base64,PHN2Zy8+".into()))
        .logo_width(40)
        .build();
    assert!(attr(&wide, "width") > attr(&base, "width"));
}

#[test]
fn invalid_colors_fall_back() {
    let svg = Badge::builder()
        .label("hits")
        .message("1")
        .color("not-a-color")
        .label_color("\"><x")
        .build();
    assert!(svg.contains(r##"fill="#4c1""##));
    assert!(svg.contains(r##"fill="#555""##));
    assert!(!svg.contains("<x"));
}

#[test]
fn error_badge_is_plain_flat() {
    let svg = error_badge("hits", "Service Unavailable", "inactive");
    assert!(svg.contains(">hits</text>"));
    assert!(svg.contains(">Service Unavailable</text>"));
    assert!(svg.contains(r#"height="20""#));
}

#[test]
fn every_style_renders_valid_document() {
    for style in [Style::Flat, Style::FlatSquare, Style::Plastic, Style::ForTheBadge] {
        let svg = Badge::builder().label("hits").message("3").style(style).build();
        assert!(svg.starts_with("<svg"), "{style:?}");
        assert!(svg.ends_with("</svg>"), "{style:?}");
    }
}
