//! Colour resolution: shields named colours, aliases, and hex values.

const NAMED: [(&str, &str); 14] = [
    ("brightgreen", "#4c1"),
    ("green", "#97ca00"),
    ("yellowgreen", "#a4a61d"),
    ("yellow", "#dfb317"),
    ("orange", "#fe7d37"),
    ("red", "#e05d44"),
    ("blue", "#007ec6"),
    ("grey", "#555"),
    ("gray", "#555"),
    ("lightgrey", "#9f9f9f"),
    ("lightgray", "#9f9f9f"),
    ("inactive", "#9f9f9f"),
    ("blueviolet", "#8a2be2"),
    ("black", "#000"),
];

const ALIASES: [(&str, &str); 5] = [
    ("success", "brightgreen"),
    ("important", "orange"),
    ("critical", "red"),
    ("informational", "blue"),
    ("white", "#fff"),
];

/// Resolve a colour parameter to an SVG fill value.
///
/// Accepts named colours, semantic aliases, and 3/6 digit hex with or without
/// a leading `#`. Anything else resolves to `fallback`.
pub fn resolve_color(input: &str, fallback: &str) -> String {
    let c = input.trim().to_ascii_lowercase();

    let c = ALIASES
        .iter()
        .find(|(k, _)| *k == c)
        .map(|(_, v)| v.to_string())
        .unwrap_or(c);

    if let Some((_, hex)) = NAMED.iter().find(|(k, _)| *k == c) {
        return (*hex).to_string();
    }

    let digits = c.strip_prefix('#').unwrap_or(c.as_str());
    if matches!(digits.len(), 3 | 6) && digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return format!("#{digits}");
    }

    fallback.to_string()
}
