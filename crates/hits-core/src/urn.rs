//! Resource name normalization.
//!
//! A URN names the counted resource. It is derived from the decoded request
//! path (with the `.preview` suffix already stripped) and is always:
//! - lower-case ASCII drawn from `[a-z0-9._~/-]`
//! - free of URL schemes, empty segments, and `.` / `..` segments
//! - idempotent: `normalize(normalize(p)) == normalize(p)`

/// Suffix marking a preview request.
pub const PREVIEW_SUFFIX: &str = ".preview";

const SCHEMES: [&str; 2] = ["https://", "http://"];

/// Normalize a raw path fragment into a canonical URN.
///
/// Total: characters outside the allowed set are dropped, so unparseable
/// input collapses to an empty string instead of failing.
pub fn normalize(raw: &str) -> String {
    let mut s = raw.trim().to_ascii_lowercase().replace('\\', "/");

    // Strip leading slashes before looking for a scheme: "/https://a" -> "a".
    loop {
        let trimmed = s.trim_start_matches('/');
        match SCHEMES.iter().find(|p| trimmed.starts_with(*p)) {
            Some(p) => s = trimmed[p.len()..].to_string(),
            None => break,
        }
    }

    let kept: String = s.chars().filter(|c| is_allowed(*c)).collect();

    kept.split('/')
        .filter(|seg| !seg.is_empty() && *seg != "." && *seg != "..")
        .collect::<Vec<_>>()
        .join("/")
}

/// Canonical request path for a URN: `/{urn}.preview`.
pub fn expected_path(urn: &str) -> String {
    format!("/{urn}{PREVIEW_SUFFIX}")
}

/// Split a decoded request path at the *last* `.preview` occurrence.
///
/// Returns `None` when the suffix is absent.
pub fn strip_preview_suffix(path: &str) -> Option<&str> {
    path.rfind(PREVIEW_SUFFIX).map(|idx| &path[..idx])
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.' | '~' | '/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_for_canonical_input() {
        assert_eq!(normalize("foo/bar"), "foo/bar");
        assert_eq!(normalize("/foo/bar"), "foo/bar");
    }

    #[test]
    fn lowercases_and_strips_scheme() {
        assert_eq!(normalize("/Foo"), "foo");
        assert_eq!(normalize("/https://GitHub.com/silentsoft/hits"), "github.com/silentsoft/hits");
        assert_eq!(normalize("http://http://a"), "a");
    }

    #[test]
    fn collapses_segments() {
        assert_eq!(normalize("//a///b/./c/../"), "a/b/c");
        assert_eq!(normalize("a\\b"), "a/b");
    }

    #[test]
    fn drops_disallowed_characters() {
        assert_eq!(normalize("a b?c#d"), "abcd");
        assert_eq!(normalize("héllo"), "hllo");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn strips_last_suffix_occurrence() {
        assert_eq!(strip_preview_suffix("/a.preview/b.preview"), Some("/a.preview/b"));
        assert_eq!(strip_preview_suffix("/.preview"), Some("/"));
        assert_eq!(strip_preview_suffix("/plain"), None);
    }

    #[test]
    fn expected_path_roundtrip() {
        assert_eq!(expected_path("foo/bar"), "/foo/bar.preview");
        assert_eq!(expected_path(""), "/.preview");
    }
}
