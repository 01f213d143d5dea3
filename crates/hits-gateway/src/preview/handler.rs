//! Preview request handler.
//!
//! `GET /{path}.preview?view&style&label&color&labelColor&link&logo&logoWidth&extraCount`
//!
//! Flow per request:
//! 1) decode the path, strip the last `.preview`, normalize into a URN
//! 2) non-canonical path -> redirect (the worker never sees it)
//! 3) empty URN -> 400, oversized URN -> 414
//! 4) otherwise enqueue a work item and await its completion handle

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;

use hits_core::error::{HitsError, Result};
use hits_core::urn::{expected_path, normalize, strip_preview_suffix, PREVIEW_SUFFIX};

use super::deferred::Deferred;
use super::params::PreviewParams;
use super::queue::WorkItem;
use super::reply::PreviewReply;
use crate::app_state::AppState;

pub async fn preview(State(app): State<AppState>, uri: Uri) -> Response {
    let decoded = decode_path(uri.path());
    if !is_preview_path(&decoded) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let preview_cfg = &app.cfg().preview;
    let mut deferred: Deferred<String> = Deferred::new(Some(preview_cfg.timeout()));
    deferred.on_timeout(|c| {
        c.reject(HitsError::Timeout);
    });
    deferred.on_transport_error(|c| {
        c.reject(HitsError::BackendUnavailable("transport error".into()));
    });
    let completer = deferred.completer();

    let mut no_cache = false;
    let admitted = PreviewParams::from_query(uri.query())
        .and_then(|params| Ok((admit(&decoded, preview_cfg.max_urn_len)?, params)));

    match admitted {
        Ok((urn, params)) => {
            tracing::debug!(%urn, "preview admitted");
            no_cache = true;
            if let Err(e) = app.queue().enqueue(WorkItem::new(urn, params, completer)) {
                tracing::warn!(error = %e, "preview enqueue failed");
            }
        }
        Err(e) => {
            tracing::debug!(path = %decoded, error = %e, "preview rejected at admission");
            completer.reject(e);
        }
    }

    let outcome = deferred.wait().await;
    let code = match &outcome {
        Ok(_) => "OK",
        Err(e) => e.client_code().as_str(),
    };
    app.metrics().preview_outcomes.inc(&[("code", code)]);

    PreviewReply::new(outcome, no_cache).into_response()
}

/// Validate a decoded request path and return its URN.
///
/// The path must equal `/{urn}.preview` byte for byte; otherwise the caller
/// is redirected to that canonical form.
pub fn admit(decoded_path: &str, max_urn_len: usize) -> Result<String> {
    let raw = strip_preview_suffix(decoded_path).unwrap_or(decoded_path);
    let urn = normalize(raw);

    let expected = expected_path(&urn);
    if expected != decoded_path {
        return Err(HitsError::Redirect { location: expected });
    }
    if urn.is_empty() {
        return Err(HitsError::BadRequest("Not a valid URI".into()));
    }
    // URNs are ASCII, so bytes == characters.
    if urn.len() > max_urn_len {
        return Err(HitsError::UriTooLong);
    }
    Ok(urn)
}

/// Only paths ending in `.preview` are badge requests.
pub fn is_preview_path(decoded_path: &str) -> bool {
    decoded_path.ends_with(PREVIEW_SUFFIX)
}

/// Form-style decoding: `+` is a space, then percent escapes (lossy UTF-8).
pub fn decode_path(path: &str) -> String {
    let spaced = path.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_path_is_admitted() {
        assert_eq!(admit("/foo/bar.preview", 250), Ok("foo/bar".to_string()));
    }

    #[test]
    fn non_canonical_path_redirects() {
        assert_eq!(
            admit("/Foo.preview", 250),
            Err(HitsError::Redirect {
                location: "/foo.preview".into()
            })
        );
    }

    #[test]
    fn empty_urn_is_bad_request() {
        assert_eq!(
            admit("/.preview", 250),
            Err(HitsError::BadRequest("Not a valid URI".into()))
        );
    }

    #[test]
    fn length_limit_is_inclusive() {
        let ok = "a".repeat(250);
        assert_eq!(admit(&format!("/{ok}.preview"), 250), Ok(ok));

        let long = "a".repeat(251);
        assert_eq!(admit(&format!("/{long}.preview"), 250), Err(HitsError::UriTooLong));
    }

    #[test]
    fn redirect_wins_over_length_check() {
        let long = "A".repeat(300);
        assert!(matches!(
            admit(&format!("/{long}.preview"), 250),
            Err(HitsError::Redirect { .. })
        ));
    }

    #[test]
    fn only_trailing_suffix_is_a_preview_path() {
        assert!(is_preview_path("/foo.preview"));
        assert!(is_preview_path("/a.preview/b.preview"));
        assert!(!is_preview_path("/x.preview/foo"));
        assert!(!is_preview_path("/foo.previewX"));
        assert!(!is_preview_path("/foo.preview.png"));
    }

    #[test]
    fn decodes_plus_and_percent() {
        assert_eq!(decode_path("/a+b%2Fc.preview"), "/a b/c.preview");
        assert_eq!(decode_path("/%E2%9C%93.preview"), "/\u{2713}.preview");
        assert_eq!(decode_path("/%FF.preview"), "/\u{FFFD}.preview");
    }
}
