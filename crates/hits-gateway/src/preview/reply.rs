//! Outcome -> HTTP response mapping.
//!
//! Every non-redirect outcome carries an SVG body, so logical errors still
//! render as a badge (label `hits`, colour `inactive`).

use axum::{
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE, EXPIRES, LOCATION},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};

use hits_core::badge::error_badge;
use hits_core::error::{ClientCode, HitsError};

use super::deferred::Outcome;

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml;charset=UTF-8";
const NO_CACHE: &str = "no-cache, no-store, must-revalidate";
const EPOCH_HTTP_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

const ERROR_LABEL: &str = "hits";
const ERROR_COLOR: &str = "inactive";

pub struct PreviewReply {
    outcome: Outcome<String>,
    no_cache: bool,
}

impl PreviewReply {
    /// `no_cache` is set once a request passed admission; the headers then
    /// apply to whatever outcome it ends with.
    pub fn new(outcome: Outcome<String>, no_cache: bool) -> Self {
        Self { outcome, no_cache }
    }
}

pub fn status_for(err: &HitsError) -> StatusCode {
    match err.client_code() {
        ClientCode::BadRequest => StatusCode::BAD_REQUEST,
        ClientCode::UriTooLong => StatusCode::URI_TOO_LONG,
        ClientCode::Redirect => StatusCode::MOVED_PERMANENTLY,
        ClientCode::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        ClientCode::Timeout | ClientCode::UnsupportedVersion | ClientCode::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for PreviewReply {
    fn into_response(self) -> Response {
        let mut resp = match self.outcome {
            Ok(svg) => (StatusCode::OK, [(CONTENT_TYPE, SVG_CONTENT_TYPE)], svg).into_response(),
            Err(HitsError::Redirect { location }) => {
                (StatusCode::MOVED_PERMANENTLY, [(LOCATION, location)]).into_response()
            }
            Err(e) => {
                let status = status_for(&e);
                let message = match e {
                    HitsError::BadRequest(msg) => msg,
                    _ => status.canonical_reason().unwrap_or("Error").to_string(),
                };
                let body = error_badge(ERROR_LABEL, &message, ERROR_COLOR);
                (status, [(CONTENT_TYPE, SVG_CONTENT_TYPE)], body).into_response()
            }
        };

        if self.no_cache {
            let headers = resp.headers_mut();
            headers.insert(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
            headers.insert(EXPIRES, HeaderValue::from_static(EPOCH_HTTP_DATE));
        }
        resp
    }
}
