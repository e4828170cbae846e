//! One-shot success notifications carried across a redirect.
//!
//! [`success`] answers a completed update or delete with `303 See Other`
//! and a short-lived cookie holding the message. The next page render
//! extracts it with [`Flash`] and clears the cookie.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Response};
use url::form_urlencoded;

const COOKIE_NAME: &str = "tabula_flash";

/// Seconds a flash survives if the redirect is never followed.
const COOKIE_MAX_AGE: u32 = 60;

/// Show `message` on the next page and navigate to `redirect_to`.
pub fn success(message: &str, redirect_to: &str) -> Response {
    let encoded: String = form_urlencoded::byte_serialize(message.as_bytes()).collect();
    let cookie = format!(
        "{COOKIE_NAME}={encoded}; Path=/; Max-Age={COOKIE_MAX_AGE}; HttpOnly; SameSite=Lax"
    );

    let mut response = StatusCode::SEE_OTHER.into_response();
    let headers = response.headers_mut();
    if let Ok(location) = HeaderValue::from_str(redirect_to) {
        headers.insert(LOCATION, location);
    }
    if let Ok(cookie) = HeaderValue::from_str(&cookie) {
        headers.insert(SET_COOKIE, cookie);
    }
    response
}

/// The pending flash message of the current request, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash(pub Option<String>);

impl Flash {
    pub fn message(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Respond with `body`, expiring the flash cookie if a message was read.
    pub fn respond(&self, body: impl IntoResponse) -> Response {
        (AppendHeaders(self.clear_header()), body).into_response()
    }

    /// Header that expires the flash cookie once its message is shown.
    pub fn clear_header(&self) -> Option<(HeaderName, HeaderValue)> {
        self.0.as_ref().map(|_| {
            (
                SET_COOKIE,
                HeaderValue::from_static("tabula_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax"),
            )
        })
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Flash {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let message = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|header| header.split(';'))
            .find_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                (name == COOKIE_NAME).then(|| decode(value))
            })
            .filter(|message| !message.is_empty());
        Ok(Flash(message))
    }
}

/// Reverse of `byte_serialize`: a lone form-encoded token decodes as a key.
fn decode(value: &str) -> String {
    form_urlencoded::parse(value.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}
