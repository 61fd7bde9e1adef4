use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;

pub const AUTH_COOKIE: &str = "auth_token";

/// The caller's backend session token, if any: `Authorization: Bearer`
/// first, then the `auth_token` cookie. Never validated here; the backend
/// decides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewer(pub Option<String>);

impl Viewer {
    pub fn into_token(self) -> Option<String> {
        self.0
    }
}

fn bearer(parts: &Parts) -> Option<String> {
    let raw = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix("Bearer ").or_else(|| raw.strip_prefix("bearer "))?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(token) = bearer(parts) {
            return Ok(Viewer(Some(token)));
        }
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(AUTH_COOKIE).map(|c| c.value().to_string()).filter(|t| !t.is_empty());
        Ok(Viewer(token))
    }
}
