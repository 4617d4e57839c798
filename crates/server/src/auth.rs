//! Caller token extraction.
//!
//! The dashboard stores the backend session token in the `token` cookie;
//! API clients may send it as a bearer token instead. This layer does NOT
//! verify the token: it only checks that one is present and forwards it to
//! the backend, which is the party that validates it. Anything that trusts
//! `RequireAuth` for authorization decisions of its own needs real signature
//! and expiry checks first.
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;

use crate::error::ApiError;

pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Finds the caller's token, cookie first, then `Authorization: Bearer`.
pub fn verify_auth(headers: &HeaderMap) -> Option<AuthToken> {
    token_from(&CookieJar::from_headers(headers), headers)
}

fn token_from(jar: &CookieJar, headers: &HeaderMap) -> Option<AuthToken> {
    cookie_token(jar)
        .or_else(|| bearer_token(headers))
        .map(AuthToken)
}

fn cookie_token(jar: &CookieJar) -> Option<String> {
    jar.get(TOKEN_COOKIE)
        .map(|cookie| cookie.value_trimmed().trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Auth schemes are case-insensitive, so `bearer` and `BEARER` both match.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim_start().split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

async fn token_from_parts<S>(parts: &mut Parts, state: &S) -> Option<AuthToken>
where
    S: Send + Sync,
{
    let jar = match CookieJar::from_request_parts(parts, state).await {
        Ok(jar) => jar,
        Err(never) => match never {},
    };
    token_from(&jar, &parts.headers)
}

/// Token if the caller sent one.
pub struct MaybeAuth(pub Option<AuthToken>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuth
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(token_from_parts(parts, state).await))
    }
}

/// Rejects the request with 401 when no token is present.
pub struct RequireAuth(pub AuthToken);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        token_from_parts(parts, state)
            .await
            .map(RequireAuth)
            .ok_or(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_token_from_cookie() {
        let map = headers(&[("cookie", "theme=dark; token=abc.def.ghi; lang=vi")]);
        assert_eq!(verify_auth(&map).unwrap().as_str(), "abc.def.ghi");
    }

    #[test]
    fn test_cookie_wins_over_header() {
        let map = headers(&[
            ("authorization", "Bearer from-header"),
            ("cookie", "token=from-cookie"),
        ]);
        assert_eq!(verify_auth(&map).unwrap().as_str(), "from-cookie");
    }

    #[test]
    fn test_token_from_bearer_header() {
        let map = headers(&[("cookie", "token="), ("authorization", "Bearer xyz")]);
        assert_eq!(verify_auth(&map).unwrap().as_str(), "xyz");
    }

    #[test]
    fn test_quoted_cookie_value_is_unquoted() {
        let map = headers(&[("cookie", "token=\"abc.def\"")]);
        assert_eq!(verify_auth(&map).unwrap().as_str(), "abc.def");
    }

    #[test]
    fn test_bearer_scheme_is_case_insensitive() {
        for value in ["bearer xyz", "BEARER xyz", "BeArEr  xyz "] {
            let map = headers(&[("authorization", value)]);
            assert_eq!(verify_auth(&map).unwrap().as_str(), "xyz", "{}", value);
        }
    }

    #[test]
    fn test_missing_or_empty_token() {
        assert!(verify_auth(&HeaderMap::new()).is_none());
        assert!(verify_auth(&headers(&[("authorization", "Bearer   ")])).is_none());
        assert!(verify_auth(&headers(&[("authorization", "Basic dXNlcg==")])).is_none());
        assert!(verify_auth(&headers(&[("authorization", "Bearerxyz")])).is_none());
        assert!(verify_auth(&headers(&[("cookie", "token=\"\"")])).is_none());
        assert!(verify_auth(&headers(&[("cookie", "session=1; tokenx=2")])).is_none());
    }
}
