use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use axum_extra::extract::CookieJar;

/// Decides whether a request carries a usable session. Real validation lives
/// with the auth provider; implementations only need the request headers.
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn has_session(&self, headers: &HeaderMap) -> bool;
}

/// Accepts a non-empty session cookie or bearer token without validating it.
#[derive(Debug, Clone)]
pub struct CookieSessionVerifier {
    cookie_name: String,
}

impl CookieSessionVerifier {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }

    fn has_session_cookie(&self, headers: &HeaderMap) -> bool {
        let jar = CookieJar::from_headers(headers);
        jar.get(&self.cookie_name)
            .filter(|cookie| !cookie.value().trim().is_empty())
            .is_some()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
}

#[async_trait]
impl SessionVerifier for CookieSessionVerifier {
    async fn has_session(&self, headers: &HeaderMap) -> bool {
        let bearer = bearer_token(headers).filter(|token| !token.is_empty());
        self.has_session_cookie(headers) || bearer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(header::HeaderName, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_static(*value));
        }
        map
    }

    #[tokio::test]
    async fn finds_named_cookie_among_others() {
        let verifier = CookieSessionVerifier::new("sb-access-token");
        let with_cookie = headers(&[(header::COOKIE, "theme=dark; sb-access-token=eyJhbGci")]);
        assert!(verifier.has_session(&with_cookie).await);

        let split_headers = headers(&[
            (header::COOKIE, "theme=dark"),
            (header::COOKIE, "sb-access-token=eyJhbGci"),
        ]);
        assert!(verifier.has_session(&split_headers).await);
    }

    #[tokio::test]
    async fn rejects_missing_or_empty_credentials() {
        let verifier = CookieSessionVerifier::new("sb-access-token");
        assert!(!verifier.has_session(&HeaderMap::new()).await);
        assert!(
            !verifier
                .has_session(&headers(&[(header::COOKIE, "sb-access-token=")]))
                .await
        );
        assert!(
            !verifier
                .has_session(&headers(&[(header::COOKIE, "sb-refresh-token=abc")]))
                .await
        );
        assert!(
            !verifier
                .has_session(&headers(&[(
                    header::COOKIE,
                    "sb-access-token-legacy=abc; theme=dark"
                )]))
                .await
        );
        assert!(
            !verifier
                .has_session(&headers(&[(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")]))
                .await
        );
    }

    #[tokio::test]
    async fn accepts_bearer_tokens() {
        let verifier = CookieSessionVerifier::new("sb-access-token");
        let bearer = headers(&[(header::AUTHORIZATION, "Bearer eyJhbGci")]);
        assert!(verifier.has_session(&bearer).await);
    }
}
