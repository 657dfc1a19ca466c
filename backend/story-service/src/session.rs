/// Anonymous session identity
///
/// Likes are owned by an opaque per-browser identifier, not an account. The
/// client persists it indefinitely; the server only echoes it back. When a
/// request carries no identifier a fresh one is minted and the request
/// proceeds with an ephemeral session — never an error.
use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

/// Cookie under which the client persists its session identifier
pub const SESSION_COOKIE: &str = "story_session";

/// Header alternative for API clients that do not keep cookies
pub const SESSION_HEADER: &str = "X-Session-Id";

/// Resolved anonymous session for the current request
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Opaque session identifier scoping like ownership
    pub id: String,
    /// True when the identifier was generated for this request and the
    /// client should be handed a cookie to persist it
    pub minted: bool,
}

impl SessionContext {
    /// Build a context for a known identifier. Used by tests to inject
    /// session identities.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            minted: false,
        }
    }

    fn resolve(req: &HttpRequest) -> Self {
        if let Some(id) = req
            .headers()
            .get(SESSION_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return Self::with_id(id);
        }

        if let Some(cookie) = req.cookie(SESSION_COOKIE) {
            let value = cookie.value().trim();
            if !value.is_empty() {
                return Self::with_id(value);
            }
        }

        Self {
            id: Uuid::new_v4().to_string(),
            minted: true,
        }
    }

    /// Cookie handed to the client so a minted identifier survives the
    /// browser session. No expiry or rotation is specified, so the max age
    /// is simply far out.
    pub fn persist_cookie(&self) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, self.id.clone())
            .path("/")
            .max_age(CookieDuration::days(3650))
            .finish()
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::resolve(req)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_resolves_from_header() {
        let req = TestRequest::default()
            .insert_header((SESSION_HEADER, "session-abc"))
            .to_http_request();

        let session = SessionContext::resolve(&req);
        assert_eq!(session.id, "session-abc");
        assert!(!session.minted);
    }

    #[test]
    fn test_resolves_from_cookie() {
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "cookie-xyz"))
            .to_http_request();

        let session = SessionContext::resolve(&req);
        assert_eq!(session.id, "cookie-xyz");
        assert!(!session.minted);
    }

    #[test]
    fn test_header_wins_over_cookie() {
        let req = TestRequest::default()
            .insert_header((SESSION_HEADER, "from-header"))
            .cookie(Cookie::new(SESSION_COOKIE, "from-cookie"))
            .to_http_request();

        assert_eq!(SessionContext::resolve(&req).id, "from-header");
    }

    #[test]
    fn test_mints_when_absent() {
        let req = TestRequest::default().to_http_request();

        let session = SessionContext::resolve(&req);
        assert!(session.minted);
        assert!(Uuid::parse_str(&session.id).is_ok());
    }

    #[test]
    fn test_blank_header_is_treated_as_absent() {
        let req = TestRequest::default()
            .insert_header((SESSION_HEADER, "   "))
            .to_http_request();

        assert!(SessionContext::resolve(&req).minted);
    }

    #[test]
    fn test_persist_cookie_round_trips_id() {
        let session = SessionContext::with_id("keep-me");
        let cookie = session.persist_cookie();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "keep-me");
        assert_eq!(cookie.path(), Some("/"));
    }
}
