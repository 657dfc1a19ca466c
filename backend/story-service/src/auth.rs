/// Admin capability gate
///
/// Admin identity is issued by an external provider; this service only
/// consumes the resulting capability. A caller presenting the configured
/// bearer token is an admin, everyone else is anonymous. Resolution fails
/// closed: missing configuration, a malformed header, or a mismatched token
/// all yield an anonymous caller.
use crate::config::Config;
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

/// The resolved capability of the current caller
#[derive(Debug, Clone)]
pub struct Caller {
    admin: bool,
}

impl Caller {
    pub fn admin() -> Self {
        Self { admin: true }
    }

    pub fn anonymous() -> Self {
        Self { admin: false }
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    fn resolve(req: &HttpRequest) -> Self {
        let Some(config) = req.app_data::<web::Data<Config>>() else {
            return Self::anonymous();
        };

        let expected = config.admin.token.trim();
        if expected.is_empty() {
            return Self::anonymous();
        }

        let presented = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim);

        match presented {
            Some(token) if token == expected => Self::admin(),
            _ => Self::anonymous(),
        }
    }
}

impl FromRequest for Caller {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::resolve(req)))
    }
}
