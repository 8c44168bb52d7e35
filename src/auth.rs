//! Session-backed admin authentication.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use subtle::ConstantTimeEq;

use crate::services::{Envelope, ServiceError};

/// Identity stored in the session once the admin token was accepted.
pub const ADMIN_IDENTITY: &str = "admin";

/// Extractor that only succeeds for requests carrying the admin session.
///
/// Requests without it are answered with `401` and a failed envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminUser;

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req
            .get_identity()
            .ok()
            .and_then(|identity| identity.id().ok());

        match identity.as_deref() {
            Some(ADMIN_IDENTITY) => ready(Ok(AdminUser)),
            _ => ready(Err(unauthorized())),
        }
    }
}

/// Compares the submitted token with the configured one in constant time.
pub fn token_matches(expected: &str, submitted: &str) -> bool {
    !expected.is_empty() && bool::from(expected.as_bytes().ct_eq(submitted.as_bytes()))
}

fn unauthorized() -> actix_web::Error {
    let response =
        HttpResponse::Unauthorized().json(Envelope::<()>::failed(ServiceError::Unauthorized));
    InternalError::from_response(ServiceError::Unauthorized, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_matches_exact_value_only() {
        assert!(token_matches("s3cret", "s3cret"));
        assert!(!token_matches("s3cret", "s3cret "));
        assert!(!token_matches("s3cret", "S3CRET"));
        assert!(!token_matches("s3cret", ""));
    }

    #[test]
    fn empty_expected_token_never_matches() {
        assert!(!token_matches("", ""));
    }
}
