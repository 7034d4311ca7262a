//! Identity extractors resolving the acting owner of a request.
//!
//! Every request carries up to two identity signals: an `Authorization:
//! Bearer` credential and an `X-Session-Id` header. [`RequestIdentity`]
//! resolves them into at most one [`Owner`]; [`BearerAccount`] is the strict
//! variant for endpoints that require an authenticated account.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::domain::ports::TokenService;
use crate::domain::{AccountId, Error, Owner, SessionToken};
use crate::inbound::http::state::HttpState;

/// Header carrying the client-generated anonymous session token.
pub const SESSION_HEADER: &str = "X-Session-Id";

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

fn session_token(req: &HttpRequest) -> Option<SessionToken> {
    let raw = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())?;
    match SessionToken::new(raw) {
        Ok(token) => Some(token),
        Err(err) => {
            // A malformed session header is demoted to "absent" rather than
            // rejected; the request may still identify via a bearer token.
            warn!(error = %err, "ignoring malformed session header");
            None
        }
    }
}

fn state(req: &HttpRequest) -> Result<&web::Data<HttpState>, Error> {
    req.app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("http state not configured"))
}

fn validated_account(req: &HttpRequest) -> Result<Option<AccountId>, Error> {
    let state = state(req)?;
    Ok(bearer_token(req).and_then(|token| state.tokens.validate(token)))
}

/// The resolved owner of a request, when one could be determined.
///
/// An invalid or expired bearer credential is indistinguishable from no
/// credential at all: the request silently degrades to the session identity
/// (or to unidentified) instead of failing. Callers must not assume a bad
/// token rejects the request.
pub struct RequestIdentity(Option<Owner>);

impl RequestIdentity {
    /// The resolved owner, if any.
    pub fn owner(&self) -> Option<&Owner> {
        self.0.as_ref()
    }

    /// Require a resolved owner, rejecting unidentified requests.
    ///
    /// The error is a validation failure (HTTP 400), distinct from the 401
    /// used where an account credential specifically is mandatory.
    pub fn require(self) -> Result<Owner, Error> {
        self.0.ok_or_else(|| {
            Error::invalid_request("a session token or bearer credential is required")
        })
    }
}

impl FromRequest for RequestIdentity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let resolved = validated_account(req)
            .map(|account| Self(Owner::resolve(account, session_token(req))));
        ready(resolved)
    }
}

/// Extractor for endpoints that require an authenticated account.
///
/// Unlike [`RequestIdentity`] there is no fallback here: a missing or
/// invalid bearer credential rejects the request.
pub struct BearerAccount(pub AccountId);

impl FromRequest for BearerAccount {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let account = validated_account(req).and_then(|account| {
            account
                .map(Self)
                .ok_or_else(|| Error::unauthorized("authentication required"))
        });
        ready(account)
    }
}

/// Extractor exposing the raw session header to the auth handlers.
///
/// Register and login read the session independently of identity
/// resolution: even a request that authenticates with a bearer token may
/// carry a session whose ideas should migrate.
pub struct SessionHeader(pub Option<SessionToken>);

impl FromRequest for SessionHeader {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self(session_token(req))))
    }
}
