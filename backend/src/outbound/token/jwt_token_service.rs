//! JWT-backed implementation of the token service port.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::AccountId;
use crate::domain::ports::{TokenIssueError, TokenService};

/// Credential lifetime: thirty days from issuance.
const TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Claims embedded in every issued credential.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Account the credential is bound to.
    sub: Uuid,
    /// Issuance time, seconds since the epoch.
    iat: i64,
    /// Absolute expiry, seconds since the epoch.
    exp: i64,
}

/// HS256-signed, self-contained bearer credentials.
///
/// Stateless by design: validation needs only the shared secret, and there
/// is no refresh or revocation. A leaked token stays valid until its natural
/// expiry.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl JwtTokenService {
    /// Create a service signing with the given secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs: TOKEN_TTL_SECS,
        }
    }

    /// Override the credential lifetime, mainly for expiry tests.
    pub fn with_ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, account: &AccountId) -> Result<String, TokenIssueError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: account.as_uuid(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| TokenIssueError::signing(err.to_string()))
    }

    fn validate(&self, token: &str) -> Option<AccountId> {
        // Malformed, tampered, and expired tokens all collapse to None; the
        // caller is never told which failure occurred.
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .ok()
            .map(|data| AccountId::from_uuid(data.claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SECRET: &[u8] = b"test-secret";

    fn service() -> JwtTokenService {
        JwtTokenService::new(SECRET)
    }

    #[test]
    fn issued_tokens_validate_to_the_same_account() {
        let account = AccountId::random();
        let token = service().issue(&account).expect("issuing succeeds");
        assert_eq!(service().validate(&token), Some(account));
    }

    #[test]
    fn tampered_tokens_are_invalid() {
        let token = service()
            .issue(&AccountId::random())
            .expect("issuing succeeds");
        // Flip one character of the signature segment.
        let mut bytes = token.into_bytes();
        let last = bytes.len() - 1;
        bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).expect("still utf8");
        assert_eq!(service().validate(&tampered), None);
    }

    #[test]
    fn tokens_signed_with_another_secret_are_invalid() {
        let token = JwtTokenService::new(b"other-secret")
            .issue(&AccountId::random())
            .expect("issuing succeeds");
        assert_eq!(service().validate(&token), None);
    }

    #[test]
    fn expired_tokens_are_invalid() {
        // Past the default 60 second validation leeway.
        let expired = service()
            .with_ttl_secs(-120)
            .issue(&AccountId::random())
            .expect("issuing succeeds");
        assert_eq!(service().validate(&expired), None);
    }

    #[rstest]
    #[case("")]
    #[case("not-a-jwt")]
    #[case("a.b.c")]
    fn malformed_tokens_are_invalid(#[case] token: &str) {
        assert_eq!(service().validate(token), None);
    }
}
