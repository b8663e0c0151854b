use std::sync::Arc;

use thiserror::Error;

use super::{
    claims::{Claims, TokenKind},
    clock::Clock,
    codec::{DecodeError, TokenCodec},
};

/// Reason a token was refused. Collapsed into [`Unauthenticated`] before it
/// reaches the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("token expired at {exp}")]
    Expired { exp: i64 },
    #[error("expected {expected} token, got {found}")]
    WrongType { expected: TokenKind, found: TokenKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("could not validate credentials")]
pub struct Unauthenticated;

impl From<Rejection> for Unauthenticated {
    fn from(rejection: Rejection) -> Self {
        tracing::debug!(%rejection, "token rejected");
        Unauthenticated
    }
}

pub struct CredentialValidator {
    codec: Arc<TokenCodec>,
    clock: Arc<dyn Clock>,
}

impl CredentialValidator {
    pub fn new(codec: Arc<TokenCodec>, clock: Arc<dyn Clock>) -> Self {
        Self { codec, clock }
    }

    pub fn validate(&self, token: &str, expected: TokenKind) -> Result<Claims, Unauthenticated> {
        Ok(self.inspect(token, expected)?)
    }

    /// Same checks as [`validate`](Self::validate), keeping the reason.
    pub fn inspect(&self, token: &str, expected: TokenKind) -> Result<Claims, Rejection> {
        let claims = self.codec.decode(token)?;

        if claims.is_expired_at(self.clock.now()) {
            return Err(Rejection::Expired { exp: claims.exp });
        }

        if claims.kind != expected {
            return Err(Rejection::WrongType {
                expected,
                found: claims.kind,
            });
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::auth::{claims::Identity, clock::ManualClock, issuer::CredentialIssuer};

    struct Fixture {
        clock: Arc<ManualClock>,
        codec: Arc<TokenCodec>,
        issuer: CredentialIssuer,
        validator: CredentialValidator,
    }

    fn fixture(access_secs: i64) -> Fixture {
        let clock = Arc::new(ManualClock::new(1_700_000_000));
        let codec = Arc::new(TokenCodec::new(b"validator-secret"));
        let issuer = CredentialIssuer::new(
            codec.clone(),
            clock.clone(),
            Duration::seconds(access_secs),
            Duration::weeks(1),
        );
        let validator = CredentialValidator::new(codec.clone(), clock.clone());
        Fixture {
            clock,
            codec,
            issuer,
            validator,
        }
    }

    fn principal() -> Identity {
        Identity {
            id: 1,
            email: "a@b.com".into(),
            name: "A B".into(),
        }
    }

    #[test]
    fn access_token_expires_after_ttl() {
        let fx = fixture(60);
        let pair = fx.issuer.issue_pair(&principal()).unwrap();

        let claims = fx
            .validator
            .validate(&pair.access_token, TokenKind::Access)
            .unwrap();
        assert_eq!(claims.sub, 1);

        fx.clock.advance(60);
        assert!(fx.validator.validate(&pair.access_token, TokenKind::Access).is_ok());

        fx.clock.advance(1);
        assert_eq!(
            fx.validator.validate(&pair.access_token, TokenKind::Access),
            Err(Unauthenticated)
        );
        assert_eq!(
            fx.validator.inspect(&pair.access_token, TokenKind::Access),
            Err(Rejection::Expired { exp: 1_700_000_060 })
        );
    }

    #[test]
    fn kinds_are_not_interchangeable() {
        let fx = fixture(60);
        let pair = fx.issuer.issue_pair(&principal()).unwrap();

        assert_eq!(
            fx.validator.inspect(&pair.access_token, TokenKind::Refresh),
            Err(Rejection::WrongType {
                expected: TokenKind::Refresh,
                found: TokenKind::Access,
            })
        );
        assert_eq!(
            fx.validator.validate(&pair.refresh_token, TokenKind::Access),
            Err(Unauthenticated)
        );
        assert!(fx.validator.validate(&pair.refresh_token, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn correctly_signed_past_token_is_rejected() {
        let fx = fixture(60);
        let now = fx.clock.now();
        let mut claims = Claims::access(&principal(), now - 100, 60);
        claims.exp = now - 1;
        let token = fx.codec.encode(&claims).unwrap();

        assert_eq!(fx.codec.decode(&token).unwrap(), claims);
        assert_eq!(
            fx.validator.inspect(&token, TokenKind::Access),
            Err(Rejection::Expired { exp: now - 1 })
        );
    }

    #[test]
    fn tampered_and_garbage_tokens_collapse_to_unauthenticated() {
        let fx = fixture(60);
        let pair = fx.issuer.issue_pair(&principal()).unwrap();
        let foreign = TokenCodec::new(b"someone-else")
            .encode(&Claims::access(&principal(), fx.clock.now(), 60))
            .unwrap();

        assert_eq!(
            fx.validator.inspect(&foreign, TokenKind::Access),
            Err(Rejection::Decode(DecodeError::InvalidSignature))
        );
        assert_eq!(
            fx.validator.inspect("garbage", TokenKind::Access),
            Err(Rejection::Decode(DecodeError::Malformed))
        );
        for token in [foreign.as_str(), "garbage", ""] {
            assert_eq!(
                fx.validator.validate(token, TokenKind::Access),
                Err(Unauthenticated)
            );
        }
        assert!(fx.validator.validate(&pair.access_token, TokenKind::Access).is_ok());
    }
}
