use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{
    claims::{Claims, Principal},
    clock::Clock,
    codec::TokenCodec,
};

/// A freshly signed token with the timestamps it was signed with.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub exp: i64,
    pub iat: i64,
}

impl IssuedToken {
    /// Validity window in seconds.
    pub fn lifetime(&self) -> i64 {
        self.exp - self.iat
    }
}

/// Returned on signup and login. Expirations are durations in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialPair {
    pub access_token: String,
    pub access_token_expiration: i64,
    pub refresh_token: String,
    pub refresh_token_expiration: i64,
}

pub struct CredentialIssuer {
    codec: Arc<TokenCodec>,
    clock: Arc<dyn Clock>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl CredentialIssuer {
    pub fn new(
        codec: Arc<TokenCodec>,
        clock: Arc<dyn Clock>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            codec,
            clock,
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    pub fn issue_access_token<P: Principal + ?Sized>(
        &self,
        principal: &P,
    ) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        let claims = Claims::access(principal, self.clock.now(), self.access_ttl.num_seconds());
        self.sign(claims)
    }

    pub fn issue_refresh_token(
        &self,
        principal_id: i64,
    ) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        let claims = Claims::refresh(principal_id, self.clock.now(), self.refresh_ttl.num_seconds());
        self.sign(claims)
    }

    pub fn issue_pair<P: Principal + ?Sized>(
        &self,
        principal: &P,
    ) -> Result<CredentialPair, jsonwebtoken::errors::Error> {
        let access = self.issue_access_token(principal)?;
        let refresh = self.issue_refresh_token(principal.id())?;

        tracing::debug!(sub = principal.id(), "issued credential pair");

        Ok(CredentialPair {
            access_token_expiration: access.lifetime(),
            access_token: access.token,
            refresh_token_expiration: refresh.lifetime(),
            refresh_token: refresh.token,
        })
    }

    fn sign(&self, claims: Claims) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        let token = self.codec.encode(&claims)?;
        Ok(IssuedToken {
            token,
            exp: claims.exp,
            iat: claims.iat,
        })
    }
}
