use serde::{Deserialize, Serialize};

use crate::models::user::User;

/// Discriminates access tokens from refresh tokens. Serialized as the `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload carried by every token.
///
/// Access tokens carry `email` and `name`; refresh tokens only carry `sub`.
/// `exp` is mandatory: a token without it fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn access<P: Principal + ?Sized>(principal: &P, iat: i64, ttl_secs: i64) -> Self {
        Self {
            sub: principal.id(),
            kind: TokenKind::Access,
            email: Some(principal.email().to_owned()),
            name: Some(principal.display_name()),
            iat,
            exp: iat + ttl_secs,
        }
    }

    pub fn refresh(sub: i64, iat: i64, ttl_secs: i64) -> Self {
        Self {
            sub,
            kind: TokenKind::Refresh,
            email: None,
            name: None,
            iat,
            exp: iat + ttl_secs,
        }
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp < now
    }
}

/// Anything credentials can be issued for.
pub trait Principal {
    fn id(&self) -> i64;
    fn email(&self) -> &str;
    fn display_name(&self) -> String;
}

impl Principal for User {
    fn id(&self) -> i64 {
        self.id
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Pre-assembled claim fields, for issuing before the user row is re-read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl Principal for Identity {
    fn id(&self) -> i64 {
        self.id
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.display_name(),
        }
    }
}
