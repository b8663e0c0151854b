//! Compact signed-token framing over `jsonwebtoken`.
//!
//! The codec only proves integrity. Expiry and token-kind policy are applied
//! by [`CredentialValidator`](super::validator::CredentialValidator).

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;

use super::claims::Claims;

pub const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not match")]
    InvalidSignature,
}

impl From<jsonwebtoken::errors::Error> for DecodeError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => DecodeError::InvalidSignature,
            _ => DecodeError::Malformed,
        }
    }
}

/// Holds the process-wide signing key. Built once from configuration.
#[derive(Clone)]
pub struct TokenCodec {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            header: Header::new(ALGORITHM),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&self.header, claims, &self.encoding_key)
    }

    pub fn decode(&self, token: &str) -> Result<Claims, DecodeError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.header.alg)
            .finish_non_exhaustive()
    }
}
