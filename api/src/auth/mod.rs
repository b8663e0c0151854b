//! Credential lifecycle: signing, issuing and validating tokens, and password hashing.
//!
//! The signing key lives in a single [`TokenCodec`](codec::TokenCodec) built from
//! configuration at startup and shared by the issuer and the validator.

pub mod claims;
pub mod clock;
pub mod codec;
pub mod issuer;
pub mod middleware;
pub mod password;
pub mod validator;
