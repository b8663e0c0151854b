//! REST backend for a small Twitter clone: users, tweets and JWT credentials.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod rest;

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{
    auth::{
        clock::Clock, codec::TokenCodec, issuer::CredentialIssuer,
        validator::CredentialValidator,
    },
    config::Config,
};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub issuer: Arc<CredentialIssuer>,
    pub validator: Arc<CredentialValidator>,
}

impl AppState {
    /// Builds the signing key once and hands it to both issuer and validator.
    pub fn new(db: SqlitePool, config: &Config, clock: Arc<dyn Clock>) -> Self {
        let codec = Arc::new(TokenCodec::new(config.secret_key.as_bytes()));
        Self {
            db,
            issuer: Arc::new(CredentialIssuer::new(
                codec.clone(),
                clock.clone(),
                config.access_token_ttl,
                config.refresh_token_ttl,
            )),
            validator: Arc::new(CredentialValidator::new(codec, clock)),
        }
    }
}
