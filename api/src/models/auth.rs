use serde::{Deserialize, Serialize};

use super::user::User;
use crate::auth::issuer::CredentialPair;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    #[serde(flatten)]
    pub credentials: CredentialPair,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub access_token_expiration: i64,
}
