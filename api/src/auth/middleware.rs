//! Bearer-token extraction for protected handlers.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::claims::{Claims, TokenKind};
use crate::{db, error::AppError, models::user::User, AppState};

/// Pulls the credentials out of `Authorization: Bearer <token>`.
///
/// A missing header, another scheme or empty credentials is `Forbidden`;
/// nothing is validated yet at this point.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Forbidden("Not authenticated".into()))?
        .to_str()
        .map_err(|_| AppError::Forbidden("Invalid authorization code.".into()))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| AppError::Forbidden("Invalid authentication scheme.".into()))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::Forbidden("Invalid authentication scheme.".into()));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::Forbidden("Invalid authorization code.".into()));
    }
    Ok(token)
}

/// The caller behind a valid access token, re-read from storage.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub claims: Claims,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;
        let claims = state.validator.validate(token, TokenKind::Access)?;

        let user = db::users::find_by_id(&state.db, claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::debug!(sub = claims.sub, "token subject no longer exists");
                AppError::Unauthenticated
            })?;

        Ok(CurrentUser { user, claims })
    }
}
