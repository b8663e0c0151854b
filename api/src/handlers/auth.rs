use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::{
        claims::{Identity, TokenKind},
        password::{hash_password, verify_password},
    },
    db::{self, users::NewUser},
    error::{AppError, AppResult},
    models::{
        auth::{AccessTokenResponse, AuthResponse, RefreshRequest},
        user::{CreateUser, LoginPayload},
    },
    AppState,
};

/// `POST /auth/signup`
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    payload.validate()?;

    if db::users::find_by_email(&state.db, &payload.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = db::users::create(
        &state.db,
        &NewUser {
            email: &payload.email,
            first_name: &payload.first_name,
            last_name: &payload.last_name,
            birth_date: payload.birth_date,
            password_hash: &password_hash,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, "user signed up");

    let credentials = state.issuer.issue_pair(&Identity::from(&user))?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse { user, credentials }),
    ))
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let user = db::users::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        tracing::debug!(user_id = user.id, "login rejected: wrong password");
        return Err(AppError::LoginFail);
    }

    let credentials = state.issuer.issue_pair(&user)?;
    tracing::info!(user_id = user.id, "user logged in");

    Ok(Json(AuthResponse { user, credentials }))
}

/// `POST /auth/refresh` — trade a refresh token for a new access token.
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    let claims = state
        .validator
        .validate(&payload.refresh_token, TokenKind::Refresh)?;

    let user = db::users::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    let access = state.issuer.issue_access_token(&user)?;

    Ok(Json(AccessTokenResponse {
        access_token_expiration: access.lifetime(),
        access_token: access.token,
    }))
}
