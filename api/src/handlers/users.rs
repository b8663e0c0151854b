use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{middleware::CurrentUser, password::hash_password},
    db::{self, users::NewUser},
    error::{AppError, AppResult},
    models::{
        user::{CreateUser, User},
        Pagination,
    },
    AppState,
};

fn not_found() -> AppError {
    AppError::NotFound("User not found".into())
}

pub async fn me(current: CurrentUser) -> Json<User> {
    Json(current.user)
}

pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<User>>> {
    page.validate()?;
    Ok(Json(db::users::list(&state.db, page).await?))
}

pub async fn get(State(state): State<AppState>, Path(user_id): Path<i64>) -> AppResult<Json<User>> {
    let user = db::users::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(user))
}

/// Users may only replace their own profile.
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(user_id): Path<i64>,
    Json(payload): Json<CreateUser>,
) -> AppResult<Json<User>> {
    payload.validate()?;

    let target = db::users::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(not_found)?;
    if target.id != current.user.id {
        return Err(AppError::forbidden());
    }

    if let Some(owner) = db::users::find_by_email(&state.db, &payload.email).await? {
        if owner.id != target.id {
            return Err(AppError::Conflict("Email already registered".into()));
        }
    }

    let password_hash = hash_password(&payload.password)?;
    let user = db::users::update(
        &state.db,
        target.id,
        &NewUser {
            email: &payload.email,
            first_name: &payload.first_name,
            last_name: &payload.last_name,
            birth_date: payload.birth_date,
            password_hash: &password_hash,
        },
    )
    .await?
    .ok_or_else(not_found)?;

    tracing::info!(user_id = user.id, "user updated");
    Ok(Json(user))
}

pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(user_id): Path<i64>,
) -> AppResult<StatusCode> {
    let target = db::users::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(not_found)?;
    if target.id != current.user.id {
        return Err(AppError::forbidden());
    }

    db::users::delete(&state.db, target.id).await?;
    tracing::info!(user_id = target.id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
