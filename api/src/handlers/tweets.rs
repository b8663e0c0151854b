use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::middleware::CurrentUser,
    db,
    error::{AppError, AppResult},
    models::{
        tweet::{Tweet, TweetBody},
        Pagination,
    },
    AppState,
};

fn not_found() -> AppError {
    AppError::NotFound("Tweet not found".into())
}

/// Loads a tweet and checks the caller owns it.
async fn owned_tweet(state: &AppState, current: &CurrentUser, tweet_id: i64) -> AppResult<Tweet> {
    let tweet = db::tweets::find_by_id(&state.db, tweet_id)
        .await?
        .ok_or_else(not_found)?;
    if tweet.user_id != current.user.id {
        return Err(AppError::forbidden());
    }
    Ok(tweet)
}

pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<TweetBody>,
) -> AppResult<(StatusCode, Json<Tweet>)> {
    payload.validate()?;
    let tweet = db::tweets::create(&state.db, current.user.id, &payload.content).await?;
    tracing::debug!(tweet_id = tweet.id, user_id = tweet.user_id, "tweet created");
    Ok((StatusCode::CREATED, Json(tweet)))
}

pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<Tweet>>> {
    page.validate()?;
    Ok(Json(db::tweets::list(&state.db, page).await?))
}

pub async fn get(State(state): State<AppState>, Path(tweet_id): Path<i64>) -> AppResult<Json<Tweet>> {
    let tweet = db::tweets::find_by_id(&state.db, tweet_id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(tweet))
}

pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(tweet_id): Path<i64>,
    Json(payload): Json<TweetBody>,
) -> AppResult<Json<Tweet>> {
    payload.validate()?;
    let tweet = owned_tweet(&state, &current, tweet_id).await?;

    let tweet = db::tweets::update_content(&state.db, tweet.id, &payload.content)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(tweet))
}

pub async fn delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(tweet_id): Path<i64>,
) -> AppResult<StatusCode> {
    let tweet = owned_tweet(&state, &current, tweet_id).await?;
    db::tweets::delete(&state.db, tweet.id).await?;
    tracing::debug!(tweet_id = tweet.id, "tweet deleted");
    Ok(StatusCode::NO_CONTENT)
}
