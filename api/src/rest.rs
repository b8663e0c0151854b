use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{auth, tweets, users},
    AppState,
};

pub fn router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh));

    let user_routes = Router::new()
        .route("/", get(users::list))
        .route("/me", get(users::me))
        .route(
            "/:user_id",
            get(users::get).put(users::update).delete(users::delete),
        );

    let tweet_routes = Router::new()
        .route("/", get(tweets::list).post(tweets::create))
        .route(
            "/:tweet_id",
            get(tweets::get).put(tweets::update).delete(tweets::delete),
        );

    Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/tweets", tweet_routes)
        .with_state(state)
}
