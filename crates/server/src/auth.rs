//! Account endpoints: registration, credential check and current user.

use api_types::{
    auth::{Login, Register},
    user::UserView,
};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};

use crate::{AuthUser, ServerError, server::ServerState, views::user_view};

pub(crate) fn router(state: ServerState) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state(state)
}

async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<Register>, JsonRejection>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let Json(payload) = payload?;
    let user = state
        .engine
        .create_user(engine::UserNew::new(
            payload.name,
            payload.email,
            payload.password,
        ))
        .await?;
    tracing::info!("registered user {}", user.id);

    Ok((StatusCode::CREATED, Json(user_view(&user))))
}

async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<Login>, JsonRejection>,
) -> Result<Json<UserView>, ServerError> {
    let Json(payload) = payload?;
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ServerError::Generic(
            "email and password are required".to_string(),
        ));
    }

    let user = state
        .engine
        .authenticate(&payload.email, &payload.password)
        .await?;
    Ok(Json(user_view(&user)))
}

async fn me(AuthUser(user): AuthUser) -> Json<UserView> {
    Json(user_view(&user))
}
