//! Users API endpoints

use api_types::{
    event::EventList,
    user::{UserList, UserUpdate, UserView},
};
use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    AuthUser, ServerError,
    server::ServerState,
    views::{event_list, user_list, user_view},
};

pub(crate) fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(list))
        .route("/{id}", get(detail).put(update).delete(remove))
        .route("/{id}/events", get(created_events))
        .route("/{id}/registrations", get(registered_events))
        .with_state(state)
}

async fn list(State(state): State<ServerState>) -> Result<Json<UserList>, ServerError> {
    let users = state.engine.list_users().await?;
    Ok(Json(user_list(&users)))
}

async fn detail(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<UserView>, ServerError> {
    let Path(id) = id?;
    let user = state.engine.user(id).await?;
    Ok(Json(user_view(&user)))
}

async fn update(
    AuthUser(actor): AuthUser,
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UserUpdate>, JsonRejection>,
) -> Result<Json<UserView>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let cmd = engine::UserUpdate {
        name: payload.name,
        email: payload.email,
        password: payload.password,
    };

    let user = state.engine.update_user(id, cmd, &actor).await?;
    Ok(Json(user_view(&user)))
}

async fn remove(
    AuthUser(actor): AuthUser,
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let Path(id) = id?;
    state.engine.delete_user(id, &actor).await?;
    tracing::info!("user {} deleted user {id}", actor.id);
    Ok(StatusCode::NO_CONTENT)
}

/// Events the user created.
async fn created_events(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<EventList>, ServerError> {
    let Path(id) = id?;
    let events = state.engine.list_created_events(id).await?;
    Ok(Json(event_list(&events)))
}

/// Events the user registered to.
async fn registered_events(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<EventList>, ServerError> {
    let Path(id) = id?;
    let events = state.engine.list_registered_events(id).await?;
    Ok(Json(event_list(&events)))
}
