//! Events API endpoints

use api_types::{
    event::{EventDetail, EventList, EventNew, EventQuery, EventUpdate, EventView, RegistrationView},
    user::UserList,
};
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    AuthUser, ServerError,
    server::ServerState,
    views::{event_list, event_view, registration_view, user_list, user_view},
};

pub(crate) fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(detail).put(update).delete(remove))
        .route("/{id}/register", axum::routing::post(join).delete(leave))
        .route("/{id}/registrations", get(registrants))
        .with_state(state)
}

async fn list(
    State(state): State<ServerState>,
    query: Result<Query<EventQuery>, QueryRejection>,
) -> Result<Json<EventList>, ServerError> {
    let Query(query) = query?;
    let filter = engine::EventFilter {
        category: query.category,
        search: query.search,
    };
    let events = state.engine.list_events(&filter).await?;
    Ok(Json(event_list(&events)))
}

async fn create(
    AuthUser(user): AuthUser,
    State(state): State<ServerState>,
    payload: Result<Json<EventNew>, JsonRejection>,
) -> Result<(StatusCode, Json<EventView>), ServerError> {
    let Json(payload) = payload?;
    let cmd = engine::EventNew::new(payload.name, payload.date, payload.time)
        .description(payload.description)
        .organizer(payload.organizer)
        .location(payload.location)
        .capacity(payload.capacity)
        .category(payload.category)
        .tags(payload.tags);

    let event = state.engine.create_event(cmd, Some(user.id)).await?;
    tracing::info!("user {} created event {}", user.id, event.id);
    Ok((StatusCode::CREATED, Json(event_view(&event))))
}

async fn detail(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<EventDetail>, ServerError> {
    let Path(id) = id?;
    let details = state.engine.event_details(id).await?;
    Ok(Json(EventDetail {
        event: event_view(&details.event),
        creator: details.creator.as_ref().map(user_view),
        registered_users: details.registrants.iter().map(user_view).collect(),
    }))
}

async fn update(
    AuthUser(user): AuthUser,
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<EventUpdate>, JsonRejection>,
) -> Result<Json<EventView>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let cmd = engine::EventUpdate {
        name: payload.name,
        description: payload.description,
        organizer: payload.organizer,
        location: payload.location,
        date: payload.date,
        time: payload.time,
        capacity: payload.capacity,
        category: payload.category,
        tags: payload.tags,
    };

    let event = state.engine.update_event(id, cmd, &user).await?;
    Ok(Json(event_view(&event)))
}

async fn remove(
    AuthUser(user): AuthUser,
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let Path(id) = id?;
    state.engine.delete_event(id, &user).await?;
    tracing::info!("user {} deleted event {id}", user.id);
    Ok(StatusCode::NO_CONTENT)
}

/// Register the caller to the event.
async fn join(
    AuthUser(user): AuthUser,
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<(StatusCode, Json<RegistrationView>), ServerError> {
    let Path(id) = id?;
    let registration = state.engine.add_registration(id, user.id).await?;
    Ok((StatusCode::CREATED, Json(registration_view(&registration))))
}

/// Remove the caller's registration.
async fn leave(
    AuthUser(user): AuthUser,
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let Path(id) = id?;
    state.engine.remove_registration(id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn registrants(
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<UserList>, ServerError> {
    let Path(id) = id?;
    let users = state.engine.list_registrants(id).await?;
    Ok(Json(user_list(&users)))
}
