use std::sync::Arc;

use axum::{
    Router,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use engine::{Engine, User};

use crate::{ServerError, auth, events, users};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// The user behind the request's `Authorization: Basic` credentials
/// (`email:password`).
///
/// Handlers that take an `AuthUser` answer 401 to anonymous or wrong
/// credentials.
#[derive(Debug)]
pub struct AuthUser(pub User);

impl FromRequestParts<ServerState> for AuthUser {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(credentials) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ServerError::Unauthorized)?;

        if credentials.username().is_empty() || credentials.password().is_empty() {
            return Err(ServerError::Unauthorized);
        }

        let user = state
            .engine
            .authenticate(credentials.username(), credentials.password())
            .await?;
        Ok(AuthUser(user))
    }
}

async fn not_found() -> ServerError {
    ServerError::Rejection(StatusCode::NOT_FOUND, "route not found".to_string())
}

/// The whole HTTP surface: one nested router per resource, each built from
/// the shared state.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .nest("/api/auth", auth::router(state.clone()))
        .nest("/api/events", events::router(state.clone()))
        .nest("/api/users", users::router(state))
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server running on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
