use api_types::ErrorBody;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

pub use server::{AuthUser, ServerState, router, run_with_listener, spawn_with_listener};

mod auth;
mod events;
mod server;
mod users;
mod views;

pub mod types {
    pub mod auth {
        pub use api_types::auth::{Login, Register};
    }

    pub mod user {
        pub use api_types::user::{Role, UserList, UserUpdate, UserView};
    }

    pub mod event {
        pub use api_types::event::{
            EventDetail, EventList, EventNew, EventQuery, EventUpdate, EventView, RegistrationView,
        };
    }
}

/// Every handler failure ends up here and is rendered as
/// `{"message": ...}` with a matching status.
#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Unauthorized,
    /// A request the extractors could not parse (bad JSON, bad path, ...).
    Rejection(StatusCode, String),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) | EngineError::EventFull(_) => StatusCode::CONFLICT,
        EngineError::InvalidField(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::WrongCredentials => StatusCode::UNAUTHORIZED,
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::PasswordHash(_)
        | EngineError::Serialization(_)
        | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Serialization(serde_err) => {
            tracing::error!("stored data is malformed: {serde_err}");
            "internal server error".to_string()
        }
        EngineError::PasswordHash(hash_err) => {
            tracing::error!("password hashing failed: {hash_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "authentication required".to_string())
            }
            ServerError::Rejection(status, message) => (status, message),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Rejection(value.status(), value.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        Self::Rejection(value.status(), value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Rejection(value.status(), value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let res = ServerError::from(EngineError::EventFull("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::InvalidField("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_forbidden_maps_to_403() {
        let res = ServerError::from(EngineError::Forbidden("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn credentials_map_to_401() {
        let res = ServerError::from(EngineError::WrongCredentials).into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let res = ServerError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn database_errors_are_hidden() {
        let err = EngineError::Database(sea_orm::DbErr::Custom("disk on fire".to_string()));
        assert_eq!(status_for_engine_error(&err), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message_for_engine_error(err), "internal server error");
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
