use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Register {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub email: String,
        pub password: String,
    }
}

pub mod user {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Role {
        User,
        Admin,
    }

    /// Public view of a user. The password hash is never exposed.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserView {
        pub id: Uuid,
        pub name: String,
        pub email: String,
        pub role: Role,
        pub is_active: bool,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct UserUpdate {
        pub name: Option<String>,
        pub email: Option<String>,
        pub password: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserList {
        pub users: Vec<UserView>,
    }
}

pub mod event {
    use super::*;
    use crate::user::UserView;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EventNew {
        pub name: String,
        pub description: String,
        pub organizer: String,
        pub location: String,
        pub date: NaiveDate,
        pub time: String,
        pub capacity: i32,
        pub category: String,
        #[serde(default)]
        pub tags: Vec<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EventUpdate {
        pub name: Option<String>,
        pub description: Option<String>,
        pub organizer: Option<String>,
        pub location: Option<String>,
        pub date: Option<NaiveDate>,
        pub time: Option<String>,
        pub capacity: Option<i32>,
        pub category: Option<String>,
        pub tags: Option<Vec<String>>,
    }

    /// Query string of `GET /api/events`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EventQuery {
        pub category: Option<String>,
        pub search: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EventView {
        pub id: Uuid,
        pub name: String,
        pub description: String,
        pub organizer: String,
        pub location: String,
        pub date: NaiveDate,
        pub time: String,
        pub capacity: i32,
        pub category: String,
        pub tags: Vec<String>,
        pub created_by: Option<Uuid>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    /// `GET /api/events/{id}`: the event, its creator and its registrants.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EventDetail {
        #[serde(flatten)]
        pub event: EventView,
        pub creator: Option<UserView>,
        pub registered_users: Vec<UserView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EventList {
        pub events: Vec<EventView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RegistrationView {
        pub event_id: Uuid,
        pub user_id: Uuid,
        pub created_at: DateTime<Utc>,
    }
}
