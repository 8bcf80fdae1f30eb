//! Join entity between users and events.
//!
//! `(event_id, user_id)` is the primary key, so a user appears at most once
//! among the registrants of an event.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(event_id: Uuid, user_id: Uuid) -> Self {
        Self {
            event_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "event_registrations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Events,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Events.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Registration> for ActiveModel {
    fn from(registration: &Registration) -> Self {
        Self {
            event_id: ActiveValue::Set(registration.event_id.to_string()),
            user_id: ActiveValue::Set(registration.user_id.to_string()),
            created_at: ActiveValue::Set(registration.created_at),
        }
    }
}

impl TryFrom<Model> for Registration {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            event_id: parse_uuid(&model.event_id, "event")?,
            user_id: parse_uuid(&model.user_id, "user")?,
            created_at: model.created_at,
        })
    }
}
