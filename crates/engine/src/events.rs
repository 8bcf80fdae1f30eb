//! Events and their persistence model.
//!
//! Tags are a list of strings in memory and a JSON array in the `tags`
//! column.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, util::parse_uuid};

/// An event users can register to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub organizer: String,
    pub location: String,
    pub date: NaiveDate,
    /// Free text, e.g. `09:00 AM`.
    pub time: String,
    pub capacity: i32,
    pub category: String,
    pub tags: Vec<String>,
    /// The creator. `None` for seeded events and for events whose creator
    /// was deleted.
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub(crate) fn encode_tags(tags: &[String]) -> ResultEngine<String> {
    Ok(serde_json::to_string(tags)?)
}

pub(crate) fn decode_tags(raw: &str) -> ResultEngine<Vec<String>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(raw)?)
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub organizer: String,
    pub location: String,
    pub date: NaiveDate,
    pub time: String,
    pub capacity: i32,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub tags: String,
    pub created_by: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Creator,
    #[sea_orm(has_many = "super::event_registrations::Entity")]
    Registrations,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::event_registrations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registrations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<&Event> for ActiveModel {
    type Error = EngineError;

    fn try_from(event: &Event) -> ResultEngine<Self> {
        Ok(Self {
            id: ActiveValue::Set(event.id.to_string()),
            name: ActiveValue::Set(event.name.clone()),
            description: ActiveValue::Set(event.description.clone()),
            organizer: ActiveValue::Set(event.organizer.clone()),
            location: ActiveValue::Set(event.location.clone()),
            date: ActiveValue::Set(event.date),
            time: ActiveValue::Set(event.time.clone()),
            capacity: ActiveValue::Set(event.capacity),
            category: ActiveValue::Set(event.category.clone()),
            tags: ActiveValue::Set(encode_tags(&event.tags)?),
            created_by: ActiveValue::Set(event.created_by.map(|id| id.to_string())),
            created_at: ActiveValue::Set(event.created_at),
            updated_at: ActiveValue::Set(event.updated_at),
        })
    }
}

impl TryFrom<Model> for Event {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "event")?,
            name: model.name,
            description: model.description,
            organizer: model.organizer,
            location: model.location,
            date: model.date,
            time: model.time,
            capacity: model.capacity,
            category: model.category,
            tags: decode_tags(&model.tags)?,
            created_by: model
                .created_by
                .as_deref()
                .map(|id| parse_uuid(id, "user"))
                .transpose()?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
