//! Users: accounts that create events and register to them.
//!
//! A user owns the events it created (`events.created_by`) and takes part in
//! events through [`event_registrations`](super::event_registrations).

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, util::parse_uuid};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(EngineError::InvalidField(format!("invalid role: {other}"))),
        }
    }
}

/// A registered account.
///
/// `password_hash` is an argon2 PHC string and never leaves the engine in
/// clear: the server maps users to views without it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role: Role::User,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether this user may modify a resource owned by `owner`.
    pub fn can_manage(&self, owner: Option<Uuid>) -> bool {
        self.is_admin() || owner == Some(self.id)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::events::Entity")]
    CreatedEvents,
    #[sea_orm(has_many = "super::event_registrations::Entity")]
    Registrations,
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedEvents.def()
    }
}

impl Related<super::event_registrations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registrations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            id: ActiveValue::Set(user.id.to_string()),
            name: ActiveValue::Set(user.name.clone()),
            email: ActiveValue::Set(user.email.clone()),
            password_hash: ActiveValue::Set(user.password_hash.clone()),
            role: ActiveValue::Set(user.role.as_str().to_string()),
            is_active: ActiveValue::Set(user.is_active),
            created_at: ActiveValue::Set(user.created_at),
            updated_at: ActiveValue::Set(user.updated_at),
        }
    }
}

impl TryFrom<Model> for User {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: parse_uuid(&model.id, "user")?,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            role: Role::try_from(model.role.as_str())?,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "hash".to_string(),
        )
    }

    #[test]
    fn new_user_is_active_plain_user() {
        let user = user();
        assert_eq!(user.role, Role::User);
        assert!(user.is_active);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn owner_and_admin_can_manage() {
        let mut user = user();
        assert!(user.can_manage(Some(user.id)));
        assert!(!user.can_manage(Some(Uuid::new_v4())));
        assert!(!user.can_manage(None));

        user.role = Role::Admin;
        assert!(user.can_manage(Some(Uuid::new_v4())));
        assert!(user.can_manage(None));
    }

    #[test]
    fn model_roundtrip_keeps_role() {
        let mut user = user();
        user.role = Role::Admin;
        let active = ActiveModel::from(&user);
        let model = Model {
            id: active.id.unwrap(),
            name: active.name.unwrap(),
            email: active.email.unwrap(),
            password_hash: active.password_hash.unwrap(),
            role: active.role.unwrap(),
            is_active: active.is_active.unwrap(),
            created_at: active.created_at.unwrap(),
            updated_at: active.updated_at.unwrap(),
        };
        assert_eq!(User::try_from(model).unwrap(), user);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_eq!(
            Role::try_from("root"),
            Err(EngineError::InvalidField("invalid role: root".to_string()))
        );
    }
}
