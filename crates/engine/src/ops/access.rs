use sea_orm::{ConnectionTrait, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{EngineError, Event, ResultEngine, User, events, users};

use super::Engine;

impl Engine {
    pub(super) async fn find_user<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: Uuid,
    ) -> ResultEngine<Option<User>> {
        users::Entity::find_by_id(user_id.to_string())
            .one(db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    pub(super) async fn require_user<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: Uuid,
    ) -> ResultEngine<User> {
        self.find_user(db, user_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))
    }

    pub(super) async fn find_user_by_email<C: ConnectionTrait>(
        &self,
        db: &C,
        email: &str,
    ) -> ResultEngine<Option<User>> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(db)
            .await?
            .map(User::try_from)
            .transpose()
    }

    pub(super) async fn require_event<C: ConnectionTrait>(
        &self,
        db: &C,
        event_id: Uuid,
    ) -> ResultEngine<Event> {
        events::Entity::find_by_id(event_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("event not exists".to_string()))
            .and_then(Event::try_from)
    }

    /// Events may be changed by their creator or by an admin.
    pub(super) fn require_event_manager(&self, event: &Event, actor: &User) -> ResultEngine<()> {
        if !actor.can_manage(event.created_by) {
            return Err(EngineError::Forbidden(
                "only the creator can change this event".to_string(),
            ));
        }
        Ok(())
    }

    /// Users may be changed by themselves or by an admin.
    pub(super) fn require_user_manager(&self, user_id: Uuid, actor: &User) -> ResultEngine<()> {
        if !actor.can_manage(Some(user_id)) {
            return Err(EngineError::Forbidden(
                "cannot change another user".to_string(),
            ));
        }
        Ok(())
    }
}
