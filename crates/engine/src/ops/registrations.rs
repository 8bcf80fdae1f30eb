use sea_orm::{
    ConnectionTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
    prelude::*,
};
use uuid::Uuid;

use crate::{
    EngineError, Event, Registration, ResultEngine, User, event_registrations, events, users,
};

use super::{Engine, with_tx};

impl Engine {
    pub(super) async fn registration_count<C: ConnectionTrait>(
        &self,
        db: &C,
        event_id: Uuid,
    ) -> ResultEngine<u64> {
        Ok(event_registrations::Entity::find()
            .filter(event_registrations::Column::EventId.eq(event_id.to_string()))
            .count(db)
            .await?)
    }

    pub(super) async fn registrants_of<C: ConnectionTrait>(
        &self,
        db: &C,
        event_id: Uuid,
    ) -> ResultEngine<Vec<User>> {
        users::Entity::find()
            .join(JoinType::InnerJoin, users::Relation::Registrations.def())
            .filter(event_registrations::Column::EventId.eq(event_id.to_string()))
            .order_by_asc(event_registrations::Column::CreatedAt)
            .all(db)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    /// Register `user_id` to `event_id`.
    ///
    /// A pair is stored at most once and an event never holds more
    /// registrations than its capacity.
    pub async fn add_registration(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> ResultEngine<Registration> {
        with_tx!(self, |db_tx| {
            let event = self.require_event(&db_tx, event_id).await?;
            self.require_user(&db_tx, user_id).await?;

            let existing =
                event_registrations::Entity::find_by_id((event_id.to_string(), user_id.to_string()))
                    .one(&db_tx)
                    .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey("registration".to_string()));
            }

            let registered = self.registration_count(&db_tx, event_id).await?;
            if registered >= event.capacity.max(0) as u64 {
                return Err(EngineError::EventFull(event.name));
            }

            let stored =
                event_registrations::ActiveModel::from(&Registration::new(event_id, user_id))
                    .insert(&db_tx)
                    .await?;
            tracing::debug!("user {user_id} registered to event {event_id}");
            Registration::try_from(stored)
        })
    }

    /// Remove the registration of `user_id` from `event_id`.
    pub async fn remove_registration(&self, event_id: Uuid, user_id: Uuid) -> ResultEngine<()> {
        let result =
            event_registrations::Entity::delete_by_id((event_id.to_string(), user_id.to_string()))
                .exec(self.db()?)
                .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("registration not exists".to_string()));
        }
        tracing::debug!("user {user_id} left event {event_id}");
        Ok(())
    }

    /// Users registered to an event, in registration order.
    pub async fn list_registrants(&self, event_id: Uuid) -> ResultEngine<Vec<User>> {
        with_tx!(self, |db_tx| {
            self.require_event(&db_tx, event_id).await?;
            self.registrants_of(&db_tx, event_id).await
        })
    }

    /// Events a user registered to, ordered by date.
    pub async fn list_registered_events(&self, user_id: Uuid) -> ResultEngine<Vec<Event>> {
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            events::Entity::find()
                .join(JoinType::InnerJoin, events::Relation::Registrations.def())
                .filter(event_registrations::Column::UserId.eq(user_id.to_string()))
                .order_by_asc(events::Column::Date)
                .order_by_asc(events::Column::Name)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Event::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }

    /// Events created by a user, ordered by date.
    pub async fn list_created_events(&self, user_id: Uuid) -> ResultEngine<Vec<Event>> {
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            events::Entity::find()
                .filter(events::Column::CreatedBy.eq(user_id.to_string()))
                .order_by_asc(events::Column::Date)
                .order_by_asc(events::Column::Name)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(Event::try_from)
                .collect::<ResultEngine<Vec<_>>>()
        })
    }
}
