use chrono::Utc;
use sea_orm::{
    Condition, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
    prelude::*,
    sea_query::{Expr, LikeExpr},
};
use uuid::Uuid;

use crate::{
    EngineError, Event, EventFilter, EventNew, EventUpdate, ResultEngine, User,
    event_registrations, events,
    util::{contains_pattern, normalize_required, normalize_tags, validate_capacity},
};

use super::{Engine, with_tx};

/// An event together with its creator and registrants.
#[derive(Clone, Debug)]
pub struct EventDetails {
    pub event: Event,
    pub creator: Option<User>,
    pub registrants: Vec<User>,
}

fn event_from_cmd(cmd: EventNew, created_by: Option<Uuid>) -> ResultEngine<Event> {
    let now = Utc::now();
    Ok(Event {
        id: Uuid::new_v4(),
        name: normalize_required(&cmd.name, "name")?,
        description: normalize_required(&cmd.description, "description")?,
        organizer: normalize_required(&cmd.organizer, "organizer")?,
        location: normalize_required(&cmd.location, "location")?,
        date: cmd.date,
        time: normalize_required(&cmd.time, "time")?,
        capacity: validate_capacity(cmd.capacity)?,
        category: normalize_required(&cmd.category, "category")?,
        tags: normalize_tags(cmd.tags),
        created_by,
        created_at: now,
        updated_at: now,
    })
}

impl Engine {
    /// Create an event. `creator` must reference an existing user.
    pub async fn create_event(&self, cmd: EventNew, creator: Option<Uuid>) -> ResultEngine<Event> {
        let event = event_from_cmd(cmd, creator)?;
        with_tx!(self, |db_tx| {
            if let Some(creator) = creator {
                self.require_user(&db_tx, creator).await?;
            }
            events::ActiveModel::try_from(&event)?.insert(&db_tx).await?;
            tracing::debug!("created event {} ({})", event.id, event.name);
            Ok(event)
        })
    }

    pub async fn event(&self, event_id: Uuid) -> ResultEngine<Event> {
        self.require_event(self.db()?, event_id).await
    }

    /// The event with its creator and the users registered to it.
    pub async fn event_details(&self, event_id: Uuid) -> ResultEngine<EventDetails> {
        with_tx!(self, |db_tx| {
            let event = self.require_event(&db_tx, event_id).await?;
            let creator = match event.created_by {
                Some(creator) => self.find_user(&db_tx, creator).await?,
                None => None,
            };
            let registrants = self.registrants_of(&db_tx, event_id).await?;
            Ok(EventDetails {
                event,
                creator,
                registrants,
            })
        })
    }

    /// Events ordered by date, optionally filtered.
    pub async fn list_events(&self, filter: &EventFilter) -> ResultEngine<Vec<Event>> {
        let mut query = events::Entity::find();

        if let Some(category) = filter
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            query = query.filter(Expr::cust("LOWER(category)").eq(category.to_lowercase()));
        }
        if let Some(search) = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            let pattern = contains_pattern(search);
            let like = || LikeExpr::new(pattern.clone()).escape('\\');
            query = query.filter(
                Condition::any()
                    .add(Expr::col(events::Column::Name).like(like()))
                    .add(Expr::col(events::Column::Description).like(like()))
                    .add(Expr::col(events::Column::Organizer).like(like())),
            );
        }

        query
            .order_by_asc(events::Column::Date)
            .order_by_asc(events::Column::Name)
            .all(self.db()?)
            .await?
            .into_iter()
            .map(Event::try_from)
            .collect()
    }

    pub async fn count_events(&self) -> ResultEngine<u64> {
        Ok(events::Entity::find().count(self.db()?).await?)
    }

    /// Apply a partial update (creator or admin).
    pub async fn update_event(
        &self,
        event_id: Uuid,
        cmd: EventUpdate,
        actor: &User,
    ) -> ResultEngine<Event> {
        with_tx!(self, |db_tx| {
            let mut event = self.require_event(&db_tx, event_id).await?;
            self.require_event_manager(&event, actor)?;

            if let Some(name) = cmd.name.as_deref() {
                event.name = normalize_required(name, "name")?;
            }
            if let Some(description) = cmd.description.as_deref() {
                event.description = normalize_required(description, "description")?;
            }
            if let Some(organizer) = cmd.organizer.as_deref() {
                event.organizer = normalize_required(organizer, "organizer")?;
            }
            if let Some(location) = cmd.location.as_deref() {
                event.location = normalize_required(location, "location")?;
            }
            if let Some(date) = cmd.date {
                event.date = date;
            }
            if let Some(time) = cmd.time.as_deref() {
                event.time = normalize_required(time, "time")?;
            }
            if let Some(capacity) = cmd.capacity {
                let capacity = validate_capacity(capacity)?;
                let registered = self.registration_count(&db_tx, event_id).await?;
                if (capacity as u64) < registered {
                    return Err(EngineError::InvalidField(format!(
                        "capacity {capacity} is below the {registered} registered users"
                    )));
                }
                event.capacity = capacity;
            }
            if let Some(category) = cmd.category.as_deref() {
                event.category = normalize_required(category, "category")?;
            }
            if let Some(tags) = cmd.tags {
                event.tags = normalize_tags(tags);
            }
            event.updated_at = Utc::now();

            events::ActiveModel::try_from(&event)?.update(&db_tx).await?;
            Ok(event)
        })
    }

    /// Delete an event and its registrations (creator or admin).
    pub async fn delete_event(&self, event_id: Uuid, actor: &User) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let event = self.require_event(&db_tx, event_id).await?;
            self.require_event_manager(&event, actor)?;

            let id = event_id.to_string();
            event_registrations::Entity::delete_many()
                .filter(event_registrations::Column::EventId.eq(id.clone()))
                .exec(&db_tx)
                .await?;
            events::Entity::delete_by_id(id).exec(&db_tx).await?;
            Ok(())
        })
    }

    /// Bulk insert the sample events in a single transaction.
    ///
    /// Does not clear existing rows: callers reset the schema first.
    pub async fn seed_sample_events(&self) -> ResultEngine<Vec<Event>> {
        let seeded = crate::sample_events()
            .into_iter()
            .map(|cmd| event_from_cmd(cmd, None))
            .collect::<ResultEngine<Vec<_>>>()?;
        let models = seeded
            .iter()
            .map(events::ActiveModel::try_from)
            .collect::<ResultEngine<Vec<_>>>()?;

        with_tx!(self, |db_tx| {
            events::Entity::insert_many(models).exec(&db_tx).await?;
            tracing::info!("seeded {} sample events", seeded.len());
            Ok(seeded)
        })
    }
}
