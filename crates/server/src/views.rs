//! Mapping from engine types to the JSON views.

use api_types::{
    event::{EventList, EventView, RegistrationView},
    user::{Role, UserList, UserView},
};

fn map_role(role: engine::Role) -> Role {
    match role {
        engine::Role::User => Role::User,
        engine::Role::Admin => Role::Admin,
    }
}

pub(crate) fn user_view(user: &engine::User) -> UserView {
    UserView {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: map_role(user.role),
        is_active: user.is_active,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

pub(crate) fn user_list(users: &[engine::User]) -> UserList {
    UserList {
        users: users.iter().map(user_view).collect(),
    }
}

pub(crate) fn event_view(event: &engine::Event) -> EventView {
    EventView {
        id: event.id,
        name: event.name.clone(),
        description: event.description.clone(),
        organizer: event.organizer.clone(),
        location: event.location.clone(),
        date: event.date,
        time: event.time.clone(),
        capacity: event.capacity,
        category: event.category.clone(),
        tags: event.tags.clone(),
        created_by: event.created_by,
        created_at: event.created_at,
        updated_at: event.updated_at,
    }
}

pub(crate) fn event_list(events: &[engine::Event]) -> EventList {
    EventList {
        events: events.iter().map(event_view).collect(),
    }
}

pub(crate) fn registration_view(registration: &engine::Registration) -> RegistrationView {
    RegistrationView {
        event_id: registration.event_id,
        user_id: registration.user_id,
        created_at: registration.created_at,
    }
}
