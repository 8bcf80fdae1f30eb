//! Command structs for engine operations.
//!
//! These types group parameters for write operations (create/update of users
//! and events), keeping call sites readable and avoiding long argument lists.

use chrono::NaiveDate;

/// Register a new user.
#[derive(Clone, Debug)]
pub struct UserNew {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserNew {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Partial update of a user. `None` keeps the stored value.
#[derive(Clone, Debug, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Create an event.
#[derive(Clone, Debug)]
pub struct EventNew {
    pub name: String,
    pub description: String,
    pub organizer: String,
    pub location: String,
    pub date: NaiveDate,
    pub time: String,
    pub capacity: i32,
    pub category: String,
    pub tags: Vec<String>,
}

impl EventNew {
    #[must_use]
    pub fn new(name: impl Into<String>, date: NaiveDate, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            organizer: String::new(),
            location: String::new(),
            date,
            time: time.into(),
            capacity: 0,
            category: String::new(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = organizer.into();
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub fn capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update of an event. `None` keeps the stored value.
#[derive(Clone, Debug, Default)]
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

/// Filters for listing events.
#[derive(Clone, Debug, Default)]
pub struct EventFilter {
    /// Exact category match (case-insensitive).
    pub category: Option<String>,
    /// Substring match on name, description and organizer.
    pub search: Option<String>,
}
