//! EventHub engine: users, events and the registrations joining them.
//!
//! Every operation goes through [`Engine`], which owns the database handle.

pub use commands::{EventFilter, EventNew, EventUpdate, UserNew, UserUpdate};
pub use error::EngineError;
pub use event_registrations::Registration;
pub use events::Event;
pub use ops::{Engine, EngineBuilder, EventDetails};
pub use seed::sample_events;
pub use users::{Role, User};

mod commands;
mod error;
mod event_registrations;
mod events;
mod ops;
mod password;
mod seed;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
