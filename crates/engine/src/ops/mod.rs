use sea_orm::{DatabaseConnection, DbErr, RuntimeErr};

use crate::{EngineError, ResultEngine};

mod access;
mod events;
mod registrations;
mod users;

pub use events::EventDetails;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.db()?.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The connection, or a database error when the engine was built
    /// without one (sea-orm panics on queries against `Disconnected`).
    fn db(&self) -> ResultEngine<&DatabaseConnection> {
        match self.database {
            DatabaseConnection::Disconnected => Err(EngineError::Database(DbErr::Conn(
                RuntimeErr::Internal("database is not connected".to_string()),
            ))),
            _ => Ok(&self.database),
        }
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
