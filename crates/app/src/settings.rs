//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` in the working directory, on top of defaults.
//!
//! `PORT` and `DATABASE_URL` override the file.
use std::env;

use config::{Config, ConfigError, File, Source};
use serde::Deserialize;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:./database.sqlite?mode=rwc";

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Database {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub database: Database,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::build(
            File::with_name("settings").required(false),
            env::var("PORT").ok(),
            env::var("DATABASE_URL").ok(),
        )
    }

    fn build<S>(
        source: S,
        port: Option<String>,
        database_url: Option<String>,
    ) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "0.0.0.0")?
            .set_default("server.port", 5000_i64)?
            .set_default("database.url", DEFAULT_DATABASE_URL)?
            .add_source(source)
            .set_override_option("server.port", port)?
            .set_override_option("database.url", database_url)?
            .build()?
            .try_deserialize()
    }
}
