use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

mod settings;

fn log_filter(level: &str) -> String {
    format!("eventhub={level},server={level},engine={level},tower_http={level}")
}

/// Open the database. On failure the error is logged and a disconnected
/// handle is returned: the server still starts and every engine operation
/// fails with a database error.
async fn connect(url: &str) -> DatabaseConnection {
    match sea_orm::Database::connect(url).await {
        Ok(db) => {
            tracing::info!("Database connection established");
            db
        }
        Err(err) => {
            tracing::error!("Unable to connect to the database: {err}");
            DatabaseConnection::Disconnected
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let _ = dotenvy::dotenv();
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&settings.app.level))
        .init();

    let db = connect(&settings.database.url).await;

    // Schema sync never drops data; the server keeps going if it fails.
    if matches!(db, DatabaseConnection::Disconnected) {
        tracing::warn!("skipping schema sync: no database connection");
    } else {
        match Migrator::up(&db, None).await {
            Ok(()) => tracing::info!("Database schema synchronized"),
            Err(err) => tracing::error!("failed to synchronize database schema: {err}"),
        }
    }

    let engine = engine::Engine::builder().database(db).build().await?;

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = server::run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
        std::process::exit(1);
    }

    Ok(())
}
