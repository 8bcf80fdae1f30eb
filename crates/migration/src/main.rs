use clap::{Parser, Subcommand};
use sea_orm::Database;

use migration::{Migrator, MigratorTrait};

/// Apply or inspect the EventHub schema.
#[derive(Parser, Debug)]
#[command(name = "migration")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./database.sqlite?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Apply pending migrations (default).
    Up,
    /// Roll back every migration.
    Down,
    /// Drop all tables, then apply every migration.
    Fresh,
    /// List applied and pending migrations.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let db = Database::connect(&cli.database_url).await?;

    match cli.command.unwrap_or(Command::Up) {
        Command::Up => Migrator::up(&db, None).await?,
        Command::Down => Migrator::down(&db, None).await?,
        Command::Fresh => Migrator::fresh(&db).await?,
        Command::Status => Migrator::status(&db).await?,
    }

    Ok(())
}
