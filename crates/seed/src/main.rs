use std::error::Error;

use clap::{Args, Parser, Subcommand};
use engine::{Engine, Event, Role, UserNew};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

#[derive(Parser, Debug)]
#[command(name = "eventhub_seed")]
#[command(about = "Reset the EventHub database with sample events, or bootstrap users")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./database.sqlite?mode=rwc"
    )]
    database_url: String,

    /// Without a command every table is dropped, recreated and filled with
    /// the sample events.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
    /// Block an account from signing in.
    Deactivate(UserEmailArgs),
    Activate(UserEmailArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "EVENTHUB_PASSWORD", hide_env_values = true)]
    password: String,
    /// Grant the admin role.
    #[arg(long)]
    admin: bool,
}

#[derive(Args, Debug)]
struct UserEmailArgs {
    #[arg(long)]
    email: String,
}

async fn seed(database_url: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    Migrator::fresh(&db).await?;
    println!("Database tables created");

    let engine = Engine::builder().database(db).build().await?;
    let events = engine.seed_sample_events().await?;
    print!("{}", summary(&events));
    Ok(())
}

fn summary(events: &[Event]) -> String {
    let mut out = format!(
        "Successfully created {} sample events\n\nSample Events:\n",
        events.len()
    );
    for (i, event) in events.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, event.name));
    }
    out.push_str("\nDatabase seeding completed!\n");
    out
}

async fn create_user(
    database_url: &str,
    args: UserCreateArgs,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    Migrator::up(&db, None).await?;
    let engine = Engine::builder().database(db).build().await?;

    let mut user = engine
        .create_user(UserNew::new(args.name, args.email, args.password))
        .await?;
    if args.admin {
        user = engine.set_user_role(user.id, Role::Admin).await?;
    }

    println!("created user: {} ({})", user.email, user.role.as_str());
    Ok(())
}

async fn set_active(
    database_url: &str,
    args: UserEmailArgs,
    active: bool,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    Migrator::up(&db, None).await?;
    let engine = Engine::builder().database(db).build().await?;

    let user = engine.user_by_email(&args.email).await?;
    let user = engine.set_user_active(user.id, active).await?;
    let state = if user.is_active { "active" } else { "inactive" };
    println!("user {} is now {state}", user.email);
    Ok(())
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter("eventhub_seed=info,engine=info")
        .init();

    let cli = Cli::parse();
    let seeding = cli.command.is_none();
    let result = match cli.command {
        None => seed(&cli.database_url).await,
        Some(Command::User(User {
            command: UserCommand::Create(args),
        })) => create_user(&cli.database_url, args).await,
        Some(Command::User(User {
            command: UserCommand::Deactivate(args),
        })) => set_active(&cli.database_url, args, false).await,
        Some(Command::User(User {
            command: UserCommand::Activate(args),
        })) => set_active(&cli.database_url, args, true).await,
    };

    if let Err(err) = result {
        if seeding {
            tracing::error!("Error seeding database: {err}");
        } else {
            tracing::error!("user command failed: {err}");
        }
        std::process::exit(1);
    }
}
