use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use todo_core::{AuthConfig, Item, ItemChanges, ItemService, JwtConfig, TokenService};
use todo_db::{Database, DatabaseConfig, ItemRepository};

#[derive(Parser)]
#[command(name = "todo", version, about = "Manage the todo database and bearer tokens")]
struct Cli {
    /// SQLite database URL
    #[arg(
        long,
        global = true,
        env = "DATABASE_URL",
        default_value = todo_db::config::DEFAULT_DATABASE_URL
    )]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print all items as JSON
    List,

    /// Add a new item
    Add {
        /// Item id (must not exist yet)
        #[arg(long)]
        id: i64,

        #[arg(long)]
        title: String,

        /// Mark the item as already completed
        #[arg(long, default_value_t = false)]
        completed: bool,
    },

    /// Overwrite the title and completion flag of an existing item
    Update {
        #[arg(long)]
        id: i64,

        #[arg(long)]
        title: String,

        #[arg(long, default_value_t = false)]
        completed: bool,
    },

    /// Remove an item
    Remove {
        #[arg(long)]
        id: i64,
    },

    /// Mint a bearer token using the JWT_* settings
    Token {
        /// Subject to embed (defaults to the configured login username)
        #[arg(long)]
        subject: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("todo=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            let svc = ItemService::new(connect_db(&cli.database_url).await?);
            let items = svc.list().await?;
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Commands::Add {
            id,
            title,
            completed,
        } => {
            let svc = ItemService::new(connect_db(&cli.database_url).await?);
            let item = svc.create(Item::new(id, title, completed)).await?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        Commands::Update {
            id,
            title,
            completed,
        } => {
            let svc = ItemService::new(connect_db(&cli.database_url).await?);
            let changes = ItemChanges {
                title,
                is_completed: completed,
            };
            let item = svc.update(id, changes).await?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        Commands::Remove { id } => {
            let svc = ItemService::new(connect_db(&cli.database_url).await?);
            svc.delete(id).await?;
            println!("Removed item {id}");
        }
        Commands::Token { subject } => {
            let jwt = JwtConfig::from_env()
                .context("JWT_KEY, JWT_ISSUER and JWT_AUDIENCE must be set")?;
            let subject = subject.unwrap_or_else(|| AuthConfig::from_env().username);
            let token = TokenService::new(&jwt).issue(&subject)?;
            println!("{token}");
        }
    }

    Ok(())
}

/// Open the database and apply migrations.
async fn connect_db(url: &str) -> Result<ItemRepository> {
    let config = DatabaseConfig {
        url: url.to_string(),
        ..DatabaseConfig::from_env()?
    };

    let db = Database::connect(&config)
        .await
        .with_context(|| format!("Failed to open database {url}"))?;
    db.migrate().await?;

    tracing::debug!("Connected to {url}");
    Ok(db.item_repo())
}
