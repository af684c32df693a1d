use clap::Parser;
use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[derive(Debug, Parser)]
#[command(name = "team_registry", version)]
struct Args {
    /// Optional settings file path (TOML, extension may be omitted).
    #[arg(long, env = "TEAM_REGISTRY_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let settings = settings::Settings::new(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "team_registry={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.server.database).await?;
    let engine = engine::Engine::builder()
        .database(db)
        .build()
        .await?;

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|err| {
        tracing::error!("failed to bind server listener on {addr}: {err}");
        err
    })?;

    server::run_with_listener(engine, listener).await?;
    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    tracing::info!("opening database {url}");
    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
