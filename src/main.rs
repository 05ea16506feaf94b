use anyhow::Context;
use clap::Parser;
use space_travel::cli::shell;
use space_travel::utils::{logger, validation::Validate};
use space_travel::{AppConfig, CliCommand, CliConfig, Dispatcher, SqliteStore};
use tokio::io::BufReader;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(cli.verbose, &config.logging.level, config.logging.json);
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!("❌ {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(command: CliCommand, config: &AppConfig) -> anyhow::Result<()> {
    let database_path = config.database_path();
    let store = if config.is_in_memory() {
        SqliteStore::open_in_memory()
    } else {
        SqliteStore::open(database_path)
    }
    .with_context(|| format!("failed to open database at {}", database_path))?;

    tracing::info!("Starting database migration...");
    let version = store
        .migrate()
        .await
        .context("database migration failed")?;
    tracing::info!("Database schema at version {}", version);

    match command {
        CliCommand::Migrate => {
            println!("✅ Database at {} is at schema version {}", database_path, version);
        }
        CliCommand::Start => {
            let dispatcher = Dispatcher::new(store);
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();
            shell::run(&dispatcher, stdin, &mut stdout)
                .await
                .context("interactive session failed")?;
        }
    }

    tracing::info!("Application shutdown completed. Goodbye!");
    Ok(())
}
