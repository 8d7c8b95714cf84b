use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tera::Tera;
use tracing::info;
use tracing_subscriber::EnvFilter;

use letswift_gallery::config::Config;
use letswift_gallery::handlers::AppState;
use letswift_gallery::models::Year;
use letswift_gallery::routes::create_router;
use letswift_gallery::services::CatalogService;
use letswift_gallery::terminal;

#[derive(Parser)]
#[command(name = "letswift-gallery", version, about = "LetSwift conference talk gallery")]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the gallery over HTTP (default)
    Serve,
    /// Print the talks of one year matching a query
    List {
        #[arg(long)]
        year: Option<Year>,
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Browse the talks interactively from the terminal
    Browse,
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config;
    let catalog_service = CatalogService::from_dir(&config.data_dir);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            init_logging("info,tower_http=info");
            serve(config, catalog_service).await
        }
        Command::List { year, query } => {
            init_logging("warn");
            let year = year.unwrap_or(config.default_year);
            terminal::list(&catalog_service, year, &query).await
        }
        Command::Browse => {
            init_logging("warn");
            terminal::browse(catalog_service, config.default_year).await
        }
    }
}

async fn serve(config: Config, catalog_service: CatalogService) -> Result<()> {
    let config = Arc::new(config);

    let tera = Tera::new(&config.template_glob())
        .with_context(|| format!("Failed to parse templates in {}", config.template_dir.display()))?;

    config.print_server_start_message();

    let state = Arc::new(AppState {
        config: config.clone(),
        catalog_service,
        tera,
    });
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
