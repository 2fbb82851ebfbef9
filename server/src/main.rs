//! Sitemapper: sitemap generator for a headless CMS.
//!
//! Usage:
//!   sitemapper serve --port 1337 --database sitemapper.db --schemas schemas.json
//!   sitemapper import --database sitemapper.db --file entries.json
//!   sitemapper generate --output public/sitemap.xml
//!
//! Content types come from the schema registry file; entries and the sitemap
//! config live in the SQLite database.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sitemapper_generator::{ConfigStore, InMemorySchemaRegistry, SitemapService};
use sitemapper_model::ContentEntry;
use sitemapper_server::{AppState, build_router};
use sitemapper_storage::{EntryStore, PluginStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sitemapper")]
#[command(about = "Sitemap generator for headless CMS content")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the public sitemap and the admin API
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0", env = "SITEMAPPER_HOST")]
        host: String,

        /// HTTP port
        #[arg(short, long, default_value = "1337", env = "SITEMAPPER_PORT")]
        port: u16,

        /// Bearer token required on admin routes
        #[arg(long, env = "SITEMAPPER_ADMIN_TOKEN")]
        admin_token: Option<String>,

        #[command(flatten)]
        storage: StorageArgs,
    },

    /// Load content entries from a JSON array into the database
    Import {
        /// JSON file holding `[{"id", "content_type", "data"}, ...]`
        #[arg(short, long)]
        file: PathBuf,

        /// Path to the SQLite database
        #[arg(long, default_value = "sitemapper.db", env = "SITEMAPPER_DATABASE")]
        database: PathBuf,
    },

    /// Render the sitemap once and write it out
    Generate {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        storage: StorageArgs,
    },
}

#[derive(Args, Debug)]
struct StorageArgs {
    /// Path to the SQLite database
    #[arg(long, default_value = "sitemapper.db", env = "SITEMAPPER_DATABASE")]
    database: PathBuf,

    /// Schema registry file (JSON object of uid -> schema)
    #[arg(long, default_value = "schemas.json", env = "SITEMAPPER_SCHEMAS")]
    schemas: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Command::Serve {
            host,
            port,
            admin_token,
            storage,
        } => serve(&host, port, admin_token, &storage).await,
        Command::Import { file, database } => import(&file, &database),
        Command::Generate { output, storage } => generate(output.as_deref(), &storage).await,
    }
}

fn open_service(storage: &StorageArgs) -> Result<SitemapService> {
    let registry = InMemorySchemaRegistry::load(&storage.schemas)
        .with_context(|| format!("Failed to load schema registry {}", storage.schemas.display()))?;
    info!("Loaded {} content type schema(s)", registry.len());

    let entries = EntryStore::open(&storage.database).context("Failed to open entry store")?;
    let plugins = PluginStore::open(&storage.database).context("Failed to open plugin store")?;

    Ok(SitemapService::new(
        Arc::new(registry),
        Arc::new(entries),
        ConfigStore::new(plugins),
    ))
}

async fn serve(
    host: &str,
    port: u16,
    admin_token: Option<String>,
    storage: &StorageArgs,
) -> Result<()> {
    let service = Arc::new(open_service(storage)?);
    info!(
        "Discovered {} sitemap-eligible content type(s)",
        service.discover_content_types().len()
    );

    let mut state = AppState::new(service);
    match admin_token {
        Some(token) => state = state.with_admin_token(token),
        None => warn!("No admin token configured; admin routes are open"),
    }

    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))?;
    info!("Sitemapper listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    info!("Sitemapper stopped");
    Ok(())
}

fn import(file: &Path, database: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let entries: Vec<ContentEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse entries in {}", file.display()))?;
    let store = EntryStore::open(database).context("Failed to open entry store")?;
    let written = store.import_entries(&entries).context("Failed to import entries")?;
    info!("Imported {} entries into {}", written, database.display());
    Ok(())
}

async fn generate(output: Option<&Path>, storage: &StorageArgs) -> Result<()> {
    let service = open_service(storage)?;
    match output {
        Some(path) => {
            let bytes = service
                .write_xml_to(path)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} bytes to {}", bytes, path.display());
        }
        None => println!("{}", service.generate_xml().await?),
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
