//! Import hand-authored job documents into the job store.
//!
//! Each document is upserted under its own `id`, so re-running the import
//! replaces earlier copies instead of duplicating them.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use portal_core::domains::jobs::import_jobs;
use portal_core::kernel::{BaseJobStore, MemoryJobStore, PostgresJobStore};
use portal_core::Config;
use serde_json::Value;
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "seed_jobs")]
#[command(about = "Create or replace job documents from a JSON file")]
struct Cli {
    /// JSON file holding an array of job documents
    #[arg(default_value = "seeds/jobs.json")]
    path: PathBuf,

    /// Parse and validate against an in-memory store without touching the database
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,portal_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let json_data = std::fs::read_to_string(&cli.path)
        .with_context(|| format!("Failed to read seed file {}", cli.path.display()))?;
    let documents: Vec<Value> =
        serde_json::from_str(&json_data).context("Seed file must be a JSON array of jobs")?;

    let store: Arc<dyn BaseJobStore> = if cli.dry_run {
        tracing::info!("Dry run, using in-memory job store");
        Arc::new(MemoryJobStore::new())
    } else {
        let Some(database_url) = config.database_url.as_deref() else {
            bail!("DATABASE_URL must be set (or pass --dry-run)");
        };
        let pool = PgPool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
        Arc::new(PostgresJobStore::new(pool))
    };

    let report = import_jobs(store.as_ref(), documents, Utc::now()).await;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.failed.is_empty() {
        bail!("{} job(s) failed to import", report.failed.len());
    }
    Ok(())
}
