//! `review-dashboard` command line
//!
//! Loads an account's reviews from the local store or the hosted backend,
//! computes the dashboard, prints it as JSON and optionally exports it.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use review_dashboard::db::{self, Database};
use review_dashboard::export::{
    resolve_export_path, write_dashboard_json, write_reviews_csv, write_trend_csv, ExportFormat,
};
use review_dashboard::source::{BackendConfig, RestClient, SourceError};
use review_dashboard::{AnalyticsConfig, DashboardError, RawReviewRow, ReviewAnalytics};

#[derive(Parser, Debug)]
#[command(name = "review-dashboard")]
#[command(about = "Compute review statistics and trends for a shop owner")]
struct Cli {
    /// Account whose reviews are read from the local store
    #[arg(long, env = "REVIEW_DASHBOARD_ACCOUNT")]
    account: Option<String>,

    /// JSON analytics config file
    #[arg(long, env = "REVIEW_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite review store; defaults to the platform data directory
    #[arg(long, env = "REVIEW_DASHBOARD_DB")]
    db: Option<PathBuf>,

    /// Read reviews from the hosted backend instead of the local store
    #[arg(long)]
    remote: bool,

    /// Access token of the signed-in owner, for --remote
    #[arg(long, env = "SUPABASE_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Write the dashboard as JSON; without a path, to the export directory
    #[arg(long, value_name = "PATH")]
    export_json: Option<Option<PathBuf>>,

    /// Write the trend series as CSV; without a path, to the export directory
    #[arg(long, value_name = "PATH")]
    export_trend_csv: Option<Option<PathBuf>>,

    /// Write the review list as CSV; without a path, to the export directory
    #[arg(long, value_name = "PATH")]
    export_reviews_csv: Option<Option<PathBuf>>,
}

/// Rows and the account they belong to
async fn load_rows(cli: &Cli) -> Result<(String, Vec<RawReviewRow>), DashboardError> {
    if cli.remote {
        let client = RestClient::new(BackendConfig::from_env()?)?;
        let token = cli.access_token.as_deref().ok_or(SourceError::NotAuthenticated)?;
        let user = client.current_user(token).await?;
        let rows = client.fetch_reviews(&user.id, token).await?;
        return Ok((user.id, rows));
    }

    let account = cli.account.clone().ok_or(DashboardError::MissingAccount)?;
    let db_path = cli.db.clone().unwrap_or_else(db::default_db_path);
    tracing::info!("Database path: {:?}", db_path);

    if let Some(parent) = db_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!("Failed to create database directory: {}", e);
        }
    }

    let database = Database::new(db_path)?;
    database.initialize()?;
    let rows = database.with_connection(|conn| db::queries::get_reviews_for_user(conn, &account))?;

    Ok((account, rows))
}

async fn run(cli: Cli) -> Result<(), DashboardError> {
    let config = match &cli.config {
        Some(path) => AnalyticsConfig::from_path(path)?,
        None => AnalyticsConfig::default(),
    };
    let analytics = ReviewAnalytics::new(config)?;

    let (account, rows) = load_rows(&cli).await?;
    tracing::info!("Computing dashboard over {} reviews for {}", rows.len(), account);

    let dashboard = analytics.dashboard_now(&rows);

    if let Some(path) = &cli.export_json {
        let path = resolve_export_path(path.as_deref(), "review_dashboard", ExportFormat::Json);
        write_dashboard_json(&dashboard, Some(&account), &path)?;
        tracing::info!("Exported dashboard to {}", path.display());
    }
    if let Some(path) = &cli.export_trend_csv {
        let path = resolve_export_path(path.as_deref(), "review_trend", ExportFormat::Csv);
        write_trend_csv(&dashboard.trend, &path)?;
        tracing::info!("Exported {} days of trend to {}", dashboard.trend.len(), path.display());
    }
    if let Some(path) = &cli.export_reviews_csv {
        let path = resolve_export_path(path.as_deref(), "reviews", ExportFormat::Csv);
        write_reviews_csv(&dashboard.reviews, &path)?;
        tracing::info!("Exported {} reviews to {}", dashboard.reviews.len(), path.display());
    }

    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    review_dashboard::init_logging();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
