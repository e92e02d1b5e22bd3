//! CLI administration tool for doctor-directory.
//!
//! Provides commands for checking the database, viewing statistics,
//! previewing slugs and auditing persisted slugs without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Preview a slug
//! cargo run --bin admin -- slug "Dr. John A. Smith, MD" --max-length 20
//!
//! # Report records whose persisted slugs drifted from their display values
//! cargo run --bin admin -- slugs audit
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`
//!   (required for database commands)

use doctor_directory::config::{Config, mask_connection_string};
use doctor_directory::utils::slugify::{DEFAULT_MAX_LENGTH, is_canonical, slugify, slugify_bounded};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;

/// CLI tool for managing doctor-directory.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Print the slug for a text
    Slug {
        /// Text to slugify (e.g., a doctor name)
        text: String,

        /// Maximum slug length
        #[arg(short, long, default_value_t = DEFAULT_MAX_LENGTH)]
        max_length: usize,
    },

    /// Persisted slug maintenance
    Slugs {
        #[command(subcommand)]
        action: SlugsAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

/// Slug maintenance subcommands.
#[derive(Subcommand)]
enum SlugsAction {
    /// List malformed doctor slugs and specialty or hospital slugs that differ
    /// from the slugified name
    Audit,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Slug { text, max_length } => {
            print_slug(&text, max_length);
            Ok(())
        }
        Commands::Stats => handle_stats(&connect().await?).await,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await,
        Commands::Slugs { action } => handle_slugs_action(action, &connect().await?).await,
    }
}

/// Connects using the same variables as the server.
async fn connect() -> Result<PgPool> {
    let database_url = Config::load_database_url()?;

    PgPool::connect(&database_url).await.with_context(|| {
        format!(
            "Failed to connect to database at {}",
            mask_connection_string(&database_url)
        )
    })
}

fn print_slug(text: &str, max_length: usize) {
    let slug = slugify_bounded(text, max_length);

    if slug.is_empty() {
        println!("{}", "⚠️  Text has no characters usable in a slug".yellow());
        return;
    }

    println!("{}", slug.bright_green().bold());
}

/// Displays directory statistics.
///
/// Shows:
/// - Total number of doctors
/// - Number of distinct locations, specialties and hospitals
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (doctors, locations, specialties, hospitals): (i64, i64, i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*),
               COUNT(DISTINCT location),
               COUNT(DISTINCT specialty),
               COUNT(DISTINCT hospital)
        FROM doctors
        "#,
    )
    .fetch_one(pool)
    .await?;

    println!(
        "  Doctors:     {}",
        doctors.to_string().bright_green().bold()
    );
    println!(
        "  Locations:   {}",
        locations.to_string().bright_green().bold()
    );
    println!(
        "  Specialties: {}",
        specialties.to_string().bright_green().bold()
    );
    println!(
        "  Hospitals:   {}",
        hospitals.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let doctors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM doctors")
                .fetch_one(pool)
                .await
                .context("Table 'doctors' is missing; start the server once to migrate")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!();
            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Doctors:    {}", doctors.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

/// One persisted slug that no longer matches its display value.
#[derive(Debug, PartialEq)]
struct SlugDrift {
    doctor_slug: String,
    field: &'static str,
    value: String,
    persisted: Option<String>,
    expected: String,
}

/// Compares a persisted slug with the slug of its display value.
fn drift(
    doctor_slug: &str,
    field: &'static str,
    value: Option<&str>,
    persisted: Option<&str>,
) -> Option<SlugDrift> {
    let value = value?;
    let expected = slugify(value);

    if persisted == Some(expected.as_str()) {
        return None;
    }

    Some(SlugDrift {
        doctor_slug: doctor_slug.to_string(),
        field,
        value: value.to_string(),
        persisted: persisted.map(str::to_string),
        expected,
    })
}

/// Handles persisted slug commands.
///
/// The audit is read-only: it reports drift and never rewrites slugs.
async fn handle_slugs_action(action: SlugsAction, pool: &PgPool) -> Result<()> {
    match action {
        SlugsAction::Audit => {
            println!("{}", "🔎 Auditing persisted slugs".bright_blue().bold());
            println!();

            let rows: Vec<(String, Option<String>, Option<String>, Option<String>, Option<String>)> =
                sqlx::query_as(
                    r#"
                    SELECT slug, specialty, specialty_slug, hospital, hospital_slug
                    FROM doctors
                    ORDER BY slug
                    "#,
                )
                .fetch_all(pool)
                .await?;

            let drifts: Vec<SlugDrift> = rows
                .iter()
                .flat_map(|(slug, specialty, specialty_slug, hospital, hospital_slug)| {
                    [
                        drift(
                            slug,
                            "specialty",
                            specialty.as_deref(),
                            specialty_slug.as_deref(),
                        ),
                        drift(
                            slug,
                            "hospital",
                            hospital.as_deref(),
                            hospital_slug.as_deref(),
                        ),
                    ]
                })
                .flatten()
                .collect();

            let malformed: Vec<&str> = rows
                .iter()
                .map(|row| row.0.as_str())
                .filter(|slug| !is_canonical(slug))
                .collect();

            if drifts.is_empty() && malformed.is_empty() {
                println!(
                    "{}",
                    format!("✅ All slugs match across {} doctors", rows.len())
                        .green()
                        .bold()
                );
                return Ok(());
            }

            for slug in &malformed {
                println!(
                    "  {} {} (expected form: {})",
                    "Malformed doctor slug:".yellow(),
                    slug.red(),
                    slugify(slug).green()
                );
            }
            if !malformed.is_empty() {
                println!();
            }

            if drifts.is_empty() {
                return Ok(());
            }

            println!(
                "  {:<40} {:<10} {:<30} {}",
                "Doctor".bright_white().bold(),
                "Field".bright_white().bold(),
                "Persisted".bright_white().bold(),
                "Expected".bright_white().bold()
            );
            println!("  {}", "─".repeat(100).bright_black());

            for drift in &drifts {
                println!(
                    "  {:<40} {:<10} {:<30} {}",
                    drift.doctor_slug.cyan(),
                    drift.field,
                    drift.persisted.as_deref().unwrap_or("(none)").red(),
                    drift.expected.green()
                );
                println!("  {:<40} {}", "", drift.value.bright_black());
            }

            println!();
            println!(
                "  Drifted slugs: {}",
                drifts.len().to_string().bright_yellow().bold()
            );
            println!();
        }
    }

    Ok(())
}
