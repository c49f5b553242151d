// ============================================================================
// insights-db — CLI inspection tool for the visit-stats database
// ============================================================================
// Usage:
//   insights-db stats                       Show whole-store totals
//   insights-db today [--date 2025-01-01]   Counts for one calendar date
//   insights-db visitors                    List visitor rows
//   insights-db export --format json        Export full database as JSON
// ============================================================================

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use insights_core::StatsDb;

/// Global Insights visit-stats inspection tool
#[derive(Parser)]
#[command(name = "insights-db", version, about = "Inspect the Global Insights visit-stats database")]
struct Cli {
    /// Path to the database file (default: ~/.insights/visit_stats.redb)
    #[arg(long, global = true)]
    db_path: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whole-store totals (days tracked, page views, visitors)
    Stats,

    /// Show unique visitors and page views for one date
    Today {
        /// Calendar date as YYYY-MM-DD (default: today, UTC)
        #[arg(long)]
        date: Option<String>,
    },

    /// List all visitor rows
    Visitors,

    /// Export full database contents as JSON
    Export {
        /// Output format (currently only json is supported)
        #[arg(long, default_value = "json")]
        format: String,
    },
}

fn parse_date(s: &str) -> Result<String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.to_string())
        .map_err(|_| anyhow::anyhow!("Invalid date '{}'. Expected YYYY-MM-DD.", s))
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Could not load .env file: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("insights_core=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let db = StatsDb::open(cli.db_path.as_deref())?;

    match cli.command {
        Commands::Stats => cmd_stats(&db),
        Commands::Today { date } => cmd_today(&db, date),
        Commands::Visitors => cmd_visitors(&db),
        Commands::Export { format } => cmd_export(&db, &format),
    }
}

fn cmd_stats(db: &StatsDb) -> Result<()> {
    let totals = db.totals()?;

    println!("=== Global Insights Visit Stats ===");
    println!("Database: {}", db.path().display());
    println!();
    println!("Days tracked:  {}", totals.days_tracked);
    println!("Page views:    {}", totals.total_page_views);
    println!("Visitors:      {}", totals.total_visitors);

    Ok(())
}

fn cmd_today(db: &StatsDb, date: Option<String>) -> Result<()> {
    let date = match date {
        Some(raw) => parse_date(&raw)?,
        None => Utc::now().date_naive().to_string(),
    };

    let stats = db.current_stats(&date)?;
    let page_views = db.page_views(&date)?;

    println!("Date:             {}", date);
    println!("Unique visitors:  {}", stats.today_unique_visitors);
    println!("Page views:       {}", page_views);
    println!("All-time unique:  {}", stats.all_time_unique_visitors);

    Ok(())
}

fn cmd_visitors(db: &StatsDb) -> Result<()> {
    let visitors = db.list_visitors()?;

    if visitors.is_empty() {
        println!("No visitors recorded.");
        return Ok(());
    }

    println!("{:<38}  {}", "VISITOR ID", "LAST VISIT");
    println!("{}", "-".repeat(50));
    for visitor in &visitors {
        println!("{:<38}  {}", visitor.visitor_id, visitor.last_visit_date);
    }

    println!("\nTotal: {} visitors", visitors.len());
    Ok(())
}

fn cmd_export(db: &StatsDb, format: &str) -> Result<()> {
    if format != "json" {
        anyhow::bail!("Unsupported format '{}'. Only 'json' is supported.", format);
    }

    let daily_traffic = db.list_daily_traffic()?;
    let visitors = db.list_visitors()?;
    let totals = db.totals()?;

    let export = serde_json::json!({
        "exported_at": Utc::now().to_rfc3339(),
        "totals": totals,
        "daily_traffic": daily_traffic,
        "visitors": visitors,
    });

    println!("{}", serde_json::to_string_pretty(&export)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-01-01").unwrap(), "2025-01-01");
        assert!(parse_date("01/01/2025").is_err());
        assert!(parse_date("2025-13-01").is_err());
    }
}
