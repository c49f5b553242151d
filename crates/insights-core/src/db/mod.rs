// ============================================================================
// StatsDb — Embedded visit-stats database (redb)
// ============================================================================
// Persistent local storage for daily traffic and visitor records.
// Default path: ~/.insights/visit_stats.redb (override via INSIGHTS_DB_PATH)
// ============================================================================

pub mod types;

pub use types::{DailyTrafficRecord, TrafficTotals, VisitStats, VisitorRecord};

use anyhow::{anyhow, Result};
use redb::{Database, ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// Table definitions
const DAILY_TRAFFIC: TableDefinition<&str, &[u8]> = TableDefinition::new("daily_traffic");
const VISITORS: TableDefinition<&str, &[u8]> = TableDefinition::new("visitors");

/// Embedded database holding the two visit-stats tables.
///
/// Rows only ever grow: daily rows are incremented in place and visitor
/// rows are upserted by id, never deleted. Concurrent writers are
/// serialized by redb's write transactions, so the read-increment-write
/// of a daily row cannot lose updates.
pub struct StatsDb {
    db: Database,
    path: PathBuf,
}

impl StatsDb {
    /// Open (or create) the database at the given path.
    /// If `path` is None, uses INSIGHTS_DB_PATH env var or
    /// ~/.insights/visit_stats.redb
    pub fn open(path: Option<&str>) -> Result<Self> {
        let db_path = if let Some(p) = path {
            PathBuf::from(p)
        } else if let Ok(env_path) = std::env::var("INSIGHTS_DB_PATH") {
            PathBuf::from(env_path)
        } else {
            let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot determine home directory"))?;
            let insights_dir = home.join(".insights");
            std::fs::create_dir_all(&insights_dir)
                .map_err(|e| anyhow!("Failed to create .insights directory: {}", e))?;
            insights_dir.join("visit_stats.redb")
        };

        info!("Opening visit-stats database at: {}", db_path.display());

        let db = Database::create(&db_path)
            .map_err(|e| anyhow!("Failed to open database: {}", e))?;

        // Ensure tables exist by doing a write transaction
        let write_txn = db
            .begin_write()
            .map_err(|e| anyhow!("Failed to begin write: {}", e))?;
        {
            let _ = write_txn
                .open_table(DAILY_TRAFFIC)
                .map_err(|e| anyhow!("Failed to create daily_traffic table: {}", e))?;
            let _ = write_txn
                .open_table(VISITORS)
                .map_err(|e| anyhow!("Failed to create visitors table: {}", e))?;
        }
        write_txn.commit().map_err(|e| anyhow!("Failed to commit init: {}", e))?;

        Ok(Self { db, path: db_path })
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ========================================================================
    // Write Operations
    // ========================================================================

    /// Record one page view for `today` and upsert the visitor row, as a
    /// single write transaction. The daily row is created with a zero
    /// count on first sight of the date before being incremented; the
    /// visitor row's `last_visit_date` is overwritten unconditionally.
    pub fn record_visit(&self, visitor_id: &str, today: &str) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| anyhow!("Failed to begin write: {}", e))?;
        {
            let mut traffic = write_txn
                .open_table(DAILY_TRAFFIC)
                .map_err(|e| anyhow!("Failed to open daily_traffic table: {}", e))?;

            let mut record = match traffic
                .get(today)
                .map_err(|e| anyhow!("Failed to get daily record: {}", e))?
            {
                Some(value) => bincode::deserialize::<DailyTrafficRecord>(value.value())
                    .map_err(|e| anyhow!("Failed to deserialize daily record: {}", e))?,
                None => DailyTrafficRecord {
                    date: today.to_string(),
                    pv_count: 0,
                },
            };
            record.pv_count += 1;

            let value = bincode::serialize(&record)
                .map_err(|e| anyhow!("Failed to serialize daily record: {}", e))?;
            traffic
                .insert(today, value.as_slice())
                .map_err(|e| anyhow!("Failed to insert daily record: {}", e))?;

            let mut visitors = write_txn
                .open_table(VISITORS)
                .map_err(|e| anyhow!("Failed to open visitors table: {}", e))?;
            let visitor = VisitorRecord {
                visitor_id: visitor_id.to_string(),
                last_visit_date: today.to_string(),
            };
            let value = bincode::serialize(&visitor)
                .map_err(|e| anyhow!("Failed to serialize visitor record: {}", e))?;
            visitors
                .insert(visitor_id, value.as_slice())
                .map_err(|e| anyhow!("Failed to upsert visitor record: {}", e))?;
        }
        write_txn.commit().map_err(|e| anyhow!("Failed to commit: {}", e))?;

        debug!("Recorded visit for {} on {}", visitor_id, today);
        Ok(())
    }

    // ========================================================================
    // Read Operations
    // ========================================================================

    /// Unique-visitor counts for `today` and all time
    pub fn current_stats(&self, today: &str) -> Result<VisitStats> {
        let mut stats = VisitStats::default();
        for visitor in self.list_visitors()? {
            stats.all_time_unique_visitors += 1;
            if visitor.last_visit_date == today {
                stats.today_unique_visitors += 1;
            }
        }
        Ok(stats)
    }

    /// Page views recorded for a date (0 if the date was never seen)
    pub fn page_views(&self, date: &str) -> Result<u64> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| anyhow!("Failed to begin read: {}", e))?;
        let table = read_txn
            .open_table(DAILY_TRAFFIC)
            .map_err(|e| anyhow!("Failed to open daily_traffic table: {}", e))?;

        match table
            .get(date)
            .map_err(|e| anyhow!("Failed to get daily record: {}", e))?
        {
            Some(value) => {
                let record: DailyTrafficRecord = bincode::deserialize(value.value())
                    .map_err(|e| anyhow!("Failed to deserialize daily record: {}", e))?;
                Ok(record.pv_count)
            }
            None => Ok(0),
        }
    }

    /// All daily traffic rows, in date order
    pub fn list_daily_traffic(&self) -> Result<Vec<DailyTrafficRecord>> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| anyhow!("Failed to begin read: {}", e))?;
        let table = read_txn
            .open_table(DAILY_TRAFFIC)
            .map_err(|e| anyhow!("Failed to open daily_traffic table: {}", e))?;

        let mut results = Vec::new();
        let iter = table
            .range::<&str>(..)
            .map_err(|e| anyhow!("Failed to iterate daily_traffic: {}", e))?;
        for entry in iter {
            let (_key, value) = entry.map_err(|e| anyhow!("Failed to read entry: {}", e))?;
            let record: DailyTrafficRecord = bincode::deserialize(value.value())
                .map_err(|e| anyhow!("Failed to deserialize daily record: {}", e))?;
            results.push(record);
        }
        Ok(results)
    }

    /// All visitor rows
    pub fn list_visitors(&self) -> Result<Vec<VisitorRecord>> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| anyhow!("Failed to begin read: {}", e))?;
        let table = read_txn
            .open_table(VISITORS)
            .map_err(|e| anyhow!("Failed to open visitors table: {}", e))?;

        let mut results = Vec::new();
        let iter = table
            .range::<&str>(..)
            .map_err(|e| anyhow!("Failed to iterate visitors: {}", e))?;
        for entry in iter {
            let (_key, value) = entry.map_err(|e| anyhow!("Failed to read entry: {}", e))?;
            let visitor: VisitorRecord = bincode::deserialize(value.value())
                .map_err(|e| anyhow!("Failed to deserialize visitor record: {}", e))?;
            results.push(visitor);
        }
        Ok(results)
    }

    // ========================================================================
    // Statistics
    // ========================================================================

    /// Whole-store totals for the inspection CLI
    pub fn totals(&self) -> Result<TrafficTotals> {
        let daily = self.list_daily_traffic()?;
        let visitors = self.list_visitors()?;

        Ok(TrafficTotals {
            days_tracked: daily.len() as u64,
            total_page_views: daily.iter().map(|d| d.pv_count).sum(),
            total_visitors: visitors.len() as u64,
        })
    }
}
