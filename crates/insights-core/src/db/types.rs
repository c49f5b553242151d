//! ============================================================================
//! Database Types - Serializable records for redb storage
//! ============================================================================

use serde::{Deserialize, Serialize};

/// One row per calendar date in the `daily_traffic` table.
/// Rows are inserted on first visit of the day and only ever incremented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTrafficRecord {
    /// ISO calendar date (`YYYY-MM-DD`), also the table key
    pub date: String,
    /// Total page views recorded for that date
    pub pv_count: u64,
}

/// One row per visitor id in the `visitors` table, upserted on every
/// counted visit. `last_visit_date` always holds the most recent day the
/// visitor was seen, which is what makes the daily-unique query a filter
/// on this column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorRecord {
    /// Opaque visitor id, also the table key
    pub visitor_id: String,
    /// ISO calendar date of the most recent counted visit
    pub last_visit_date: String,
}

/// Unique-visitor counts surfaced to the host for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitStats {
    /// Visitors whose most recent visit is the queried date
    pub today_unique_visitors: u64,
    /// Every visitor ever seen (rows are never deleted)
    pub all_time_unique_visitors: u64,
}

/// Whole-store totals for the inspection CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrafficTotals {
    /// Number of dates with at least one recorded page view
    pub days_tracked: u64,
    /// Page views summed across all dates
    pub total_page_views: u64,
    /// All-time unique visitors
    pub total_visitors: u64,
}
