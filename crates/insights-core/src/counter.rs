//! ============================================================================
//! Visit Counter - Best-effort unique-visitor counting
//! ============================================================================
//! Host-facing wrapper around [`StatsDb`]. Counting is cosmetic telemetry:
//! a missing or broken store degrades to zero counts and a skipped
//! increment, never to an error the host has to handle.
//! ============================================================================

use tracing::{debug, warn};

use crate::access::Session;
use crate::db::{StatsDb, VisitStats};

/// Visit counter over an optional stats store
pub struct VisitCounter {
    store: Option<StatsDb>,
}

impl VisitCounter {
    /// Open the backing store, degrading to a disabled counter if the
    /// store cannot be opened.
    pub fn open(path: Option<&str>) -> Self {
        match StatsDb::open(path) {
            Ok(store) => Self { store: Some(store) },
            Err(e) => {
                warn!("Visit stats store unavailable, counting disabled: {}", e);
                Self { store: None }
            }
        }
    }

    /// Wrap an already-open store
    pub fn with_store(store: StatsDb) -> Self {
        Self { store: Some(store) }
    }

    /// A counter with no backing store; every read reports zero
    pub fn disabled() -> Self {
        Self { store: None }
    }

    pub fn store(&self) -> Option<&StatsDb> {
        self.store.as_ref()
    }

    /// Count this session's visit for `today`, at most once per session.
    ///
    /// `has_counted` is set only after the store write succeeds, so a
    /// failed write is retried on the next render pass rather than lost.
    pub fn record_visit(&self, session: &mut Session, today: &str) {
        if session.has_counted {
            return;
        }
        let Some(store) = &self.store else {
            debug!("No stats store, skipping visit count");
            return;
        };

        match store.record_visit(&session.visitor_id, today) {
            Ok(()) => {
                session.has_counted = true;
            }
            Err(e) => warn!("Failed to record visit: {}", e),
        }
    }

    /// Unique-visitor counts for display. Any storage failure reports
    /// `(0, 0)` instead of propagating.
    pub fn current_stats(&self, today: &str) -> VisitStats {
        let Some(store) = &self.store else {
            return VisitStats::default();
        };

        match store.current_stats(today) {
            Ok(stats) => stats,
            Err(e) => {
                warn!("Failed to read visit stats: {}", e);
                VisitStats::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn counter(dir: &TempDir) -> VisitCounter {
        let path = dir.path().join("stats.redb");
        VisitCounter::open(Some(path.to_str().unwrap()))
    }

    #[test]
    fn test_counts_once_per_session() {
        let dir = TempDir::new().unwrap();
        let counter = counter(&dir);
        let mut session = Session::with_visitor_id(0, "v1".to_string());

        counter.record_visit(&mut session, "2025-01-01");
        counter.record_visit(&mut session, "2025-01-01");
        counter.record_visit(&mut session, "2025-01-01");

        assert!(session.has_counted);
        assert_eq!(counter.store().unwrap().page_views("2025-01-01").unwrap(), 1);
    }

    #[test]
    fn test_distinct_sessions_count_separately() {
        let dir = TempDir::new().unwrap();
        let counter = counter(&dir);
        let mut a = Session::with_visitor_id(0, "v1".to_string());
        let mut b = Session::with_visitor_id(0, "v2".to_string());

        counter.record_visit(&mut a, "2025-01-01");
        counter.record_visit(&mut b, "2025-01-01");

        let stats = counter.current_stats("2025-01-01");
        assert_eq!(stats.today_unique_visitors, 2);
        assert_eq!(stats.all_time_unique_visitors, 2);
    }

    #[test]
    fn test_disabled_counter_reports_zero() {
        let counter = VisitCounter::disabled();
        let mut session = Session::with_visitor_id(0, "v1".to_string());

        counter.record_visit(&mut session, "2025-01-01");
        // No successful write happened, so the session keeps retrying
        assert!(!session.has_counted);
        assert_eq!(counter.current_stats("2025-01-01"), VisitStats::default());
    }

    #[test]
    fn test_unopenable_store_degrades() {
        // A directory path cannot be opened as a redb file
        let dir = TempDir::new().unwrap();
        let counter = VisitCounter::open(Some(dir.path().to_str().unwrap()));

        let mut session = Session::with_visitor_id(0, "v1".to_string());
        counter.record_visit(&mut session, "2025-01-01");
        assert!(!session.has_counted);
        assert_eq!(counter.current_stats("2025-01-01"), VisitStats::default());
    }
}
