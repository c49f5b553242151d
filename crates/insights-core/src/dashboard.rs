//! ============================================================================
//! Dashboard - Render-cycle facade for the presentation host
//! ============================================================================
//! The single entry point the host drives once per incoming render cycle:
//! evaluate the gate, count the visit while granted, and hand back the
//! numbers to display. Chart rendering, dialog layout, and styling stay
//! entirely on the host side.
//! ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::access::{AccessDecision, AccessGate, Session};
use crate::config::GateConfig;
use crate::counter::VisitCounter;
use crate::db::VisitStats;

/// What one render pass produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOutcome {
    pub access: AccessDecision,
    /// Visitor counts for display; `None` while access is denied
    pub stats: Option<VisitStats>,
}

/// Gate + counter composed behind one host-facing surface
pub struct Dashboard {
    gate: AccessGate,
    counter: VisitCounter,
}

impl Dashboard {
    pub fn new(gate: AccessGate, counter: VisitCounter) -> Self {
        Self { gate, counter }
    }

    /// Build a dashboard from a gate config and a stats-store path
    /// (None falls back to INSIGHTS_DB_PATH, then the home dotdir).
    pub fn open(config: GateConfig, db_path: Option<&str>) -> Self {
        Self::new(AccessGate::with_config(config), VisitCounter::open(db_path))
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    pub fn counter(&self) -> &VisitCounter {
        &self.counter
    }

    /// Start a session first observed at `now`
    pub fn start_session(&self, now: DateTime<Utc>) -> Session {
        Session::new(now.timestamp())
    }

    /// Run one render pass at `now`.
    ///
    /// While granted, the session's visit is counted at most once (under
    /// the UTC calendar date of `now`) and current stats are returned for
    /// display. While denied, the host renders the unlock form instead
    /// and no counting happens.
    pub fn render_pass(&self, session: &mut Session, now: DateTime<Utc>) -> RenderOutcome {
        let access = self.gate.evaluate(session, now.timestamp());
        if !access.granted {
            return RenderOutcome { access, stats: None };
        }

        let today = now.date_naive().to_string();
        self.counter.record_visit(session, &today);
        let stats = self.counter.current_stats(&today);

        RenderOutcome {
            access,
            stats: Some(stats),
        }
    }

    /// Forward an unlock-form submission to the gate
    pub fn unlock(&self, session: &mut Session, code: &str, now: DateTime<Utc>) -> bool {
        self.gate.attempt_unlock(session, code, now.timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::AccessStatus;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn dashboard(dir: &TempDir) -> Dashboard {
        let path = dir.path().join("stats.redb");
        Dashboard::open(GateConfig::default(), Some(path.to_str().unwrap()))
    }

    fn at(secs_after_midnight: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::seconds(secs_after_midnight)
    }

    #[test]
    fn test_granted_pass_counts_once() {
        let dir = TempDir::new().unwrap();
        let dashboard = dashboard(&dir);
        let mut session = dashboard.start_session(at(0));

        let outcome = dashboard.render_pass(&mut session, at(1));
        assert!(outcome.access.granted);
        let stats = outcome.stats.unwrap();
        assert_eq!(stats.today_unique_visitors, 1);
        assert_eq!(stats.all_time_unique_visitors, 1);

        // Re-rendering does not inflate the page-view count
        let outcome = dashboard.render_pass(&mut session, at(2));
        assert!(outcome.access.granted);
        assert_eq!(
            dashboard.counter().store().unwrap().page_views("2025-01-01").unwrap(),
            1
        );
    }

    #[test]
    fn test_denied_pass_returns_no_stats() {
        let dir = TempDir::new().unwrap();
        let dashboard = dashboard(&dir);
        let mut session = dashboard.start_session(at(0));

        let outcome = dashboard.render_pass(&mut session, at(600));
        assert!(!outcome.access.granted);
        assert!(outcome.stats.is_none());
        assert_eq!(session.access_status, AccessStatus::Locked);
        // A locked viewer is never counted
        assert!(!session.has_counted);
    }

    #[test]
    fn test_unlock_form_round_trip() {
        let dir = TempDir::new().unwrap();
        let dashboard = dashboard(&dir);
        let mut session = dashboard.start_session(at(0));

        dashboard.render_pass(&mut session, at(601));
        assert!(!dashboard.unlock(&mut session, "wrong", at(650)));
        assert!(dashboard.unlock(&mut session, "vip24", at(700)));

        let outcome = dashboard.render_pass(&mut session, at(701));
        assert!(outcome.access.granted);
        assert!(outcome.stats.is_some());
    }

    #[test]
    fn test_counting_key_is_utc_date() {
        let dir = TempDir::new().unwrap();
        let dashboard = dashboard(&dir);
        let mut session = dashboard.start_session(at(0));

        dashboard.render_pass(&mut session, at(1));
        let store = dashboard.counter().store().unwrap();
        assert_eq!(store.page_views("2025-01-01").unwrap(), 1);

        // A second session a day later lands on the next calendar key
        let mut later = dashboard.start_session(at(86_400));
        dashboard.render_pass(&mut later, at(86_401));
        assert_eq!(store.page_views("2025-01-02").unwrap(), 1);
    }
}
