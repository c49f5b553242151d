//! ============================================================================
//! Access Types - Session state and gate decisions
//! ============================================================================
//! Defines the per-viewer session value and the decision returned to the
//! host on every render pass. Sessions are serialized by the host (cookie,
//! server-side session table, client-held token) and handed back on the
//! next cycle.
//! ============================================================================

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access lifecycle of a session.
///
/// Transitions are monotonic: `Free -> Locked` when the trial window
/// elapses, `Locked -> Unlocked` only via a correct code, `Unlocked ->
/// Locked` when the grant expires. A session never returns to `Free`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccessStatus {
    /// Inside the free-trial window
    #[default]
    Free,
    /// Trial or grant elapsed; an unlock code is required
    Locked,
    /// A correct code was submitted and the grant has not expired
    Unlocked,
}

/// Per-viewer session state, owned by the host for the lifetime of the
/// browser session.
///
/// `unlock_time` is set if and only if `access_status` is `Unlocked`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unix seconds of first observation; immutable after creation
    pub session_start_time: i64,
    pub access_status: AccessStatus,
    /// Unix seconds of the successful unlock, while `Unlocked`
    pub unlock_time: Option<i64>,
    /// Opaque counting key, generated once per session
    pub visitor_id: String,
    /// At-most-one visit count per session, regardless of render cycles
    pub has_counted: bool,
}

impl Session {
    /// Start a new session first observed at `now` (unix seconds), with a
    /// freshly generated visitor id.
    pub fn new(now: i64) -> Self {
        Self::with_visitor_id(now, Uuid::new_v4().to_string())
    }

    /// Start a new session with a caller-provided visitor id.
    pub fn with_visitor_id(now: i64, visitor_id: String) -> Self {
        Self {
            session_start_time: now,
            access_status: AccessStatus::Free,
            unlock_time: None,
            visitor_id,
            has_counted: false,
        }
    }
}

/// Remaining access returned alongside a granted decision, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainingAccess {
    /// Whole seconds left in the free trial
    TrialSeconds(i64),
    /// Whole hours left on the unlock grant
    GrantHours(i64),
}

impl RemainingAccess {
    /// Human-readable remaining time for the host to display
    pub fn display(&self) -> String {
        match self {
            RemainingAccess::TrialSeconds(secs) => {
                format!("{}s left in free trial", secs)
            }
            RemainingAccess::GrantHours(hours) => {
                format!("{}h of unlocked access left", hours)
            }
        }
    }
}

/// Outcome of a gate evaluation for one render pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    /// Whether gated content may be rendered this pass
    pub granted: bool,
    /// Remaining time while granted; `None` when denied
    pub remaining: Option<RemainingAccess>,
}

impl AccessDecision {
    pub fn denied() -> Self {
        Self {
            granted: false,
            remaining: None,
        }
    }

    pub fn trial(remaining_secs: i64) -> Self {
        Self {
            granted: true,
            remaining: Some(RemainingAccess::TrialSeconds(remaining_secs)),
        }
    }

    pub fn unlocked(remaining_hours: i64) -> Self {
        Self {
            granted: true,
            remaining: Some(RemainingAccess::GrantHours(remaining_hours)),
        }
    }

    /// Display string for the remaining-time banner, if any
    pub fn remaining_display(&self) -> Option<String> {
        self.remaining.as_ref().map(RemainingAccess::display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(1_700_000_000);
        assert_eq!(session.session_start_time, 1_700_000_000);
        assert_eq!(session.access_status, AccessStatus::Free);
        assert!(session.unlock_time.is_none());
        assert!(!session.has_counted);
        assert!(!session.visitor_id.is_empty());
    }

    #[test]
    fn test_visitor_ids_are_unique() {
        let a = Session::new(0);
        let b = Session::new(0);
        assert_ne!(a.visitor_id, b.visitor_id);
    }

    #[test]
    fn test_remaining_display() {
        assert_eq!(
            AccessDecision::trial(42).remaining_display().unwrap(),
            "42s left in free trial"
        );
        assert_eq!(
            AccessDecision::unlocked(23).remaining_display().unwrap(),
            "23h of unlocked access left"
        );
        assert!(AccessDecision::denied().remaining_display().is_none());
    }
}
