//! ============================================================================
//! Access Gate - Trial / unlock lifecycle state machine
//! ============================================================================
//! Decides on every render pass whether the session may view gated
//! content, and performs the boundary transitions (trial elapsed, grant
//! expired) as a side effect. Safe to call every cycle: between
//! boundaries, evaluation is a pure function of session state and `now`.
//! ============================================================================

use tracing::{debug, info, warn};

use super::types::{AccessDecision, AccessStatus, Session};
use crate::config::GateConfig;

/// Access gate over the trial/unlock state machine
pub struct AccessGate {
    config: GateConfig,
}

impl AccessGate {
    /// Create a gate with default configuration
    pub fn new() -> Self {
        Self::with_config(GateConfig::default())
    }

    /// Create a gate with custom configuration
    pub fn with_config(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Evaluate the session at `now` (unix seconds).
    ///
    /// Crossing a boundary mutates the session: the free trial locks the
    /// instant `now - session_start_time` reaches the trial window, and
    /// an unlock grant relocks the instant `now` reaches
    /// `unlock_time + access duration`. A lapsed grant is a full re-lock;
    /// it is not remembered or renewable without re-entering the code.
    pub fn evaluate(&self, session: &mut Session, now: i64) -> AccessDecision {
        match session.access_status {
            AccessStatus::Free => {
                let elapsed = now - session.session_start_time;
                if elapsed < self.config.free_trial_secs {
                    AccessDecision::trial(self.config.free_trial_secs - elapsed)
                } else {
                    info!(
                        "Free trial elapsed for visitor {}, locking",
                        session.visitor_id
                    );
                    session.access_status = AccessStatus::Locked;
                    AccessDecision::denied()
                }
            }
            AccessStatus::Locked => AccessDecision::denied(),
            AccessStatus::Unlocked => {
                let Some(unlock_time) = session.unlock_time else {
                    // Unlocked without an unlock time violates the session
                    // invariant; treat the grant as lapsed.
                    warn!(
                        "Unlocked session {} has no unlock time, relocking",
                        session.visitor_id
                    );
                    session.access_status = AccessStatus::Locked;
                    return AccessDecision::denied();
                };

                let expiry = unlock_time + self.config.access_duration_secs();
                if now < expiry {
                    AccessDecision::unlocked((expiry - now) / 3600)
                } else {
                    info!(
                        "Unlock grant expired for visitor {}, relocking",
                        session.visitor_id
                    );
                    session.access_status = AccessStatus::Locked;
                    session.unlock_time = None;
                    AccessDecision::denied()
                }
            }
        }
    }

    /// Attempt to unlock a locked session with a submitted code.
    ///
    /// The only mutator driven by user input. A wrong code is a normal
    /// negative outcome, not an error; any number of attempts is
    /// permitted. Attempts outside the `Locked` state are no-ops.
    pub fn attempt_unlock(&self, session: &mut Session, code: &str, now: i64) -> bool {
        if session.access_status != AccessStatus::Locked {
            debug!(
                "Unlock attempt ignored: session {} is {:?}",
                session.visitor_id, session.access_status
            );
            return false;
        }

        if code == self.config.unlock_code {
            session.access_status = AccessStatus::Unlocked;
            session.unlock_time = Some(now);
            info!(
                "Session {} unlocked for {}h",
                session.visitor_id, self.config.access_hours
            );
            true
        } else {
            debug!("Wrong unlock code for session {}", session.visitor_id);
            false
        }
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new()
    }
}
