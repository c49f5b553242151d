//! ============================================================================
//! Access Module - Free-trial / code-unlock access wall
//! ============================================================================
//! Gates the dashboard behind a time-limited free trial with a static
//! unlock code.
//!
//! ## Lifecycle
//! - **Free**: unconditional access while the trial window runs
//! - **Locked**: trial or grant elapsed; evaluation always denies
//! - **Unlocked**: correct code submitted; access until the grant expires
//!
//! ## Usage
//! ```rust,ignore
//! use insights_core::access::{AccessGate, Session};
//!
//! let gate = AccessGate::new();
//! let mut session = Session::new(now);
//! let decision = gate.evaluate(&mut session, now);
//! if !decision.granted {
//!     let unlocked = gate.attempt_unlock(&mut session, &submitted_code, now);
//! }
//! ```
//!
//! The clock is the caller-supplied wall clock; skew and manual clock
//! manipulation are accepted weaknesses of this trust model, as is the
//! static shared-secret code with no rotation or rate limiting.
//! ============================================================================

mod gate;
mod types;

// Re-export public types
pub use gate::AccessGate;
pub use types::{AccessDecision, AccessStatus, RemainingAccess, Session};
