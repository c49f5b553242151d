//! ============================================================================
//! INSIGHTS-CORE: Global Insights access core
//! ============================================================================
//! Backend logic for the Global Insights dashboard:
//! - Free-trial / code-unlock access gating (AccessGate)
//! - Persistent daily + all-time unique-visitor counting (VisitCounter)
//! - Render-cycle facade the presentation host drives (Dashboard)
//! - Simulated donation tally with no payment gateway (DonationTally)
//! ============================================================================

pub mod access;
pub mod config;
pub mod counter;
pub mod dashboard;
pub mod db;
pub mod donation;

// Re-export main types for convenience
pub use access::{AccessDecision, AccessGate, AccessStatus, RemainingAccess, Session};
pub use config::{ConfigError, GateConfig};
pub use counter::VisitCounter;
pub use dashboard::{Dashboard, RenderOutcome};
pub use db::{DailyTrafficRecord, StatsDb, TrafficTotals, VisitStats, VisitorRecord};
pub use donation::{DonationReceipt, DonationTally, PaymentChannel};
