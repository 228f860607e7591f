//! Constrix Engine - Streak computation, milestones, check-ins, and sync

pub mod analytics;
pub mod checkin;
pub mod milestones;
pub mod streak;
pub mod sync;

pub use checkin::{check_in, CheckinOutcome};
pub use streak::compute_streak;
pub use sync::sync_pending;
