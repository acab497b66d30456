//! Core business logic: the data model and the pure goal calculations

pub mod aggregate;
pub mod config;
pub mod entry;
pub mod goal;
pub mod log;
pub mod projection;
pub mod statistics;
pub mod timeline;

// Re-export main types for cleaner imports
pub use aggregate::{PeriodTotal, aggregate, source_total, source_totals};
pub use entry::Entry;
pub use goal::{Currency, Goal, GoalRecord, GoalUpdate};
pub use projection::{PacingStatus, Progress, WeekComparison, classify, compare_last_two, project};
pub use statistics::{Statistics, streak_days};
pub use timeline::Timeline;
