//! Pure aggregation over the classification history.
//!
//! Nothing here performs I/O. Every function takes the full record list (and,
//! where windows matter, the current local time) and recomputes from scratch.

pub mod achievements;
pub mod buckets;
pub mod config;
pub mod impact;
pub mod statistics;

pub use achievements::{compute_achievements, longest_daily_streak};
pub use buckets::{daily_buckets, monthly_buckets, weekly_buckets};
pub use config::AnalyticsConfig;
pub use impact::environmental_impact;
pub use statistics::{compute_statistics, trend};

use chrono::NaiveDateTime;

use crate::models::{AnalyticsReport, ClassificationRecord};

pub fn build_report(
    records: &[ClassificationRecord],
    now: NaiveDateTime,
    config: &AnalyticsConfig,
) -> AnalyticsReport {
    let achievements = compute_achievements(records);

    AnalyticsReport {
        generated_at: now,
        daily: daily_buckets(records, config.daily_buckets),
        weekly: weekly_buckets(records, config.weekly_buckets),
        monthly: monthly_buckets(records, config.monthly_buckets),
        statistics: compute_statistics(records, now, config),
        achievement_progress: achievements::unlocked_percent(&achievements),
        achievements,
    }
}
