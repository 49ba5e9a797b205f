mod analytics;
mod classification;

pub use analytics::{
    Achievement, AchievementKind, AnalyticsReport, CategoryCounts, EnvironmentalImpact,
    Statistics, TimeBucket, Trend, TrendSummary,
};
pub use classification::{ClassificationRecord, NewClassification, WasteCategory};
