//! Derived analytics models. None of these are persisted; they are recomputed
//! from the full record list whenever a view asks for them.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::classification::WasteCategory;

/// Per-category sub-counts for the tracked category set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub organic: u32,
    pub plastic: u32,
    pub paper: u32,
    pub metal: u32,
    pub glass: u32,
}

impl CategoryCounts {
    pub fn increment(&mut self, category: WasteCategory) {
        match category {
            WasteCategory::Organic => self.organic += 1,
            WasteCategory::Plastic => self.plastic += 1,
            WasteCategory::Paper => self.paper += 1,
            WasteCategory::Metal => self.metal += 1,
            WasteCategory::Glass => self.glass += 1,
        }
    }

    pub fn tracked_total(&self) -> u32 {
        self.organic + self.plastic + self.paper + self.metal + self.glass
    }
}

/// One daily, weekly or monthly group of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBucket {
    /// Date string, `Week Oct 11`, or `October`.
    pub label: String,
    pub count: u32,
    #[serde(flatten)]
    pub categories: CategoryCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalImpact {
    pub co2_saved_kg: u32,
    pub trees_equivalent: u32,
    pub water_conserved_liters: u32,
}

/// Week-over-week comparison of record counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub last_window: u32,
    pub previous_window: u32,
    /// Absolute difference; the sign lives in `trend`.
    pub change: u32,
    /// Absolute percentage; 0 when the previous window is empty.
    pub change_percent: u32,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: u32,
    pub classifications_today: u32,
    /// Lower-cased type label to count.
    pub type_breakdown: BTreeMap<String, u32>,
    pub recycling_rate: u32,
    pub change: u32,
    pub change_percent: u32,
    pub trend: Trend,
    pub environmental_impact: EnvironmentalImpact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AchievementKind {
    WasteWarrior,
    OrganicChampion,
    RecyclingMaster,
    ConsistencyKing,
    AccuracyExpert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: u32,
    pub kind: AchievementKind,
    pub title: String,
    pub description: String,
    pub progress: u32,
    pub target: u32,
    pub unlocked: bool,
}

/// Everything the dashboard and analytics views render, computed at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub generated_at: NaiveDateTime,
    pub daily: Vec<TimeBucket>,
    pub weekly: Vec<TimeBucket>,
    pub monthly: Vec<TimeBucket>,
    pub statistics: Statistics,
    pub achievements: Vec<Achievement>,
    /// Share of achievements unlocked, in percent.
    pub achievement_progress: u32,
}
