use crate::models::AchievementKind;

/// Tunables for the aggregation engine.
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Most recent groups kept per series
    pub daily_buckets: usize,
    pub weekly_buckets: usize,
    pub monthly_buckets: usize,

    /// Length of each trend window; the previous window has the same length
    pub trend_window_days: i64,

    /// Environmental impact per classified item. Presentation constants,
    /// not measurements.
    pub co2_kg_per_item: f64,
    pub trees_per_item: f64,
    pub water_liters_per_item: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            daily_buckets: 7,
            weekly_buckets: 4,
            monthly_buckets: 3,
            trend_window_days: 7,
            co2_kg_per_item: 0.5,
            trees_per_item: 0.3,
            water_liters_per_item: 2.5,
        }
    }
}

pub const WASTE_WARRIOR_TARGET: u32 = 100;
pub const ORGANIC_CHAMPION_TARGET: u32 = 50;
pub const RECYCLING_MASTER_TARGET: u32 = 200;
pub const CONSISTENCY_KING_TARGET: u32 = 7;
pub const ACCURACY_EXPERT_TARGET: u32 = 95;

pub struct Goal {
    pub id: u32,
    pub kind: AchievementKind,
    pub title: &'static str,
    pub description: &'static str,
    pub target: u32,
}

pub const GOALS: [Goal; 5] = [
    Goal {
        id: 1,
        kind: AchievementKind::WasteWarrior,
        title: "Waste Warrior",
        description: "Classified 100+ items",
        target: WASTE_WARRIOR_TARGET,
    },
    Goal {
        id: 2,
        kind: AchievementKind::OrganicChampion,
        title: "Organic Champion",
        description: "Composted 50+ organic items",
        target: ORGANIC_CHAMPION_TARGET,
    },
    Goal {
        id: 3,
        kind: AchievementKind::RecyclingMaster,
        title: "Recycling Master",
        description: "Recycled 200+ items",
        target: RECYCLING_MASTER_TARGET,
    },
    Goal {
        id: 4,
        kind: AchievementKind::ConsistencyKing,
        title: "Consistency King",
        description: "7 days in a row",
        target: CONSISTENCY_KING_TARGET,
    },
    Goal {
        id: 5,
        kind: AchievementKind::AccuracyExpert,
        title: "Accuracy Expert",
        description: "95%+ confidence average",
        target: ACCURACY_EXPERT_TARGET,
    },
];
