use crate::models::EnvironmentalImpact;

use super::config::AnalyticsConfig;

fn scaled(total: f64, per_item: f64) -> u32 {
    (total * per_item).round() as u32
}

/// Linear estimate from the number of classified items, each figure rounded
/// to a whole unit.
pub fn environmental_impact(total: usize, config: &AnalyticsConfig) -> EnvironmentalImpact {
    let total = total as f64;
    EnvironmentalImpact {
        co2_saved_kg: scaled(total, config.co2_kg_per_item),
        trees_equivalent: scaled(total, config.trees_per_item),
        water_conserved_liters: scaled(total, config.water_liters_per_item),
    }
}
