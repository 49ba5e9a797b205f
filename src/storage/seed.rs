//! Illustrative history written into an empty store so first-run views have
//! something to render.

use chrono::{Duration, NaiveDate};

use crate::{models::ClassificationRecord, utils::dates::format_date};

struct SeedItem {
    days_ago: i64,
    item: &'static str,
    waste_type: &'static str,
    confidence: f64,
    time: &'static str,
    description: &'static str,
    location: &'static str,
    disposal_method: &'static str,
}

// Newest first, matching store order.
const SEED_ITEMS: &[SeedItem] = &[
    SeedItem {
        days_ago: 0,
        item: "Glass Bottle",
        waste_type: "Glass",
        confidence: 96.0,
        time: "02:10 PM",
        description: "Clear glass wine bottle",
        location: "Restaurant",
        disposal_method: "Glass Recycling",
    },
    SeedItem {
        days_ago: 1,
        item: "Aluminum Can",
        waste_type: "Metal",
        confidence: 94.0,
        time: "11:20 AM",
        description: "Soda can, 330ml",
        location: "Park",
        disposal_method: "Metal Recycling",
    },
    SeedItem {
        days_ago: 2,
        item: "Coffee Cup",
        waste_type: "General",
        confidence: 87.0,
        time: "03:45 PM",
        description: "Paper coffee cup with plastic lid",
        location: "Office",
        disposal_method: "General Waste",
    },
    SeedItem {
        days_ago: 3,
        item: "Apple Core",
        waste_type: "Organic",
        confidence: 98.0,
        time: "09:15 AM",
        description: "Red apple core with seeds",
        location: "Kitchen",
        disposal_method: "Compost Bin",
    },
    SeedItem {
        days_ago: 4,
        item: "Plastic Water Bottle",
        waste_type: "Plastic",
        confidence: 95.0,
        time: "10:30 AM",
        description: "500ml clear plastic water bottle",
        location: "Home",
        disposal_method: "Plastic Recycling Bin",
    },
];

/// Builds the seed records relative to `today`. Ids count down from
/// `now_ms - 1` so the newest seed has the largest id.
pub fn default_records(today: NaiveDate, now_ms: i64) -> Vec<ClassificationRecord> {
    SEED_ITEMS
        .iter()
        .enumerate()
        .map(|(index, seed)| ClassificationRecord {
            id: now_ms - 1 - index as i64,
            item: seed.item.to_string(),
            waste_type: seed.waste_type.to_string(),
            confidence: seed.confidence,
            date: format_date(today - Duration::days(seed.days_ago)),
            time: seed.time.to_string(),
            image: None,
            description: Some(seed.description.to_string()),
            location: Some(seed.location.to_string()),
            disposal_method: Some(seed.disposal_method.to_string()),
        })
        .collect()
}
