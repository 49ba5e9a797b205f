//! Classification history data models.
//!
//! A `ClassificationRecord` is written once when a classification succeeds and
//! is never mutated afterwards. Its JSON shape is the persisted layout, so
//! field names follow the camelCase keys of the stored array.

use serde::{Deserialize, Serialize};

/// One logged classification event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationRecord {
    pub id: i64,
    pub item: String,
    #[serde(rename = "type")]
    pub waste_type: String,
    /// Percentage in `0..=100`.
    pub confidence: f64,
    pub date: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposal_method: Option<String>,
}

impl ClassificationRecord {
    pub fn is_type(&self, waste_type: &str) -> bool {
        self.waste_type.eq_ignore_ascii_case(waste_type)
    }

    pub fn category(&self) -> Option<WasteCategory> {
        WasteCategory::from_label(&self.waste_type)
    }
}

/// A record before the store has assigned its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClassification {
    pub item: String,
    #[serde(rename = "type")]
    pub waste_type: String,
    pub confidence: f64,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub disposal_method: Option<String>,
}

impl NewClassification {
    pub fn into_record(self, id: i64) -> ClassificationRecord {
        ClassificationRecord {
            id,
            item: self.item,
            waste_type: self.waste_type,
            confidence: self.confidence,
            date: self.date,
            time: self.time,
            image: self.image,
            description: self.description,
            location: self.location,
            disposal_method: self.disposal_method,
        }
    }
}

/// The categories analytics tracks individually. Any other label (General,
/// E-Waste, Unknown, ...) is still a valid record type; it only counts toward
/// bucket totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WasteCategory {
    Organic,
    Plastic,
    Paper,
    Metal,
    Glass,
}

impl WasteCategory {
    pub const ALL: [WasteCategory; 5] = [
        WasteCategory::Organic,
        WasteCategory::Plastic,
        WasteCategory::Paper,
        WasteCategory::Metal,
        WasteCategory::Glass,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WasteCategory::Organic => "organic",
            WasteCategory::Plastic => "plastic",
            WasteCategory::Paper => "paper",
            WasteCategory::Metal => "metal",
            WasteCategory::Glass => "glass",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(label.trim()))
    }

    /// Organic is excluded: it counts toward the recycling rate but not
    /// toward the Recycling Master goal.
    pub fn is_recyclable_material(&self) -> bool {
        !matches!(self, WasteCategory::Organic)
    }
}
