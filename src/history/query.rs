//! Filtering and sorting for the history view.

use std::{cmp::Ordering, collections::BTreeMap, str::FromStr};

use chrono::{Duration, Months, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{models::ClassificationRecord, utils::dates::parse_date};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Yesterday,
    LastWeek,
    LastMonth,
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "all" => Ok(DateRange::All),
            "today" => Ok(DateRange::Today),
            "yesterday" => Ok(DateRange::Yesterday),
            "lastweek" | "last-week" | "week" => Ok(DateRange::LastWeek),
            "lastmonth" | "last-month" | "month" => Ok(DateRange::LastMonth),
            other => Err(format!("unknown date range '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Newest date first
    #[default]
    Date,
    /// Highest confidence first
    Confidence,
    /// Type label, alphabetical
    Type,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "confidence" => Ok(SortKey::Confidence),
            "type" => Ok(SortKey::Type),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    /// Substring matched against item and description, ignoring case
    pub search: Option<String>,
    /// Type label, ignoring case; `None` or `"all"` keeps every type
    pub waste_type: Option<String>,
    pub range: DateRange,
    pub sort: SortKey,
}

impl HistoryQuery {
    fn matches_search(&self, record: &ClassificationRecord) -> bool {
        let Some(term) = self.search.as_deref().filter(|term| !term.is_empty()) else {
            return true;
        };
        let term = term.to_lowercase();
        record.item.to_lowercase().contains(&term)
            || record
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(&term))
    }

    fn matches_type(&self, record: &ClassificationRecord) -> bool {
        match self.waste_type.as_deref() {
            None => true,
            Some(waste_type) if waste_type.eq_ignore_ascii_case("all") => true,
            Some(waste_type) => record.is_type(waste_type),
        }
    }

    fn matches_range(&self, record: &ClassificationRecord, now: NaiveDateTime) -> bool {
        if self.range == DateRange::All {
            return true;
        }
        let Some(date) = parse_date(&record.date) else {
            return false;
        };
        let today = now.date();
        let at = date.and_time(NaiveTime::MIN);

        match self.range {
            DateRange::All => true,
            DateRange::Today => date == today,
            DateRange::Yesterday => date == today - Duration::days(1),
            DateRange::LastWeek => at >= now - Duration::days(7),
            DateRange::LastMonth => now
                .checked_sub_months(Months::new(1))
                .map_or(true, |month_ago| at >= month_ago),
        }
    }

    pub fn apply(
        &self,
        records: Vec<ClassificationRecord>,
        now: NaiveDateTime,
    ) -> Vec<ClassificationRecord> {
        let mut filtered: Vec<_> = records
            .into_iter()
            .filter(|record| {
                self.matches_search(record)
                    && self.matches_type(record)
                    && self.matches_range(record, now)
            })
            .collect();

        match self.sort {
            SortKey::Date => {
                filtered.sort_by(|a, b| parse_date(&b.date).cmp(&parse_date(&a.date)))
            }
            SortKey::Confidence => filtered.sort_by(|a, b| {
                b.confidence
                    .partial_cmp(&a.confidence)
                    .unwrap_or(Ordering::Equal)
            }),
            SortKey::Type => filtered.sort_by(|a, b| {
                a.waste_type
                    .to_lowercase()
                    .cmp(&b.waste_type.to_lowercase())
                    .then_with(|| a.waste_type.cmp(&b.waste_type))
            }),
        }

        filtered
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub total: u32,
    /// Count per type label as stored
    pub types: BTreeMap<String, u32>,
    /// Rounded mean confidence; 0 for an empty list
    pub average_confidence: u32,
}

pub fn summarize(records: &[ClassificationRecord]) -> HistorySummary {
    let mut types = BTreeMap::new();
    for record in records {
        *types.entry(record.waste_type.clone()).or_insert(0) += 1;
    }

    let average_confidence = if records.is_empty() {
        0
    } else {
        let sum: f64 = records.iter().map(|record| record.confidence).sum();
        (sum / records.len() as f64).round() as u32
    };

    HistorySummary {
        total: records.len() as u32,
        types,
        average_confidence,
    }
}
