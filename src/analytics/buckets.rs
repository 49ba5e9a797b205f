//! Daily, weekly and monthly series.
//!
//! Every series has the same shape: group records by a key, count each group
//! plus its tracked-category sub-counts, then keep the most recent groups.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};

use crate::{
    models::{CategoryCounts, ClassificationRecord, TimeBucket},
    utils::dates::{month_label, parse_date, start_of_week, week_label},
};

fn empty_bucket(label: String) -> TimeBucket {
    TimeBucket {
        label,
        count: 0,
        categories: CategoryCounts::default(),
    }
}

fn accumulate(bucket: &mut TimeBucket, record: &ClassificationRecord) {
    bucket.count += 1;
    if let Some(category) = record.category() {
        bucket.categories.increment(category);
    }
}

/// Groups by the exact `date` string. Groups whose date does not parse sort
/// after every dated group.
pub fn daily_buckets(records: &[ClassificationRecord], limit: usize) -> Vec<TimeBucket> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(Option<NaiveDate>, TimeBucket)> = Vec::new();

    for record in records {
        let slot = *index.entry(record.date.as_str()).or_insert_with(|| {
            groups.push((parse_date(&record.date), empty_bucket(record.date.clone())));
            groups.len() - 1
        });
        accumulate(&mut groups[slot].1, record);
    }

    // Descending; `None` compares lowest so undated groups land last.
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
        .into_iter()
        .take(limit)
        .map(|(_, bucket)| bucket)
        .collect()
}

/// Groups by the Sunday that starts each record's week.
pub fn weekly_buckets(records: &[ClassificationRecord], limit: usize) -> Vec<TimeBucket> {
    let mut weeks: BTreeMap<NaiveDate, TimeBucket> = BTreeMap::new();

    for record in records {
        let Some(date) = parse_date(&record.date) else {
            continue;
        };
        let week_start = start_of_week(date);
        let bucket = weeks
            .entry(week_start)
            .or_insert_with(|| empty_bucket(week_label(week_start)));
        accumulate(bucket, record);
    }

    weeks.into_values().rev().take(limit).collect()
}

/// Groups by calendar month. Keys carry the year so the same month of
/// different years never merges; labels show only the month name.
pub fn monthly_buckets(records: &[ClassificationRecord], limit: usize) -> Vec<TimeBucket> {
    let mut months: BTreeMap<(i32, u32), TimeBucket> = BTreeMap::new();

    for record in records {
        let Some(date) = parse_date(&record.date) else {
            continue;
        };
        let key = (date.year(), date.month());
        let bucket = months
            .entry(key)
            .or_insert_with(|| empty_bucket(month_label(key.0, key.1)));
        accumulate(bucket, record);
    }

    months.into_values().rev().take(limit).collect()
}
