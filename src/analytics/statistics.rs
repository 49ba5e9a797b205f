use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::{
    models::{ClassificationRecord, Statistics, Trend, TrendSummary},
    utils::dates::{format_date, parse_date},
};

use super::{config::AnalyticsConfig, impact::environmental_impact};

/// Count per lower-cased type label.
pub fn type_breakdown(records: &[ClassificationRecord]) -> BTreeMap<String, u32> {
    records.iter().fold(BTreeMap::new(), |mut acc, record| {
        *acc.entry(record.waste_type.to_lowercase()).or_insert(0) += 1;
        acc
    })
}

/// Percentage of records in a tracked category (organic counts as
/// recyclable here).
pub fn recycling_rate(records: &[ClassificationRecord]) -> u32 {
    if records.is_empty() {
        return 0;
    }
    let recyclable = records
        .iter()
        .filter(|record| record.category().is_some())
        .count();
    (recyclable as f64 * 100.0 / records.len() as f64).round() as u32
}

/// Compares the `window_days` before `now` with the window before that.
///
/// Records are placed at midnight of their date, so with a 7-day window and
/// `now` mid-day, the last window covers today and the six days before it.
pub fn trend(records: &[ClassificationRecord], now: NaiveDateTime, window_days: i64) -> TrendSummary {
    let window_start = now - Duration::days(window_days);
    let previous_start = now - Duration::days(window_days * 2);

    let mut last_window = 0u32;
    let mut previous_window = 0u32;
    for record in records {
        let Some(date) = parse_date(&record.date) else {
            continue;
        };
        let at = date.and_time(NaiveTime::MIN);
        if at >= window_start {
            last_window += 1;
        } else if at >= previous_start {
            previous_window += 1;
        }
    }

    let change = i64::from(last_window) - i64::from(previous_window);
    let change_percent = if previous_window > 0 {
        (change as f64 * 100.0 / f64::from(previous_window)).round() as i64
    } else {
        0
    };

    TrendSummary {
        last_window,
        previous_window,
        change: change.unsigned_abs() as u32,
        change_percent: change_percent.unsigned_abs() as u32,
        trend: if change >= 0 { Trend::Up } else { Trend::Down },
    }
}

pub fn compute_statistics(
    records: &[ClassificationRecord],
    now: NaiveDateTime,
    config: &AnalyticsConfig,
) -> Statistics {
    let today = format_date(now.date());
    let summary = trend(records, now, config.trend_window_days);

    Statistics {
        total: records.len() as u32,
        classifications_today: records.iter().filter(|r| r.date == today).count() as u32,
        type_breakdown: type_breakdown(records),
        recycling_rate: recycling_rate(records),
        change: summary.change,
        change_percent: summary.change_percent,
        trend: summary.trend,
        environmental_impact: environmental_impact(records.len(), config),
    }
}
