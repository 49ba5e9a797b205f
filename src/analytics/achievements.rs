use std::collections::BTreeSet;

use crate::{
    models::{Achievement, AchievementKind, ClassificationRecord, WasteCategory},
    utils::dates::parse_date,
};

use super::config::{Goal, GOALS};

/// Longest run of consecutive calendar days with at least one record.
/// No dated records means no run at all.
pub fn longest_daily_streak(records: &[ClassificationRecord]) -> u32 {
    let dates: BTreeSet<_> = records
        .iter()
        .filter_map(|record| parse_date(&record.date))
        .collect();

    let mut iter = dates.into_iter();
    let Some(mut previous) = iter.next() else {
        return 0;
    };

    let mut current = 1u32;
    let mut longest = 1u32;
    for date in iter {
        if (date - previous).num_days() == 1 {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 1;
        }
        previous = date;
    }

    longest
}

pub fn average_confidence(records: &[ClassificationRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|record| record.confidence).sum::<f64>() / records.len() as f64
}

fn evaluate(goal: &Goal, metric: u32, unlocked: bool) -> Achievement {
    Achievement {
        id: goal.id,
        kind: goal.kind,
        title: goal.title.to_string(),
        description: goal.description.to_string(),
        progress: metric.min(goal.target),
        target: goal.target,
        unlocked,
    }
}

pub fn compute_achievements(records: &[ClassificationRecord]) -> Vec<Achievement> {
    let total = records.len() as u32;
    let organic = records
        .iter()
        .filter(|record| record.category() == Some(WasteCategory::Organic))
        .count() as u32;
    let recyclable = records
        .iter()
        .filter(|record| {
            record
                .category()
                .is_some_and(|category| category.is_recyclable_material())
        })
        .count() as u32;
    let streak = longest_daily_streak(records);
    let accuracy = average_confidence(records);

    GOALS
        .iter()
        .map(|goal| match goal.kind {
            AchievementKind::WasteWarrior => evaluate(goal, total, total >= goal.target),
            AchievementKind::OrganicChampion => evaluate(goal, organic, organic >= goal.target),
            AchievementKind::RecyclingMaster => {
                evaluate(goal, recyclable, recyclable >= goal.target)
            }
            AchievementKind::ConsistencyKing => evaluate(goal, streak, streak >= goal.target),
            AchievementKind::AccuracyExpert => evaluate(
                goal,
                accuracy.round() as u32,
                accuracy >= f64::from(goal.target),
            ),
        })
        .collect()
}

/// Share of achievements unlocked, in percent.
pub fn unlocked_percent(achievements: &[Achievement]) -> u32 {
    if achievements.is_empty() {
        return 0;
    }
    let unlocked = achievements.iter().filter(|a| a.unlocked).count();
    (unlocked as f64 * 100.0 / achievements.len() as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{record, record_with_confidence};

    fn find(achievements: &[Achievement], kind: AchievementKind) -> &Achievement {
        achievements.iter().find(|a| a.kind == kind).unwrap()
    }

    #[test]
    fn waste_warrior_threshold() {
        let hundred: Vec<_> = (0..100).map(|i| record(i, "General", "10/19/2026")).collect();
        let achievements = compute_achievements(&hundred);
        let warrior = find(&achievements, AchievementKind::WasteWarrior);
        assert!(warrior.unlocked);
        assert_eq!(warrior.progress, 100);

        let achievements = compute_achievements(&hundred[..99]);
        let warrior = find(&achievements, AchievementKind::WasteWarrior);
        assert!(!warrior.unlocked);
        assert_eq!(warrior.progress, 99);
    }

    #[test]
    fn progress_is_clamped_to_target() {
        let records: Vec<_> = (0..60).map(|i| record(i, "organic", "10/19/2026")).collect();
        let achievements = compute_achievements(&records);
        let organic = find(&achievements, AchievementKind::OrganicChampion);
        assert_eq!(organic.progress, 50);
        assert_eq!(organic.target, 50);
        assert!(organic.unlocked);

        // Organic does not count toward Recycling Master.
        assert_eq!(find(&achievements, AchievementKind::RecyclingMaster).progress, 0);
    }

    #[test]
    fn streak_over_five_consecutive_days() {
        let records = vec![
            record(1, "Paper", "1/1/2026"),
            record(2, "Paper", "1/2/2026"),
            record(3, "Paper", "1/3/2026"),
            record(4, "Paper", "1/3/2026"),
            record(5, "Paper", "1/4/2026"),
            record(6, "Paper", "1/5/2026"),
            record(7, "Paper", "1/9/2026"),
            record(8, "Paper", "1/10/2026"),
            record(9, "Paper", "12/20/2025"),
        ];
        assert_eq!(longest_daily_streak(&records), 5);
    }

    #[test]
    fn streak_crosses_month_boundary_in_calendar_order() {
        let records = vec![
            record(1, "Paper", "10/1/2026"),
            record(2, "Paper", "9/30/2026"),
            record(3, "Paper", "9/29/2026"),
        ];
        assert_eq!(longest_daily_streak(&records), 3);
    }

    #[test]
    fn streak_edge_cases() {
        assert_eq!(longest_daily_streak(&[]), 0);
        assert_eq!(longest_daily_streak(&[record(1, "Glass", "1/1/2026")]), 1);
        assert_eq!(
            longest_daily_streak(&[
                record(1, "Glass", "1/1/2026"),
                record(2, "Glass", "1/3/2026")
            ]),
            1
        );
    }

    #[test]
    fn empty_history_unlocks_nothing() {
        let achievements = compute_achievements(&[]);
        assert_eq!(achievements.len(), 5);
        assert!(achievements.iter().all(|a| !a.unlocked && a.progress == 0));
        assert_eq!(unlocked_percent(&achievements), 0);
    }

    #[test]
    fn accuracy_expert_uses_average_confidence() {
        let records = vec![
            record_with_confidence(1, 96.0),
            record_with_confidence(2, 94.0),
            record_with_confidence(3, 99.0),
        ];
        let achievements = compute_achievements(&records);
        let accuracy = find(&achievements, AchievementKind::AccuracyExpert);
        assert!(accuracy.unlocked);
        assert_eq!(accuracy.progress, 95);

        let records = vec![record_with_confidence(1, 90.0), record_with_confidence(2, 93.0)];
        let achievements = compute_achievements(&records);
        let accuracy = find(&achievements, AchievementKind::AccuracyExpert);
        assert!(!accuracy.unlocked);
        assert_eq!(accuracy.progress, 92);
    }
}
