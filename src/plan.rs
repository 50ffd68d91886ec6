use crate::classify;
use crate::types::{ExerciseEntry, ExerciseFields, WorkoutPlan};

/// Exact-name matches counted as main lifts in the day summary.
pub const MAIN_LIFTS: [&str; 3] = ["Squat", "Bench", "Deadlift"];

/// Parse the set count out of a prescribed scheme: "3x5" -> 3.
/// "Rest" and empty prescribe nothing; a scheme without the NxM shape
/// still means the exercise happens once.
pub fn parse_sets(prescribed: &str) -> u32 {
    if prescribed.is_empty() || prescribed == "Rest" {
        return 0;
    }
    leading_number(prescribed)
        .filter(|(_, rest)| rest.starts_with('x') || rest.starts_with('X'))
        .map(|(n, _)| n)
        .unwrap_or(1)
}

/// Parse the rep count out of a prescribed scheme: "3x5" -> 5.
pub fn parse_reps(prescribed: &str) -> u32 {
    if prescribed.is_empty() || prescribed == "Rest" {
        return 0;
    }
    prescribed
        .find(['x', 'X'])
        .and_then(|i| leading_number(&prescribed[i + 1..]))
        .map(|(n, _)| n)
        .unwrap_or(1)
}

fn leading_number(s: &str) -> Option<(u32, &str)> {
    let digits: usize = s.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let n = s[..digits].parse().ok()?;
    Some((n, &s[digits..]))
}

/// Week labels from the plan in natural order, so "Week 10" follows
/// "Week 9" instead of "Week 1". Weeks without a number sort after the
/// numbered ones, by label.
pub fn available_weeks(plan: &WorkoutPlan) -> Vec<String> {
    let mut weeks: Vec<String> = plan.keys().cloned().collect();
    weeks.sort_by_cached_key(|label| (week_number(label).unwrap_or(u32::MAX), label.clone()));
    weeks
}

fn week_number(label: &str) -> Option<u32> {
    let start = label.find(|c: char| c.is_ascii_digit())?;
    leading_number(&label[start..]).map(|(n, _)| n)
}

/// Day labels for a week in canonical weekday order.
pub fn available_days(plan: &WorkoutPlan, week: &str) -> Vec<String> {
    let labels = plan
        .get(week)
        .map(|days| days.keys().cloned().collect())
        .unwrap_or_default();
    classify::order_days(labels)
}

/// Build the editable entry list for one day, in sheet row order.
///
/// An exercise literally named "Rest" becomes a zeroed rest-day entry;
/// everything else gets sets/reps derived from the prescribed scheme and
/// its actuals seeded from whatever the sheet already holds. Missing or
/// malformed fields coerce to empty strings here so the pure components
/// downstream never see unvalidated input.
pub fn day_entries(plan: &WorkoutPlan, week: &str, day: &str) -> Vec<ExerciseEntry> {
    let Some(exercises) = plan.get(week).and_then(|days| days.get(day)) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for (name, value) in exercises {
        if name.as_str() == "Rest" {
            entries.push(ExerciseEntry {
                exercise: "Rest".to_string(),
                prescribed: "Rest".to_string(),
                sets: 0,
                reps: 0,
                prescribed_rpe: String::new(),
                weight: String::new(),
                rpe: String::new(),
                notes: "Rest Day".to_string(),
            });
            continue;
        }

        let fields: ExerciseFields =
            serde_json::from_value(value.clone()).unwrap_or_default();
        entries.push(ExerciseEntry {
            exercise: name.clone(),
            sets: parse_sets(&fields.prescribed),
            reps: parse_reps(&fields.prescribed),
            prescribed_rpe: fields.rpe.clone(),
            weight: fields.weight,
            rpe: fields.rpe,
            notes: fields.notes,
            prescribed: fields.prescribed,
        });
    }
    entries
}

/// Day-level totals for the summary bar.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkoutSummary {
    pub total_exercises: usize,
    pub total_sets: u32,
    pub total_volume: f64,
    pub main_lifts: usize,
    pub is_rest_day: bool,
}

pub fn summarize(entries: &[ExerciseEntry]) -> WorkoutSummary {
    let total_volume = entries
        .iter()
        .filter_map(|e| {
            let weight: f64 = e.weight.trim().parse().ok()?;
            Some(weight * e.sets as f64 * e.reps as f64)
        })
        .sum();

    WorkoutSummary {
        total_exercises: entries.iter().filter(|e| !e.is_rest()).count(),
        total_sets: entries.iter().map(|e| e.sets).sum(),
        total_volume,
        main_lifts: entries
            .iter()
            .filter(|e| MAIN_LIFTS.contains(&e.exercise.as_str()))
            .count(),
        is_rest_day: entries.iter().any(|e| e.is_rest()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plan_from(value: serde_json::Value) -> WorkoutPlan {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn scheme_parsing() {
        assert_eq!((parse_sets("3x5"), parse_reps("3x5")), (3, 5));
        assert_eq!((parse_sets("1x1"), parse_reps("1x1")), (1, 1));
        assert_eq!((parse_sets("10x10"), parse_reps("10x10")), (10, 10));
        assert_eq!((parse_sets("Rest"), parse_reps("Rest")), (0, 0));
        assert_eq!((parse_sets(""), parse_reps("")), (0, 0));
        // no NxM shape: happens once
        assert_eq!((parse_sets("AMRAP"), parse_reps("AMRAP")), (1, 1));
        assert_eq!((parse_sets("5"), parse_reps("5")), (1, 1));
    }

    #[test]
    fn weeks_sort_naturally() {
        let plan = plan_from(json!({
            "Week 10": {}, "Week 2": {}, "Week 1": {}
        }));
        assert_eq!(available_weeks(&plan), vec!["Week 1", "Week 2", "Week 10"]);
    }

    #[test]
    fn week_number_reads_only_the_first_digit_run() {
        // trailing digits in a qualifier must not glue onto the week number
        let plan = plan_from(json!({
            "Week 1 (Deload 2)": {}, "Week 10": {}, "Week 2": {}
        }));
        assert_eq!(
            available_weeks(&plan),
            vec!["Week 1 (Deload 2)", "Week 2", "Week 10"]
        );
    }

    #[test]
    fn unnumbered_weeks_sort_last() {
        let plan = plan_from(json!({
            "Deload": {}, "Week 3": {}
        }));
        assert_eq!(available_weeks(&plan), vec!["Week 3", "Deload"]);
    }

    #[test]
    fn days_come_back_weekday_ordered() {
        let plan = plan_from(json!({
            "Week 1": {
                "Thursday (2nd Squat)": {},
                "Monday (1st Squat)": {},
                "Wednesday (Rest)": {}
            }
        }));
        assert_eq!(
            available_days(&plan, "Week 1"),
            vec![
                "Monday (1st Squat)",
                "Wednesday (Rest)",
                "Thursday (2nd Squat)"
            ]
        );
        assert!(available_days(&plan, "Week 9").is_empty());
    }

    #[test]
    fn day_entries_derive_sets_reps_and_seed_actuals() {
        let plan = plan_from(json!({
            "Week 1": {
                "Monday (1st Squat)": {
                    "Squat": {
                        "Prescribed": "1x4",
                        "Weight": "220",
                        "RPE": "5",
                        "Notes": "Felt solid"
                    },
                    "Squat (Backdown)": {
                        "Prescribed": "3x5",
                        "Weight": 200,
                        "RPE": 5
                    }
                }
            }
        }));

        let entries = day_entries(&plan, "Week 1", "Monday (1st Squat)");
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].exercise, "Squat");
        assert_eq!((entries[0].sets, entries[0].reps), (1, 4));
        assert_eq!(entries[0].weight, "220");
        assert_eq!(entries[0].prescribed_rpe, "5");
        assert_eq!(entries[0].notes, "Felt solid");

        // numeric cells and missing fields normalize to strings
        assert_eq!(entries[1].exercise, "Squat (Backdown)");
        assert_eq!(entries[1].weight, "200");
        assert_eq!(entries[1].rpe, "5");
        assert_eq!(entries[1].notes, "");
    }

    #[test]
    fn rest_day_becomes_a_single_zeroed_entry() {
        let plan = plan_from(json!({
            "Week 1": { "Wednesday (Rest)": { "Rest": {} } }
        }));
        let entries = day_entries(&plan, "Week 1", "Wednesday (Rest)");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_rest());
        assert_eq!((entries[0].sets, entries[0].reps), (0, 0));
        assert_eq!(entries[0].notes, "Rest Day");
    }

    #[test]
    fn summary_totals_skip_unparseable_weights() {
        let plan = plan_from(json!({
            "Week 1": {
                "Monday": {
                    "Squat": { "Prescribed": "3x5", "Weight": "200" },
                    "Bench": { "Prescribed": "3x3", "Weight": "heavy" },
                    "Bicep Curl": { "Prescribed": "3x10" }
                }
            }
        }));
        let entries = day_entries(&plan, "Week 1", "Monday");
        let summary = summarize(&entries);

        assert_eq!(summary.total_exercises, 3);
        assert_eq!(summary.total_sets, 9);
        assert_eq!(summary.total_volume, 200.0 * 3.0 * 5.0);
        assert_eq!(summary.main_lifts, 2);
        assert!(!summary.is_rest_day);
    }

    #[test]
    fn rest_day_summary() {
        let plan = plan_from(json!({
            "Week 1": { "Wednesday (Rest)": { "Rest": {} } }
        }));
        let summary = summarize(&day_entries(&plan, "Week 1", "Wednesday (Rest)"));
        assert_eq!(summary.total_exercises, 0);
        assert_eq!(summary.total_sets, 0);
        assert!(summary.is_rest_day);
    }
}
