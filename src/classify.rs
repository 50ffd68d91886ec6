use crate::types::ExerciseEntry;

/// Substrings marking a competition lift, matched case-insensitively
/// against the exercise name. Data, not logic: extend here when a program
/// spells its main work differently.
pub const COMP_LIFT_MARKERS: &[&str] = &[
    "comp squat",
    "comp sq",
    "comp bench",
    "comp deadlift",
    "comp dl",
    "competition squat",
    "competition bench",
    "competition deadlift",
    "low bar squat",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseCategory {
    TopSet,
    Backdown,
    Accessory,
    Rest,
}

/// First match wins: backdown markers beat competition-lift markers beat
/// the accessory default. Evaluation order is the only tie-break.
pub fn category_of(entry: &ExerciseEntry) -> ExerciseCategory {
    if entry.is_rest() {
        return ExerciseCategory::Rest;
    }

    let name = entry.exercise.trim().to_lowercase();

    // "(backdown)" is covered by the plain substring check
    if name.contains("backdown") || name.contains("back down") {
        return ExerciseCategory::Backdown;
    }

    if COMP_LIFT_MARKERS.iter().any(|marker| name.contains(marker)) {
        return ExerciseCategory::TopSet;
    }

    ExerciseCategory::Accessory
}

/// A day's entries split for rendering, in original order within each
/// bucket. Rest entries ride along in `top_sets` so a rest day still shows
/// a card in the main section; that convention is intentional.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Classified {
    pub top_sets: Vec<(usize, ExerciseEntry)>,
    pub backdown_sets: Vec<(usize, ExerciseEntry)>,
    pub accessories: Vec<(usize, ExerciseEntry)>,
}

/// Partition a day's entries. Each entry keeps its index into the source
/// list so edits can be routed back.
pub fn classify(entries: &[ExerciseEntry]) -> Classified {
    let mut out = Classified::default();
    for (idx, entry) in entries.iter().enumerate() {
        match category_of(entry) {
            ExerciseCategory::Backdown => out.backdown_sets.push((idx, entry.clone())),
            ExerciseCategory::Accessory => out.accessories.push((idx, entry.clone())),
            ExerciseCategory::TopSet | ExerciseCategory::Rest => {
                out.top_sets.push((idx, entry.clone()))
            }
        }
    }
    out
}

/// Canonical weekday prefixes, Monday first.
pub const WEEKDAY_PREFIXES: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Labels with no recognizable weekday sort after everything else.
const UNKNOWN_DAY: usize = 999;

/// Order key for a free-text day label like "Monday (1st Squat)" or
/// "Tues (3rd BP)": prefix match first, then a substring match anywhere,
/// then unknown.
fn day_order_key(label: &str) -> usize {
    let normalized = label.trim().to_lowercase();

    if let Some(i) = WEEKDAY_PREFIXES
        .iter()
        .position(|p| normalized.starts_with(p))
    {
        return i;
    }
    if let Some(i) = WEEKDAY_PREFIXES
        .iter()
        .position(|p| normalized.contains(p))
    {
        return i;
    }
    UNKNOWN_DAY
}

/// Sort day labels into canonical weekday order regardless of how the
/// sheet spells them. Ties (including multiple unknown labels) fall back
/// to the normalized label text so the order stays stable.
pub fn order_days(mut labels: Vec<String>) -> Vec<String> {
    labels.sort_by_cached_key(|label| (day_order_key(label), label.trim().to_lowercase()));
    labels
}
