use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One row of a workout day, normalized to a single canonical schema at the
/// parsing-backend boundary. `sets` and `reps` are derived from the
/// prescribed scheme; `weight`, `rpe` and `notes` are the user-editable
/// actuals, seeded from whatever the sheet already holds.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseEntry {
    pub exercise: String,
    pub prescribed: String,
    pub sets: u32,
    pub reps: u32,
    pub prescribed_rpe: String,
    pub weight: String,
    pub rpe: String,
    pub notes: String,
}

impl ExerciseEntry {
    pub fn is_rest(&self) -> bool {
        self.exercise == "Rest"
    }
}

/// Per-exercise fields as the parsing backend emits them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ExerciseFields {
    #[serde(default, rename = "Prescribed", deserialize_with = "stringly")]
    pub prescribed: String,
    #[serde(default, rename = "Weight", deserialize_with = "stringly")]
    pub weight: String,
    #[serde(default, rename = "RPE", deserialize_with = "stringly")]
    pub rpe: String,
    #[serde(default, rename = "Notes", deserialize_with = "stringly")]
    pub notes: String,
}

/// Sheet cells arrive as strings or bare numbers depending on how the
/// backend read them; normalize both to a string here, once.
fn stringly<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Parsed plan as returned by the backend: week -> day label -> exercise
/// name -> fields. Exercise order within a day is the sheet's row order,
/// kept intact by serde_json's preserve_order map.
pub type DayPlan = serde_json::Map<String, serde_json::Value>;
pub type WeekPlan = HashMap<String, DayPlan>;
pub type WorkoutPlan = HashMap<String, WeekPlan>;

/// Profile fields from the Google userinfo endpoint. The token itself is
/// opaque and never inspected.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(rename = "sub", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub picture: String,
}

/// One spreadsheet as listed by the Drive files query.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SpreadsheetFile {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AppView {
    SignIn,
    SheetPicker,
    Workout,
}
