//! Edit history tracking for money goals.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::goals_model::{EditHistoryEntry, FieldChange, MoneyGoal, MoneyGoalUpdate};
use crate::users::Editor;

/// A goal field whose changes are recorded in the edit history.
struct TrackedField {
    name: &'static str,
    diff: fn(&MoneyGoal, &MoneyGoalUpdate) -> Option<(Value, Value)>,
}

/// Fields diffed on every update, in the order changes are recorded.
const TRACKED_FIELDS: [TrackedField; 5] = [
    TrackedField {
        name: "name",
        diff: diff_name,
    },
    TrackedField {
        name: "amountGoal",
        diff: diff_amount_goal,
    },
    TrackedField {
        name: "years",
        diff: diff_years,
    },
    TrackedField {
        name: "status",
        diff: diff_status,
    },
    TrackedField {
        name: "categoryId",
        diff: diff_category_id,
    },
];

fn diff_name(goal: &MoneyGoal, update: &MoneyGoalUpdate) -> Option<(Value, Value)> {
    compare(&goal.name, update.name.as_ref())
}

fn diff_amount_goal(goal: &MoneyGoal, update: &MoneyGoalUpdate) -> Option<(Value, Value)> {
    compare(&goal.amount_goal, update.amount_goal.as_ref())
}

fn diff_years(goal: &MoneyGoal, update: &MoneyGoalUpdate) -> Option<(Value, Value)> {
    compare(&goal.years, update.years.as_ref())
}

fn diff_status(goal: &MoneyGoal, update: &MoneyGoalUpdate) -> Option<(Value, Value)> {
    compare(&goal.status, update.status.as_ref())
}

fn diff_category_id(goal: &MoneyGoal, update: &MoneyGoalUpdate) -> Option<(Value, Value)> {
    compare(&goal.category_id, update.category_id.as_ref())
}

fn compare<T>(current: &T, proposed: Option<&T>) -> Option<(Value, Value)>
where
    T: PartialEq + Serialize,
{
    let proposed = proposed.filter(|p| *p != current)?;
    Some((to_json(current), to_json(proposed)))
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Names of the fields recorded in the edit history.
pub fn tracked_field_names() -> impl Iterator<Item = &'static str> {
    TRACKED_FIELDS.iter().map(|f| f.name)
}

/// Changes the update would make to tracked fields of `goal`.
pub fn diff_goal(goal: &MoneyGoal, update: &MoneyGoalUpdate) -> Vec<FieldChange> {
    TRACKED_FIELDS
        .iter()
        .filter_map(|tracked| {
            (tracked.diff)(goal, update).map(|(previous_value, new_value)| FieldChange {
                field: tracked.name.to_string(),
                previous_value,
                new_value,
            })
        })
        .collect()
}

/// Writes the supplied update values onto `goal`.
pub fn apply_update(goal: &mut MoneyGoal, update: &MoneyGoalUpdate) {
    if let Some(name) = &update.name {
        goal.name = name.clone();
    }
    if let Some(amount_goal) = update.amount_goal {
        goal.amount_goal = amount_goal;
    }
    if let Some(years) = update.years {
        goal.years = years;
    }
    if let Some(status) = update.status {
        goal.status = status;
    }
    if let Some(category_id) = &update.category_id {
        goal.category_id = category_id.clone();
    }
}

/// Diffs, applies and records an update on `goal`.
///
/// Returns the appended history entry, or `None` when no tracked field changed
/// (the history is then left untouched).
pub fn track_update(
    goal: &mut MoneyGoal,
    update: &MoneyGoalUpdate,
    editor: &Editor,
    at: DateTime<Utc>,
) -> Option<EditHistoryEntry> {
    let changes = diff_goal(goal, update);
    apply_update(goal, update);
    if changes.is_empty() {
        return None;
    }
    let entry = EditHistoryEntry {
        timestamp: at,
        edited_by: editor.id.clone(),
        editor_name: editor.display_name(),
        changes,
    };
    goal.edit_history.push(entry.clone());
    Some(entry)
}
