//! Money goal domain models.

use chrono::{DateTime, NaiveDateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};

/// Lifecycle status of a money goal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Cancelled,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Completed => "completed",
            GoalStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(GoalStatus::Active),
            "completed" => Ok(GoalStatus::Completed),
            "cancelled" => Ok(GoalStatus::Cancelled),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Unknown goal status '{}'",
                other
            )))),
        }
    }
}

/// One field-level change inside an edit history entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    pub field: String,
    pub previous_value: Value,
    pub new_value: Value,
}

/// Audit record of one update operation on a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EditHistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub edited_by: String,
    pub editor_name: String,
    pub changes: Vec<FieldChange>,
}

/// Parses the stored form of an edit history.
///
/// Missing, blank or unreadable values yield an empty history.
pub fn parse_edit_history(raw: Option<&str>) -> Vec<EditHistoryEntry> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty() && *r != "null") else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<EditHistoryEntry>>(raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Ignoring unreadable goal edit history: {}", e);
            Vec::new()
        }
    }
}

/// Serializes an edit history for storage.
pub fn serialize_edit_history(entries: &[EditHistoryEntry]) -> Result<String> {
    Ok(serde_json::to_string(entries)?)
}

/// Domain model representing a money goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoneyGoal {
    pub id: String,
    pub name: String,
    pub amount_goal: f64,
    pub years: i32,
    pub status: GoalStatus,
    pub category_id: String,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub edit_history: Vec<EditHistoryEntry>,
}

/// Input model for creating a new money goal
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMoneyGoal {
    pub name: String,
    pub amount_goal: f64,
    pub years: i32,
    pub category_id: String,
}

impl NewMoneyGoal {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_amount_goal(self.amount_goal)?;
        validate_years(self.years)?;
        if self.category_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "categoryId".to_string(),
            )));
        }
        Ok(())
    }
}

/// Partial update of a money goal. Absent fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MoneyGoalUpdate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub amount_goal: Option<f64>,
    pub years: Option<i32>,
    pub status: Option<GoalStatus>,
    pub category_id: Option<String>,
}

impl MoneyGoalUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.as_deref().map(str::trim).unwrap_or_default().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(amount) = self.amount_goal {
            validate_amount_goal(amount)?;
        }
        if let Some(years) = self.years {
            validate_years(years)?;
        }
        if let Some(category_id) = &self.category_id {
            if category_id.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Category ID cannot be empty".to_string(),
                )));
            }
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Goal name cannot be empty".to_string(),
        )));
    }
    Ok(())
}

fn validate_amount_goal(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Goal amount must be greater than zero".to_string(),
        )));
    }
    Ok(())
}

fn validate_years(years: i32) -> Result<()> {
    if !(1900..=9999).contains(&years) {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Invalid goal year {}",
            years
        ))));
    }
    Ok(())
}

/// A recorded amount applied toward a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoneyGoalContribution {
    pub id: String,
    pub goal_id: String,
    pub amount: f64,
    pub contributor_id: String,
    pub reason: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for recording a contribution
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewMoneyGoalContribution {
    pub amount: f64,
    pub contributor_id: Option<String>,
    pub reason: Option<String>,
}

impl NewMoneyGoalContribution {
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Contribution amount must be greater than zero".to_string(),
            )));
        }
        Ok(())
    }
}

/// Target, status and identity of a goal, without its contributions.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalTarget {
    pub id: String,
    pub amount_goal: f64,
    pub status: GoalStatus,
}

/// A goal enriched with contribution-derived statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoneyGoalWithStats {
    #[serde(flatten)]
    pub goal: MoneyGoal,
    pub contributions: Vec<MoneyGoalContribution>,
    pub contribution_count: usize,
    pub total_contributions: f64,
    pub reached_goal: f64,
    pub progress_percentage: f64,
    pub remaining_amount: f64,
}

/// Cross-goal totals for a filtered set of goals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MoneyGoalSummary {
    pub total_goals: usize,
    pub active_goals: usize,
    pub completed_goals: usize,
    pub cancelled_goals: usize,
    pub total_target_amount: f64,
    pub total_reached_amount: f64,
    pub overall_progress: f64,
}

/// Query filters for goal listings. `None` means "do not filter".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MoneyGoalFilters {
    pub years: Option<i32>,
    pub status: Option<GoalStatus>,
    pub category_id: Option<String>,
    pub search: Option<String>,
}

impl MoneyGoalFilters {
    /// Trimmed search term, if any.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Same filters with the free-text search dropped.
    pub fn without_search(&self) -> Self {
        Self {
            search: None,
            ..self.clone()
        }
    }

    /// Whether `goal` passes every filter. The name search is a
    /// case-insensitive substring match with Unicode case folding.
    pub fn matches(&self, goal: &MoneyGoal) -> bool {
        if self.years.is_some_and(|y| y != goal.years) {
            return false;
        }
        if self.status.is_some_and(|s| s != goal.status) {
            return false;
        }
        if let Some(category_id) = &self.category_id {
            if *category_id != goal.category_id {
                return false;
            }
        }
        match self.search_term() {
            Some(term) => goal.name.to_lowercase().contains(&term.to_lowercase()),
            None => true,
        }
    }
}

/// Payload handed to report rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoneyGoalExport {
    pub goals: Vec<MoneyGoalWithStats>,
    pub summary: MoneyGoalSummary,
    pub filters: MoneyGoalFilters,
    pub export_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edit_history_defaults_to_empty() {
        assert!(parse_edit_history(None).is_empty());
        assert!(parse_edit_history(Some("")).is_empty());
        assert!(parse_edit_history(Some("null")).is_empty());
        assert!(parse_edit_history(Some("{not json")).is_empty());
    }

    #[test]
    fn test_parse_edit_history_reads_entries() {
        let raw = r#"[{"timestamp":"2024-03-01T10:00:00Z","editedBy":"u1","editorName":"Hery",
            "changes":[{"field":"amountGoal","previousValue":100.0,"newValue":150.0}]}]"#;
        let entries = parse_edit_history(Some(raw));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].editor_name, "Hery");
        assert_eq!(entries[0].changes[0].field, "amountGoal");
        assert_eq!(entries[0].changes[0].new_value, serde_json::json!(150.0));
    }

    #[test]
    fn test_goal_status_parsing() {
        assert_eq!("Completed".parse::<GoalStatus>().unwrap(), GoalStatus::Completed);
        assert!("archived".parse::<GoalStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&GoalStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }

    #[test]
    fn test_new_goal_validation() {
        let mut goal = NewMoneyGoal {
            name: "Roof repair".to_string(),
            amount_goal: 5000.0,
            years: 2024,
            category_id: "c1".to_string(),
        };
        assert!(goal.validate().is_ok());

        goal.amount_goal = 0.0;
        assert!(goal.validate().is_err());

        goal.amount_goal = 10.0;
        goal.name = "  ".to_string();
        assert!(goal.validate().is_err());
    }

    #[test]
    fn test_update_requires_id() {
        let update = MoneyGoalUpdate {
            name: Some("New".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_contribution_amount_must_be_positive() {
        let contribution = NewMoneyGoalContribution {
            amount: -5.0,
            contributor_id: None,
            reason: None,
        };
        assert!(contribution.validate().is_err());
    }

    #[test]
    fn test_filters_match_case_insensitive_search() {
        let goal = MoneyGoal {
            id: "g1".to_string(),
            name: "Nouvelle Toiture".to_string(),
            amount_goal: 100.0,
            years: 2024,
            status: GoalStatus::Active,
            category_id: "c1".to_string(),
            created_by: "u1".to_string(),
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
            edit_history: Vec::new(),
        };
        let filters = MoneyGoalFilters {
            years: Some(2024),
            search: Some(" toit ".to_string()),
            ..Default::default()
        };
        assert!(filters.matches(&goal));
        assert!(!MoneyGoalFilters {
            status: Some(GoalStatus::Completed),
            ..Default::default()
        }
        .matches(&goal));
    }
}
