//! Database models for money goals and contributions.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use ecclesia_core::goals::{
    parse_edit_history, serialize_edit_history, GoalStatus, GoalTarget, MoneyGoal,
    MoneyGoalContribution,
};
use ecclesia_core::Result;

use crate::goal_categories::MoneyGoalCategoryDB;

/// Database model for money goals
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    Associations,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(MoneyGoalCategoryDB, foreign_key = category_id))]
#[diesel(table_name = crate::schema::money_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MoneyGoalDB {
    pub id: String,
    pub name: String,
    pub amount_goal: f64,
    pub years: i32,
    pub status: String,
    pub category_id: String,
    pub created_by: String,
    pub edit_history: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Target columns used by the summary query
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::money_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalTargetDB {
    pub id: String,
    pub amount_goal: f64,
    pub status: String,
}

/// Database model for contributions
#[derive(
    Insertable,
    Queryable,
    Identifiable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(MoneyGoalDB, foreign_key = goal_id))]
#[diesel(table_name = crate::schema::money_goal_contributions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MoneyGoalContributionDB {
    pub id: String,
    pub goal_id: String,
    pub amount: f64,
    pub contributor_id: String,
    pub reason: Option<String>,
    pub created_at: NaiveDateTime,
}

// Conversion to domain models
impl TryFrom<MoneyGoalDB> for MoneyGoal {
    type Error = ecclesia_core::Error;

    fn try_from(db: MoneyGoalDB) -> Result<Self> {
        Ok(Self {
            status: db.status.parse::<GoalStatus>()?,
            edit_history: parse_edit_history(db.edit_history.as_deref()),
            id: db.id,
            name: db.name,
            amount_goal: db.amount_goal,
            years: db.years,
            category_id: db.category_id,
            created_by: db.created_by,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl TryFrom<&MoneyGoal> for MoneyGoalDB {
    type Error = ecclesia_core::Error;

    fn try_from(goal: &MoneyGoal) -> Result<Self> {
        Ok(Self {
            id: goal.id.clone(),
            name: goal.name.clone(),
            amount_goal: goal.amount_goal,
            years: goal.years,
            status: goal.status.as_str().to_string(),
            category_id: goal.category_id.clone(),
            created_by: goal.created_by.clone(),
            edit_history: Some(serialize_edit_history(&goal.edit_history)?),
            created_at: goal.created_at,
            updated_at: goal.updated_at,
        })
    }
}

impl TryFrom<GoalTargetDB> for GoalTarget {
    type Error = ecclesia_core::Error;

    fn try_from(db: GoalTargetDB) -> Result<Self> {
        Ok(Self {
            status: db.status.parse::<GoalStatus>()?,
            id: db.id,
            amount_goal: db.amount_goal,
        })
    }
}

impl From<MoneyGoalContributionDB> for MoneyGoalContribution {
    fn from(db: MoneyGoalContributionDB) -> Self {
        Self {
            id: db.id,
            goal_id: db.goal_id,
            amount: db.amount,
            contributor_id: db.contributor_id,
            reason: db.reason,
            created_at: db.created_at,
        }
    }
}
