//! Database model for money goal categories.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use ecclesia_core::goal_categories::{MoneyGoalCategory, MoneyGoalCategoryUpdate};

/// Database model for money goal categories
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::money_goal_categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MoneyGoalCategoryDB {
    pub id: String,
    pub name: String,
    pub name_fr: Option<String>,
    pub name_mg: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_enabled: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Changeset for category updates. Optional columns are written as given,
/// so clearing a translation stores NULL.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::money_goal_categories)]
#[diesel(treat_none_as_null = true)]
pub struct MoneyGoalCategoryChangeset {
    pub name: String,
    pub name_fr: Option<String>,
    pub name_mg: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_enabled: bool,
    pub updated_at: NaiveDateTime,
}

impl From<MoneyGoalCategoryDB> for MoneyGoalCategory {
    fn from(db: MoneyGoalCategoryDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            name_fr: db.name_fr,
            name_mg: db.name_mg,
            description: db.description,
            color: db.color,
            icon: db.icon,
            is_enabled: db.is_enabled,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl MoneyGoalCategoryChangeset {
    pub fn from_update(update: MoneyGoalCategoryUpdate, updated_at: NaiveDateTime) -> Self {
        Self {
            name: update.name,
            name_fr: update.name_fr,
            name_mg: update.name_mg,
            description: update.description,
            color: update.color,
            icon: update.icon,
            is_enabled: update.is_enabled,
            updated_at,
        }
    }
}
