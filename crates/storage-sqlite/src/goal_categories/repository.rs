use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use uuid::Uuid;

use ecclesia_core::goal_categories::{
    MoneyGoalCategory, MoneyGoalCategoryRepositoryTrait, MoneyGoalCategoryUpdate,
    NewMoneyGoalCategory,
};
use ecclesia_core::{Error, Result};

use super::model::{MoneyGoalCategoryChangeset, MoneyGoalCategoryDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{money_goal_categories, money_goals};

pub struct MoneyGoalCategoryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl MoneyGoalCategoryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

fn category_not_found(category_id: &str) -> Error {
    Error::NotFound(format!("Money goal category {}", category_id))
}

#[async_trait]
impl MoneyGoalCategoryRepositoryTrait for MoneyGoalCategoryRepository {
    fn load_categories(&self, enabled_only: bool) -> Result<Vec<MoneyGoalCategory>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = money_goal_categories::table.into_boxed();
        if enabled_only {
            query = query.filter(money_goal_categories::is_enabled.eq(true));
        }
        let categories_db = query
            .order(money_goal_categories::name.asc())
            .select(MoneyGoalCategoryDB::as_select())
            .load::<MoneyGoalCategoryDB>(&mut conn)
            .into_core()?;
        Ok(categories_db
            .into_iter()
            .map(MoneyGoalCategory::from)
            .collect())
    }

    fn get_category(&self, category_id: &str) -> Result<MoneyGoalCategory> {
        let mut conn = get_connection(&self.pool)?;
        money_goal_categories::table
            .find(category_id)
            .select(MoneyGoalCategoryDB::as_select())
            .first::<MoneyGoalCategoryDB>(&mut conn)
            .optional()
            .into_core()?
            .map(MoneyGoalCategory::from)
            .ok_or_else(|| category_not_found(category_id))
    }

    async fn insert_category(
        &self,
        new_category: NewMoneyGoalCategory,
    ) -> Result<MoneyGoalCategory> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<MoneyGoalCategory> {
                let now = Utc::now().naive_utc();
                let category_db = MoneyGoalCategoryDB {
                    id: Uuid::new_v4().to_string(),
                    name: new_category.name,
                    name_fr: new_category.name_fr,
                    name_mg: new_category.name_mg,
                    description: new_category.description,
                    color: new_category.color,
                    icon: new_category.icon,
                    is_enabled: new_category.is_enabled,
                    created_at: now,
                    updated_at: now,
                };
                let result_db = diesel::insert_into(money_goal_categories::table)
                    .values(&category_db)
                    .returning(MoneyGoalCategoryDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(MoneyGoalCategory::from(result_db))
            })
            .await
    }

    async fn update_category(&self, update: MoneyGoalCategoryUpdate) -> Result<MoneyGoalCategory> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<MoneyGoalCategory> {
                let category_id = update.id.clone().unwrap_or_default();
                let changeset =
                    MoneyGoalCategoryChangeset::from_update(update, Utc::now().naive_utc());
                diesel::update(money_goal_categories::table.find(&category_id))
                    .set(&changeset)
                    .returning(MoneyGoalCategoryDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .into_core()?
                    .map(MoneyGoalCategory::from)
                    .ok_or_else(|| category_not_found(&category_id))
            })
            .await
    }

    async fn delete_category(&self, category_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let goal_count: i64 = money_goals::table
                    .filter(money_goals::category_id.eq(&category_id))
                    .count()
                    .get_result(conn)
                    .into_core()?;
                if goal_count > 0 {
                    return Err(Error::ConstraintViolation(format!(
                        "Category {} still owns {} money goal(s)",
                        category_id, goal_count
                    )));
                }
                diesel::delete(money_goal_categories::table.find(&category_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
