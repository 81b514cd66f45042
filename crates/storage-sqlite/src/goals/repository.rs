use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::debug;
use uuid::Uuid;

use ecclesia_core::goals::{
    track_update, GoalTarget, MoneyGoal, MoneyGoalContribution, MoneyGoalFilters,
    MoneyGoalRepositoryTrait, MoneyGoalUpdate, NewMoneyGoal, NewMoneyGoalContribution,
};
use ecclesia_core::users::Editor;
use ecclesia_core::{Error, Result};

use super::model::{GoalTargetDB, MoneyGoalContributionDB, MoneyGoalDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{money_goal_categories, money_goal_contributions, money_goals};

type BoxedGoalQuery<'a> = money_goals::BoxedQuery<'a, diesel::sqlite::Sqlite>;

pub struct MoneyGoalRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl MoneyGoalRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        MoneyGoalRepository { pool, writer }
    }

    /// Column filters only. SQLite `LIKE` folds ASCII case alone, so the name
    /// search is applied to loaded rows with [`MoneyGoalFilters::matches`].
    fn filtered(filters: &MoneyGoalFilters) -> BoxedGoalQuery<'static> {
        let mut query = money_goals::table.into_boxed();
        if let Some(years) = filters.years {
            query = query.filter(money_goals::years.eq(years));
        }
        if let Some(status) = filters.status {
            query = query.filter(money_goals::status.eq(status.as_str()));
        }
        if let Some(category_id) = filters.category_id.clone() {
            query = query.filter(money_goals::category_id.eq(category_id));
        }
        query.order((money_goals::created_at.desc(), money_goals::id.asc()))
    }

    fn find_goal(conn: &mut SqliteConnection, goal_id: &str) -> Result<MoneyGoalDB> {
        money_goals::table
            .find(goal_id)
            .select(MoneyGoalDB::as_select())
            .first::<MoneyGoalDB>(conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::NotFound(format!("Money goal {}", goal_id)))
    }

    fn ensure_category_exists(conn: &mut SqliteConnection, category_id: &str) -> Result<()> {
        let count: i64 = money_goal_categories::table
            .find(category_id)
            .count()
            .get_result(conn)
            .into_core()?;
        if count == 0 {
            return Err(Error::NotFound(format!(
                "Money goal category {}",
                category_id
            )));
        }
        Ok(())
    }

    fn contributions_query(
        goal_ids: &[String],
    ) -> money_goal_contributions::BoxedQuery<'static, diesel::sqlite::Sqlite> {
        money_goal_contributions::table
            .filter(money_goal_contributions::goal_id.eq_any(goal_ids.to_vec()))
            .order((
                money_goal_contributions::created_at.asc(),
                money_goal_contributions::id.asc(),
            ))
            .into_boxed()
    }
}

#[async_trait]
impl MoneyGoalRepositoryTrait for MoneyGoalRepository {
    fn load_goals(&self, filters: &MoneyGoalFilters) -> Result<Vec<MoneyGoal>> {
        let mut conn = get_connection(&self.pool)?;
        let goals = Self::filtered(filters)
            .select(MoneyGoalDB::as_select())
            .load::<MoneyGoalDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(MoneyGoal::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(goals
            .into_iter()
            .filter(|goal| filters.matches(goal))
            .collect())
    }

    fn get_goal(&self, goal_id: &str) -> Result<MoneyGoal> {
        let mut conn = get_connection(&self.pool)?;
        MoneyGoal::try_from(Self::find_goal(&mut conn, goal_id)?)
    }

    fn load_goal_targets(&self, filters: &MoneyGoalFilters) -> Result<Vec<GoalTarget>> {
        let mut conn = get_connection(&self.pool)?;
        Self::filtered(filters)
            .select(GoalTargetDB::as_select())
            .load::<GoalTargetDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(GoalTarget::try_from)
            .collect()
    }

    fn load_contributions(&self, goal_ids: &[String]) -> Result<Vec<MoneyGoalContribution>> {
        if goal_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = get_connection(&self.pool)?;
        let contributions_db = Self::contributions_query(goal_ids)
            .select(MoneyGoalContributionDB::as_select())
            .load::<MoneyGoalContributionDB>(&mut conn)
            .into_core()?;
        Ok(contributions_db
            .into_iter()
            .map(MoneyGoalContribution::from)
            .collect())
    }

    fn load_contribution_amounts(
        &self,
        goal_ids: &[String],
    ) -> Result<HashMap<String, Vec<f64>>> {
        let mut amounts: HashMap<String, Vec<f64>> = HashMap::new();
        if goal_ids.is_empty() {
            return Ok(amounts);
        }
        let mut conn = get_connection(&self.pool)?;
        let rows = Self::contributions_query(goal_ids)
            .select((
                money_goal_contributions::goal_id,
                money_goal_contributions::amount,
            ))
            .load::<(String, f64)>(&mut conn)
            .into_core()?;
        for (goal_id, amount) in rows {
            amounts.entry(goal_id).or_default().push(amount);
        }
        Ok(amounts)
    }

    async fn insert_goal(&self, new_goal: NewMoneyGoal, created_by: String) -> Result<MoneyGoal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<MoneyGoal> {
                Self::ensure_category_exists(conn, &new_goal.category_id)?;
                let now = Utc::now().naive_utc();
                let goal = MoneyGoal {
                    id: Uuid::new_v4().to_string(),
                    name: new_goal.name,
                    amount_goal: new_goal.amount_goal,
                    years: new_goal.years,
                    status: Default::default(),
                    category_id: new_goal.category_id,
                    created_by,
                    created_at: now,
                    updated_at: now,
                    edit_history: Vec::new(),
                };
                let goal_db = MoneyGoalDB::try_from(&goal)?;
                let result_db = diesel::insert_into(money_goals::table)
                    .values(&goal_db)
                    .returning(MoneyGoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                MoneyGoal::try_from(result_db)
            })
            .await
    }

    async fn update_goal(&self, update: MoneyGoalUpdate, editor: Editor) -> Result<MoneyGoal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<MoneyGoal> {
                let goal_id = update.id.clone().unwrap_or_default();
                let mut goal = MoneyGoal::try_from(Self::find_goal(conn, &goal_id)?)?;
                if let Some(category_id) = &update.category_id {
                    if *category_id != goal.category_id {
                        Self::ensure_category_exists(conn, category_id)?;
                    }
                }

                let now = Utc::now();
                if let Some(entry) = track_update(&mut goal, &update, &editor, now) {
                    debug!(
                        "Recording {} change(s) on money goal {} by {}",
                        entry.changes.len(),
                        goal.id,
                        entry.edited_by
                    );
                }
                goal.updated_at = now.naive_utc();

                let goal_db = MoneyGoalDB::try_from(&goal)?;
                diesel::update(money_goals::table.find(&goal_id))
                    .set(&goal_db)
                    .execute(conn)
                    .into_core()?;
                Ok(goal)
            })
            .await
    }

    async fn delete_goal(&self, goal_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(money_goals::table.find(goal_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    async fn insert_contribution(
        &self,
        goal_id: String,
        contribution: NewMoneyGoalContribution,
        contributor_id: String,
    ) -> Result<MoneyGoalContribution> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<MoneyGoalContribution> {
                Self::find_goal(conn, &goal_id)?;
                let contribution_db = MoneyGoalContributionDB {
                    id: Uuid::new_v4().to_string(),
                    goal_id,
                    amount: contribution.amount,
                    contributor_id,
                    reason: contribution.reason.filter(|r| !r.trim().is_empty()),
                    created_at: Utc::now().naive_utc(),
                };
                let result_db = diesel::insert_into(money_goal_contributions::table)
                    .values(&contribution_db)
                    .returning(MoneyGoalContributionDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(MoneyGoalContribution::from(result_db))
            })
            .await
    }

    async fn delete_contribution(&self, contribution_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(money_goal_contributions::table.find(contribution_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
