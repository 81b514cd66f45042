use std::collections::HashMap;

use crate::errors::Result;
use crate::goals::goals_model::{
    EditHistoryEntry, GoalTarget, MoneyGoal, MoneyGoalContribution, MoneyGoalExport,
    MoneyGoalFilters, MoneyGoalSummary, MoneyGoalUpdate, MoneyGoalWithStats, NewMoneyGoal,
    NewMoneyGoalContribution,
};
use crate::users::Editor;
use async_trait::async_trait;

/// Trait for money goal repository operations
#[async_trait]
pub trait MoneyGoalRepositoryTrait: Send + Sync {
    fn load_goals(&self, filters: &MoneyGoalFilters) -> Result<Vec<MoneyGoal>>;
    fn get_goal(&self, goal_id: &str) -> Result<MoneyGoal>;
    /// Targets for the summary. The free-text search is not applied.
    fn load_goal_targets(&self, filters: &MoneyGoalFilters) -> Result<Vec<GoalTarget>>;
    /// Contributions of the given goals, ordered by timestamp then id.
    fn load_contributions(&self, goal_ids: &[String]) -> Result<Vec<MoneyGoalContribution>>;
    /// Contribution amounts keyed by goal id, in contribution order.
    fn load_contribution_amounts(&self, goal_ids: &[String])
        -> Result<HashMap<String, Vec<f64>>>;
    async fn insert_goal(&self, new_goal: NewMoneyGoal, created_by: String) -> Result<MoneyGoal>;
    /// Applies the update and appends its edit history entry in one transaction.
    async fn update_goal(&self, update: MoneyGoalUpdate, editor: Editor) -> Result<MoneyGoal>;
    async fn delete_goal(&self, goal_id: String) -> Result<usize>;
    async fn insert_contribution(
        &self,
        goal_id: String,
        contribution: NewMoneyGoalContribution,
        contributor_id: String,
    ) -> Result<MoneyGoalContribution>;
    async fn delete_contribution(&self, contribution_id: String) -> Result<usize>;
}

/// Trait for money goal service operations
#[async_trait]
pub trait MoneyGoalServiceTrait: Send + Sync {
    fn list_goals(&self, filters: &MoneyGoalFilters) -> Result<Vec<MoneyGoalWithStats>>;
    fn get_goal(&self, goal_id: &str) -> Result<MoneyGoalWithStats>;
    fn get_summary(&self, filters: &MoneyGoalFilters) -> Result<MoneyGoalSummary>;
    fn export_goals(&self, filters: &MoneyGoalFilters) -> Result<MoneyGoalExport>;
    fn get_edit_history(&self, goal_id: &str) -> Result<Vec<EditHistoryEntry>>;
    fn list_contributions(&self, goal_id: &str) -> Result<Vec<MoneyGoalContribution>>;
    async fn create_goal(&self, new_goal: NewMoneyGoal, editor: &Editor) -> Result<MoneyGoal>;
    async fn update_goal(&self, update: MoneyGoalUpdate, editor: &Editor) -> Result<MoneyGoal>;
    async fn delete_goal(&self, goal_id: &str) -> Result<()>;
    async fn add_contribution(
        &self,
        goal_id: &str,
        contribution: NewMoneyGoalContribution,
        editor: &Editor,
    ) -> Result<MoneyGoalContribution>;
    async fn delete_contribution(&self, contribution_id: &str) -> Result<()>;
}
