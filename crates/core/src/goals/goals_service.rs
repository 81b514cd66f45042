use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};

use crate::errors::{Error, Result};
use crate::goals::goals_model::{
    EditHistoryEntry, MoneyGoal, MoneyGoalContribution, MoneyGoalExport, MoneyGoalFilters,
    MoneyGoalSummary, MoneyGoalUpdate, MoneyGoalWithStats, NewMoneyGoal,
    NewMoneyGoalContribution,
};
use crate::goals::goals_stats::{summarize, GoalFigures};
use crate::goals::goals_traits::{MoneyGoalRepositoryTrait, MoneyGoalServiceTrait};
use crate::users::Editor;

pub struct MoneyGoalService {
    goal_repo: Arc<dyn MoneyGoalRepositoryTrait>,
}

impl MoneyGoalService {
    pub fn new(goal_repo: Arc<dyn MoneyGoalRepositoryTrait>) -> Self {
        MoneyGoalService { goal_repo }
    }

    fn with_stats(&self, goals: Vec<MoneyGoal>) -> Result<Vec<MoneyGoalWithStats>> {
        let goal_ids: Vec<String> = goals.iter().map(|g| g.id.clone()).collect();
        let mut by_goal: HashMap<String, Vec<MoneyGoalContribution>> = HashMap::new();
        for contribution in self.goal_repo.load_contributions(&goal_ids)? {
            by_goal
                .entry(contribution.goal_id.clone())
                .or_default()
                .push(contribution);
        }
        Ok(goals
            .into_iter()
            .map(|goal| {
                let contributions = by_goal.remove(&goal.id).unwrap_or_default();
                MoneyGoalWithStats::new(goal, contributions)
            })
            .collect())
    }
}

/// Summary of goals that were already fetched with their statistics.
pub fn summarize_goals(goals: &[MoneyGoalWithStats]) -> MoneyGoalSummary {
    summarize(goals.iter().map(GoalFigures::from))
}

#[async_trait]
impl MoneyGoalServiceTrait for MoneyGoalService {
    fn list_goals(&self, filters: &MoneyGoalFilters) -> Result<Vec<MoneyGoalWithStats>> {
        let goals = self.goal_repo.load_goals(filters)?;
        self.with_stats(goals)
    }

    fn get_goal(&self, goal_id: &str) -> Result<MoneyGoalWithStats> {
        let goal = self.goal_repo.get_goal(goal_id)?;
        let mut goals = self.with_stats(vec![goal])?;
        goals
            .pop()
            .ok_or_else(|| Error::NotFound(format!("Money goal {}", goal_id)))
    }

    fn get_summary(&self, filters: &MoneyGoalFilters) -> Result<MoneyGoalSummary> {
        let targets = self.goal_repo.load_goal_targets(&filters.without_search())?;
        let goal_ids: Vec<String> = targets.iter().map(|t| t.id.clone()).collect();
        let amounts = self.goal_repo.load_contribution_amounts(&goal_ids)?;
        Ok(summarize(targets.iter().map(|target| {
            let goal_amounts = amounts.get(&target.id).map(Vec::as_slice).unwrap_or(&[]);
            GoalFigures::from_amounts(target, goal_amounts)
        })))
    }

    fn export_goals(&self, filters: &MoneyGoalFilters) -> Result<MoneyGoalExport> {
        let goals = self.list_goals(filters)?;
        let summary = summarize_goals(&goals);
        debug!("Exporting {} money goals", goals.len());
        Ok(MoneyGoalExport {
            goals,
            summary,
            filters: filters.clone(),
            export_date: Utc::now(),
        })
    }

    fn get_edit_history(&self, goal_id: &str) -> Result<Vec<EditHistoryEntry>> {
        Ok(self.goal_repo.get_goal(goal_id)?.edit_history)
    }

    fn list_contributions(&self, goal_id: &str) -> Result<Vec<MoneyGoalContribution>> {
        let goal = self.goal_repo.get_goal(goal_id)?;
        self.goal_repo.load_contributions(&[goal.id])
    }

    async fn create_goal(&self, new_goal: NewMoneyGoal, editor: &Editor) -> Result<MoneyGoal> {
        new_goal.validate()?;
        let goal = self
            .goal_repo
            .insert_goal(new_goal, editor.id.clone())
            .await?;
        info!("Money goal {} created by {}", goal.id, editor.id);
        Ok(goal)
    }

    async fn update_goal(&self, update: MoneyGoalUpdate, editor: &Editor) -> Result<MoneyGoal> {
        update.validate()?;
        self.goal_repo.update_goal(update, editor.clone()).await
    }

    async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        let deleted = self.goal_repo.delete_goal(goal_id.to_string()).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Money goal {}", goal_id)));
        }
        info!("Money goal {} deleted", goal_id);
        Ok(())
    }

    async fn add_contribution(
        &self,
        goal_id: &str,
        contribution: NewMoneyGoalContribution,
        editor: &Editor,
    ) -> Result<MoneyGoalContribution> {
        contribution.validate()?;
        let contributor_id = contribution
            .contributor_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| editor.id.clone());
        self.goal_repo
            .insert_contribution(goal_id.to_string(), contribution, contributor_id)
            .await
    }

    async fn delete_contribution(&self, contribution_id: &str) -> Result<()> {
        let deleted = self
            .goal_repo
            .delete_contribution(contribution_id.to_string())
            .await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!(
                "Money goal contribution {}",
                contribution_id
            )));
        }
        Ok(())
    }
}
