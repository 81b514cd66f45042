//! Contribution totals, goal progress and cross-goal summaries.
//!
//! Every figure exposed by the goal endpoints is computed here so the summary
//! endpoint and the list/export fold share one implementation of the arithmetic.

use super::goals_model::{
    GoalStatus, GoalTarget, MoneyGoal, MoneyGoalContribution, MoneyGoalSummary,
    MoneyGoalWithStats,
};

/// Percentage and remaining amount of a single goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    pub progress_percentage: f64,
    pub remaining_amount: f64,
}

/// The three numbers the summary aggregator needs from a goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalFigures {
    pub amount_goal: f64,
    pub total_contributions: f64,
    pub status: GoalStatus,
}

/// Sums amounts left to right starting from zero.
pub fn sum_amounts<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    amounts.into_iter().fold(0.0, |total, amount| total + amount)
}

/// Sum of the contribution amounts of one goal, in contribution order.
pub fn total_contributions(contributions: &[MoneyGoalContribution]) -> f64 {
    sum_amounts(contributions.iter().map(|c| c.amount))
}

/// `part / whole` as a percentage within [0, 100]; zero when `whole` is not positive.
pub fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Progress toward `amount_goal`, clamped to `[0, 100]`. The remaining amount
/// never goes below zero.
pub fn compute_progress(amount_goal: f64, reached: f64) -> GoalProgress {
    GoalProgress {
        progress_percentage: percentage_of(reached, amount_goal),
        remaining_amount: (amount_goal - reached).max(0.0),
    }
}

/// Folds per-goal figures into cross-goal totals.
pub fn summarize<I>(figures: I) -> MoneyGoalSummary
where
    I: IntoIterator<Item = GoalFigures>,
{
    let mut summary = MoneyGoalSummary::default();
    for figure in figures {
        summary.total_goals += 1;
        match figure.status {
            GoalStatus::Active => summary.active_goals += 1,
            GoalStatus::Completed => summary.completed_goals += 1,
            GoalStatus::Cancelled => summary.cancelled_goals += 1,
        }
        summary.total_target_amount += figure.amount_goal;
        summary.total_reached_amount += figure.total_contributions;
    }
    summary.overall_progress =
        percentage_of(summary.total_reached_amount, summary.total_target_amount);
    summary
}

impl GoalFigures {
    /// Figures for a goal known only by target and raw contribution amounts.
    pub fn from_amounts(target: &GoalTarget, amounts: &[f64]) -> Self {
        Self {
            amount_goal: target.amount_goal,
            total_contributions: sum_amounts(amounts.iter().copied()),
            status: target.status,
        }
    }
}

impl From<&MoneyGoalWithStats> for GoalFigures {
    fn from(goal: &MoneyGoalWithStats) -> Self {
        Self {
            amount_goal: goal.goal.amount_goal,
            total_contributions: goal.total_contributions,
            status: goal.goal.status,
        }
    }
}

impl MoneyGoalWithStats {
    pub fn new(goal: MoneyGoal, contributions: Vec<MoneyGoalContribution>) -> Self {
        let total = total_contributions(&contributions);
        let progress = compute_progress(goal.amount_goal, total);
        Self {
            goal,
            contribution_count: contributions.len(),
            contributions,
            total_contributions: total,
            reached_goal: total,
            progress_percentage: progress.progress_percentage,
            remaining_amount: progress.remaining_amount,
        }
    }
}
