//! Money goals module - goals, contributions, statistics and edit history.

mod goals_history;
mod goals_model;
mod goals_service;
mod goals_stats;
mod goals_traits;


pub use goals_history::{apply_update, diff_goal, track_update, tracked_field_names};
pub use goals_model::{
    parse_edit_history, serialize_edit_history, EditHistoryEntry, FieldChange, GoalStatus,
    GoalTarget, MoneyGoal, MoneyGoalContribution, MoneyGoalExport, MoneyGoalFilters,
    MoneyGoalSummary, MoneyGoalUpdate, MoneyGoalWithStats, NewMoneyGoal,
    NewMoneyGoalContribution,
};
pub use goals_service::{summarize_goals, MoneyGoalService};
pub use goals_stats::{
    compute_progress, percentage_of, sum_amounts, summarize, total_contributions, GoalFigures,
    GoalProgress,
};
pub use goals_traits::{MoneyGoalRepositoryTrait, MoneyGoalServiceTrait};
