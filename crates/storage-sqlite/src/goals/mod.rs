//! SQLite storage implementation for money goals and their contributions.

mod model;
mod repository;


pub use model::{GoalTargetDB, MoneyGoalContributionDB, MoneyGoalDB};
pub use repository::MoneyGoalRepository;
