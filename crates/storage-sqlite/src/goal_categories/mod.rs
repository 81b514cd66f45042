//! SQLite storage implementation for money goal categories.

mod model;
mod repository;

pub use model::MoneyGoalCategoryDB;
pub use repository::MoneyGoalCategoryRepository;
