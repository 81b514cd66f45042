//! Money goal categories - grouping, localized labels and display hints for goals.

mod categories_model;
mod categories_service;
mod categories_traits;

pub use categories_model::{MoneyGoalCategory, MoneyGoalCategoryUpdate, NewMoneyGoalCategory};
pub use categories_service::MoneyGoalCategoryService;
pub use categories_traits::{MoneyGoalCategoryRepositoryTrait, MoneyGoalCategoryServiceTrait};
