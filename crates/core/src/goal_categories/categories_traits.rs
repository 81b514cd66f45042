use crate::errors::Result;
use crate::goal_categories::categories_model::{
    MoneyGoalCategory, MoneyGoalCategoryUpdate, NewMoneyGoalCategory,
};
use async_trait::async_trait;

/// Trait for money goal category repository operations
#[async_trait]
pub trait MoneyGoalCategoryRepositoryTrait: Send + Sync {
    fn load_categories(&self, enabled_only: bool) -> Result<Vec<MoneyGoalCategory>>;
    fn get_category(&self, category_id: &str) -> Result<MoneyGoalCategory>;
    async fn insert_category(&self, new_category: NewMoneyGoalCategory)
        -> Result<MoneyGoalCategory>;
    async fn update_category(&self, update: MoneyGoalCategoryUpdate) -> Result<MoneyGoalCategory>;
    /// Deletes a category that owns no goals. Fails with a constraint violation otherwise.
    async fn delete_category(&self, category_id: String) -> Result<usize>;
}

/// Trait for money goal category service operations
#[async_trait]
pub trait MoneyGoalCategoryServiceTrait: Send + Sync {
    fn get_categories(&self, enabled_only: bool) -> Result<Vec<MoneyGoalCategory>>;
    fn get_category(&self, category_id: &str) -> Result<MoneyGoalCategory>;
    async fn create_category(&self, new_category: NewMoneyGoalCategory)
        -> Result<MoneyGoalCategory>;
    async fn update_category(&self, update: MoneyGoalCategoryUpdate) -> Result<MoneyGoalCategory>;
    async fn delete_category(&self, category_id: &str) -> Result<()>;
}
