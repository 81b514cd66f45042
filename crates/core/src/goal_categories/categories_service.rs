use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use crate::errors::{Error, Result};
use crate::goal_categories::categories_model::{
    MoneyGoalCategory, MoneyGoalCategoryUpdate, NewMoneyGoalCategory,
};
use crate::goal_categories::categories_traits::{
    MoneyGoalCategoryRepositoryTrait, MoneyGoalCategoryServiceTrait,
};

pub struct MoneyGoalCategoryService {
    category_repo: Arc<dyn MoneyGoalCategoryRepositoryTrait>,
}

impl MoneyGoalCategoryService {
    pub fn new(category_repo: Arc<dyn MoneyGoalCategoryRepositoryTrait>) -> Self {
        Self { category_repo }
    }
}

#[async_trait]
impl MoneyGoalCategoryServiceTrait for MoneyGoalCategoryService {
    fn get_categories(&self, enabled_only: bool) -> Result<Vec<MoneyGoalCategory>> {
        self.category_repo.load_categories(enabled_only)
    }

    fn get_category(&self, category_id: &str) -> Result<MoneyGoalCategory> {
        self.category_repo.get_category(category_id)
    }

    async fn create_category(
        &self,
        new_category: NewMoneyGoalCategory,
    ) -> Result<MoneyGoalCategory> {
        new_category.validate()?;
        self.category_repo.insert_category(new_category).await
    }

    async fn update_category(&self, update: MoneyGoalCategoryUpdate) -> Result<MoneyGoalCategory> {
        update.validate()?;
        self.category_repo.update_category(update).await
    }

    async fn delete_category(&self, category_id: &str) -> Result<()> {
        let deleted = self
            .category_repo
            .delete_category(category_id.to_string())
            .await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!(
                "Money goal category {}",
                category_id
            )));
        }
        info!("Money goal category {} deleted", category_id);
        Ok(())
    }
}
