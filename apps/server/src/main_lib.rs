use std::sync::Arc;

use crate::{auth::AuthManager, config::Config};
use ecclesia_core::{
    goal_categories::{MoneyGoalCategoryService, MoneyGoalCategoryServiceTrait},
    goals::{MoneyGoalService, MoneyGoalServiceTrait},
};
use ecclesia_storage_sqlite::{
    db::{self, write_actor},
    goal_categories::MoneyGoalCategoryRepository,
    goals::MoneyGoalRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub goal_service: Arc<dyn MoneyGoalServiceTrait + Send + Sync>,
    pub category_service: Arc<dyn MoneyGoalCategoryServiceTrait + Send + Sync>,
    pub auth: Option<Arc<AuthManager>>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("ECC_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let goal_repo = Arc::new(MoneyGoalRepository::new(pool.clone(), writer.clone()));
    let category_repo = Arc::new(MoneyGoalCategoryRepository::new(pool.clone(), writer));

    let goal_service = Arc::new(MoneyGoalService::new(goal_repo));
    let category_service = Arc::new(MoneyGoalCategoryService::new(category_repo));

    let auth = match &config.auth {
        Some(auth_config) => {
            tracing::info!("Bearer token authentication enabled");
            Some(Arc::new(AuthManager::new(auth_config)))
        }
        None => {
            tracing::warn!("ECC_JWT_SECRET not set; requests run as an anonymous admin");
            None
        }
    };

    Ok(Arc::new(AppState {
        goal_service,
        category_service,
        auth,
        db_path,
    }))
}
