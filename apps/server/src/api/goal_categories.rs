use std::sync::Arc;

use crate::{
    api::goals::require_finance_role,
    error::{ApiError, ApiResult},
    extract::{Json, Query},
    main_lib::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Router,
};
use ecclesia_core::goal_categories::{
    MoneyGoalCategory, MoneyGoalCategoryUpdate, NewMoneyGoalCategory,
};
use ecclesia_core::users::Editor;
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CategoryQuery {
    #[serde(default)]
    pub enabled_only: bool,
    /// `fr` or `mg` selects the translated `displayName`.
    pub locale: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

/// A category with its label resolved for the requested locale.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedCategory {
    pub display_name: String,
    #[serde(flatten)]
    pub category: MoneyGoalCategory,
}

impl LocalizedCategory {
    fn new(category: MoneyGoalCategory, locale: Option<&str>) -> Self {
        Self {
            display_name: category.localized_name(locale.unwrap_or_default()).to_string(),
            category,
        }
    }
}

#[utoipa::path(get, path = "/api/v1/goal-categories", params(CategoryQuery), responses((status = 200, description = "Categories ordered by name")))]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CategoryQuery>,
) -> ApiResult<Json<Vec<LocalizedCategory>>> {
    let categories = state
        .category_service
        .get_categories(query.enabled_only)?
        .into_iter()
        .map(|category| LocalizedCategory::new(category, query.locale.as_deref()))
        .collect();
    Ok(Json(categories))
}

#[utoipa::path(get, path = "/api/v1/goal-categories/{id}", params(LocaleQuery), responses((status = 200, description = "Category"), (status = 404)))]
pub async fn get_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
) -> ApiResult<Json<LocalizedCategory>> {
    let category = state.category_service.get_category(&id)?;
    Ok(Json(LocalizedCategory::new(category, query.locale.as_deref())))
}

#[utoipa::path(post, path = "/api/v1/goal-categories", responses((status = 200, description = "Created category")))]
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Extension(editor): Extension<Editor>,
    Json(payload): Json<NewMoneyGoalCategory>,
) -> ApiResult<Json<MoneyGoalCategory>> {
    require_finance_role(&editor)?;
    let category = state.category_service.create_category(payload).await?;
    Ok(Json(category))
}

#[utoipa::path(put, path = "/api/v1/goal-categories/{id}", responses((status = 200, description = "Updated category"), (status = 404)))]
pub async fn update_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(editor): Extension<Editor>,
    Json(mut payload): Json<MoneyGoalCategoryUpdate>,
) -> ApiResult<Json<MoneyGoalCategory>> {
    require_finance_role(&editor)?;
    if payload.id.as_deref().is_some_and(|body_id| body_id != id) {
        return Err(ApiError::BadRequest(
            "Category id in body does not match path".to_string(),
        ));
    }
    payload.id = Some(id);
    let category = state.category_service.update_category(payload).await?;
    Ok(Json(category))
}

#[utoipa::path(delete, path = "/api/v1/goal-categories/{id}", responses((status = 204), (status = 404), (status = 409, description = "Category still owns goals")))]
pub async fn delete_category(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(editor): Extension<Editor>,
) -> ApiResult<StatusCode> {
    require_finance_role(&editor)?;
    state.category_service.delete_category(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/goal-categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/goal-categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}
