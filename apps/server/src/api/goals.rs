use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    extract::{Json, Query},
    main_lib::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Router,
};
use chrono::{Datelike, Utc};
use ecclesia_core::goals::{
    EditHistoryEntry, GoalStatus, MoneyGoalContribution, MoneyGoalExport, MoneyGoalFilters,
    MoneyGoalSummary, MoneyGoalUpdate, MoneyGoalWithStats, NewMoneyGoal,
    NewMoneyGoalContribution,
};
use ecclesia_core::users::Editor;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query string shared by the list, summary and export endpoints.
///
/// `years` defaults to the current calendar year; `all` disables the year
/// (or status) filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct GoalFilterQuery {
    pub years: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<String>,
    pub search: Option<String>,
}

const ALL: &str = "all";

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl GoalFilterQuery {
    pub fn into_filters(self, current_year: i32) -> ApiResult<MoneyGoalFilters> {
        let years = match non_blank(self.years) {
            None => Some(current_year),
            Some(v) if v.eq_ignore_ascii_case(ALL) => None,
            Some(v) => Some(
                v.parse::<i32>()
                    .map_err(|_| ApiError::BadRequest(format!("Invalid years filter '{}'", v)))?,
            ),
        };
        let status = match non_blank(self.status) {
            None => None,
            Some(v) if v.eq_ignore_ascii_case(ALL) => None,
            Some(v) => Some(v.parse::<GoalStatus>()?),
        };
        Ok(MoneyGoalFilters {
            years,
            status,
            category_id: non_blank(self.category_id),
            search: non_blank(self.search),
        })
    }
}

fn current_year() -> i32 {
    Utc::now().year()
}

/// Rejects callers whose role is read-only.
pub fn require_finance_role(editor: &Editor) -> ApiResult<()> {
    if editor.role.can_manage_finances() {
        Ok(())
    } else {
        Err(ApiError::Forbidden(format!(
            "Role '{}' cannot modify money goals",
            editor.role.as_str()
        )))
    }
}

#[utoipa::path(get, path = "/api/v1/goals", params(GoalFilterQuery), responses((status = 200, description = "Goals with statistics")))]
pub async fn list_goals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GoalFilterQuery>,
) -> ApiResult<Json<Vec<MoneyGoalWithStats>>> {
    let filters = query.into_filters(current_year())?;
    let goals = state.goal_service.list_goals(&filters)?;
    Ok(Json(goals))
}

#[utoipa::path(post, path = "/api/v1/goals", responses((status = 200, description = "Created goal")))]
pub async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(editor): Extension<Editor>,
    Json(payload): Json<NewMoneyGoal>,
) -> ApiResult<Json<MoneyGoalWithStats>> {
    require_finance_role(&editor)?;
    let goal = state.goal_service.create_goal(payload, &editor).await?;
    Ok(Json(MoneyGoalWithStats::new(goal, Vec::new())))
}

#[utoipa::path(get, path = "/api/v1/goals/{id}", responses((status = 200, description = "Goal with statistics and history"), (status = 404)))]
pub async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MoneyGoalWithStats>> {
    Ok(Json(state.goal_service.get_goal(&id)?))
}

#[utoipa::path(put, path = "/api/v1/goals/{id}", responses((status = 200, description = "Updated goal"), (status = 404)))]
pub async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(editor): Extension<Editor>,
    Json(mut payload): Json<MoneyGoalUpdate>,
) -> ApiResult<Json<MoneyGoalWithStats>> {
    require_finance_role(&editor)?;
    if let Some(body_id) = payload.id.as_deref() {
        if body_id != id {
            return Err(ApiError::BadRequest(format!(
                "Goal id '{}' in body does not match path '{}'",
                body_id, id
            )));
        }
    }
    payload.id = Some(id.clone());
    state.goal_service.update_goal(payload, &editor).await?;
    Ok(Json(state.goal_service.get_goal(&id)?))
}

#[utoipa::path(delete, path = "/api/v1/goals/{id}", responses((status = 204), (status = 404)))]
pub async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(editor): Extension<Editor>,
) -> ApiResult<StatusCode> {
    require_finance_role(&editor)?;
    state.goal_service.delete_goal(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/v1/goals/summary", params(GoalFilterQuery), responses((status = 200, description = "Totals across the filtered goals")))]
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GoalFilterQuery>,
) -> ApiResult<Json<MoneyGoalSummary>> {
    let filters = query.into_filters(current_year())?;
    Ok(Json(state.goal_service.get_summary(&filters)?))
}

#[utoipa::path(get, path = "/api/v1/goals/export", params(GoalFilterQuery), responses((status = 200, description = "Report payload")))]
pub async fn export_goals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GoalFilterQuery>,
) -> ApiResult<Json<MoneyGoalExport>> {
    let filters = query.into_filters(current_year())?;
    Ok(Json(state.goal_service.export_goals(&filters)?))
}

#[utoipa::path(get, path = "/api/v1/goals/{id}/history", responses((status = 200, description = "Edit history, oldest first"), (status = 404)))]
pub async fn get_edit_history(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<EditHistoryEntry>>> {
    Ok(Json(state.goal_service.get_edit_history(&id)?))
}

#[utoipa::path(get, path = "/api/v1/goals/{id}/contributions", responses((status = 200, description = "Contributions, oldest first"), (status = 404)))]
pub async fn list_contributions(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<MoneyGoalContribution>>> {
    Ok(Json(state.goal_service.list_contributions(&id)?))
}

#[utoipa::path(post, path = "/api/v1/goals/{id}/contributions", responses((status = 200, description = "Recorded contribution"), (status = 404)))]
pub async fn add_contribution(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(editor): Extension<Editor>,
    Json(payload): Json<NewMoneyGoalContribution>,
) -> ApiResult<Json<MoneyGoalContribution>> {
    require_finance_role(&editor)?;
    let contribution = state
        .goal_service
        .add_contribution(&id, payload, &editor)
        .await?;
    Ok(Json(contribution))
}

#[utoipa::path(delete, path = "/api/v1/contributions/{id}", responses((status = 204), (status = 404)))]
pub async fn delete_contribution(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(editor): Extension<Editor>,
) -> ApiResult<StatusCode> {
    require_finance_role(&editor)?;
    state.goal_service.delete_contribution(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route("/goals/summary", get(get_summary))
        .route("/goals/export", get(export_goals))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/{id}/history", get(get_edit_history))
        .route(
            "/goals/{id}/contributions",
            get(list_contributions).post(add_contribution),
        )
        .route("/contributions/{id}", delete(delete_contribution))
}
