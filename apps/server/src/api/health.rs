use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{extract::State, routing::get, Router};

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

/// Ready once the database file exists and the category table answers a read.
#[utoipa::path(get, path = "/api/v1/readyz", responses((status = 200, description = "Ready"), (status = 500)))]
pub async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    if !std::path::Path::new(&state.db_path).exists() {
        return Err(ApiError::Internal(format!(
            "Database file {} is missing",
            state.db_path
        )));
    }
    state.category_service.get_categories(true)?;
    Ok("ok")
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
