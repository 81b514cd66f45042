use std::sync::Arc;

use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{auth::require_auth, config::Config, main_lib::AppState};

pub mod goal_categories;
pub mod goals;
pub mod health;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        health::readyz,
        goals::list_goals,
        goals::create_goal,
        goals::get_goal,
        goals::update_goal,
        goals::delete_goal,
        goals::get_summary,
        goals::export_goals,
        goals::get_edit_history,
        goals::list_contributions,
        goals::add_contribution,
        goals::delete_contribution,
        goal_categories::list_categories,
        goal_categories::get_category,
        goal_categories::create_category,
        goal_categories::update_category,
        goal_categories::delete_category,
    ),
    tags((name = "ecclesia"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {}", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();

    let protected = Router::new()
        .merge(goals::router())
        .merge(goal_categories::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api = Router::new().merge(health::router()).merge(protected);

    Router::new()
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
