use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use ecclesia_core::users::{Editor, Role};
use ecclesia_server::{
    api::app_router,
    auth::{AuthConfig, AuthManager},
    build_state,
    config::Config,
};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

const SECRET: &[u8; 32] = b"ecclesia-test-secret-32-bytes!!!";

struct TestApp {
    router: Router,
    auth: Option<AuthManager>,
    _tmp: TempDir,
}

async fn build_test_app(with_auth: bool) -> TestApp {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("test.db").to_string_lossy().to_string();
    let mut config = Config::with_db_path(db_path);
    let auth_config = AuthConfig {
        jwt_secret: SECRET.to_vec(),
        access_token_ttl: Duration::from_secs(600),
    };
    if with_auth {
        config.auth = Some(auth_config.clone());
    }
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config),
        auth: with_auth.then(|| AuthManager::new(&auth_config)),
        _tmp: tmp,
    }
}

impl TestApp {
    fn token_for(&self, editor: &Editor) -> String {
        self.auth
            .as_ref()
            .expect("auth enabled")
            .issue_token(editor)
            .unwrap()
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).to_string())
            })
        };
        (status, value)
    }

    async fn create_category(&self, token: Option<&str>) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/goal-categories",
                Some(json!({ "name": "Building", "nameFr": "Bâtiment", "color": "#1E88E5" })),
                token,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    async fn create_goal(
        &self,
        name: &str,
        amount_goal: f64,
        years: i32,
        category_id: &str,
        token: Option<&str>,
    ) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/goals",
                Some(json!({
                    "name": name,
                    "amountGoal": amount_goal,
                    "years": years,
                    "categoryId": category_id,
                })),
                token,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    async fn contribute(&self, goal_id: &str, amount: f64, token: Option<&str>) {
        let (status, body) = self
            .send(
                Method::POST,
                &format!("/api/v1/goals/{goal_id}/contributions"),
                Some(json!({ "amount": amount })),
                token,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
    }
}

#[tokio::test]
async fn goal_statistics_and_summary() {
    let app = build_test_app(false).await;
    let category_id = app.create_category(None).await;

    let roof = app.create_goal("Roof", 1000.0, 2024, &category_id, None).await;
    let organ = app.create_goal("Organ", 500.0, 2024, &category_id, None).await;

    app.contribute(&roof, 600.0, None).await;
    app.contribute(&roof, 400.0, None).await;
    app.contribute(&organ, 250.0, None).await;

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/v1/goals/{roof}"),
            Some(json!({ "status": "completed" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, organ_body) = app
        .send(Method::GET, &format!("/api/v1/goals/{organ}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(organ_body["totalContributions"], json!(250.0));
    assert_eq!(organ_body["reachedGoal"], json!(250.0));
    assert_eq!(organ_body["progressPercentage"], json!(50.0));
    assert_eq!(organ_body["remainingAmount"], json!(250.0));
    assert_eq!(organ_body["contributionCount"], json!(1));

    let (status, summary) = app
        .send(Method::GET, "/api/v1/goals/summary?years=2024", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalGoals"], json!(2));
    assert_eq!(summary["activeGoals"], json!(1));
    assert_eq!(summary["completedGoals"], json!(1));
    assert_eq!(summary["totalTargetAmount"], json!(1500.0));
    assert_eq!(summary["totalReachedAmount"], json!(1250.0));
    let overall = summary["overallProgress"].as_f64().unwrap();
    assert!((overall - 83.333_333).abs() < 1e-4);

    let (status, export) = app
        .send(Method::GET, "/api/v1/goals/export?years=2024", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(export["goals"].as_array().unwrap().len(), 2);
    assert_eq!(export["summary"], summary);
    assert_eq!(export["filters"]["years"], json!(2024));
    assert!(export["exportDate"].is_string());
}

#[tokio::test]
async fn list_defaults_to_current_year() {
    let app = build_test_app(false).await;
    let category_id = app.create_category(None).await;
    app.create_goal("Old bells", 200.0, 1999, &category_id, None)
        .await;

    let (_, current) = app.send(Method::GET, "/api/v1/goals", None, None).await;
    assert!(current.as_array().unwrap().is_empty());

    let (_, all) = app
        .send(Method::GET, "/api/v1/goals?years=all", None, None)
        .await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    let (status, body) = app
        .send(Method::GET, "/api/v1/goals?years=soon", None, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(400));
}

#[tokio::test]
async fn edit_history_is_recorded_per_change() {
    let app = build_test_app(false).await;
    let category_id = app.create_category(None).await;
    let goal_id = app.create_goal("A", 100.0, 2024, &category_id, None).await;

    let uri = format!("/api/v1/goals/{goal_id}");
    app.send(
        Method::PUT,
        &uri,
        Some(json!({ "name": "A", "amountGoal": 150.0 })),
        None,
    )
    .await;
    // Same values again: nothing to record.
    app.send(
        Method::PUT,
        &uri,
        Some(json!({ "name": "A", "amountGoal": 150.0 })),
        None,
    )
    .await;

    let (status, history) = app
        .send(Method::GET, &format!("{uri}/history"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["editedBy"], json!("anonymous"));
    assert_eq!(entries[0]["editorName"], json!("Unknown"));
    assert_eq!(
        entries[0]["changes"],
        json!([{ "field": "amountGoal", "previousValue": 100.0, "newValue": 150.0 }])
    );

    let (_, goal) = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(goal["editHistory"], history);
}

#[tokio::test]
async fn missing_records_and_conflicts() {
    let app = build_test_app(false).await;

    let (status, body) = app
        .send(Method::GET, "/api/v1/goals/does-not-exist", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!(404));

    let (status, _) = app
        .send(Method::DELETE, "/api/v1/contributions/nope", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let category_id = app.create_category(None).await;
    let goal_id = app.create_goal("Roof", 100.0, 2024, &category_id, None).await;

    let (status, _) = app
        .send(
            Method::POST,
            &format!("/api/v1/goals/{goal_id}/contributions"),
            Some(json!({ "amount": 0 })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/v1/goal-categories/{category_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/v1/goals/{goal_id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/v1/goal-categories/{category_id}"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn malformed_input_uses_error_body() {
    let app = build_test_app(false).await;
    let category_id = app.create_category(None).await;
    let goal_id = app.create_goal("Roof", 100.0, 2024, &category_id, None).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/goals",
            Some(json!({ "amountGoal": 100.0, "years": 2024, "categoryId": category_id })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(400));
    assert!(body["message"].as_str().unwrap().contains("name"));

    let (status, body) = app
        .send(
            Method::POST,
            &format!("/api/v1/goals/{goal_id}/contributions"),
            Some(json!({ "amount": "abc" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(400));

    let (status, body) = app
        .send(
            Method::GET,
            "/api/v1/goal-categories?enabledOnly=maybe",
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(400));
}

#[tokio::test]
async fn categories_resolve_display_name_for_locale() {
    let app = build_test_app(false).await;
    let category_id = app.create_category(None).await;

    let (status, category) = app
        .send(
            Method::GET,
            &format!("/api/v1/goal-categories/{category_id}?locale=fr-FR"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(category["displayName"], json!("Bâtiment"));
    assert_eq!(category["name"], json!("Building"));

    let (_, listed) = app
        .send(Method::GET, "/api/v1/goal-categories?locale=mg", None, None)
        .await;
    assert_eq!(listed[0]["id"], json!(category_id));
    assert_eq!(listed[0]["displayName"], json!("Building"));

    let (status, body) = app
        .send(Method::GET, "/api/v1/goal-categories/nope", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!(404));
}

#[tokio::test]
async fn bearer_tokens_and_roles() {
    let app = build_test_app(true).await;
    let treasurer = app.token_for(
        &Editor::new("user-7", Role::Treasurer)
            .with_name("Hery")
            .with_email("hery@church.org"),
    );
    let member = app.token_for(&Editor::new("user-9", Role::Member));

    let (status, _) = app.send(Method::GET, "/api/v1/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send(Method::GET, "/api/v1/goals", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], json!(401));

    let (status, _) = app
        .send(Method::GET, "/api/v1/goals", None, Some("not-a-token"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(Method::GET, "/api/v1/goals", None, Some(&member))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/goal-categories",
            Some(json!({ "name": "Missions" })),
            Some(&member),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let category_id = app.create_category(Some(&treasurer)).await;
    let goal_id = app
        .create_goal("Roof", 1000.0, 2024, &category_id, Some(&treasurer))
        .await;

    let (_, goal) = app
        .send(
            Method::GET,
            &format!("/api/v1/goals/{goal_id}"),
            None,
            Some(&member),
        )
        .await;
    assert_eq!(goal["createdBy"], json!("user-7"));

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/v1/goals/{goal_id}"),
            Some(json!({ "years": 2025 })),
            Some(&member),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = app
        .send(
            Method::PUT,
            &format!("/api/v1/goals/{goal_id}"),
            Some(json!({ "years": 2025 })),
            Some(&treasurer),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["editHistory"][0]["editedBy"], json!("user-7"));
    assert_eq!(updated["editHistory"][0]["editorName"], json!("Hery"));
}
