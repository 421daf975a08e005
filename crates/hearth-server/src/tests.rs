//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use hearth_core::db::Database;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn setup_test_app() -> Router {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: false,
        ..Default::default()
    };
    create_router(db, None, config)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// ========== Auth ==========

#[tokio::test]
async fn test_plans_catalog_is_public_with_auth_enabled() {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: true,
        api_keys: vec!["secret-key".to_string()],
        ..Default::default()
    };
    let app = create_router(db, None, config);

    // Catalog works without credentials
    let response = app.clone().oneshot(get("/api/budget/plans")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Protected routes do not
    let response = app.clone().oneshot(get("/api/transactions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A valid bearer key opens them up
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/transactions")
                .header("authorization", "Bearer secret-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalid_api_key_is_rejected() {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: true,
        api_keys: vec!["secret-key".to_string()],
        ..Default::default()
    };
    let app = create_router(db, None, config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/transactions")
                .header("authorization", "Bearer wrong-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ========== Budget Plan API ==========

#[tokio::test]
async fn test_list_allocation_plans() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/budget/plans")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let plans = json.as_array().unwrap();
    assert_eq!(plans.len(), 5);
    assert_eq!(plans[1]["id"], "most_popular");
    assert_eq!(plans[1]["allocations"]["needs"], 50.0);
    assert_eq!(plans[1]["allocations"]["wants"], 30.0);
    assert_eq!(plans[1]["allocations"]["savings"], 20.0);
}

#[tokio::test]
async fn test_budget_plan_lifecycle() {
    let app = setup_test_app();

    // No plan yet
    let response = app.clone().oneshot(get("/api/budget/plan")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Select one
    let body = serde_json::json!({"plan_id": "most_popular", "monthly_income": 4000.0});
    let response = app
        .clone()
        .oneshot(post_json("/api/budget/plan", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["plan_id"], "most_popular");
    assert_eq!(json["plan_name"], "50-30-20 Budget");
    assert_eq!(json["monthly_income"], 4000.0);

    // Read it back
    let response = app.clone().oneshot(get("/api/budget/plan")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Delete it
    let response = app
        .clone()
        .oneshot(delete("/api/budget/plan"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // A second delete is not-found, not a silent success
    let response = app.oneshot(delete("/api/budget/plan")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_select_plan_validation() {
    let app = setup_test_app();

    let body = serde_json::json!({"plan_id": "super_saver", "monthly_income": 4000.0});
    let response = app
        .clone()
        .oneshot(post_json("/api/budget/plan", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({"plan_id": "most_popular", "monthly_income": 0.0});
    let response = app
        .oneshot(post_json("/api/budget/plan", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_budget_analysis_end_to_end() {
    let app = setup_test_app();

    let body = serde_json::json!({"plan_id": "most_popular", "monthly_income": 100000.0});
    let response = app
        .clone()
        .oneshot(post_json("/api/budget/plan", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // A rent transaction dated today so it lands in the analysis month
    let today = chrono::Local::now().date_naive();
    let tx = serde_json::json!({
        "date": today.to_string(),
        "description": "Monthly rent",
        "category": "rent",
        "expense_type": null,
        "kind": "expense",
        "amount": 20000.0
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/transactions", tx))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let loan = serde_json::json!({
        "name": "Car loan",
        "lender": null,
        "principal": 300000.0,
        "emi_amount": 10000.0,
        "due_day": 5
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/loans", loan))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/budget/analysis")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["budget_plan"]["selected_plan"], "most_popular");
    assert_eq!(json["categorized_expenses"]["needs"]["total"], 30000.0);
    assert_eq!(json["analysis"]["total_budget"], 100000.0);
    assert_eq!(json["analysis"]["total_actual"], 30000.0);
    assert_eq!(json["analysis"]["total_remaining"], 70000.0);
    assert_eq!(json["summary"]["total_transactions"], 1);
    assert_eq!(json["summary"]["total_emis"], 1);

    let suggestions = json["suggestions"].as_array().unwrap();
    assert!(suggestions
        .iter()
        .any(|s| s["bucket"] == "overall" && s["kind"] == "success"));
}

#[tokio::test]
async fn test_analysis_without_plan_is_not_found() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/budget/analysis")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Transactions API ==========

#[tokio::test]
async fn test_transaction_crud() {
    let app = setup_test_app();

    let tx = serde_json::json!({
        "date": "2025-03-08",
        "description": "Pizza night",
        "category": "dining out",
        "expense_type": null,
        "kind": "expense",
        "amount": 45.0
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/transactions", tx))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = get_body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["description"], "Pizza night");

    let response = app
        .clone()
        .oneshot(get(&format!("/api/transactions/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/transactions/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get(&format!("/api/transactions/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_transactions_are_scoped_by_user_header() {
    let app = setup_test_app();

    let tx = serde_json::json!({
        "date": "2025-03-08",
        "description": "Groceries",
        "category": "groceries",
        "expense_type": null,
        "kind": "expense",
        "amount": 80.0
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/transactions")
                .header("content-type", "application/json")
                .header("x-hearth-user", "alice")
                .body(Body::from(serde_json::to_string(&tx).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let id = get_body_json(response).await["id"].as_i64().unwrap();

    // Another user cannot see it
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/transactions/{}", id))
                .header("x-hearth-user", "bob")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner can
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/transactions/{}", id))
                .header("x-hearth-user", "alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_import_statement() {
    let app = setup_test_app();

    let csv = "date,description,category,expense_type,kind,amount\n\
               2025-03-05,March rent,rent,Fixed,expense,1800.00\n\
               bad-row,Broken,,,expense,1.00\n";
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/import")
                .header("content-type", "text/csv")
                .body(Body::from(csv))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["imported"], 1);
    assert_eq!(json["skipped"], 1);

    let response = app.oneshot(get("/api/transactions")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

// ========== Bills API ==========

#[tokio::test]
async fn test_bill_lifecycle() {
    let app = setup_test_app();

    let bill = serde_json::json!({
        "name": "Internet",
        "category": "utilities",
        "amount": 60.0,
        "due_day": 15
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/bills", bill))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = get_body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["active"], true);

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/bills/{}/deactivate", id),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/bills/{}", id)))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["active"], false);

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/bills/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get(&format!("/api/bills/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bill_validation() {
    let app = setup_test_app();

    let bill = serde_json::json!({
        "name": "Internet",
        "category": null,
        "amount": -5.0,
        "due_day": 15
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/bills", bill))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bill = serde_json::json!({
        "name": "Internet",
        "category": null,
        "amount": 5.0,
        "due_day": 32
    });
    let response = app.oneshot(post_json("/api/bills", bill)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Loans API ==========

#[tokio::test]
async fn test_loan_lifecycle() {
    let app = setup_test_app();

    let loan = serde_json::json!({
        "name": "Car loan",
        "lender": "Credit Union",
        "principal": 20000.0,
        "emi_amount": 450.0,
        "due_day": 5
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/loans", loan))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = get_body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["status"], "active");

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/loans/{}/close", id),
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/loans/{}", id)))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "closed");

    let response = app
        .oneshot(delete(&format!("/api/loans/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ========== Dashboard ==========

#[tokio::test]
async fn test_dashboard_counts() {
    let app = setup_test_app();

    let response = app.clone().oneshot(get("/api/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["transactions"], 0);
    assert_eq!(json["has_budget_plan"], false);

    let body = serde_json::json!({"plan_id": "stable", "monthly_income": 3000.0});
    app.clone()
        .oneshot(post_json("/api/budget/plan", body))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/dashboard")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["has_budget_plan"], true);
}
