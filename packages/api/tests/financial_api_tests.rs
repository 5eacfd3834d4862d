// ABOUTME: Integration tests for the financial data endpoints
// ABOUTME: Entry validation, filtering, partial updates and the summary aggregate

mod common;

use chrono::{Duration, Utc};
use common::{data, error_of, setup_test_server, TestContext};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

async fn add_entry(ctx: &TestContext, user_id: i64, category: &str, kind: &str, amount: f64) -> Value {
    let response = ctx
        .post_json(
            "/api/financial-data/",
            &json!({ "user_id": user_id, "category": category, "type": kind, "amount": amount }),
        )
        .await;
    assert_eq!(response.status(), 201);
    data(response).await
}

#[tokio::test]
async fn test_create_defaults_and_rejections() {
    let ctx = setup_test_server().await;
    let user_id = ctx.create_user("sanjay").await;

    let entry = add_entry(&ctx, user_id, "expense", "rent", 25000.0).await;
    assert_eq!(entry["type"], "rent");
    assert_eq!(entry["recurring"], false);
    assert!(entry["date"].is_string());

    let response = ctx
        .post_json(
            "/api/financial-data/",
            &json!({ "user_id": user_id, "category": "gift", "type": "x", "amount": 1.0 }),
        )
        .await;
    assert_eq!(response.status(), 400);

    let response = ctx
        .post_json(
            "/api/financial-data/",
            &json!({ "user_id": user_id, "category": "income", "type": "salary", "amount": -5.0 }),
        )
        .await;
    assert_eq!(response.status(), 400);
    assert_eq!(error_of(response).await.0, "VALIDATION_ERROR");

    let response = ctx
        .post_json(
            "/api/financial-data/",
            &json!({ "user_id": 999, "category": "income", "type": "salary", "amount": 5.0 }),
        )
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_list_filters_by_category_and_type() {
    let ctx = setup_test_server().await;
    let user_id = ctx.create_user("pooja").await;
    add_entry(&ctx, user_id, "expense", "rent", 20000.0).await;
    add_entry(&ctx, user_id, "expense", "food", 8000.0).await;
    add_entry(&ctx, user_id, "income", "salary", 90000.0).await;

    let expenses = data(
        ctx.get(&format!("/api/financial-data/user/{}?category=expense", user_id))
            .await,
    )
    .await;
    assert_eq!(expenses.as_array().unwrap().len(), 2);

    let food = data(
        ctx.get(&format!(
            "/api/financial-data/user/{}?category=expense&type=food",
            user_id
        ))
        .await,
    )
    .await;
    let food = food.as_array().unwrap();
    assert_eq!(food.len(), 1);
    assert_eq!(food[0]["amount"], 8000.0);
}

#[tokio::test]
async fn test_partial_update_validates() {
    let ctx = setup_test_server().await;
    let user_id = ctx.create_user("kiran").await;
    let entry = add_entry(&ctx, user_id, "asset", "gold", 100000.0).await;
    let path = format!("/api/financial-data/{}", entry["id"]);

    let updated = data(ctx.put_json(&path, &json!({ "amount": 120000.0 })).await).await;
    assert_eq!(updated["amount"], 120000.0);
    assert_eq!(updated["type"], "gold");

    assert_eq!(ctx.put_json(&path, &json!({ "amount": -1.0 })).await.status(), 400);
    assert_eq!(ctx.put_json(&path, &json!({ "category": "bonus" })).await.status(), 400);
    assert_eq!(
        ctx.put_json("/api/financial-data/999", &json!({ "amount": 1.0 }))
            .await
            .status(),
        404
    );

    assert_eq!(ctx.delete(&path).await.status(), 204);
    assert_eq!(ctx.get(&path).await.status(), 404);
}

#[tokio::test]
async fn test_summary_aggregates_entries() {
    let ctx = setup_test_server().await;
    let user_id = ctx.create_user("gauri").await;

    add_entry(&ctx, user_id, "income", "salary", 600000.0).await;
    add_entry(&ctx, user_id, "expense", "rent", 40000.0).await;
    add_entry(&ctx, user_id, "expense", "food", 10000.0).await;
    add_entry(&ctx, user_id, "investment", "mutual_funds", 50000.0).await;
    add_entry(&ctx, user_id, "asset", "savings", 200000.0).await;
    add_entry(&ctx, user_id, "liability", "car_loan", 75000.0).await;

    // Older than the trailing window: counts in totals only
    let old_date = (Utc::now() - Duration::days(90)).to_rfc3339();
    let response = ctx
        .post_json(
            "/api/financial-data/",
            &json!({
                "user_id": user_id, "category": "expense", "type": "travel",
                "amount": 30000.0, "date": old_date,
            }),
        )
        .await;
    assert_eq!(response.status(), 201);

    let summary = data(
        ctx.get(&format!("/api/financial-data/summary/{}", user_id))
            .await,
    )
    .await;

    assert_eq!(summary["total_income"], 600000.0);
    assert_eq!(summary["total_expenses"], 80000.0);
    assert_eq!(summary["overall_savings"], 520000.0);
    assert_eq!(summary["net_worth"], 125000.0);
    assert_eq!(summary["monthly_income"], 600000.0);
    assert_eq!(summary["monthly_expenses"], 50000.0);
    assert_eq!(summary["monthly_savings"], 550000.0);
    assert_eq!(summary["yearly_savings"], 6600000.0);
    assert_eq!(summary["emergency_fund_status"], "Good");
    assert_eq!(summary["tax_estimate"], 22500.0);
    assert_eq!(summary["ppf_contribution"], 60000.0);
    assert_eq!(summary["epf_contribution"], 72000.0);
    assert_eq!(summary["expense_breakdown"]["travel"], 30000.0);
    assert_eq!(summary["investment_allocation"]["mutual_funds"], 50000.0);
}

#[tokio::test]
async fn test_summary_for_user_without_entries() {
    let ctx = setup_test_server().await;
    let user_id = ctx.create_user("empty").await;

    let summary = data(
        ctx.get(&format!("/api/financial-data/summary/{}", user_id))
            .await,
    )
    .await;
    assert_eq!(summary["total_income"], 0.0);
    assert_eq!(summary["tax_estimate"], 0.0);
    assert_eq!(summary["emergency_fund_status"], "Unknown");

    assert_eq!(
        ctx.get("/api/financial-data/summary/999").await.status(),
        404
    );
}
