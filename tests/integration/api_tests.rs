//! API integration tests
//!
//! These run against a live server with a fresh database:
//! cargo run & cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Unique suffix so repeated runs don't trip the uniqueness constraints
fn suffix() -> String {
    format!("{}", std::process::id())
}

async fn create_test_user(client: &Client, tag: &str) -> Value {
    let s = suffix();
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({
            "username": format!("{}_{}", tag, s),
            "email": format!("{}_{}@example.org", tag, s),
            "phone": format!("06-{}-{}", tag, s),
        }))
        .send()
        .await
        .expect("Failed to create user");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse user")
}

async fn create_test_book(client: &Client, isbn_tag: &str, copies: i32) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Integration Testing in Practice",
            "author": "A. Tester",
            "isbn": format!("978-{}-{}", isbn_tag, suffix()),
            "total_copies": copies,
        }))
        .send()
        .await
        .expect("Failed to create book");

    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse book")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert!(body["statistics"]["total_books"].is_number());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_create_user_and_duplicate_conflict() {
    let client = Client::new();
    let user = create_test_user(&client, "dup").await;
    assert_eq!(user["role"], "patron");

    // Same username again must be a conflict, not a 500
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({
            "username": user["username"],
            "email": format!("other_{}@example.org", suffix()),
            "phone": format!("07-00-{}", suffix()),
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_create_user_validation() {
    let client = Client::new();

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({
            "username": "ab",
            "email": "not-an-email",
            "phone": "1",
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_single_copy_loan_lifecycle() {
    let client = Client::new();
    let user = create_test_user(&client, "loan").await;
    let book = create_test_book(&client, "1111", 1).await;
    let user_id = user["id"].as_i64().unwrap();
    let book_id = book["id"].as_i64().unwrap();

    // Borrow the only copy
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "user_id": user_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to create loan");
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.unwrap();
    let loan_id = loan["id"].as_i64().unwrap();

    // Inventory is now exhausted
    let book_after: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(book_after["available_copies"], 0);

    // A second loan on the same book must conflict
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "user_id": user_id, "book_id": book_id }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);

    // Return same day: no fine
    let response = client
        .patch(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let outcome: Value = response.json().await.unwrap();
    assert_eq!(outcome["is_overdue"], false);
    assert_eq!(outcome["days_overdue"], 0);

    // Copy is back on the shelf
    let book_after: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(book_after["available_copies"], 1);

    // Second return must conflict
    let response = client
        .patch(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_loan_missing_user_or_book() {
    let client = Client::new();
    let user = create_test_user(&client, "miss").await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "user_id": 999_999_999, "book_id": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "user_id": user["id"], "book_id": 999_999_999 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_book_inventory_update() {
    let client = Client::new();
    let book = create_test_book(&client, "2222", 2).await;
    let book_id = book["id"].as_i64().unwrap();

    // Add three copies
    let response = client
        .patch(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "add_copies": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["total_copies"], 5);
    assert_eq!(updated["available_copies"], 5);

    // Removing more than are available must be rejected
    let response = client
        .patch(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({ "add_copies": -6 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_overdue_listing_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/loans/overdue", BASE_URL))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    assert!(body["count"].is_number());
    assert!(body["overdue_loans"].is_array());

    // Ordered by ascending due date
    let loans = body["overdue_loans"].as_array().unwrap();
    let due_dates: Vec<&str> = loans
        .iter()
        .map(|l| l["due_date"].as_str().unwrap())
        .collect();
    let mut sorted = due_dates.clone();
    sorted.sort();
    assert_eq!(due_dates, sorted);
}

#[tokio::test]
#[ignore]
async fn test_loan_produces_audit_entry() {
    let client = Client::new();
    let user = create_test_user(&client, "audit").await;
    let book = create_test_book(&client, "3333", 1).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "user_id": user["id"], "book_id": book["id"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.unwrap();
    let loan_id = loan["id"].as_i64().unwrap();

    let entries: Value = client
        .get(format!(
            "{}/audit-logs?entity_type=Loan&entity_id={}",
            BASE_URL, loan_id
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "CREATE_LOAN");
    assert_eq!(entries[0]["entity_id"], loan_id);
    assert_eq!(entries[0]["user_id"], user["id"]);

    // Returning adds exactly one more entry
    let response = client
        .patch(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let entries: Value = client
        .get(format!(
            "{}/audit-logs?entity_type=Loan&entity_id={}",
            BASE_URL, loan_id
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["action"], "RETURN_BOOK");
}

#[tokio::test]
#[ignore]
async fn test_get_user_detail_includes_active_loans() {
    let client = Client::new();
    let user = create_test_user(&client, "detail").await;
    let book = create_test_book(&client, "4444", 1).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "user_id": user["id"], "book_id": book["id"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);

    let detail: Value = client
        .get(format!("{}/users/{}", BASE_URL, user["id"]))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(detail["user"]["id"], user["id"]);
    assert_eq!(detail["active_loans"].as_array().unwrap().len(), 1);
    assert_eq!(detail["active_loans"][0]["is_overdue"], false);
    assert_eq!(detail["total_potential_fines"], "0.00");
}

#[tokio::test]
#[ignore]
async fn test_unknown_ids_return_404() {
    let client = Client::new();

    for path in [
        "/users/999999999",
        "/books/999999999",
        "/loans/999999999",
        "/audit-logs/999999999",
    ] {
        let response = client
            .get(format!("{}{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 404, "expected 404 for {}", path);
    }
}
