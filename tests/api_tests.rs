//! API integration tests
//!
//! These run against a live server with seed data loaded
//! (LIGHTHOUSE_SEED_ENABLED=true).

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated token for the seeded admin
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
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
}

#[tokio::test]
#[ignore]
async fn test_readiness_probes_database() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    // Running server implies a reachable pool; 503 would mean the probe
    // query failed.
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["role"], "ADMIN");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "username": "admin",
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_signup_never_echoes_password() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/signup", BASE_URL))
        .json(&json!({
            "username": "signup-check",
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], "signup-check");
    assert!(body.get("password").is_none());
}

#[tokio::test]
#[ignore]
async fn test_list_books_requires_auth() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_book_substring_filter_is_case_insensitive() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/books?title=gatsby", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("Expected an array");
    assert!(books
        .iter()
        .any(|b| b["title"] == "The Great Gatsby"));
}

#[tokio::test]
#[ignore]
async fn test_deleted_filter_rejects_non_boolean_value() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/books?deleted=yes", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_page_beyond_representable_offset_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!(
            "{}/books?page={}&size=5",
            BASE_URL,
            i64::MAX
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "validation");
}

#[tokio::test]
#[ignore]
async fn test_genre_delete_blocked_by_referencing_book() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // "Tragedy" is linked to the seeded "The Great Gatsby"
    let response = client
        .delete(format!("{}/genres/Tragedy", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "The genre is referenced by a book");
}

#[tokio::test]
#[ignore]
async fn test_book_delete_blocked_then_allowed() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // A fresh book that only one lender references
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Brave New World",
            "genres": [{"name": "Dystopian Fiction"}]
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/lenders", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Huxley Fan",
            "lendedBooks": ["Brave New World"]
        }))
        .send()
        .await
        .expect("Failed to create lender");
    assert_eq!(response.status(), 201);

    // Removal is refused while the lender points at it
    let response = client
        .delete(format!("{}/books/Brave New World", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(response.status(), 409);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "The book is referenced by a lender");

    // Soft-delete the lender, then the hard delete goes through
    let response = client
        .delete(format!("{}/lenders/Huxley Fan", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to delete lender");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/books/Brave New World", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send delete");
    assert!(response.status().is_success());

    // Hard delete is terminal
    let response = client
        .get(format!("{}/books/Brave New World", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send get");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_username_then_reuse_after_soft_delete() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"username": "alice", "password": "secret1"}))
        .send()
        .await
        .expect("Failed to create user");
    assert_eq!(response.status(), 201);

    // Same username again conflicts
    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"username": "alice", "password": "secret2"}))
        .send()
        .await
        .expect("Failed to send create");
    assert_eq!(response.status(), 409);

    // Soft-delete frees the key for reuse
    let response = client
        .delete(format!("{}/users/alice", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to delete user");
    assert!(response.status().is_success());

    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"username": "alice", "password": "secret2"}))
        .send()
        .await
        .expect("Failed to send create");
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_book_create_resolves_or_creates_genres() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    // "Classic" already exists from the seed; "Satire" does not
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": "Animal Farm",
            "genres": [{"name": "Classic"}, {"name": "Satire"}]
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let genres: Vec<&str> = body["genres"]
        .as_array()
        .expect("Expected genres array")
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(genres, vec!["Classic", "Satire"]);

    let response = client
        .get(format!("{}/genres/Satire", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get genre");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_author_rejects_unknown_book() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Unknown Writer",
            "authoredBooks": ["No Such Book"]
        }))
        .send()
        .await
        .expect("Failed to send create");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "A Book with the title doesn't exist: No Such Book");
}

#[tokio::test]
#[ignore]
async fn test_library_round_trip_preserves_association_order() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/libraries/Bodleian Library", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to get library");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["books"],
        json!(["To Kill a Mockingbird", "The Great Gatsby"])
    );
    assert_eq!(body["lenders"], json!(["Mike", "Jake"]));
}

#[tokio::test]
#[ignore]
async fn test_update_with_empty_list_leaves_association_unchanged() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .patch(format!("{}/lenders/Jake", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"lendedBooks": []}))
        .send()
        .await
        .expect("Failed to send update");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["lendedBooks"],
        json!(["To Kill a Mockingbird", "The Great Gatsby"])
    );
}

#[tokio::test]
#[ignore]
async fn test_validation_rejects_short_title() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"title": "ab", "genres": []}))
        .send()
        .await
        .expect("Failed to send create");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "validation");
}
