//! End-to-end API tests
//!
//! Each test boots the full router over an in-memory SQLite database and
//! drives it through HTTP, covering the authentication guard, the
//! ownership chain, and the documented response shapes.

use axum_test::TestServer;
use serde_json::{json, Value};

use crate::api::{build_router, AppState};
use crate::config::AuthConfig;
use crate::db::{create_test_pool, migrations};

async fn spawn_server() -> TestServer {
    let pool = create_test_pool().await.expect("Failed to create test pool");
    migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let auth = AuthConfig {
        token_secret: "test-secret".to_string(),
        token_ttl_days: 30,
    };
    let state = AppState::new(pool, &auth);
    TestServer::new(build_router(state, "http://localhost:3000"))
        .expect("Failed to start test server")
}

/// Register a user and return their bearer token
async fn register(server: &TestServer, name: &str, email: &str) -> String {
    let response = server
        .post("/api/users/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": "password123",
        }))
        .await;
    assert_eq!(response.status_code(), 201, "registration should succeed");
    let body: Value = response.json();
    body["token"].as_str().expect("token missing").to_string()
}

/// Create a board and return its id
async fn create_board(server: &TestServer, token: &str, title: &str) -> i64 {
    let response = server
        .post("/api/board/create")
        .authorization_bearer(token)
        .json(&json!({ "title": title }))
        .await;
    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    body["id"].as_i64().expect("board id missing")
}

/// Create a list in a board and return its id
async fn create_list(server: &TestServer, token: &str, board_id: i64, title: &str) -> i64 {
    let response = server
        .post("/api/boardList/create")
        .authorization_bearer(token)
        .json(&json!({ "title": title, "boardId": board_id }))
        .await;
    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    body["id"].as_i64().expect("list id missing")
}

/// Create a card and return its id
async fn create_card(
    server: &TestServer,
    token: &str,
    board_id: i64,
    list_id: i64,
    title: &str,
) -> i64 {
    let response = server
        .post("/api/cards/create")
        .authorization_bearer(token)
        .json(&json!({ "cardTitle": title, "listId": list_id, "boardId": board_id }))
        .await;
    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    body["data"]["id"].as_i64().expect("card id missing")
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn register_returns_identity_and_token() {
    let server = spawn_server().await;

    let response = server
        .post("/api/users/register")
        .json(&json!({
            "name": "John Doe",
            "email": "john@example.com",
            "password": "password123",
        }))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert!(body["id"].as_i64().is_some());
    assert_eq!(body["name"], "John Doe");
    assert_eq!(body["email"], "john@example.com");
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let server = spawn_server().await;
    register(&server, "John Doe", "john@example.com").await;

    let response = server
        .post("/api/users/register")
        .json(&json!({
            "name": "John Again",
            "email": "john@example.com",
            "password": "password456",
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn register_validates_fields() {
    let server = spawn_server().await;

    let bad_email = server
        .post("/api/users/register")
        .json(&json!({ "name": "X", "email": "nope", "password": "password123" }))
        .await;
    assert_eq!(bad_email.status_code(), 400);

    let short_password = server
        .post("/api/users/register")
        .json(&json!({ "name": "X", "email": "x@example.com", "password": "short" }))
        .await;
    assert_eq!(short_password.status_code(), 400);

    let missing_password = server
        .post("/api/users/register")
        .json(&json!({ "name": "X", "email": "x@example.com" }))
        .await;
    assert_eq!(missing_password.status_code(), 400);
}

#[tokio::test]
async fn login_checks_credentials() {
    let server = spawn_server().await;
    register(&server, "John Doe", "john@example.com").await;

    let ok = server
        .post("/api/users/login")
        .json(&json!({ "email": "john@example.com", "password": "password123" }))
        .await;
    assert_eq!(ok.status_code(), 200);
    let body: Value = ok.json();
    assert!(body["token"].as_str().is_some());

    let wrong_password = server
        .post("/api/users/login")
        .json(&json!({ "email": "john@example.com", "password": "wrong-password" }))
        .await;
    assert_eq!(wrong_password.status_code(), 401);
    let body: Value = wrong_password.json();
    assert_eq!(body["message"], "Invalid email or password");

    let unknown_email = server
        .post("/api/users/login")
        .json(&json!({ "email": "nobody@example.com", "password": "password123" }))
        .await;
    assert_eq!(unknown_email.status_code(), 401);
}

#[tokio::test]
async fn search_requires_auth_and_query() {
    let server = spawn_server().await;
    let token = register(&server, "Alice Wonder", "alice@example.com").await;
    register(&server, "alice lower", "alice2@example.com").await;

    let unauthenticated = server.get("/api/users/search?query=Alice").await;
    assert_eq!(unauthenticated.status_code(), 401);

    let no_query = server
        .get("/api/users/search")
        .authorization_bearer(&token)
        .await;
    assert_eq!(no_query.status_code(), 400);
    let body: Value = no_query.json();
    assert_eq!(body["message"], "Please provide Query.");

    // Case-sensitive substring containment, password never serialized
    let hits = server
        .get("/api/users/search?query=Alice")
        .authorization_bearer(&token)
        .await;
    assert_eq!(hits.status_code(), 200);
    let body: Value = hits.json();
    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Alice Wonder");
    assert!(data[0].get("passwordHash").is_none());
    assert!(data[0].get("password_hash").is_none());
}

// ============================================================================
// Authentication guard
// ============================================================================

#[tokio::test]
async fn protected_routes_reject_missing_or_bad_tokens() {
    let server = spawn_server().await;

    let missing = server.get("/api/board/list").await;
    assert_eq!(missing.status_code(), 401);
    let body: Value = missing.json();
    assert_eq!(body["message"], "Not authorized, no token");

    let garbage = server
        .get("/api/board/list")
        .authorization_bearer("not-a-real-token")
        .await;
    assert_eq!(garbage.status_code(), 401);
    let body: Value = garbage.json();
    assert_eq!(body["message"], "Not authorized, token failed");
}

#[tokio::test]
async fn token_for_deleted_user_is_rejected() {
    let server = spawn_server().await;

    // A syntactically valid token whose subject does not exist
    let tokens = crate::services::TokenService::new("test-secret", 30);
    let orphan = tokens.issue(999_999).expect("issue");

    let response = server
        .get("/api/board/list")
        .authorization_bearer(&orphan)
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn unknown_routes_return_json_404() {
    let server = spawn_server().await;

    let response = server.get("/api/nope").await;
    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["message"], "Not Found");
}

// ============================================================================
// Boards
// ============================================================================

#[tokio::test]
async fn board_round_trip() {
    let server = spawn_server().await;
    let token = register(&server, "Owner", "owner@example.com").await;

    // Create
    let board_id = create_board(&server, &token, "Sprint 1").await;

    // Read via list
    let list = server
        .get("/api/board/list")
        .authorization_bearer(&token)
        .await;
    assert_eq!(list.status_code(), 200);
    let body: Value = list.json();
    assert_eq!(body["data"].as_array().expect("data").len(), 1);
    assert_eq!(body["data"][0]["title"], "Sprint 1");

    // Update (answers 201 by contract)
    let update = server
        .put(&format!("/api/board/update/{}", board_id))
        .authorization_bearer(&token)
        .json(&json!({ "title": "Sprint 2" }))
        .await;
    assert_eq!(update.status_code(), 201);
    let body: Value = update.json();
    assert_eq!(body["data"]["title"], "Sprint 2");
    assert_eq!(body["message"], "Board updated successfully");

    // Read again reflects the new title
    let list = server
        .get("/api/board/list")
        .authorization_bearer(&token)
        .await;
    let body: Value = list.json();
    assert_eq!(body["data"][0]["title"], "Sprint 2");

    // Delete
    let delete = server
        .delete(&format!("/api/board/delete/{}", board_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(delete.status_code(), 200);
    let body: Value = delete.json();
    assert_eq!(body["message"], "Board deleted successfully.");

    // Subsequent update and delete on the same id fail with 400
    let update_gone = server
        .put(&format!("/api/board/update/{}", board_id))
        .authorization_bearer(&token)
        .json(&json!({ "title": "Ghost" }))
        .await;
    assert_eq!(update_gone.status_code(), 400);

    let delete_gone = server
        .delete(&format!("/api/board/delete/{}", board_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(delete_gone.status_code(), 400);
}

#[tokio::test]
async fn boards_are_isolated_between_users() {
    let server = spawn_server().await;
    let token_a = register(&server, "Alice", "alice@example.com").await;
    let token_b = register(&server, "Bob", "bob@example.com").await;

    let board_id = create_board(&server, &token_a, "Alice's board").await;

    // B's listing never includes A's board
    let list = server
        .get("/api/board/list")
        .authorization_bearer(&token_b)
        .await;
    let body: Value = list.json();
    assert!(body["data"].as_array().expect("data").is_empty());

    // B cannot update or delete it either
    let update = server
        .put(&format!("/api/board/update/{}", board_id))
        .authorization_bearer(&token_b)
        .json(&json!({ "title": "Hijacked" }))
        .await;
    assert_eq!(update.status_code(), 400);

    let delete = server
        .delete(&format!("/api/board/delete/{}", board_id))
        .authorization_bearer(&token_b)
        .await;
    assert_eq!(delete.status_code(), 400);

    // A still sees the original title
    let list = server
        .get("/api/board/list")
        .authorization_bearer(&token_a)
        .await;
    let body: Value = list.json();
    assert_eq!(body["data"][0]["title"], "Alice's board");
}

#[tokio::test]
async fn board_update_validates_input() {
    let server = spawn_server().await;
    let token = register(&server, "Owner", "owner@example.com").await;
    let board_id = create_board(&server, &token, "Board").await;

    let missing_title = server
        .put(&format!("/api/board/update/{}", board_id))
        .authorization_bearer(&token)
        .json(&json!({}))
        .await;
    assert_eq!(missing_title.status_code(), 400);

    let malformed_id = server
        .put("/api/board/update/not-a-number")
        .authorization_bearer(&token)
        .json(&json!({ "title": "X" }))
        .await;
    assert_eq!(malformed_id.status_code(), 400);
}

// ============================================================================
// Board lists
// ============================================================================

#[tokio::test]
async fn list_create_requires_owned_board() {
    let server = spawn_server().await;
    let token_a = register(&server, "Alice", "alice@example.com").await;
    let token_b = register(&server, "Bob", "bob@example.com").await;
    let board_id = create_board(&server, &token_a, "Alice's board").await;

    // Owner succeeds
    create_list(&server, &token_a, board_id, "Todo").await;

    // A foreign board fails regardless of payload validity
    let foreign = server
        .post("/api/boardList/create")
        .authorization_bearer(&token_b)
        .json(&json!({ "title": "Sneaky", "boardId": board_id }))
        .await;
    assert_eq!(foreign.status_code(), 400);
    let body: Value = foreign.json();
    assert_eq!(body["message"], "Invalid boardId or user not authorized");

    // Malformed board id fails the format check
    let malformed = server
        .post("/api/boardList/create")
        .authorization_bearer(&token_a)
        .json(&json!({ "title": "X", "boardId": "abc" }))
        .await;
    assert_eq!(malformed.status_code(), 400);
    let body: Value = malformed.json();
    assert_eq!(body["message"], "Invalid boardId format.");
}

#[tokio::test]
async fn list_listing_returns_board_and_lists() {
    let server = spawn_server().await;
    let token = register(&server, "Owner", "owner@example.com").await;
    let board_id = create_board(&server, &token, "Board").await;
    create_list(&server, &token, board_id, "Todo").await;
    create_list(&server, &token, board_id, "Done").await;

    let response = server
        .get(&format!("/api/boardList/list/{}", board_id))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["board"]["id"].as_i64(), Some(board_id));
    let data = body["data"].as_array().expect("data");
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["title"], "Todo");
    assert_eq!(data[0]["boardId"].as_i64(), Some(board_id));
}

#[tokio::test]
async fn list_update_and_delete() {
    let server = spawn_server().await;
    let token = register(&server, "Owner", "owner@example.com").await;
    let board_id = create_board(&server, &token, "Board").await;
    let list_id = create_list(&server, &token, board_id, "Old").await;

    // Update answers 201 by contract
    let update = server
        .put(&format!("/api/boardList/update/{}", list_id))
        .authorization_bearer(&token)
        .json(&json!({ "title": "New", "boardId": board_id }))
        .await;
    assert_eq!(update.status_code(), 201);
    let body: Value = update.json();
    assert_eq!(body["list"]["title"], "New");
    assert_eq!(body["message"], "List updated successfully.");

    // Delete takes the board id in the body
    let delete = server
        .delete(&format!("/api/boardList/delete/{}", list_id))
        .authorization_bearer(&token)
        .json(&json!({ "boardId": board_id }))
        .await;
    assert_eq!(delete.status_code(), 200);
    let body: Value = delete.json();
    assert_eq!(body["message"], "List deleted successfully.");

    // A second delete finds nothing
    let gone = server
        .delete(&format!("/api/boardList/delete/{}", list_id))
        .authorization_bearer(&token)
        .json(&json!({ "boardId": board_id }))
        .await;
    assert_eq!(gone.status_code(), 400);
}

#[tokio::test]
async fn list_mutation_requires_owned_board() {
    let server = spawn_server().await;
    let token_a = register(&server, "Alice", "alice@example.com").await;
    let token_b = register(&server, "Bob", "bob@example.com").await;
    let board_id = create_board(&server, &token_a, "Alice's board").await;
    let list_id = create_list(&server, &token_a, board_id, "Todo").await;

    let update = server
        .put(&format!("/api/boardList/update/{}", list_id))
        .authorization_bearer(&token_b)
        .json(&json!({ "title": "Nope", "boardId": board_id }))
        .await;
    assert_eq!(update.status_code(), 400);

    let delete = server
        .delete(&format!("/api/boardList/delete/{}", list_id))
        .authorization_bearer(&token_b)
        .json(&json!({ "boardId": board_id }))
        .await;
    assert_eq!(delete.status_code(), 400);
}

// ============================================================================
// Cards
// ============================================================================

#[tokio::test]
async fn card_create_validates_list_belongs_to_board() {
    let server = spawn_server().await;
    let token = register(&server, "Owner", "owner@example.com").await;
    let board_a = create_board(&server, &token, "Board A").await;
    let board_b = create_board(&server, &token, "Board B").await;
    let list_in_a = create_list(&server, &token, board_a, "Todo").await;

    // Valid chain succeeds
    create_card(&server, &token, board_a, list_in_a, "Task").await;

    // The list exists but not under the stated board
    let mismatched = server
        .post("/api/cards/create")
        .authorization_bearer(&token)
        .json(&json!({ "cardTitle": "Task", "listId": list_in_a, "boardId": board_b }))
        .await;
    assert_eq!(mismatched.status_code(), 400);
}

#[tokio::test]
async fn card_create_requires_owned_board() {
    let server = spawn_server().await;
    let token_a = register(&server, "Alice", "alice@example.com").await;
    let token_b = register(&server, "Bob", "bob@example.com").await;
    let board_id = create_board(&server, &token_a, "Alice's board").await;
    let list_id = create_list(&server, &token_a, board_id, "Todo").await;

    let response = server
        .post("/api/cards/create")
        .authorization_bearer(&token_b)
        .json(&json!({ "cardTitle": "Task", "listId": list_id, "boardId": board_id }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn cards_by_list_walks_the_ownership_chain() {
    let server = spawn_server().await;
    let token_a = register(&server, "Alice", "alice@example.com").await;
    let token_b = register(&server, "Bob", "bob@example.com").await;
    let board_id = create_board(&server, &token_a, "Board").await;
    let list_id = create_list(&server, &token_a, board_id, "Todo").await;
    create_card(&server, &token_a, board_id, list_id, "Task 1").await;
    create_card(&server, &token_a, board_id, list_id, "Task 2").await;

    let ok = server
        .get(&format!("/api/cards/byList/{}", list_id))
        .authorization_bearer(&token_a)
        .await;
    assert_eq!(ok.status_code(), 200);
    let body: Value = ok.json();
    assert_eq!(body["data"].as_array().expect("data").len(), 2);

    // The list resolves to a board B does not own
    let denied = server
        .get(&format!("/api/cards/byList/{}", list_id))
        .authorization_bearer(&token_b)
        .await;
    assert_eq!(denied.status_code(), 400);

    let missing = server
        .get("/api/cards/byList/999")
        .authorization_bearer(&token_a)
        .await;
    assert_eq!(missing.status_code(), 400);
}

#[tokio::test]
async fn cards_by_board_returns_global_count() {
    let server = spawn_server().await;
    let token = register(&server, "Owner", "owner@example.com").await;
    let board_a = create_board(&server, &token, "Board A").await;
    let board_b = create_board(&server, &token, "Board B").await;
    let list_in_a = create_list(&server, &token, board_a, "Todo").await;
    create_card(&server, &token, board_a, list_in_a, "Task 1").await;
    create_card(&server, &token, board_a, list_in_a, "Task 2").await;

    // board_b has no cards of its own, yet the global set comes back
    let response = server
        .get(&format!("/api/cards/byBoard/{}", board_b))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["totalsCards"].as_u64(), Some(2));
    assert_eq!(body["data"].as_array().expect("data").len(), 2);

    // Ownership of the named board is still required
    let other = register(&server, "Other", "other@example.com").await;
    let denied = server
        .get(&format!("/api/cards/byBoard/{}", board_b))
        .authorization_bearer(&other)
        .await;
    assert_eq!(denied.status_code(), 400);
}

#[tokio::test]
async fn card_update_move_wins_over_rename() {
    let server = spawn_server().await;
    let token = register(&server, "Owner", "owner@example.com").await;
    let board_id = create_board(&server, &token, "Board").await;
    let list_a = create_list(&server, &token, board_id, "Todo").await;
    let list_b = create_list(&server, &token, board_id, "Done").await;
    let card_id = create_card(&server, &token, board_id, list_a, "Task").await;

    // Both fields sent: only the move applies
    let response = server
        .put(&format!("/api/cards/update/{}", card_id))
        .authorization_bearer(&token)
        .json(&json!({ "listId": list_b, "title": "Should be ignored" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["data"]["listId"].as_i64(), Some(list_b));
    assert_eq!(body["data"]["title"], "Task");

    // Title alone renames without moving
    let response = server
        .put(&format!("/api/cards/update/{}", card_id))
        .authorization_bearer(&token)
        .json(&json!({ "title": "Renamed" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["data"]["title"], "Renamed");
    assert_eq!(body["data"]["listId"].as_i64(), Some(list_b));
}

#[tokio::test]
async fn card_update_rejects_empty_or_unknown() {
    let server = spawn_server().await;
    let token = register(&server, "Owner", "owner@example.com").await;

    let neither = server
        .put("/api/cards/update/1")
        .authorization_bearer(&token)
        .json(&json!({}))
        .await;
    assert_eq!(neither.status_code(), 400);

    let unknown_card = server
        .put("/api/cards/update/999")
        .authorization_bearer(&token)
        .json(&json!({ "title": "X" }))
        .await;
    assert_eq!(unknown_card.status_code(), 400);

    let malformed_id = server
        .put("/api/cards/update/not-a-number")
        .authorization_bearer(&token)
        .json(&json!({ "title": "X" }))
        .await;
    assert_eq!(malformed_id.status_code(), 400);
}

// ============================================================================
// Orphaning behavior
// ============================================================================

#[tokio::test]
async fn board_delete_leaves_lists_and_cards_in_place() {
    let server = spawn_server().await;
    let token = register(&server, "Owner", "owner@example.com").await;
    let board_a = create_board(&server, &token, "Doomed").await;
    let board_b = create_board(&server, &token, "Survivor").await;
    let list_id = create_list(&server, &token, board_a, "Todo").await;
    create_card(&server, &token, board_a, list_id, "Orphan").await;

    let delete = server
        .delete(&format!("/api/board/delete/{}", board_a))
        .authorization_bearer(&token)
        .await;
    assert_eq!(delete.status_code(), 200);

    // The card still exists in the global set; nothing cascaded
    let response = server
        .get(&format!("/api/cards/byBoard/{}", board_b))
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["totalsCards"].as_u64(), Some(1));
}
