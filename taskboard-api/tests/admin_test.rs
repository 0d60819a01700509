/// Integration tests for the administrator endpoints

mod common;

use axum::http::{Method, StatusCode};
use common::{todo_body, TestContext};
use taskboard_shared::auth::identity::Role;

#[tokio::test]
async fn test_admin_list_spans_owners() {
    let ctx = TestContext::new();
    let admin = ctx.create_user("root", Role::Admin).await;
    let alice = ctx.create_user("alice", Role::User).await;
    let bob = ctx.create_user("bob", Role::User).await;

    ctx.post("/todo", &ctx.token_for(&alice), todo_body("Alice task")).await;
    ctx.post("/todo", &ctx.token_for(&bob), todo_body("Bob task")).await;

    let res = ctx.get("/admin/todo", &ctx.token_for(&admin)).await;
    assert_eq!(res.status, StatusCode::OK);

    let todos = res.body.as_array().unwrap();
    assert_eq!(todos.len(), 2);
    let owners: Vec<i64> = todos.iter().map(|t| t["owner_id"].as_i64().unwrap()).collect();
    assert!(owners.contains(&alice.id));
    assert!(owners.contains(&bob.id));
}

#[tokio::test]
async fn test_non_admin_is_unauthorized() {
    let ctx = TestContext::new();
    let alice = ctx.create_user("alice", Role::User).await;
    let token = ctx.token_for(&alice);

    ctx.post("/todo", &token, todo_body("Alice task")).await;

    let res = ctx.get("/admin/todo", &token).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["error"], "unauthorized");

    let res = ctx.delete("/admin/todo/1", &token).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(ctx.todos.len().await, 1);
}

#[tokio::test]
async fn test_anonymous_is_unauthorized() {
    let ctx = TestContext::new();

    let res = ctx.send(Method::GET, "/admin/todo", None, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = ctx.send(Method::DELETE, "/admin/todo/1", None, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_deletes_any_todo() {
    let ctx = TestContext::new();
    let admin = ctx.create_user("root", Role::Admin).await;
    let alice = ctx.create_user("alice", Role::User).await;
    let admin_token = ctx.token_for(&admin);
    let alice_token = ctx.token_for(&alice);

    ctx.post("/todo", &alice_token, todo_body("Alice task")).await;

    let res = ctx.delete("/admin/todo/1", &admin_token).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert!(res.body.is_null());

    assert_eq!(ctx.get("/todo/1", &alice_token).await.status, StatusCode::NOT_FOUND);

    let res = ctx.delete("/admin/todo/1", &admin_token).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_delete_validates_id() {
    let ctx = TestContext::new();
    let admin = ctx.create_user("root", Role::Admin).await;
    let token = ctx.token_for(&admin);

    assert_eq!(
        ctx.delete("/admin/todo/0", &token).await.status,
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        ctx.delete("/admin/todo/abc", &token).await.status,
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_role_comes_from_the_token() {
    let ctx = TestContext::new();
    let alice = ctx.create_user("alice", Role::User).await;

    // The admin gate trusts the signed role claim
    let promoted = ctx.token(alice.id, &alice.username, Role::Admin);
    let res = ctx.get("/admin/todo", &promoted).await;
    assert_eq!(res.status, StatusCode::OK);

    let demoted = ctx.token(alice.id, &alice.username, Role::User);
    let res = ctx.get("/admin/todo", &demoted).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}
