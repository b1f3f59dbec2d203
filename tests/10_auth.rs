mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::json;

use common::{TestServer, PASSWORD};
use partnership_api::auth::SessionClaims;
use partnership_api::database::UserStore;
use partnership_api::types::{Role, UserStatus};

#[tokio::test]
async fn health_and_root_are_public() -> Result<()> {
    let server = TestServer::spawn().await?;

    let health = server.send(Method::GET, "/health", None, None).await?;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["success"], true);
    assert_eq!(health.data()["status"], "ok");

    let root = server.send(Method::GET, "/", None, None).await?;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.data()["name"], "partnership-api");
    Ok(())
}

#[tokio::test]
async fn login_returns_token_and_session_cookie() -> Result<()> {
    let server = TestServer::spawn().await?;
    let user = server.seed_user("admin@aau.edu.et", Role::Admin, Some("main"), UserStatus::Active).await?;

    let reply = server.login("admin@aau.edu.et", PASSWORD).await?;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.data()["user"]["id"], user.id.to_string());
    assert!(reply.data()["user"].get("password").is_none());

    let token = reply.data()["token"].as_str().unwrap_or_default().to_string();
    let claims = server.state.issuer.verify(&token)?;
    assert_eq!(claims.id, Some(user.id.to_string()));
    assert_eq!(claims.role.as_deref(), Some("Admin"));
    assert_eq!(claims.campus_id.as_deref(), Some("main"));
    assert_eq!(claims.exp - claims.iat, 24 * 3600);

    let cookie = reply.set_cookie.unwrap_or_default();
    assert!(cookie.starts_with(&format!("jwt={}", token)));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Max-Age=86400"));
    Ok(())
}

#[tokio::test]
async fn login_failures_are_indistinguishable() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.seed_user("admin@aau.edu.et", Role::Admin, Some("main"), UserStatus::Active).await?;

    let unknown = server.login("ghost@aau.edu.et", PASSWORD).await?;
    let wrong = server.login("admin@aau.edu.et", "not-the-password").await?;

    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body, wrong.body);
    assert_eq!(unknown.error(), "Invalid email or password");

    let missing = server
        .send(Method::POST, "/login", None, Some(json!({ "email": "admin@aau.edu.et" })))
        .await?;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.error(), "Email and password are required");
    Ok(())
}

#[tokio::test]
async fn missing_and_invalid_tokens_are_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;

    let none = server.send(Method::GET, "/partnerships", None, None).await?;
    assert_eq!(none.status, StatusCode::UNAUTHORIZED);
    assert_eq!(none.code(), "UNAUTHENTICATED");
    assert_eq!(none.body["success"], false);

    let garbage = server.get("/partnerships", "not.a.jwt").await?;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.code(), "INVALID_TOKEN");
    Ok(())
}

#[tokio::test]
async fn token_without_subject_is_malformed() -> Result<()> {
    let server = TestServer::spawn().await?;
    let user = server.seed_user("admin@aau.edu.et", Role::Admin, Some("main"), UserStatus::Active).await?;

    let mut claims = SessionClaims::for_user(&user);
    claims.id = None;
    let token = server.state.issuer.sign(&claims)?;

    let reply = server.get("/partnerships", &token).await?;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.code(), "MALFORMED_TOKEN");
    Ok(())
}

#[tokio::test]
async fn deleted_user_token_stops_working() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (user, token) = server.seed_session("gone@aau.edu.et", Role::Admin, Some("main")).await?;

    server.state.stores.users.delete(user.id).await?;

    let reply = server.get("/partnerships", &token).await?;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.code(), "USER_NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn stale_role_claim_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (mut user, token) = server.seed_session("root@aau.edu.et", Role::SuperAdmin, None).await?;

    // Demoted after the token was issued
    user.role = Role::Admin;
    user.campus_id = Some("main".into());
    server.state.stores.users.update(&user).await?;

    let reply = server.get("/admin/users", &token).await?;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.code(), "ROLE_MISMATCH");
    Ok(())
}

#[tokio::test]
async fn session_cookie_authenticates_and_logout_clears_it() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.seed_user("admin@aau.edu.et", Role::Admin, Some("main"), UserStatus::Active).await?;

    let login = server.login("admin@aau.edu.et", PASSWORD).await?;
    let token = login.data()["token"].as_str().unwrap_or_default().to_string();
    let cookie = format!("jwt={}", token);

    let listed = server.send_with_cookie(Method::GET, "/partnerships", &cookie).await?;
    assert_eq!(listed.status, StatusCode::OK);

    let logout = server.send_with_cookie(Method::POST, "/logout", &cookie).await?;
    assert_eq!(logout.status, StatusCode::OK);
    let cleared = logout.set_cookie.unwrap_or_default();
    assert!(cleared.starts_with("jwt=;"));
    assert!(cleared.contains("Max-Age=0"));
    Ok(())
}

#[tokio::test]
async fn reset_password_is_self_service_only() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (user, token) = server.seed_session("admin@aau.edu.et", Role::Admin, Some("main")).await?;
    server.seed_user("other@aau.edu.et", Role::Admin, Some("main"), UserStatus::Active).await?;

    let other = server
        .post(
            "/reset-password",
            &token,
            json!({ "email": "other@aau.edu.et", "newPassword": "Brand-New-1", "confirmPassword": "Brand-New-1" }),
        )
        .await?;
    assert_eq!(other.status, StatusCode::FORBIDDEN);
    assert_eq!(other.error(), "You can only reset your own password");

    let short = server
        .post(
            "/reset-password",
            &token,
            json!({ "email": user.email, "newPassword": "short", "confirmPassword": "short" }),
        )
        .await?;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);

    let ok = server
        .post(
            "/reset-password",
            &token,
            json!({ "email": user.email, "newPassword": "Brand-New-1", "confirmPassword": "Brand-New-1" }),
        )
        .await?;
    assert_eq!(ok.status, StatusCode::OK);

    assert_eq!(server.login(&user.email, PASSWORD).await?.status, StatusCode::UNAUTHORIZED);
    let relogin = server.login(&user.email, "Brand-New-1").await?;
    assert_eq!(relogin.status, StatusCode::OK);
    assert_eq!(relogin.data()["user"]["status"], "active");
    Ok(())
}
