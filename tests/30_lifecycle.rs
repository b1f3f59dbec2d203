mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::{partnership, TestServer};
use partnership_api::types::Role;

#[tokio::test]
async fn approve_is_terminal() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.seed_session("admin@aau.edu.et", Role::Admin, Some("main")).await?;
    let id = server.create_partnership(&token, partnership("P")).await?;

    let approved = server.post(&format!("/partnerships/{}/approve", id), &token, json!({})).await?;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.data()["status"], "Active");

    let rejected = server.post(&format!("/partnerships/{}/reject", id), &token, json!({})).await?;
    assert_eq!(rejected.status, StatusCode::CONFLICT);
    assert_eq!(rejected.error(), "Only pending partnerships can be rejected");

    let again = server.post(&format!("/partnerships/{}/approve", id), &token, json!({})).await?;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.error(), "Only pending partnerships can be approved");
    Ok(())
}

#[tokio::test]
async fn reject_is_terminal() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.seed_session("root@aau.edu.et", Role::SuperAdmin, None).await?;
    let id = server.create_partnership(&token, partnership("P")).await?;

    let rejected = server.post(&format!("/partnerships/{}/reject", id), &token, json!({})).await?;
    assert_eq!(rejected.status, StatusCode::OK);
    assert_eq!(rejected.data()["status"], "Rejected");

    let approved = server.post(&format!("/partnerships/{}/approve", id), &token, json!({})).await?;
    assert_eq!(approved.status, StatusCode::CONFLICT);

    let current = server.get(&format!("/partnerships/{}", id), &token).await?;
    assert_eq!(current.data()["status"], "Rejected");
    Ok(())
}

#[tokio::test]
async fn concurrent_approvals_have_one_winner() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.seed_session("admin@aau.edu.et", Role::Admin, Some("main")).await?;
    let id = server.create_partnership(&token, partnership("Race")).await?;
    let path = format!("/partnerships/{}/approve", id);

    let (a, b) = tokio::join!(
        server.post(&path, &token, json!({})),
        server.post(&path, &token, json!({}))
    );
    let mut statuses = vec![a?.status, b?.status];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::CONFLICT]);
    Ok(())
}

#[tokio::test]
async fn archive_hides_record_from_default_listing() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.seed_session("admin@aau.edu.et", Role::Admin, Some("main")).await?;
    let id = server.create_partnership(&token, partnership("Old")).await?;
    server.create_partnership(&token, partnership("Current")).await?;

    let archived = server.post(&format!("/partnerships/{}/archive", id), &token, json!({})).await?;
    assert_eq!(archived.status, StatusCode::OK);
    assert_eq!(archived.data()["isArchived"], true);
    assert_eq!(archived.data()["status"], "Pending");

    let twice = server.post(&format!("/partnerships/{}/archive", id), &token, json!({})).await?;
    assert_eq!(twice.status, StatusCode::CONFLICT);
    assert_eq!(twice.error(), "Partnership is already archived");

    let listed = server.get("/partnerships", &token).await?;
    let names: Vec<_> = listed.data()["partnerships"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .map(|p| p["partnerInstitution"]["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("Current")]);

    let only_archived = server.get("/partnerships?archived=true", &token).await?;
    assert_eq!(only_archived.data()["pagination"]["total"], 1);
    assert_eq!(only_archived.data()["partnerships"][0]["id"], id);
    Ok(())
}

#[tokio::test]
async fn renew_replaces_schedule() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.seed_session("admin@aau.edu.et", Role::Admin, Some("main")).await?;
    let id = server.create_partnership(&token, partnership("P")).await?;
    let path = format!("/partnerships/{}/renew", id);

    let missing = server.post(&path, &token, json!({ "durationOfPartnership": "2 years" })).await?;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let renewed = server
        .post(&path, &token, json!({ "potentialStartDate": "2027-01-15", "durationOfPartnership": "2 years" }))
        .await?;
    assert_eq!(renewed.status, StatusCode::OK);
    assert!(renewed.data()["potentialStartDate"].as_str().unwrap_or_default().starts_with("2027-01-15"));
    assert_eq!(renewed.data()["durationOfPartnership"], "2 years");
    assert_eq!(renewed.data()["status"], "Pending");
    Ok(())
}

#[tokio::test]
async fn deleted_partnership_is_gone() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.seed_session("admin@aau.edu.et", Role::Admin, Some("main")).await?;
    let id = server.create_partnership(&token, partnership("P")).await?;
    let path = format!("/partnerships/{}", id);

    let deleted = server.delete(&path, &token).await?;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.data()["message"], "Partnership deleted successfully");

    assert_eq!(server.get(&path, &token).await?.status, StatusCode::NOT_FOUND);
    assert_eq!(server.delete(&path, &token).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}
