mod common;

use std::collections::HashSet;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::{partnership, with, TestServer};
use partnership_api::types::Role;

fn ids(reply: &common::Reply) -> HashSet<String> {
    reply.data()["partnerships"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .iter()
        .filter_map(|p| p["id"].as_str().map(String::from))
        .collect()
}

#[tokio::test]
async fn pages_are_disjoint_and_counted() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.seed_session("admin@aau.edu.et", Role::Admin, Some("main")).await?;
    for i in 0..150 {
        server.create_partnership(&token, partnership(&format!("Partner {}", i))).await?;
    }

    let first = server.get("/partnerships?limit=100&page=1", &token).await?;
    let second = server.get("/partnerships?limit=100&page=2", &token).await?;
    assert_eq!(first.status, StatusCode::OK);

    let pagination = &second.data()["pagination"];
    assert_eq!(pagination["total"], 150);
    assert_eq!(pagination["page"], 2);
    assert_eq!(pagination["pages"], 2);
    assert_eq!(pagination["limit"], 100);

    let (a, b) = (ids(&first), ids(&second));
    assert_eq!(a.len(), 100);
    assert_eq!(b.len(), 50);
    assert!(a.is_disjoint(&b));

    let default = server.get("/partnerships", &token).await?;
    assert_eq!(default.data()["pagination"]["limit"], 10);
    assert_eq!(default.data()["pagination"]["pages"], 15);
    Ok(())
}

#[tokio::test]
async fn out_of_range_paging_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.seed_session("admin@aau.edu.et", Role::Admin, Some("main")).await?;

    for query in [
        "limit=0",
        "limit=101",
        "page=0",
        "page=two",
        "limit=1.5",
        "page=9223372036854775807&limit=100",
    ] {
        let reply = server.get(&format!("/partnerships?{}", query), &token).await?;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "query {}", query);
        assert_eq!(reply.code(), "VALIDATION_ERROR");
    }

    let max = server.get("/partnerships?limit=100", &token).await?;
    assert_eq!(max.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn filters_narrow_the_listing() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.seed_session("admin@aau.edu.et", Role::Admin, Some("main")).await?;

    let ngo = with(
        partnership("NGO"),
        json!({
            "partnerInstitution": { "name": "NGO", "typeOfOrganization": "NGO" },
            "potentialStartDate": "2026-03-01",
            "durationOfPartnership": "1 year"
        }),
    );
    let ngo_id = server.create_partnership(&token, ngo).await?;
    let uni_id = server.create_partnership(&token, partnership("University")).await?;
    server.post(&format!("/partnerships/{}/approve", uni_id), &token, json!({})).await?;

    let by_type = server.get("/partnerships?typeOfOrganization=NGO", &token).await?;
    assert_eq!(ids(&by_type), HashSet::from([ngo_id.clone()]));

    let by_status = server.get("/partnerships?status=Active", &token).await?;
    assert_eq!(ids(&by_status), HashSet::from([uni_id.clone()]));

    let by_date = server.get("/partnerships?potentialStartDate=2026-01-01", &token).await?;
    assert_eq!(ids(&by_date), HashSet::from([ngo_id.clone()]));

    let by_duration = server.get("/partnerships?durationOfPartnership=3%20years", &token).await?;
    assert_eq!(ids(&by_duration), HashSet::from([uni_id]));

    let combined = server.get("/partnerships?status=Pending&typeOfOrganization=University", &token).await?;
    assert!(ids(&combined).is_empty());
    Ok(())
}

#[tokio::test]
async fn malformed_filter_values_are_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let (_, token) = server.seed_session("admin@aau.edu.et", Role::Admin, Some("main")).await?;

    let bad_date = server.get("/partnerships?potentialStartDate=31-12-2025", &token).await?;
    assert_eq!(bad_date.status, StatusCode::BAD_REQUEST);

    let bad_status = server.get("/partnerships?status=Archived", &token).await?;
    assert_eq!(bad_status.status, StatusCode::BAD_REQUEST);
    Ok(())
}
