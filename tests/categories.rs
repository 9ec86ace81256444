//! Category CRUD tests

#[allow(dead_code)]
mod support;

use axum::http::{Method, StatusCode};
use serde_json::json;
use support::with_test_app;

#[tokio::test]
async fn create_returns_uuid_without_rowid() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let token = app.login_admin().await?;

            let (status, body) = app
                .request(
                    Method::POST,
                    "/categories",
                    Some(json!({ "name": "Peripherals", "description": "Computer gear" })),
                    Some(&token),
                )
                .await?;

            anyhow::ensure!(status == StatusCode::CREATED, "create failed: {body}");
            anyhow::ensure!(body["data"]["uuid"].is_string());
            anyhow::ensure!(body["data"].get("id").is_none(), "rowid must not be exposed");
            anyhow::ensure!(body["data"]["name"] == "Peripherals");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn list_returns_created_categories() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let token = app.login_admin().await?;

            for name in ["Monitors", "Keyboards"] {
                let (status, _) = app
                    .request(
                        Method::POST,
                        "/categories",
                        Some(json!({ "name": name })),
                        Some(&token),
                    )
                    .await?;
                anyhow::ensure!(status == StatusCode::CREATED);
            }

            let (status, body) = app
                .request(Method::GET, "/categories", None, Some(&token))
                .await?;
            anyhow::ensure!(status == StatusCode::OK);

            let names: Vec<&str> = body["data"]
                .as_array()
                .map(|items| items.iter().filter_map(|c| c["name"].as_str()).collect())
                .unwrap_or_default();
            anyhow::ensure!(names.contains(&"Monitors"));
            anyhow::ensure!(names.contains(&"Keyboards"));

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn get_by_uuid_returns_the_category() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let token = app.login_admin().await?;

            let (status, body) = app
                .request(
                    Method::POST,
                    "/categories",
                    Some(json!({ "name": "Audio", "description": "Speakers and headsets" })),
                    Some(&token),
                )
                .await?;
            anyhow::ensure!(status == StatusCode::CREATED);
            let uuid = body["data"]["uuid"].as_str().unwrap().to_string();

            let (status, body) = app
                .request(Method::GET, &format!("/categories/{uuid}"), None, Some(&token))
                .await?;
            anyhow::ensure!(status == StatusCode::OK);
            anyhow::ensure!(body["data"]["uuid"] == uuid.as_str());
            anyhow::ensure!(body["data"]["description"] == "Speakers and headsets");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn update_changes_the_name() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let token = app.login_admin().await?;

            let (_, body) = app
                .request(
                    Method::POST,
                    "/categories",
                    Some(json!({ "name": "Cables" })),
                    Some(&token),
                )
                .await?;
            let uuid = body["data"]["uuid"].as_str().unwrap().to_string();

            let (status, body) = app
                .request(
                    Method::PUT,
                    &format!("/categories/{uuid}"),
                    Some(json!({ "name": "Cables & Adapters" })),
                    Some(&token),
                )
                .await?;
            anyhow::ensure!(status == StatusCode::OK, "update failed: {body}");
            anyhow::ensure!(body["data"]["name"] == "Cables & Adapters");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn patch_updates_the_description_only() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let token = app.login_admin().await?;

            let (_, body) = app
                .request(
                    Method::POST,
                    "/categories",
                    Some(json!({ "name": "Storage" })),
                    Some(&token),
                )
                .await?;
            let uuid = body["data"]["uuid"].as_str().unwrap().to_string();

            let (status, body) = app
                .request(
                    Method::PATCH,
                    &format!("/categories/{uuid}"),
                    Some(json!({ "description": "Disks and drives" })),
                    Some(&token),
                )
                .await?;
            anyhow::ensure!(status == StatusCode::OK);
            anyhow::ensure!(body["data"]["name"] == "Storage");
            anyhow::ensure!(body["data"]["description"] == "Disks and drives");

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn delete_then_get_returns_not_found() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let token = app.login_admin().await?;

            let (_, body) = app
                .request(
                    Method::POST,
                    "/categories",
                    Some(json!({ "name": "Obsolete" })),
                    Some(&token),
                )
                .await?;
            let uuid = body["data"]["uuid"].as_str().unwrap().to_string();

            let (status, _) = app
                .request(Method::DELETE, &format!("/categories/{uuid}"), None, Some(&token))
                .await?;
            anyhow::ensure!(status == StatusCode::NO_CONTENT);

            let (status, _) = app
                .request(Method::GET, &format!("/categories/{uuid}"), None, Some(&token))
                .await?;
            anyhow::ensure!(status == StatusCode::NOT_FOUND);

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn duplicate_name_conflicts() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let token = app.login_admin().await?;

            let (status, _) = app
                .request(
                    Method::POST,
                    "/categories",
                    Some(json!({ "name": "Networking" })),
                    Some(&token),
                )
                .await?;
            anyhow::ensure!(status == StatusCode::CREATED);

            let (status, body) = app
                .request(
                    Method::POST,
                    "/categories",
                    Some(json!({ "name": "Networking" })),
                    Some(&token),
                )
                .await?;
            anyhow::ensure!(status == StatusCode::CONFLICT, "expected conflict: {body}");
            anyhow::ensure!(body["message"].is_string());

            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn create_requires_authentication() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let (status, _) = app
                .request(
                    Method::POST,
                    "/categories",
                    Some(json!({ "name": "Unauthorized" })),
                    None,
                )
                .await?;
            anyhow::ensure!(status == StatusCode::UNAUTHORIZED);
            Ok(())
        })
    })
    .await
}

#[tokio::test]
async fn empty_name_is_rejected() -> anyhow::Result<()> {
    with_test_app(|app| {
        Box::pin(async move {
            let token = app.login_admin().await?;

            let (status, _) = app
                .request(
                    Method::POST,
                    "/categories",
                    Some(json!({ "name": "" })),
                    Some(&token),
                )
                .await?;
            anyhow::ensure!(status == StatusCode::BAD_REQUEST);
            Ok(())
        })
    })
    .await
}
