// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, TEST_SECRET};
use axum::http::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn test_manifest_describes_integration() {
    let app = create_test_app(200).await;

    let response = app.server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let manifest: Value = response.json();
    let data = &manifest["data"];
    assert_eq!(data["integration_id"], "github-telex-integration");
    assert_eq!(data["integration_type"], "output");
    assert_eq!(data["is_active"], true);
    assert_eq!(
        data["descriptions"]["app_name"],
        "GitHub to Telex Integration"
    );
    assert_eq!(data["target_url"], "https://relay.example.com/webhook");

    let labels: Vec<&str> = data["settings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["webhook_url", "github_secret"]);
}

#[tokio::test]
async fn test_manifest_never_leaks_configuration_values() {
    let app = create_test_app(200).await;

    let text = app.server.get("/").await.text();

    assert!(!text.contains(TEST_SECRET));
    assert!(!text.contains(&app.settings.telex.webhook_url));
}
