//! Models endpoint integration tests
//!
//! GET /v1/models lists every configured public model id.

use pretty_assertions::assert_eq;
use serde::Deserialize;

use crate::common::TestHarness;

#[derive(Debug, Deserialize)]
struct Model {
    id: String,
    object: String,
    created: i64,
    owned_by: String,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    object: String,
    data: Vec<Model>,
}

#[tokio::test]
async fn test_list_models_in_configuration_order() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/v1/models").await;

    response.assert_status_ok();
    let models: ModelsResponse = response.json();
    assert_eq!(models.object, "list");
    let ids: Vec<&str> = models.data.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["gpt-4o-mini", "deepseek-chat"]);
}

#[tokio::test]
async fn test_list_models_entry_shape() {
    let harness = TestHarness::new().await;

    let models: ModelsResponse = harness.server.get("/v1/models").await.json();

    for model in &models.data {
        assert_eq!(model.object, "model");
        assert_eq!(model.owned_by, "system");
        assert!(model.created > 0);
    }
}

#[tokio::test]
async fn test_list_models_is_stable() {
    let harness = TestHarness::new().await;

    let first: ModelsResponse = harness.server.get("/v1/models").await.json();
    let second: ModelsResponse = harness.server.get("/v1/models").await.json();

    assert_eq!(first.data.len(), second.data.len());
    for (a, b) in first.data.iter().zip(&second.data) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.created, b.created);
    }
}

#[tokio::test]
async fn test_list_models_needs_no_credential() {
    let harness = TestHarness::new().await;

    harness.server.get("/v1/models").await.assert_status_ok();
    assert!(harness.upstream.received_requests().await.is_empty());
}
