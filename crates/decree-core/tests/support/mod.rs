#![allow(dead_code)]

use decree_core::api::{DevOpsClient, Endpoints};
use decree_core::auth::{AccessToken, StaticTokenProvider};
use decree_core::session::Session;
use serde_json::{Value, json};

pub const PROJECT: &str = "Fabrikam";
pub const USER: &str = "Jamal Hartnett";
pub const TOKEN: &str = "test-token";

pub const REPOSITORIES_PATH: &str = "/Fabrikam/_apis/git/repositories?api-version=4.1";
pub const POLICIES_PATH: &str = "/Fabrikam/_apis/policy/configurations?api-version=4.1";

pub fn policy_path(id: i64) -> String {
    format!("/Fabrikam/_apis/policy/configurations/{id}?api-version=4.1")
}

pub fn client(server: &mockito::ServerGuard) -> DevOpsClient {
    let endpoints = Endpoints::new(&server.url(), PROJECT).unwrap();
    DevOpsClient::new(endpoints).unwrap()
}

pub fn session(server: &mockito::ServerGuard) -> Session<StaticTokenProvider> {
    Session::new(
        client(server),
        StaticTokenProvider::new(AccessToken::bearer(TOKEN)),
        USER,
    )
}

pub fn repositories_body() -> String {
    json!({
        "count": 2,
        "value": [
            {"id": "r1", "name": "Repo1", "url": "https://example/r1"},
            {"id": "r2", "name": "Repo2", "url": "https://example/r2"}
        ]
    })
    .to_string()
}

pub fn policy(id: i64, type_name: &str, scope: Value) -> Value {
    json!({
        "id": id,
        "createdBy": {"id": "54d125f7", "displayName": USER},
        "createdDate": "2018-05-03T19:27:12.0437415Z",
        "isBlocking": true,
        "isEnabled": true,
        "isDeleted": false,
        "revision": 1,
        "url": format!("https://example/_apis/policy/configurations/{id}"),
        "type": {"id": "fa4e907d", "displayName": type_name},
        "settings": {
            "minimumApproverCount": 2,
            "creatorVoteCounts": false,
            "allowDownvotes": false,
            "resetOnSourcePush": true,
            "scope": scope
        }
    })
}

pub fn listing(policies: Vec<Value>) -> String {
    json!({"count": policies.len(), "value": policies}).to_string()
}

/// Serve the repository directory and the given policy listing.
pub async fn serve_listing(server: &mut mockito::ServerGuard, policies: Vec<Value>) {
    server
        .mock("GET", REPOSITORIES_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(repositories_body())
        .create_async()
        .await;
    server
        .mock("GET", POLICIES_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(listing(policies))
        .create_async()
        .await;
}
