mod support;

use decree_core::auth::AccessToken;
use decree_core::error::DecreeError;
use decree_core::fetcher::{FetchOutcome, PolicyFetcher};
use serde_json::json;

use support::{POLICIES_PATH, TOKEN, client, listing, policy};

#[tokio::test]
async fn fetch_all_sends_authorization_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", POLICIES_PATH)
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(listing(vec![
            policy(1, "Minimum number of reviewers", json!([{"repositoryId": "r1"}])),
            policy(2, "Build", json!([])),
        ]))
        .create_async()
        .await;

    let client = client(&server);
    let outcome = PolicyFetcher::new(&client)
        .fetch_all(&AccessToken::bearer(TOKEN))
        .await
        .unwrap();

    mock.assert_async().await;
    match outcome {
        FetchOutcome::Found { count, policies } => {
            assert_eq!(count, 2);
            assert_eq!(policies.len(), 2);
            assert_eq!(policies[0].type_name(), "Minimum number of reviewers");
            // matches are derived later, never by the fetcher
            assert!(policies[0].matched_repositories.is_empty());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn personal_access_token_uses_basic_auth() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", POLICIES_PATH)
        .match_header("authorization", "Basic OmFiYw==")
        .with_status(200)
        .with_body(listing(vec![]))
        .create_async()
        .await;

    let client = client(&server);
    PolicyFetcher::new(&client)
        .fetch_all(&AccessToken::pat("abc"))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn empty_listing_is_not_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", POLICIES_PATH)
        .with_status(200)
        .with_body(r#"{"count": 0, "value": []}"#)
        .create_async()
        .await;

    let client = client(&server);
    let outcome = PolicyFetcher::new(&client)
        .fetch_all(&AccessToken::bearer(TOKEN))
        .await
        .unwrap();

    assert_eq!(outcome, FetchOutcome::NoPoliciesFound { count: 0 });
}

#[tokio::test]
async fn unauthorized_is_distinct_from_other_failures() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", POLICIES_PATH)
        .with_status(401)
        .create_async()
        .await;

    let client = client(&server);
    let err = PolicyFetcher::new(&client)
        .fetch_all(&AccessToken::bearer(TOKEN))
        .await
        .unwrap_err();

    assert!(err.is_authorization());
}

#[tokio::test]
async fn server_error_keeps_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", POLICIES_PATH)
        .with_status(503)
        .create_async()
        .await;

    let client = client(&server);
    let err = PolicyFetcher::new(&client)
        .fetch_all(&AccessToken::bearer(TOKEN))
        .await
        .unwrap_err();

    assert!(matches!(err, DecreeError::Http { status, .. } if status.as_u16() == 503));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", POLICIES_PATH)
        .with_status(200)
        .with_body("<html>sign in</html>")
        .create_async()
        .await;

    let client = client(&server);
    let err = PolicyFetcher::new(&client)
        .fetch_all(&AccessToken::bearer(TOKEN))
        .await
        .unwrap_err();

    assert!(matches!(err, DecreeError::Decode { .. }));
}
