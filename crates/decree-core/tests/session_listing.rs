mod support;

use std::time::{Duration, Instant};

use decree_core::error::DecreeError;
use decree_core::session::ListingOutcome;
use decree_core::status::NoticeLevel;
use serde_json::json;

use support::{POLICIES_PATH, REPOSITORIES_PATH, policy, repositories_body, serve_listing, session};

#[tokio::test]
async fn load_reconciles_policies_against_directory() {
    let mut server = mockito::Server::new_async().await;
    serve_listing(
        &mut server,
        vec![
            policy(
                7,
                "Minimum reviewers",
                json!([{"repositoryId": "r1", "refName": "refs/heads/main", "matchKind": "Exact"}]),
            ),
            policy(
                8,
                "Comment requirements",
                json!([
                    {"repositoryId": "r2", "refName": "refs/heads/main"},
                    {"repositoryId": "r1", "refName": "refs/heads/main"}
                ]),
            ),
            policy(9, "Build", json!([])),
        ],
    )
    .await;

    let mut session = session(&server);
    let outcome = session.load().await;

    assert_eq!(outcome, ListingOutcome::Loaded { count: 3 });
    assert_eq!(session.total(), 3);
    assert_eq!(session.repositories().len(), 2);

    let reviewers = session.policy(7).unwrap();
    assert_eq!(reviewers.matched_repositories.len(), 1);
    assert_eq!(reviewers.matched_repositories[0].id, "r1");
    assert_eq!(reviewers.matched_repositories[0].name, "Repo1");

    let names: Vec<_> = session
        .policy(8)
        .unwrap()
        .matched_repositories
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["Repo1", "Repo2"]);

    assert!(session.policy(9).unwrap().matched_repositories.is_empty());
}

#[tokio::test]
async fn empty_listing_shows_information_and_clears_previous() {
    let mut server = mockito::Server::new_async().await;
    serve_listing(&mut server, vec![policy(1, "Build", json!([]))]).await;

    let mut session = session(&server);
    assert_eq!(session.load().await, ListingOutcome::Loaded { count: 1 });

    server.reset_async().await;
    server
        .mock("GET", POLICIES_PATH)
        .with_status(200)
        .with_body(r#"{"count": 0, "value": []}"#)
        .create_async()
        .await;

    let outcome = session.refresh_policies().await;

    match outcome {
        ListingOutcome::Empty { count, message } => {
            assert_eq!(count, 0);
            assert!(message.contains("No policies exist in the Fabrikam project"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(session.total(), 0);
    assert!(session.policies().is_empty());

    let now = Instant::now();
    let notice = session.board().status_at(now).unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert!(session.board().error_at(now).is_none());
}

#[tokio::test]
async fn empty_listing_has_no_policy_to_act_on() {
    let mut server = mockito::Server::new_async().await;
    serve_listing(&mut server, vec![]).await;

    let mut session = session(&server);
    assert!(matches!(session.load().await, ListingOutcome::Empty { .. }));

    assert!(matches!(session.details(7), Err(DecreeError::UnknownPolicy(7))));
    assert!(matches!(session.begin_promotion(7), Err(DecreeError::UnknownPolicy(7))));
    assert!(matches!(session.begin_deletion(7), Err(DecreeError::UnknownPolicy(7))));
}

#[tokio::test]
async fn unauthorized_listing_explains_scope_and_permissions() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", REPOSITORIES_PATH)
        .with_status(200)
        .with_body(repositories_body())
        .create_async()
        .await;
    server
        .mock("GET", POLICIES_PATH)
        .with_status(401)
        .create_async()
        .await;

    let mut session = session(&server);
    let outcome = session.load().await;

    let ListingOutcome::Failed { message } = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(message.starts_with("There was an error requesting policies."));
    assert!(message.contains("\"Code\" scope"));
    assert!(message.contains("Jamal Hartnett does not have access to view policies in the Fabrikam project"));
    assert!(message.contains("Contact your Project Administrator"));
    assert!(session.board().error_at(Instant::now()).is_some());
}

#[tokio::test]
async fn listing_waits_for_repository_directory() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", REPOSITORIES_PATH)
        .with_status(500)
        .create_async()
        .await;
    let policies = server
        .mock("GET", POLICIES_PATH)
        .expect(0)
        .create_async()
        .await;

    let mut session = session(&server);
    let outcome = session.load().await;

    assert!(matches!(outcome, ListingOutcome::Failed { .. }));
    policies.assert_async().await;
}

#[tokio::test]
async fn error_message_clears_after_ttl() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", REPOSITORIES_PATH)
        .with_status(500)
        .create_async()
        .await;

    let mut session = session(&server);
    session.load().await;

    let later = Instant::now() + Duration::from_secs(5);
    assert!(session.board().error_at(later).is_none());
}

#[tokio::test]
async fn details_are_raw_record() {
    let mut server = mockito::Server::new_async().await;
    serve_listing(&mut server, vec![policy(7, "Minimum reviewers", json!([]))]).await;

    let mut session = session(&server);
    session.load().await;

    let details = session.details(7).unwrap();
    assert!(details.contains("\"id\": 7"));
    assert!(session.details(99).is_err());
}
