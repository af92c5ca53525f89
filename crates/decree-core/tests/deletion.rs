mod support;

use decree_core::workflow::{DeletionOutcome, WorkflowState};
use serde_json::json;

use support::{policy, policy_path, serve_listing, session};

#[tokio::test]
async fn confirmed_delete_removes_policy_from_listing() {
    let mut server = mockito::Server::new_async().await;
    serve_listing(
        &mut server,
        vec![policy(7, "Build", json!([])), policy(8, "Minimum reviewers", json!([]))],
    )
    .await;
    let delete = server
        .mock("DELETE", policy_path(7).as_str())
        .match_header("authorization", "Bearer test-token")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let mut session = session(&server);
    session.load().await;

    let mut deletion = session.begin_deletion(7).unwrap();
    assert_eq!(
        deletion.confirmation_text(),
        "Are you sure you want to delete this \"Build\" policy?"
    );
    deletion.confirm().unwrap();
    let outcome = session.delete(&mut deletion).await.unwrap();

    delete.assert_async().await;
    assert_eq!(
        outcome,
        DeletionOutcome::Succeeded {
            message: "Policy was successfully deleted.".to_string()
        }
    );
    assert_eq!(deletion.state(), WorkflowState::Succeeded);
    assert!(session.policy(7).is_none());
    assert_eq!(session.policies().len(), 1);
    assert_eq!(session.total(), 1);
}

#[tokio::test]
async fn missing_policy_reports_not_found() {
    let mut server = mockito::Server::new_async().await;
    serve_listing(&mut server, vec![policy(7, "Build", json!([]))]).await;
    server
        .mock("DELETE", policy_path(7).as_str())
        .with_status(404)
        .create_async()
        .await;

    let mut session = session(&server);
    session.load().await;

    let mut deletion = session.begin_deletion(7).unwrap();
    deletion.confirm().unwrap();
    let outcome = session.delete(&mut deletion).await.unwrap();

    let DeletionOutcome::Failed { message } = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(message.contains("Policy 7 no longer exists in the Fabrikam project"));
    assert!(session.policy(7).is_some());
}

#[tokio::test]
async fn unauthorized_delete_explains_permissions() {
    let mut server = mockito::Server::new_async().await;
    serve_listing(&mut server, vec![policy(7, "Build", json!([]))]).await;
    server
        .mock("DELETE", policy_path(7).as_str())
        .with_status(401)
        .create_async()
        .await;

    let mut session = session(&server);
    session.load().await;

    let mut deletion = session.begin_deletion(7).unwrap();
    deletion.confirm().unwrap();
    let outcome = session.delete(&mut deletion).await.unwrap();

    let DeletionOutcome::Failed { message } = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(message.contains("access to delete policies in the Fabrikam project"));
}

#[tokio::test]
async fn cancelled_delete_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    serve_listing(&mut server, vec![policy(7, "Build", json!([]))]).await;
    let delete = server
        .mock("DELETE", policy_path(7).as_str())
        .expect(0)
        .create_async()
        .await;

    let mut session = session(&server);
    session.load().await;

    let mut deletion = session.begin_deletion(7).unwrap();
    deletion.cancel().unwrap();
    let outcome = session.delete(&mut deletion).await.unwrap();

    delete.assert_async().await;
    assert_eq!(outcome, DeletionOutcome::Cancelled);
    assert!(session.policy(7).is_some());
}
