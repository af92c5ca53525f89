//! User-facing message text.

use crate::error::DecreeError;

pub const PROMOTE_SUCCESS: &str = "Policy was successfully promoted.";
pub const DELETE_SUCCESS: &str = "Policy was successfully deleted.";

const LIST_FAILED: &str = "There was an error requesting policies.";
const REPOSITORIES_FAILED: &str = "There was an error requesting repositories.";
const PROMOTE_FAILED: &str = "There was an error promoting the policy.";
const DELETE_FAILED: &str = "There was an error deleting the policy.";

/// Shown instead of an error when the listing comes back empty.
pub fn no_policies(project: &str) -> String {
    format!(
        "No policies exist in the {project} project, or you don't have access to any policies."
    )
}

/// Remedy appended to every 401 message. `action` is "view", "update", ...
fn authorization_remedy(user: &str, project: &str, action: &str) -> String {
    format!(
        " It could be the case that the Decree extension has not been granted access to the \"Code\" scope. \
It could also be the case that {user} does not have access to {action} policies in the {project} project. \
Contact your Project Administrator for permissions issues."
    )
}

fn describe(base: &str, error: &DecreeError, user: &str, project: &str, action: &str) -> String {
    match error {
        DecreeError::Authorization { .. } => {
            format!("{base}{}", authorization_remedy(user, project, action))
        }
        DecreeError::MissingToken(var) => {
            format!("{base} No access token was found; set the {var} environment variable.")
        }
        _ => base.to_string(),
    }
}

pub fn repositories_failed(error: &DecreeError, user: &str, project: &str) -> String {
    describe(REPOSITORIES_FAILED, error, user, project, "view")
}

pub fn list_failed(error: &DecreeError, user: &str, project: &str) -> String {
    describe(LIST_FAILED, error, user, project, "view")
}

pub fn promote_failed(error: &DecreeError, user: &str, project: &str) -> String {
    describe(PROMOTE_FAILED, error, user, project, "update")
}

pub fn delete_failed(error: &DecreeError, user: &str, project: &str, policy_id: i64) -> String {
    match error {
        DecreeError::NotFound { .. } => format!(
            "{DELETE_FAILED} Policy {policy_id} no longer exists in the {project} project."
        ),
        _ => describe(DELETE_FAILED, error, user, project, "delete"),
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    fn unauthorized() -> DecreeError {
        DecreeError::Authorization {
            url: "http://x".into(),
        }
    }

    #[test]
    fn listing_401_names_scope_grant_and_remedy() {
        let msg = list_failed(&unauthorized(), "Jamal", "Fabrikam");

        assert!(msg.starts_with("There was an error requesting policies."));
        assert!(msg.contains("\"Code\" scope"));
        assert!(msg.contains("Jamal does not have access to view policies in the Fabrikam project"));
        assert!(msg.contains("Contact your Project Administrator"));
    }

    #[test]
    fn promotion_401_mentions_update_permission() {
        let msg = promote_failed(&unauthorized(), "Jamal", "Fabrikam");
        assert!(msg.contains("access to update policies in the Fabrikam project"));
    }

    #[test]
    fn other_failures_are_generic() {
        let err = DecreeError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            url: "http://x".into(),
        };
        assert_eq!(
            promote_failed(&err, "Jamal", "Fabrikam"),
            "There was an error promoting the policy."
        );
    }

    #[test]
    fn delete_not_found_names_policy() {
        let err = DecreeError::NotFound {
            url: "http://x".into(),
        };
        let msg = delete_failed(&err, "Jamal", "Fabrikam", 7);
        assert!(msg.contains("Policy 7 no longer exists in the Fabrikam project"));
    }

    #[test]
    fn empty_listing_names_project() {
        assert!(no_policies("Fabrikam").contains("in the Fabrikam project"));
    }
}
