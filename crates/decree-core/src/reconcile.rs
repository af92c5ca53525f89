//! Resolve a policy's scope entries against the repository directory.

use crate::model::{PolicyConfiguration, Repository};

/// Repositories the policy's scope names, in directory order.
///
/// Scope entries without a repository id contribute nothing, and an empty
/// scope yields an empty list: global policies are shown as applying to
/// every repository rather than as an explicit list. Each directory entry
/// appears at most once however many scope entries name it.
pub fn reconcile(policy: &PolicyConfiguration, repositories: &[Repository]) -> Vec<Repository> {
    let scope = &policy.settings.scope;
    if scope.is_empty() {
        return Vec::new();
    }

    repositories
        .iter()
        .filter(|repo| {
            scope
                .iter()
                .filter_map(|entry| entry.repository())
                .any(|id| id == repo.id)
        })
        .cloned()
        .collect()
}

/// Recompute `matched_repositories` for every policy in place.
pub fn reconcile_all(policies: &mut [PolicyConfiguration], repositories: &[Repository]) {
    for policy in policies.iter_mut() {
        policy.matched_repositories = reconcile(policy, repositories);
    }
}
