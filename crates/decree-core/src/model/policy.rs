//! Policy configuration records.
//!
//! Fields the tool does not understand are kept in `extra` maps so that an
//! update sends back the full record exactly as it was received, minus the
//! fields the tool deliberately changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Repository;

/// Identity reference used for `createdBy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reference to the kind of policy (e.g. "Minimum number of reviewers").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyType {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One (repository, branch) pair a policy applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_id: Option<String>,
}

impl ScopeEntry {
    pub fn new(repository_id: Option<&str>, ref_name: Option<&str>) -> Self {
        Self {
            ref_name: ref_name.map(str::to_string),
            match_kind: Some("Exact".to_string()),
            repository_id: repository_id.map(str::to_string),
        }
    }

    /// The repository id, if present and non-empty.
    pub fn repository(&self) -> Option<&str> {
        self.repository_id.as_deref().filter(|id| !id.is_empty())
    }

    /// The branch ref, if present and non-empty.
    pub fn branch(&self) -> Option<&str> {
        self.ref_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Settings block of a policy configuration.
///
/// The approver fields only exist on reviewer policies; other policy types
/// carry their own settings, which land in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_approver_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_vote_counts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_downvotes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_on_source_push: Option<bool>,
    /// Empty scope means the policy applies project-wide.
    #[serde(default)]
    pub scope: Vec<ScopeEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A policy configuration as stored by the policy service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfiguration {
    pub id: i64,
    pub created_by: IdentityRef,
    pub created_date: DateTime<Utc>,
    #[serde(default)]
    pub is_blocking: bool,
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub revision: i64,
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    #[serde(default)]
    pub settings: PolicySettings,
    /// Opaque link metadata; carried through, never inspected.
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Repositories the scope resolves to. Derived locally, never sent.
    #[serde(skip)]
    pub matched_repositories: Vec<Repository>,
}

impl PolicyConfiguration {
    /// A policy with no scope entries applies to the whole project.
    pub fn is_global(&self) -> bool {
        self.settings.scope.is_empty()
    }

    pub fn type_name(&self) -> &str {
        &self.policy_type.display_name
    }

    /// Non-empty branch refs of the scope, in scope order.
    pub fn branches(&self) -> impl Iterator<Item = &str> {
        self.settings.scope.iter().filter_map(ScopeEntry::branch)
    }
}
