//! Wire-level data model for the policy and repository REST resources.

pub mod policy;
pub mod repository;

use serde::{Deserialize, Serialize};

pub use policy::{IdentityRef, PolicyConfiguration, PolicySettings, PolicyType, ScopeEntry};
pub use repository::Repository;

/// `{count, value}` envelope shared by the listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub count: usize,
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

impl<T> ListResponse<T> {
    /// True when the backend reported nothing to show.
    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.value.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_tolerates_missing_value() {
        let parsed: ListResponse<Repository> = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn envelope_with_count_but_no_values_is_empty() {
        let parsed: ListResponse<Repository> =
            serde_json::from_str(r#"{"count": 3, "value": []}"#).unwrap();
        assert!(parsed.is_empty());
    }
}
