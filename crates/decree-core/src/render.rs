//! Column and menu definitions shared by the presentation frontends.

use chrono::Local;

use crate::model::PolicyConfiguration;

/// Cell text for policies whose scope is empty.
pub const GLOBAL_REPOSITORIES: &str = "All repositories";

/// Columns of the policy grid, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    PolicyType,
    Repos,
    CreatedBy,
    Created,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::PolicyType,
        Column::Repos,
        Column::CreatedBy,
        Column::Created,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::PolicyType => "Policy Type",
            Column::Repos => "Repo(s)",
            Column::CreatedBy => "Created By",
            Column::Created => "Created",
        }
    }

    /// Width in terminal cells.
    pub fn width(self) -> u16 {
        match self {
            Column::PolicyType => 32,
            Column::Repos => 30,
            Column::CreatedBy => 22,
            Column::Created => 20,
        }
    }

    pub fn sortable(self) -> bool {
        !matches!(self, Column::Repos)
    }

    pub fn cell(self, policy: &PolicyConfiguration) -> String {
        match self {
            Column::PolicyType => policy.type_name().to_string(),
            Column::Repos => repositories_cell(policy),
            Column::CreatedBy => policy.created_by.display_name.clone(),
            Column::Created => policy
                .created_date
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        }
    }
}

fn repositories_cell(policy: &PolicyConfiguration) -> String {
    if policy.is_global() {
        return GLOBAL_REPOSITORIES.to_string();
    }
    policy
        .matched_repositories
        .iter()
        .map(|repo| repo.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Row-level actions of the policy grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextAction {
    Open,
    Promote,
    Delete,
}

impl ContextAction {
    pub const ALL: [ContextAction; 3] = [
        ContextAction::Open,
        ContextAction::Promote,
        ContextAction::Delete,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ContextAction::Open => "open",
            ContextAction::Promote => "makeGlobal",
            ContextAction::Delete => "delete",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContextAction::Open => "Open for Edit",
            ContextAction::Promote => "Promote to Global Policy",
            ContextAction::Delete => "Delete Policy",
        }
    }

    /// Destructive actions are set apart in menus.
    pub fn separated(self) -> bool {
        matches!(self, ContextAction::Delete)
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }
}

/// Pretty JSON of the raw record for the details panel.
pub fn details(policy: &PolicyConfiguration) -> String {
    serde_json::to_string_pretty(policy).unwrap_or_else(|e| format!("<unprintable policy: {e}>"))
}
