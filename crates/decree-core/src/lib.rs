//! Decree Core Library
//!
//! Lists the branch policy configurations of a project, resolves which
//! repositories each policy applies to, and promotes repository-scoped
//! policies to project-wide (global) policies through the policy REST API.

pub mod api;
pub mod auth;
pub mod config;
pub mod directory;
pub mod error;
pub mod fetcher;
pub mod messages;
pub mod model;
pub mod reconcile;
pub mod render;
pub mod session;
pub mod status;
pub mod workflow;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigStore, DecreeConfig, TokenConfig};

    // Model
    pub use crate::model::{
        IdentityRef, PolicyConfiguration, PolicySettings, PolicyType, Repository, ScopeEntry,
    };

    // Services
    pub use crate::api::DevOpsClient;
    pub use crate::auth::{AccessToken, EnvTokenProvider, StaticTokenProvider, TokenKind, TokenProvider};
    pub use crate::directory::RepositoryDirectory;
    pub use crate::error::{DecreeError, Result};
    pub use crate::fetcher::{FetchOutcome, PolicyFetcher};
    pub use crate::reconcile::reconcile;

    // Session and workflows
    pub use crate::render::{Column, ContextAction};
    pub use crate::session::{ListingOutcome, Session, WebContext};
    pub use crate::status::{Notice, NoticeLevel, StatusBoard};
    pub use crate::workflow::{
        Deletion, DeletionOutcome, Promotion, PromotionOutcome, PromotionSummary, WorkflowState,
    };
}
