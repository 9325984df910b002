//! GitHub orchestration: reference parsing, resource classification,
//! comment routing, and the read facade.
//!
//! The module wraps Octocrab behind a mockable gateway trait, parses
//! repository references, classifies issue-or-pull-request resources from
//! the remote's authoritative flag, and surfaces typed errors so callers
//! can distinguish bad input from bad credentials from remote failures.

pub mod comments;
pub mod credential;
pub mod error;
pub mod gateway;
pub mod intake;
pub mod loader;
pub mod locator;
pub mod models;
pub mod render;
pub mod record;

pub use comments::CommentDispatcher;
pub use credential::{
    Credential, EnvSecretResolver, PersonalAccessToken, SecretResolver, StaticSecretResolver,
};
pub use error::OrchestrationError;
pub use gateway::{OctocrabGateway, RemoteGateway};
pub use intake::IssueIntake;
pub use loader::ResourceLoader;
pub use locator::{RepositoryLocator, RepositoryName, RepositoryOwner, ResourceNumber};
pub use models::{
    ClassifiedResource, CodeCommentPlacement, DiffSide, IssueComment, NewPullRequest,
    PullRequestRefs, ResourceClassification, UnifiedIssueRecord,
};
pub use record::UnifiedRecordBuilder;

#[cfg(test)]
pub use gateway::MockRemoteGateway;
