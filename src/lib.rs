//! GitHub issue and pull request orchestration.
//!
//! `octoflow` parses repository references, loads issues and pull requests
//! into one unified record shape, routes comments to the correct endpoint
//! for the resource kind, and publishes content trees as pull requests
//! through an ephemeral git workspace.
//!
//! Credentials are opaque handles resolved at the moment a client or git
//! context is built; plaintext tokens are never logged, serialized, or
//! cached between operations.
//!
//! # Example
//!
//! ```no_run
//! use octoflow::github::{
//!     IssueIntake, OctocrabGateway, RepositoryLocator, ResourceNumber,
//! };
//!
//! # async fn run() -> Result<(), octoflow::github::OrchestrationError> {
//! let locator = RepositoryLocator::parse("octo/widgets")?;
//! let gateway = OctocrabGateway::anonymous(&locator)?;
//! let record = IssueIntake::new(&gateway)
//!     .read(&locator, ResourceNumber::new(42)?)
//!     .await?;
//! println!("{title}", title = record.title);
//! # Ok(())
//! # }
//! ```

pub mod github;
pub mod publish;

pub use github::{
    CommentDispatcher, Credential, IssueIntake, OctocrabGateway, OrchestrationError,
    RemoteGateway, RepositoryLocator, ResourceNumber, UnifiedIssueRecord,
};
pub use publish::{
    BranchPusher, Git2BranchPusher, PublishError, PublishRequest, PullRequestPublisher,
};
