//! Pull request publication: branch derivation, ephemeral git workspaces,
//! and the strictly ordered publish workflow.

pub mod branch;
pub mod workspace;

pub use branch::derive_branch_name;
pub use workspace::{BranchPushRequest, BranchPusher, Git2BranchPusher, GitWorkspaceError};

use std::path::PathBuf;

use thiserror::Error;

use crate::github::{
    Credential, IssueIntake, NewPullRequest, OrchestrationError, RemoteGateway, RepositoryLocator,
    UnifiedIssueRecord,
};

/// Errors surfaced by the publish workflow.
///
/// Splitting remote API failures from version-control failures lets callers
/// tell "the remote misbehaved" apart from "the git workflow failed".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PublishError {
    /// A remote API or credential step failed.
    #[error(transparent)]
    Remote(#[from] OrchestrationError),

    /// A clone/branch/commit/push step failed.
    #[error(transparent)]
    Git(#[from] GitWorkspaceError),
}

/// Parameters for publishing a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Pull request title; also the branch-name source when no branch is
    /// given.
    pub title: String,
    /// Pull request body.
    pub body: String,
    /// Content tree to commit onto the new branch.
    pub content_dir: PathBuf,
    /// Branch name; derived from the title when empty.
    pub branch: Option<String>,
    /// Base branch the pull request merges onto.
    pub base: String,
}

impl PublishRequest {
    /// Creates a request with the default base branch `main`.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        content_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            content_dir: content_dir.into(),
            branch: None,
            base: "main".to_owned(),
        }
    }

    /// Sets an explicit branch name.
    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Sets the base branch.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    fn branch_name(&self) -> String {
        match self.branch.as_deref() {
            Some(branch) if !branch.is_empty() => branch.to_owned(),
            _ => derive_branch_name(&self.title),
        }
    }
}

/// Publishes pull requests through a gateway and a branch pusher.
///
/// Every step is a hard gate on the previous one succeeding: authenticate,
/// clone, branch, overlay, commit, push, open the pull request, then
/// re-fetch the unified record. A later step never runs after an earlier
/// failure, and nothing is retried.
pub struct PullRequestPublisher<'a, Gateway, Pusher>
where
    Gateway: RemoteGateway,
    Pusher: BranchPusher,
{
    gateway: &'a Gateway,
    pusher: &'a Pusher,
}

impl<'a, Gateway, Pusher> PullRequestPublisher<'a, Gateway, Pusher>
where
    Gateway: RemoteGateway,
    Pusher: BranchPusher,
{
    /// Creates a publisher borrowing the given gateway and pusher.
    #[must_use]
    pub const fn new(gateway: &'a Gateway, pusher: &'a Pusher) -> Self {
        Self { gateway, pusher }
    }

    /// Runs the publish workflow and returns the unified record of the new
    /// pull request.
    ///
    /// Publication is a write, so the credential is mandatory; it
    /// authenticates the version-control context for clone and push. The
    /// borrowed gateway must itself have been built with a credential, or
    /// the pull request creation step fails with
    /// [`OrchestrationError::MissingToken`].
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Git`] when any clone/branch/overlay/commit/
    /// push step fails (including a pre-existing remote branch of the same
    /// name rejecting the push), and [`PublishError::Remote`] for
    /// credential resolution or API failures.
    pub async fn publish(
        &self,
        locator: &RepositoryLocator,
        credential: &Credential,
        request: PublishRequest,
    ) -> Result<UnifiedIssueRecord, PublishError> {
        let token = credential.resolve().map_err(PublishError::Remote)?;
        let branch = request.branch_name();
        tracing::debug!(branch = %branch, base = %request.base, "publishing pull request");

        self.pusher
            .push_branch(BranchPushRequest {
                remote_url: locator.clone_url(),
                branch: branch.clone(),
                content_dir: request.content_dir.clone(),
                token: Some(token),
            })
            .await?;

        let number = self
            .gateway
            .create_pull_request(
                locator,
                &NewPullRequest {
                    title: request.title,
                    body: request.body,
                    head: branch,
                    base: request.base,
                },
            )
            .await?;

        let record = IssueIntake::new(self.gateway).read(locator, number).await?;
        Ok(record)
    }
}
