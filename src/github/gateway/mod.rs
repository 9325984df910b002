//! Gateways for talking to the GitHub API through Octocrab.
//!
//! The trait-based design enables mocking in tests while the Octocrab
//! implementation handles real HTTP requests. Each operation maps onto a
//! single endpoint; all decision logic lives in the components that borrow
//! a gateway.

mod error_mapping;
mod octocrab_impl;

pub use octocrab_impl::OctocrabGateway;

use async_trait::async_trait;

use super::error::OrchestrationError;
use super::locator::{RepositoryLocator, ResourceNumber};
use super::models::{
    ClassifiedResource, CodeCommentPlacement, IssueComment, NewPullRequest, PullRequestRefs,
};

/// Remote API client boundary used by every component.
///
/// Write operations fail fast with
/// [`OrchestrationError::MissingToken`] when the gateway was built without
/// a credential; no unauthenticated write is ever attempted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Fetch the numbered resource and classify it from the payload.
    async fn issue(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
    ) -> Result<ClassifiedResource, OrchestrationError>;

    /// Fetch one page of issues for the repository (10 per page).
    async fn issues_page(
        &self,
        locator: &RepositoryLocator,
        page: u32,
    ) -> Result<Vec<ClassifiedResource>, OrchestrationError>;

    /// Fetch all discussion comments on the numbered resource.
    async fn issue_comments(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
    ) -> Result<Vec<IssueComment>, OrchestrationError>;

    /// Fetch head/base refs from the pull request representation.
    async fn pull_request_refs(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
    ) -> Result<PullRequestRefs, OrchestrationError>;

    /// Create a discussion comment through the issue endpoint.
    async fn create_issue_comment(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
        body: &str,
    ) -> Result<(), OrchestrationError>;

    /// Create a discussion comment through the pull request endpoint.
    async fn create_review_comment(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
        body: &str,
    ) -> Result<(), OrchestrationError>;

    /// Create an inline code comment on a pull request diff.
    async fn create_code_comment(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
        body: &str,
        placement: &CodeCommentPlacement,
    ) -> Result<(), OrchestrationError>;

    /// Open a pull request and return its number.
    async fn create_pull_request(
        &self,
        locator: &RepositoryLocator,
        request: &NewPullRequest,
    ) -> Result<ResourceNumber, OrchestrationError>;

    /// List the numbers of pull requests associated with a commit.
    async fn pull_requests_for_commit(
        &self,
        locator: &RepositoryLocator,
        commit: &str,
    ) -> Result<Vec<u64>, OrchestrationError>;
}
