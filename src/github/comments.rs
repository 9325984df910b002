//! Comment routing between the issue and pull request endpoints.

use super::error::OrchestrationError;
use super::gateway::RemoteGateway;
use super::loader::ResourceLoader;
use super::locator::{RepositoryLocator, ResourceNumber};
use super::models::CodeCommentPlacement;

/// Routes comment creation to the correct sub-API.
///
/// GitHub exposes distinct comment-creation endpoints for issues and pull
/// requests, and the correct one cannot be chosen without loading the
/// resource first, so every dispatch classifies before it writes.
pub struct CommentDispatcher<'g, Gateway>
where
    Gateway: RemoteGateway,
{
    gateway: &'g Gateway,
}

impl<'g, Gateway> CommentDispatcher<'g, Gateway>
where
    Gateway: RemoteGateway,
{
    /// Creates a dispatcher borrowing the given gateway.
    #[must_use]
    pub const fn new(gateway: &'g Gateway) -> Self {
        Self { gateway }
    }

    /// Posts a discussion comment on the numbered resource.
    ///
    /// The resource is loaded and classified first; pull requests route to
    /// the pull request comment endpoint, issues to the issue endpoint.
    ///
    /// # Errors
    ///
    /// Propagates load failures ([`OrchestrationError::NotFound`],
    /// [`OrchestrationError::Authentication`]) and any write failure from
    /// the chosen endpoint.
    pub async fn post_comment(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
        body: &str,
    ) -> Result<(), OrchestrationError> {
        let resource = ResourceLoader::new(self.gateway).load(locator, number).await?;

        if resource.is_pull_request() {
            self.gateway
                .create_review_comment(locator, number, body)
                .await
        } else {
            self.gateway
                .create_issue_comment(locator, number, body)
                .await
        }
    }

    /// Posts an inline code comment on a pull request diff.
    ///
    /// Inline comments are undefined on plain issues, so a resource
    /// classified as an issue fails the precondition before any write is
    /// attempted.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::NotAPullRequest`] when the resource is
    /// a plain issue; load and write failures propagate unchanged.
    pub async fn post_code_comment(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
        body: &str,
        placement: &CodeCommentPlacement,
    ) -> Result<(), OrchestrationError> {
        let resource = ResourceLoader::new(self.gateway).load(locator, number).await?;

        if !resource.is_pull_request() {
            return Err(OrchestrationError::NotAPullRequest {
                number: number.get(),
            });
        }

        self.gateway
            .create_code_comment(locator, number, body, placement)
            .await
    }
}
