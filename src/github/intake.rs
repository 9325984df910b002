//! High-level read facade over the loader and record builder.

use super::error::OrchestrationError;
use super::gateway::RemoteGateway;
use super::loader::ResourceLoader;
use super::locator::{RepositoryLocator, ResourceNumber};
use super::models::{IssueComment, UnifiedIssueRecord};
use super::record::UnifiedRecordBuilder;

/// Aggregates read operations over a repository using a gateway.
pub struct IssueIntake<'g, Gateway>
where
    Gateway: RemoteGateway,
{
    gateway: &'g Gateway,
}

impl<'g, Gateway> IssueIntake<'g, Gateway>
where
    Gateway: RemoteGateway,
{
    /// Creates an intake facade borrowing the given gateway.
    #[must_use]
    pub const fn new(gateway: &'g Gateway) -> Self {
        Self { gateway }
    }

    /// Loads a single resource and projects it into a unified record.
    ///
    /// # Errors
    ///
    /// Propagates any failure from the loader or record builder.
    pub async fn read(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
    ) -> Result<UnifiedIssueRecord, OrchestrationError> {
        let resource = ResourceLoader::new(self.gateway).load(locator, number).await?;
        UnifiedRecordBuilder::new(self.gateway)
            .build(locator, &resource)
            .await
    }

    /// Lists one page of issues (10 per page) as unified records.
    ///
    /// Listing stays cheap: no per-item ref fetch is performed, so listed
    /// records always carry empty head/base refs.
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn list(
        &self,
        locator: &RepositoryLocator,
        page: u32,
    ) -> Result<Vec<UnifiedIssueRecord>, OrchestrationError> {
        let resources = self.gateway.issues_page(locator, page).await?;
        Ok(resources
            .into_iter()
            .map(|resource| UnifiedIssueRecord {
                number: resource.number.get(),
                title: resource.title,
                body: resource.body,
                head_ref: String::new(),
                base_ref: String::new(),
            })
            .collect())
    }

    /// Lists all discussion comments on the numbered resource.
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn comments(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
    ) -> Result<Vec<IssueComment>, OrchestrationError> {
        self.gateway.issue_comments(locator, number).await
    }

    /// Returns the number of the first pull request associated with a
    /// commit.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::NoPullRequestForCommit`] when the
    /// commit has no associated pull requests; a zero-value success is
    /// never produced.
    pub async fn pull_request_for_commit(
        &self,
        locator: &RepositoryLocator,
        commit: &str,
    ) -> Result<u64, OrchestrationError> {
        let pulls = self
            .gateway
            .pull_requests_for_commit(locator, commit)
            .await?;
        pulls
            .first()
            .copied()
            .ok_or_else(|| OrchestrationError::NoPullRequestForCommit {
                commit: commit.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::IssueIntake;
    use crate::github::error::OrchestrationError;
    use crate::github::gateway::MockRemoteGateway;
    use crate::github::locator::{RepositoryLocator, ResourceNumber};
    use crate::github::models::{ClassifiedResource, ResourceClassification};

    #[tokio::test]
    async fn read_composes_loader_and_builder() {
        let locator = RepositoryLocator::parse("octo/widgets").expect("locator");
        let number = ResourceNumber::new(4).expect("number");

        let mut gateway = MockRemoteGateway::new();
        gateway.expect_issue().times(1).returning(|_, n| {
            Ok(ClassifiedResource {
                number: n,
                title: "Widget jams".to_owned(),
                body: "It sticks.".to_owned(),
                classification: ResourceClassification::Issue,
            })
        });
        gateway.expect_pull_request_refs().times(0);

        let intake = IssueIntake::new(&gateway);
        let record = intake
            .read(&locator, number)
            .await
            .expect("read should succeed");
        assert_eq!(record.number, 4);
        assert!(record.head_ref.is_empty());
    }

    #[tokio::test]
    async fn commit_without_pull_requests_is_an_error() {
        let locator = RepositoryLocator::parse("octo/widgets").expect("locator");

        let mut gateway = MockRemoteGateway::new();
        gateway
            .expect_pull_requests_for_commit()
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let intake = IssueIntake::new(&gateway);
        let error = intake
            .pull_request_for_commit(&locator, "abc123")
            .await
            .expect_err("lookup should fail");
        assert!(
            matches!(
                &error,
                OrchestrationError::NoPullRequestForCommit { commit } if commit == "abc123"
            ),
            "expected NoPullRequestForCommit, got {error:?}"
        );
    }

    #[tokio::test]
    async fn first_associated_pull_request_wins() {
        let locator = RepositoryLocator::parse("octo/widgets").expect("locator");

        let mut gateway = MockRemoteGateway::new();
        gateway
            .expect_pull_requests_for_commit()
            .times(1)
            .returning(|_, _| Ok(vec![17, 21]));

        let intake = IssueIntake::new(&gateway);
        let number = intake
            .pull_request_for_commit(&locator, "abc123")
            .await
            .expect("lookup should succeed");
        assert_eq!(number, 17);
    }
}
