//! Projection of classified resources into unified records.

use super::error::OrchestrationError;
use super::gateway::RemoteGateway;
use super::locator::RepositoryLocator;
use super::models::{ClassifiedResource, UnifiedIssueRecord};

/// Builds [`UnifiedIssueRecord`]s from freshly loaded resources.
pub struct UnifiedRecordBuilder<'g, Gateway>
where
    Gateway: RemoteGateway,
{
    gateway: &'g Gateway,
}

impl<'g, Gateway> UnifiedRecordBuilder<'g, Gateway>
where
    Gateway: RemoteGateway,
{
    /// Creates a builder borrowing the given gateway.
    #[must_use]
    pub const fn new(gateway: &'g Gateway) -> Self {
        Self { gateway }
    }

    /// Projects a resource into a unified record.
    ///
    /// Number, title, and body are copied unconditionally. When the
    /// resource is a pull request, one additional fetch obtains the
    /// head/base refs (the issue payload does not carry them); otherwise
    /// both refs stay empty.
    ///
    /// Known limitation: only the bare ref names are reported, which is
    /// ambiguous for cross-fork pull requests; the fork owner is not
    /// resolved.
    ///
    /// # Errors
    ///
    /// Propagates the ref fetch failure for pull requests.
    pub async fn build(
        &self,
        locator: &RepositoryLocator,
        resource: &ClassifiedResource,
    ) -> Result<UnifiedIssueRecord, OrchestrationError> {
        let mut record = UnifiedIssueRecord {
            number: resource.number.get(),
            title: resource.title.clone(),
            body: resource.body.clone(),
            head_ref: String::new(),
            base_ref: String::new(),
        };

        if resource.is_pull_request() {
            let refs = self.gateway.pull_request_refs(locator, resource.number).await?;
            record.head_ref = refs.head_ref;
            record.base_ref = refs.base_ref;
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::UnifiedRecordBuilder;
    use crate::github::gateway::MockRemoteGateway;
    use crate::github::locator::{RepositoryLocator, ResourceNumber};
    use crate::github::models::{
        ClassifiedResource, PullRequestRefs, ResourceClassification,
    };

    fn resource(number: u64, classification: ResourceClassification) -> ClassifiedResource {
        ClassifiedResource {
            number: ResourceNumber::new(number).expect("fixture number"),
            title: "Add feature".to_owned(),
            body: "desc".to_owned(),
            classification,
        }
    }

    #[tokio::test]
    async fn issue_records_have_empty_refs() {
        let locator = RepositoryLocator::parse("octo/widgets").expect("locator");
        let mut gateway = MockRemoteGateway::new();
        gateway.expect_pull_request_refs().times(0);

        let builder = UnifiedRecordBuilder::new(&gateway);
        let record = builder
            .build(&locator, &resource(5, ResourceClassification::Issue))
            .await
            .expect("build should succeed");

        assert_eq!(record.number, 5);
        assert_eq!(record.title, "Add feature");
        assert!(record.head_ref.is_empty(), "issue head ref must stay empty");
        assert!(record.base_ref.is_empty(), "issue base ref must stay empty");
    }

    #[tokio::test]
    async fn pull_request_records_carry_both_refs() {
        let locator = RepositoryLocator::parse("octo/widgets").expect("locator");
        let number = ResourceNumber::new(6).expect("number");

        let mut gateway = MockRemoteGateway::new();
        gateway
            .expect_pull_request_refs()
            .with(eq(locator.clone()), eq(number))
            .times(1)
            .returning(|_, _| {
                Ok(PullRequestRefs {
                    head_ref: "add_feature".to_owned(),
                    base_ref: "main".to_owned(),
                })
            });

        let builder = UnifiedRecordBuilder::new(&gateway);
        let record = builder
            .build(&locator, &resource(6, ResourceClassification::PullRequest))
            .await
            .expect("build should succeed");

        assert_eq!(record.head_ref, "add_feature");
        assert_eq!(record.base_ref, "main");
    }
}
