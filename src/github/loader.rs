//! Resource loading and classification.

use super::error::OrchestrationError;
use super::gateway::RemoteGateway;
use super::locator::{RepositoryLocator, ResourceNumber};
use super::models::ClassifiedResource;

/// Loads a numbered resource and classifies it.
///
/// Classification comes from the authoritative flag on the fetched payload;
/// callers cannot know in advance whether a number denotes an issue or a
/// pull request, so hints are never accepted. Results are never cached;
/// every dispatch derives its classification fresh.
pub struct ResourceLoader<'g, Gateway>
where
    Gateway: RemoteGateway,
{
    gateway: &'g Gateway,
}

impl<'g, Gateway> ResourceLoader<'g, Gateway>
where
    Gateway: RemoteGateway,
{
    /// Creates a loader borrowing the given gateway.
    #[must_use]
    pub const fn new(gateway: &'g Gateway) -> Self {
        Self { gateway }
    }

    /// Fetches the numbered resource and tags it with its classification.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::NotFound`] when the resource does not
    /// exist and [`OrchestrationError::Authentication`] when GitHub rejects
    /// the credential; other gateway failures propagate unchanged.
    pub async fn load(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
    ) -> Result<ClassifiedResource, OrchestrationError> {
        let resource = self.gateway.issue(locator, number).await?;
        tracing::debug!(
            number = number.get(),
            pull_request = resource.is_pull_request(),
            "classified resource"
        );
        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::ResourceLoader;
    use crate::github::gateway::MockRemoteGateway;
    use crate::github::locator::{RepositoryLocator, ResourceNumber};
    use crate::github::models::{ClassifiedResource, ResourceClassification};

    fn issue_fixture(number: u64) -> ClassifiedResource {
        ClassifiedResource {
            number: ResourceNumber::new(number).expect("fixture number"),
            title: "Widget jams".to_owned(),
            body: "It sticks.".to_owned(),
            classification: ResourceClassification::Issue,
        }
    }

    #[tokio::test]
    async fn load_returns_the_gateway_classification() {
        let locator = RepositoryLocator::parse("octo/widgets").expect("locator");
        let number = ResourceNumber::new(5).expect("number");

        let mut gateway = MockRemoteGateway::new();
        gateway
            .expect_issue()
            .with(eq(locator.clone()), eq(number))
            .times(1)
            .returning(|_, n| Ok(issue_fixture(n.get())));

        let loader = ResourceLoader::new(&gateway);
        let resource = loader
            .load(&locator, number)
            .await
            .expect("load should succeed");
        assert_eq!(resource.classification, ResourceClassification::Issue);
        assert_eq!(resource.number.get(), 5);
    }
}
