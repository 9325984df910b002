//! Octocrab-backed implementation of [`RemoteGateway`].

use async_trait::async_trait;
use http::Uri;
use octocrab::{Octocrab, Page};
use serde::Serialize;

use super::RemoteGateway;
use super::error_mapping::map_octocrab_error;
use crate::github::credential::{Credential, PersonalAccessToken};
use crate::github::error::OrchestrationError;
use crate::github::locator::{RepositoryLocator, ResourceNumber};
use crate::github::models::{
    ApiComment, ApiCreatedPullRequest, ApiIssue, ApiPullRequest, ClassifiedResource,
    CodeCommentPlacement, IssueComment, NewPullRequest, PullRequestRefs,
};

/// Number of issues fetched per listing page.
const ISSUES_PER_PAGE: &str = "10";

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

#[derive(Serialize)]
struct CodeCommentBody<'a> {
    body: &'a str,
    commit_id: &'a str,
    path: &'a str,
    side: &'a str,
    line: u32,
}

#[derive(Serialize)]
struct PullRequestBody<'a> {
    title: &'a str,
    head: &'a str,
    base: &'a str,
    body: &'a str,
    maintainer_can_modify: bool,
}

/// Builds an Octocrab client bound to the given API base, authenticated
/// when a token is supplied.
fn build_octocrab_client(
    token: Option<&PersonalAccessToken>,
    api_base: &str,
) -> Result<Octocrab, OrchestrationError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| OrchestrationError::InvalidUrl(error.to_string()))?;

    let builder = Octocrab::builder()
        .base_uri(base_uri)
        .map_err(|error| OrchestrationError::Api {
            message: format!("build client failed: {error}"),
        })?;
    let builder = match token {
        Some(token) => builder.personal_token(token.as_ref()),
        None => builder,
    };
    builder
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}

/// Octocrab-backed gateway.
///
/// Each instance lives for the duration of a single top-level call; nothing
/// is cached across invocations.
pub struct OctocrabGateway {
    client: Octocrab,
    authenticated: bool,
}

impl OctocrabGateway {
    /// Builds an authenticated gateway, resolving the credential exactly
    /// once.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::SecretResolution`] or
    /// [`OrchestrationError::MissingToken`] when the credential cannot be
    /// resolved, and [`OrchestrationError::InvalidUrl`] or
    /// [`OrchestrationError::Api`] when the client cannot be constructed.
    pub fn for_credential(
        credential: &Credential,
        locator: &RepositoryLocator,
    ) -> Result<Self, OrchestrationError> {
        let token = credential.resolve()?;
        let client = build_octocrab_client(Some(&token), locator.api_base().as_str())?;
        Ok(Self {
            client,
            authenticated: true,
        })
    }

    /// Builds an unauthenticated gateway for reads on public resources.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::InvalidUrl`] or
    /// [`OrchestrationError::Api`] when the client cannot be constructed.
    pub fn anonymous(locator: &RepositoryLocator) -> Result<Self, OrchestrationError> {
        let client = build_octocrab_client(None, locator.api_base().as_str())?;
        Ok(Self {
            client,
            authenticated: false,
        })
    }

    /// Rejects writes on gateways built without a credential, before any
    /// network call.
    const fn require_authentication(&self) -> Result<(), OrchestrationError> {
        if self.authenticated {
            Ok(())
        } else {
            Err(OrchestrationError::MissingToken)
        }
    }
}

#[async_trait]
impl RemoteGateway for OctocrabGateway {
    async fn issue(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
    ) -> Result<ClassifiedResource, OrchestrationError> {
        self.client
            .get::<ApiIssue, _, _>(locator.issue_path(number), None::<&()>)
            .await
            .map_err(|error| map_octocrab_error("fetch issue", &error))?
            .into_classified()
    }

    async fn issues_page(
        &self,
        locator: &RepositoryLocator,
        page: u32,
    ) -> Result<Vec<ClassifiedResource>, OrchestrationError> {
        let page_value = page.to_string();
        let query = [
            ("page", page_value.as_str()),
            ("per_page", ISSUES_PER_PAGE),
        ];
        let listing: Page<ApiIssue> = self
            .client
            .get(locator.issues_path(), Some(&query))
            .await
            .map_err(|error| map_octocrab_error("list issues", &error))?;

        listing
            .items
            .into_iter()
            .map(ApiIssue::into_classified)
            .collect()
    }

    async fn issue_comments(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
    ) -> Result<Vec<IssueComment>, OrchestrationError> {
        let page = self
            .client
            .get::<Page<ApiComment>, _, _>(locator.issue_comments_path(number), None::<&()>)
            .await
            .map_err(|error| map_octocrab_error("issue comments", &error))?;

        self.client
            .all_pages(page)
            .await
            .map(|comments| comments.into_iter().map(ApiComment::into).collect())
            .map_err(|error| map_octocrab_error("issue comments", &error))
    }

    async fn pull_request_refs(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
    ) -> Result<PullRequestRefs, OrchestrationError> {
        self.client
            .get::<ApiPullRequest, _, _>(locator.pull_path(number), None::<&()>)
            .await
            .map(ApiPullRequest::into)
            .map_err(|error| map_octocrab_error("fetch pull request", &error))
    }

    async fn create_issue_comment(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
        body: &str,
    ) -> Result<(), OrchestrationError> {
        self.require_authentication()?;
        let _created: ApiComment = self
            .client
            .post(
                locator.issue_comments_path(number),
                Some(&CommentBody { body }),
            )
            .await
            .map_err(|error| map_octocrab_error("create issue comment", &error))?;
        Ok(())
    }

    async fn create_review_comment(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
        body: &str,
    ) -> Result<(), OrchestrationError> {
        self.require_authentication()?;
        let _created: ApiComment = self
            .client
            .post(
                locator.review_comments_path(number),
                Some(&CommentBody { body }),
            )
            .await
            .map_err(|error| map_octocrab_error("create review comment", &error))?;
        Ok(())
    }

    async fn create_code_comment(
        &self,
        locator: &RepositoryLocator,
        number: ResourceNumber,
        body: &str,
        placement: &CodeCommentPlacement,
    ) -> Result<(), OrchestrationError> {
        self.require_authentication()?;
        let request = CodeCommentBody {
            body,
            commit_id: &placement.commit,
            path: &placement.path,
            side: placement.side.as_str(),
            line: placement.line,
        };
        let _created: ApiComment = self
            .client
            .post(locator.review_comments_path(number), Some(&request))
            .await
            .map_err(|error| map_octocrab_error("create code comment", &error))?;
        Ok(())
    }

    async fn create_pull_request(
        &self,
        locator: &RepositoryLocator,
        request: &NewPullRequest,
    ) -> Result<ResourceNumber, OrchestrationError> {
        self.require_authentication()?;
        let body = PullRequestBody {
            title: &request.title,
            head: &request.head,
            base: &request.base,
            body: &request.body,
            maintainer_can_modify: true,
        };
        let created: ApiCreatedPullRequest = self
            .client
            .post(locator.pulls_path(), Some(&body))
            .await
            .map_err(|error| map_octocrab_error("create pull request", &error))?;
        ResourceNumber::new(created.number)
    }

    async fn pull_requests_for_commit(
        &self,
        locator: &RepositoryLocator,
        commit: &str,
    ) -> Result<Vec<u64>, OrchestrationError> {
        let pulls: Vec<ApiCreatedPullRequest> = self
            .client
            .get(locator.commit_pulls_path(commit), None::<&()>)
            .await
            .map_err(|error| map_octocrab_error("pull requests for commit", &error))?;
        Ok(pulls.into_iter().map(|pull| pull.number).collect())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{OctocrabGateway, RemoteGateway};
    use crate::github::credential::Credential;
    use crate::github::error::OrchestrationError;
    use crate::github::locator::{RepositoryLocator, ResourceNumber};
    use crate::github::models::{CodeCommentPlacement, DiffSide, ResourceClassification};

    async fn gateway_against(server: &MockServer) -> (OctocrabGateway, RepositoryLocator) {
        let locator = RepositoryLocator::parse("octo/widgets")
            .expect("reference should parse")
            .with_api_base(server.uri().parse().expect("mock URI should parse"));
        let credential = Credential::from_plaintext("ghp_test").expect("credential");
        let gateway =
            OctocrabGateway::for_credential(&credential, &locator).expect("should build gateway");
        (gateway, locator)
    }

    #[tokio::test]
    async fn issue_fetch_classifies_from_the_payload() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_against(&server).await;

        Mock::given(method("GET"))
            .and(path("/repos/octo/widgets/issues/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "number": 3,
                "title": "Widget jams",
                "body": "It sticks.",
                "pull_request": { "url": "https://api.github.com/repos/octo/widgets/pulls/3" }
            })))
            .mount(&server)
            .await;

        let number = ResourceNumber::new(3).expect("number");
        let resource = gateway
            .issue(&locator, number)
            .await
            .expect("fetch should succeed");

        assert_eq!(
            resource.classification,
            ResourceClassification::PullRequest,
            "marker object should classify as pull request"
        );
        assert_eq!(resource.title, "Widget jams");
    }

    #[tokio::test]
    async fn missing_issue_maps_to_not_found() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_against(&server).await;

        Mock::given(method("GET"))
            .and(path("/repos/octo/widgets/issues/404"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "message": "Not Found" })),
            )
            .mount(&server)
            .await;

        let number = ResourceNumber::new(404).expect("number");
        let error = gateway
            .issue(&locator, number)
            .await
            .expect_err("fetch should fail");
        assert!(
            matches!(error, OrchestrationError::NotFound { .. }),
            "expected NotFound, got {error:?}"
        );
    }

    #[tokio::test]
    async fn rejected_credential_maps_to_authentication() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_against(&server).await;

        Mock::given(method("GET"))
            .and(path("/repos/octo/widgets/issues/1"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({ "message": "Bad credentials" })),
            )
            .mount(&server)
            .await;

        let number = ResourceNumber::new(1).expect("number");
        let error = gateway
            .issue(&locator, number)
            .await
            .expect_err("fetch should fail");
        assert!(
            matches!(error, OrchestrationError::Authentication { .. }),
            "expected Authentication, got {error:?}"
        );
    }

    #[tokio::test]
    async fn issues_page_passes_pagination_query() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_against(&server).await;

        Mock::given(method("GET"))
            .and(path("/repos/octo/widgets/issues"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "number": 11, "title": "Eleventh", "body": "b" }
            ])))
            .mount(&server)
            .await;

        let listing = gateway
            .issues_page(&locator, 2)
            .await
            .expect("listing should succeed");
        assert_eq!(listing.len(), 1);
        let first = listing.first().expect("should have one entry");
        assert_eq!(first.number.get(), 11);
        assert_eq!(first.classification, ResourceClassification::Issue);
    }

    #[tokio::test]
    async fn code_comment_posts_placement_fields() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_against(&server).await;

        Mock::given(method("POST"))
            .and(path("/repos/octo/widgets/pulls/8/comments"))
            .and(body_partial_json(serde_json::json!({
                "body": "use a bolt here",
                "commit_id": "abc123",
                "path": "src/widget.rs",
                "side": "RIGHT",
                "line": 14
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({ "id": 90, "body": "use a bolt here" })),
            )
            .mount(&server)
            .await;

        let number = ResourceNumber::new(8).expect("number");
        let placement = CodeCommentPlacement {
            commit: "abc123".to_owned(),
            path: "src/widget.rs".to_owned(),
            side: DiffSide::Right,
            line: 14,
        };
        gateway
            .create_code_comment(&locator, number, "use a bolt here", &placement)
            .await
            .expect("code comment should post");
    }

    #[tokio::test]
    async fn create_pull_request_returns_the_new_number() {
        let server = MockServer::start().await;
        let (gateway, locator) = gateway_against(&server).await;

        Mock::given(method("POST"))
            .and(path("/repos/octo/widgets/pulls"))
            .and(body_partial_json(serde_json::json!({
                "title": "Add feature",
                "head": "add_feature",
                "base": "main",
                "maintainer_can_modify": true
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({ "number": 42 })),
            )
            .mount(&server)
            .await;

        let request = crate::github::models::NewPullRequest {
            title: "Add feature".to_owned(),
            body: "desc".to_owned(),
            head: "add_feature".to_owned(),
            base: "main".to_owned(),
        };
        let number = gateway
            .create_pull_request(&locator, &request)
            .await
            .expect("creation should succeed");
        assert_eq!(number.get(), 42);
    }

    #[rstest]
    #[tokio::test]
    async fn anonymous_gateway_rejects_writes_before_any_request() {
        let server = MockServer::start().await;
        let locator = RepositoryLocator::parse("octo/widgets")
            .expect("reference should parse")
            .with_api_base(server.uri().parse().expect("mock URI should parse"));
        let gateway = OctocrabGateway::anonymous(&locator).expect("should build gateway");

        let number = ResourceNumber::new(1).expect("number");
        let error = gateway
            .create_issue_comment(&locator, number, "hello")
            .await
            .expect_err("write should fail");
        assert!(
            matches!(error, OrchestrationError::MissingToken),
            "expected MissingToken, got {error:?}"
        );
        assert!(
            server.received_requests().await.unwrap_or_default().is_empty(),
            "no request should reach the server"
        );
    }
}
