//! Domain models for issues, pull requests, and comments.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into the public domain types. Classification is read from the
//! `pull_request` marker GitHub places on issue payloads (the remote's
//! authoritative flag), never from caller hints.

use serde::Deserialize;

use super::locator::ResourceNumber;

/// Issue-or-pull-request tag attached to a loaded resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceClassification {
    /// A plain issue.
    Issue,
    /// A pull request (represented by GitHub as a superset of the issue
    /// shape).
    PullRequest,
}

/// A freshly fetched resource together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedResource {
    /// Resource number within the repository.
    pub number: ResourceNumber,
    /// Title text, empty when GitHub omits it.
    pub title: String,
    /// Body text, empty when GitHub omits it.
    pub body: String,
    /// Whether the resource is an issue or a pull request.
    pub classification: ResourceClassification,
}

impl ClassifiedResource {
    /// Returns true when the resource is a pull request.
    #[must_use]
    pub const fn is_pull_request(&self) -> bool {
        matches!(self.classification, ResourceClassification::PullRequest)
    }
}

/// Single normalized record exposed to callers regardless of the
/// underlying resource kind.
///
/// `head_ref`/`base_ref` are populated if and only if the source resource
/// is a pull request. Records are never mutated after construction and are
/// discarded when the call returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnifiedIssueRecord {
    /// Resource number.
    pub number: u64,
    /// Title text.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Head branch ref; empty unless the resource is a pull request.
    pub head_ref: String,
    /// Base branch ref; empty unless the resource is a pull request.
    pub base_ref: String,
}

/// A comment on an issue or pull request discussion thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueComment {
    /// Comment identifier.
    pub id: u64,
    /// Author login, when present.
    pub author: Option<String>,
    /// Comment body text.
    pub body: String,
    /// Creation timestamp (ISO 8601), when present.
    pub created_at: Option<String>,
}

/// Head and base refs fetched from the pull request representation.
///
/// Only the bare ref names are carried; for cross-fork pull requests this
/// omits the fork owner and is ambiguous (carried-forward limitation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRefs {
    /// Head branch ref name.
    pub head_ref: String,
    /// Base branch ref name.
    pub base_ref: String,
}

/// Parameters for opening a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    /// Pull request title.
    pub title: String,
    /// Pull request body.
    pub body: String,
    /// Branch the pull request merges from.
    pub head: String,
    /// Branch the pull request merges onto.
    pub base: String,
}

/// Side of the diff an inline code comment attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffSide {
    /// The deletion side of the diff.
    Left,
    /// The addition side of the diff.
    Right,
}

impl DiffSide {
    /// Returns the API token for this side.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
        }
    }
}

/// Placement of an inline code comment within a pull request diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCommentPlacement {
    /// Commit SHA the comment applies to.
    pub commit: String,
    /// File path within the repository.
    pub path: String,
    /// Diff side the comment attaches to.
    pub side: DiffSide,
    /// 1-based line number in the diff.
    pub line: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiIssue {
    pub(super) number: u64,
    pub(super) title: Option<String>,
    pub(super) body: Option<String>,
    pub(super) pull_request: Option<ApiPullRequestMarker>,
}

impl ApiIssue {
    /// Converts the raw payload, trusting the `pull_request` marker for
    /// classification.
    ///
    /// # Errors
    ///
    /// Returns [`crate::github::OrchestrationError::InvalidResourceNumber`]
    /// when the payload carries a zero number.
    pub(super) fn into_classified(
        self,
    ) -> Result<ClassifiedResource, super::error::OrchestrationError> {
        let classification = if self.pull_request.is_some() {
            ResourceClassification::PullRequest
        } else {
            ResourceClassification::Issue
        };
        Ok(ClassifiedResource {
            number: ResourceNumber::new(self.number)?,
            title: self.title.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            classification,
        })
    }
}

/// Marker object present on issue payloads that are pull requests.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequestMarker {
    #[serde(default)]
    #[expect(dead_code, reason = "presence of the marker is all that matters")]
    pub(super) url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiComment {
    pub(super) id: u64,
    pub(super) body: Option<String>,
    pub(super) user: Option<ApiUser>,
    pub(super) created_at: Option<String>,
}

impl From<ApiComment> for IssueComment {
    fn from(api: ApiComment) -> Self {
        Self {
            id: api.id,
            author: api.user.and_then(|user| user.login),
            body: api.body.unwrap_or_default(),
            created_at: api.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) head: ApiRef,
    pub(super) base: ApiRef,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiRef {
    #[serde(rename = "ref")]
    pub(super) ref_name: Option<String>,
}

impl From<ApiPullRequest> for PullRequestRefs {
    fn from(api: ApiPullRequest) -> Self {
        Self {
            head_ref: api.head.ref_name.unwrap_or_default(),
            base_ref: api.base.ref_name.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCreatedPullRequest {
    pub(super) number: u64,
}
