//! Error types exposed by the GitHub orchestration layer.

use thiserror::Error;

/// Errors surfaced while parsing input or communicating with GitHub.
///
/// Variants fall into three caller-visible groups: fix your input
/// ([`OrchestrationError::InvalidRepository`],
/// [`OrchestrationError::InvalidResourceNumber`],
/// [`OrchestrationError::NotAPullRequest`]), fix your credentials
/// ([`OrchestrationError::MissingToken`],
/// [`OrchestrationError::SecretResolution`],
/// [`OrchestrationError::Authentication`]), and the remote misbehaved
/// (everything else).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrchestrationError {
    /// The repository reference did not resolve to exactly `owner/name`.
    #[error("invalid repository reference: {input}")]
    InvalidRepository {
        /// The reference as supplied by the caller.
        input: String,
    },

    /// The issue or pull request number is not a positive integer.
    #[error("resource number must be a positive integer")]
    InvalidResourceNumber,

    /// The API base URL could not be parsed.
    #[error("API base URL is invalid: {0}")]
    InvalidUrl(String),

    /// A write operation was attempted without a credential.
    #[error("a credential is required for write operations")]
    MissingToken,

    /// The secret backend failed to produce the credential plaintext.
    #[error("credential resolution failed: {message}")]
    SecretResolution {
        /// Detail from the secret resolver.
        message: String,
    },

    /// The credential was rejected by GitHub.
    #[error("GitHub rejected the credential: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// The requested resource does not exist on the remote.
    #[error("resource not found: {message}")]
    NotFound {
        /// GitHub error message returned with the 404 response.
        message: String,
    },

    /// No pull request is associated with the given commit.
    #[error("no pull requests found for commit {commit}")]
    NoPullRequestForCommit {
        /// The commit SHA that was queried.
        commit: String,
    },

    /// GitHub returned a non-authentication, non-404 API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response detail from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A code comment was requested on a resource that is a plain issue.
    #[error("resource {number} is not a pull request")]
    NotAPullRequest {
        /// The resource number that was classified as an issue.
        number: u64,
    },
}
