//! Repository reference parsing and identity wrappers.

use url::Url;

use super::error::OrchestrationError;

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    fn new(value: &str, input: &str) -> Result<Self, OrchestrationError> {
        if value.is_empty() || value.contains('/') {
            return Err(OrchestrationError::InvalidRepository {
                input: input.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    fn new(value: &str, input: &str) -> Result<Self, OrchestrationError> {
        if value.is_empty() || value.contains('/') {
            return Err(OrchestrationError::InvalidRepository {
                input: input.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Issue or pull request number, always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceNumber(u64);

impl ResourceNumber {
    /// Validates that the number is positive.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::InvalidResourceNumber`] when the value
    /// is zero.
    pub const fn new(value: u64) -> Result<Self, OrchestrationError> {
        if value == 0 {
            return Err(OrchestrationError::InvalidResourceNumber);
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Parsed repository reference with derived API base.
///
/// A locator is derived once per call from a raw reference string and is
/// never persisted.
///
/// # Example
///
/// ```
/// use octoflow::github::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse("https://github.com/octo/widgets.git")
///     .expect("should parse repository reference");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.repository().as_str(), "widgets");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Parses a repository reference into an owner/name pair.
    ///
    /// Accepted forms: `owner/name`, `owner/name.git`, and
    /// `http[s]://github.com/owner/name[.git]`. Stripping happens in a
    /// fixed order (trailing `.git`, then the scheme, then the
    /// `github.com/` host) before the remainder is split on `/`.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::InvalidRepository`] when the stripped
    /// remainder does not split into exactly two non-empty segments. Extra
    /// path segments are rejected, never truncated.
    pub fn parse(input: &str) -> Result<Self, OrchestrationError> {
        let reference = input.trim();
        let reference = reference.strip_suffix(".git").unwrap_or(reference);
        let reference = reference
            .strip_prefix("https://")
            .or_else(|| reference.strip_prefix("http://"))
            .unwrap_or(reference);
        let reference = reference.strip_prefix("github.com/").unwrap_or(reference);

        let mut segments = reference.split('/');
        let (Some(owner_segment), Some(name_segment), None) =
            (segments.next(), segments.next(), segments.next())
        else {
            return Err(OrchestrationError::InvalidRepository {
                input: input.to_owned(),
            });
        };

        let owner = RepositoryOwner::new(owner_segment, input)?;
        let repository = RepositoryName::new(name_segment, input)?;

        Ok(Self {
            api_base: default_api_base()?,
            owner,
            repository,
        })
    }

    /// Replaces the API base URL, for GitHub Enterprise hosts.
    #[must_use]
    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = api_base;
        self
    }

    /// API base URL used for all requests against this repository.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// HTTPS clone URL for the repository.
    #[must_use]
    pub fn clone_url(&self) -> String {
        format!(
            "https://github.com/{}/{}.git",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }

    pub(crate) fn issues_path(&self) -> String {
        format!(
            "/repos/{}/{}/issues",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }

    pub(crate) fn issue_path(&self, number: ResourceNumber) -> String {
        format!("{}/{}", self.issues_path(), number.get())
    }

    pub(crate) fn issue_comments_path(&self, number: ResourceNumber) -> String {
        format!("{}/comments", self.issue_path(number))
    }

    pub(crate) fn pulls_path(&self) -> String {
        format!(
            "/repos/{}/{}/pulls",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }

    pub(crate) fn pull_path(&self, number: ResourceNumber) -> String {
        format!("{}/{}", self.pulls_path(), number.get())
    }

    pub(crate) fn review_comments_path(&self, number: ResourceNumber) -> String {
        format!("{}/comments", self.pull_path(number))
    }

    pub(crate) fn commit_pulls_path(&self, commit: &str) -> String {
        format!(
            "/repos/{}/{}/commits/{commit}/pulls",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }
}

fn default_api_base() -> Result<Url, OrchestrationError> {
    Url::parse("https://api.github.com")
        .map_err(|error| OrchestrationError::InvalidUrl(error.to_string()))
}
