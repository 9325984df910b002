//! Opaque credential handles with deferred plaintext resolution.
//!
//! A [`Credential`] wraps a [`SecretResolver`] so that the plaintext token
//! is produced exactly once per operation, at the point the client is
//! built, and never earlier. Tokens are redacted from `Debug` output and
//! are never serialized or logged.

use std::fmt;
use std::sync::Arc;

use super::error::OrchestrationError;

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::MissingToken`] when the supplied
    /// string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, OrchestrationError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(OrchestrationError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PersonalAccessToken(<redacted>)")
    }
}

/// Resolves an opaque credential handle to its plaintext form.
///
/// Resolution happens at most once per top-level operation and may fail,
/// for example when the secret backend is unreachable.
pub trait SecretResolver: Send + Sync {
    /// Produces the plaintext token.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::SecretResolution`] when the backing
    /// secret cannot be read, or [`OrchestrationError::MissingToken`] when
    /// it resolves to a blank value.
    fn resolve(&self) -> Result<PersonalAccessToken, OrchestrationError>;
}

/// Resolver over a token already held in memory.
pub struct StaticSecretResolver {
    token: PersonalAccessToken,
}

impl StaticSecretResolver {
    /// Wraps an in-memory token.
    #[must_use]
    pub const fn new(token: PersonalAccessToken) -> Self {
        Self { token }
    }
}

impl SecretResolver for StaticSecretResolver {
    fn resolve(&self) -> Result<PersonalAccessToken, OrchestrationError> {
        Ok(self.token.clone())
    }
}

/// Resolver that reads an environment variable at resolution time.
pub struct EnvSecretResolver {
    variable: String,
}

impl EnvSecretResolver {
    /// Creates a resolver for the named environment variable.
    #[must_use]
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }
}

impl SecretResolver for EnvSecretResolver {
    fn resolve(&self) -> Result<PersonalAccessToken, OrchestrationError> {
        let value = std::env::var(&self.variable).map_err(|error| {
            OrchestrationError::SecretResolution {
                message: format!("{variable}: {error}", variable = self.variable),
            }
        })?;
        PersonalAccessToken::new(value)
    }
}

/// Opaque credential handle passed per call.
///
/// The handle carries no plaintext; callers obtain one from whatever secret
/// backend they use and the orchestration layer resolves it internally at
/// first use.
#[derive(Clone)]
pub struct Credential {
    resolver: Arc<dyn SecretResolver>,
}

impl Credential {
    /// Wraps a secret resolver in a credential handle.
    #[must_use]
    pub fn new(resolver: impl SecretResolver + 'static) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    /// Creates a credential over an in-memory token value.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestrationError::MissingToken`] when the value is blank.
    pub fn from_plaintext(value: impl AsRef<str>) -> Result<Self, OrchestrationError> {
        let token = PersonalAccessToken::new(value)?;
        Ok(Self::new(StaticSecretResolver::new(token)))
    }

    /// Resolves the credential to its plaintext token.
    pub(crate) fn resolve(&self) -> Result<PersonalAccessToken, OrchestrationError> {
        self.resolver.resolve()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
