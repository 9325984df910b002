//! Error mapping helpers for the Octocrab gateway implementation.

use http::StatusCode;

use crate::github::error::OrchestrationError;

/// Checks if a GitHub error status indicates an authentication failure.
fn is_auth_failure(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

/// Checks if an octocrab error represents a network/transport issue.
const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> OrchestrationError {
    if let octocrab::Error::GitHub { source, .. } = error {
        if is_auth_failure(source.status_code) {
            return OrchestrationError::Authentication {
                message: format!(
                    "{operation} failed: GitHub returned {status} {message}",
                    status = source.status_code,
                    message = source.message
                ),
            };
        }
        if source.status_code == StatusCode::NOT_FOUND {
            return OrchestrationError::NotFound {
                message: format!("{operation} failed: {message}", message = source.message),
            };
        }
        return OrchestrationError::Api {
            message: format!(
                "{operation} failed with status {status}: {message}",
                status = source.status_code,
                message = source.message
            ),
        };
    }

    if is_network_error(error) {
        return OrchestrationError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    OrchestrationError::Api {
        message: format!("{operation} failed: {error}"),
    }
}
