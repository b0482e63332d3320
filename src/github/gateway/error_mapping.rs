//! Error mapping helpers for the Octocrab GitHub gateway implementations.

use http::StatusCode;

use crate::github::error::{FailureCause, Operation, TaskFlowError};

/// Checks if a GitHub error status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
pub(super) const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Classifies an Octocrab error into a failure cause.
pub(super) fn failure_cause(error: &octocrab::Error) -> FailureCause {
    if let octocrab::Error::GitHub { source, .. } = error {
        let message = format!(
            "GitHub returned {status} {message}",
            status = source.status_code,
            message = source.message
        );
        return if is_auth_failure(source.status_code) {
            FailureCause::Authentication { message }
        } else {
            FailureCause::Transport { message }
        };
    }

    if matches!(
        error,
        octocrab::Error::Serde { .. } | octocrab::Error::Json { .. }
    ) {
        return FailureCause::Normalization {
            message: error.to_string(),
        };
    }

    if !is_network_error(error) {
        tracing::debug!("treating unclassified octocrab error as transport: {error}");
    }
    FailureCause::Transport {
        message: error.to_string(),
    }
}

pub(super) fn map_octocrab_error(operation: Operation, error: &octocrab::Error) -> TaskFlowError {
    TaskFlowError::operation(operation, failure_cause(error))
}

pub(super) fn client_build_error(error: &octocrab::Error) -> TaskFlowError {
    TaskFlowError::Configuration {
        message: format!("could not build GitHub client: {error}"),
    }
}
