//! Error types for toggle activations.

use thiserror::Error;

/// Failures of the request leg, before a response could be interpreted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request never produced a response.
    #[error("network request failed: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("unexpected response status {0}")]
    Status(u16),
    /// The body was not a toggle response document.
    #[error("response body could not be decoded: {0}")]
    Decode(String),
}

/// Errors surfaced by a toggle activation.
#[derive(Debug, Error)]
pub enum ToggleError {
    /// No request configuration was supplied to the activation.
    #[error("request configuration is missing")]
    ConfigurationMissing,
    /// The button element could not be resolved.
    #[error("toggle element `{element_id}` was not found")]
    ElementMissing {
        /// Id that failed to resolve.
        element_id: String,
    },
    /// The toggle request failed or returned an unreadable body.
    #[error("toggle request to `{url}` failed")]
    RequestFailure {
        /// Endpoint that was called.
        url: String,
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn request_failure_exposes_transport_source() {
        let err = ToggleError::RequestFailure {
            url: "/toggle/1".to_string(),
            source: TransportError::Status(500),
        };
        assert_eq!(err.to_string(), "toggle request to `/toggle/1` failed");
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("unexpected response status 500"));
    }

    #[test]
    fn configuration_and_lookup_errors_have_no_source() {
        assert!(ToggleError::ConfigurationMissing.source().is_none());
        let err = ToggleError::ElementMissing {
            element_id: "x1".to_string(),
        };
        assert_eq!(err.to_string(), "toggle element `x1` was not found");
        assert!(err.source().is_none());
    }
}
